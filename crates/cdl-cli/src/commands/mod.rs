//! CLI command implementations.

use anyhow::{Context, Result};

use crate::InfoArgs;
use cdl_io::{Cdl, Flavour};

pub mod info;
pub mod json;

/// Builds a container from the common arguments and loads the input file.
pub fn load_document(args: &InfoArgs) -> Result<Cdl> {
    let flavour: Flavour = args.flavour.parse()?;
    let mut cdl = Cdl::new(flavour).with_timebase(&args.timebase);
    if flavour == Flavour::Edl && !cdl.edls_enabled() {
        tracing::warn!("no EDL engine available, the document will yield no items");
    }
    cdl.load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    Ok(cdl)
}
