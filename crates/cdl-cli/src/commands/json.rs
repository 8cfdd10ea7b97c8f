//! JSON dump command

use anyhow::Result;

use crate::InfoArgs;

pub fn run(args: InfoArgs) -> Result<()> {
    let cdl = super::load_document(&args)?;
    let correction = cdl.first_item()?.first_correction()?;
    println!("{}", correction.to_json()?);
    Ok(())
}
