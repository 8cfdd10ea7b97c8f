//! Item listing command

use anyhow::Result;

use crate::InfoArgs;

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let cdl = super::load_document(&args)?;

    if verbose {
        println!(
            "{}: {} item(s), {:?}",
            args.input.display(),
            cdl.len(),
            cdl.item_type()
        );
    }

    println!("{cdl}");
    Ok(())
}
