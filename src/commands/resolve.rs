//! Resolve command implementation

use std::path::Path;

use assetprov::resolver::Source;
use assetprov::{Result, VirtualFileResolver};

use crate::cli::ResolveArgs;
use crate::commands::helpers;

pub fn run(config_path: Option<&Path>, args: ResolveArgs) -> Result<()> {
    let (config, bundle) = helpers::load(config_path)?;
    let resolver = VirtualFileResolver::new(&config, bundle);

    match resolver.locate(&args.path)? {
        Source::Bundle(entry) => println!("bundle: {entry}"),
        Source::Disk(path) => println!("{}", path.display()),
    }

    Ok(())
}
