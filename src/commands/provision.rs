//! Provision command implementation

use std::path::Path;

use assetprov::{AssetProvisioner, ExtractionOutcome, Result};

use crate::cli::ProvisionArgs;
use crate::commands::helpers;

pub fn run(config_path: Option<&Path>, args: ProvisionArgs) -> Result<()> {
    let (config, bundle) = helpers::load(config_path)?;
    let use_official = args.channel.use_official(config.official_channel);
    let provisioner = AssetProvisioner::new(config, bundle);

    if let Some(name) = args.only.as_deref() {
        let outcome = provisioner.provision_resource(name, args.force, use_official)?;
        print_outcome(name, &outcome);
        return Ok(());
    }

    let report = provisioner.provision_all_with(use_official, args.force);
    for (name, outcome) in &report.entries {
        print_outcome(name, outcome);
    }

    // Failures are already logged; a partial run is still a usable run
    if report.failed() > 0 {
        println!(
            "\n{} of {} assets failed and will be retried on the next run.",
            report.failed(),
            report.entries.len()
        );
    }

    Ok(())
}

fn print_outcome(name: &str, outcome: &ExtractionOutcome) {
    println!("  {name}: {outcome}");
}
