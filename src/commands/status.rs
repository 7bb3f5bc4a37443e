//! Status command implementation

use std::path::Path;

use assetprov::provisioner::ResourceStatus;
use assetprov::resource::Location;
use assetprov::version::MarkerState;
use assetprov::{AssetProvisioner, Result};

use crate::cli::StatusArgs;
use crate::commands::helpers;

pub fn run(config_path: Option<&Path>, args: StatusArgs) -> Result<()> {
    let (config, bundle) = helpers::load(config_path)?;
    let use_official = args.channel.use_official(config.official_channel);

    println!("Asset Status:");
    println!("  Bundle: {}", config.bundle_dir.display());
    println!(
        "  Channel: {}",
        if use_official { "official" } else { "custom" }
    );

    let provisioner = AssetProvisioner::new(config, bundle);
    for status in provisioner.status(use_official) {
        println!();
        print_status(&status);
    }

    Ok(())
}

fn print_status(status: &ResourceStatus) {
    let location = match status.descriptor.location() {
        Location::Internal => "internal",
        Location::External => "external",
    };
    println!(
        "{} ({}: {})",
        status.descriptor.name,
        location,
        status.dir.display()
    );

    let file = if status.on_disk.resource_present {
        "present"
    } else {
        "missing"
    };
    println!("  File: {file}");
    println!("  Installed: {}", describe_marker(&status.on_disk.marker));

    match &status.bundled {
        Ok(marker) => println!("  Bundled: {marker}"),
        Err(e) => println!("  Bundled: unavailable ({e})"),
    }

    match &status.pending {
        Ok(true) => println!("  Next run: extract"),
        Ok(false) => println!("  Next run: keep"),
        Err(e) => println!("  Next run: fails ({e})"),
    }
}

fn describe_marker(marker: &MarkerState) -> String {
    match marker {
        MarkerState::Absent => "none".to_string(),
        MarkerState::Unreadable(reason) => format!("unreadable ({reason})"),
        MarkerState::Present(version) => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetprov::VersionMarker;

    #[test]
    fn test_describe_marker() {
        assert_eq!(describe_marker(&MarkerState::Absent), "none");
        assert_eq!(
            describe_marker(&MarkerState::Present(VersionMarker::new("202401"))),
            "202401"
        );
        assert!(describe_marker(&MarkerState::Unreadable("denied".into())).contains("denied"));
    }
}
