//! Command helper utilities

use std::path::Path;

use assetprov::{DirBundle, ProvisionConfig, Result};

/// Load configuration and open the bundle it points at
pub fn load(config_path: Option<&Path>) -> Result<(ProvisionConfig, DirBundle)> {
    let config = ProvisionConfig::load(config_path)?;
    log::debug!(
        "Bundle {}, internal {}, external {}",
        config.bundle_dir.display(),
        config.internal_dir.display(),
        config.external_dir.display()
    );
    let bundle = DirBundle::new(&config.bundle_dir);
    Ok((config, bundle))
}
