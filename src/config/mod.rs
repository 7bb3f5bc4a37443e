//! Provisioning configuration
//!
//! Everything the provisioner and the resolver need to know about the directory
//! layout is carried by [`ProvisionConfig`], built once and handed to both at
//! construction time.
//!
//! Discovery order:
//! 1. An explicit path (`--config`)
//! 2. `ASSETPROV_CONFIG`
//! 3. `assetprov.yaml` in the current directory
//! 4. Built-in defaults
//!
//! Directory environment overrides are applied on top of whichever source was used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// Config filename looked up in the current directory
pub const CONFIG_FILE: &str = "assetprov.yaml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "ASSETPROV_CONFIG";

/// Environment override for the internal extraction directory
pub const INTERNAL_DIR_ENV: &str = "ASSETPROV_INTERNAL_DIR";

/// Environment override for the external extraction directory
pub const EXTERNAL_DIR_ENV: &str = "ASSETPROV_EXTERNAL_DIR";

/// Environment override for the bundle directory
pub const BUNDLE_DIR_ENV: &str = "ASSETPROV_BUNDLE_DIR";

const APP_DIR: &str = "assetprov";

/// Directory layout and channel defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Directory holding the read-only asset bundle
    pub bundle_dir: PathBuf,

    /// Prefix prepended to every entry name opened from the bundle
    pub bundle_prefix: String,

    /// App-private extraction directory
    pub internal_dir: PathBuf,

    /// User-writable extraction directory
    pub external_dir: PathBuf,

    /// Follow the official channel for replaceable resources
    pub official_channel: bool,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        let fallback = || PathBuf::from(".").join(format!(".{APP_DIR}"));
        let internal_base = dirs::data_local_dir().map_or_else(fallback, |d| d.join(APP_DIR));
        let external_base = dirs::data_dir().map_or_else(fallback, |d| d.join(APP_DIR));

        Self {
            bundle_dir: PathBuf::from("assets"),
            bundle_prefix: String::new(),
            internal_dir: internal_base.join("files"),
            external_dir: external_base.join("external"),
            official_channel: true,
        }
    }
}

impl ProvisionConfig {
    /// Discover, override and validate the configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(path) => Self::from_path(path)?,
            None => Self::discover()?,
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            log::debug!("Using {}", local.display());
            return Self::from_path(local);
        }

        Ok(Self::default())
    }

    /// Read configuration from a specific YAML file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(config::not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(dir) = env_path(INTERNAL_DIR_ENV) {
            self.internal_dir = dir;
        }
        if let Some(dir) = env_path(EXTERNAL_DIR_ENV) {
            self.external_dir = dir;
        }
        if let Some(dir) = env_path(BUNDLE_DIR_ENV) {
            self.bundle_dir = dir;
        }
    }

    /// Check the directory layout is usable
    pub fn validate(&self) -> Result<()> {
        if self.internal_dir.as_os_str().is_empty() {
            return Err(config::invalid("internal_dir must not be empty"));
        }
        if self.external_dir.as_os_str().is_empty() {
            return Err(config::invalid("external_dir must not be empty"));
        }
        if self.internal_dir == self.external_dir {
            return Err(config::invalid(format!(
                "internal_dir and external_dir must differ (both are {})",
                self.internal_dir.display()
            )));
        }
        Ok(())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let cfg = ProvisionConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.official_channel);
        assert!(cfg.bundle_prefix.is_empty());
    }

    #[test]
    fn test_from_yaml_partial_uses_defaults() {
        let cfg = ProvisionConfig::from_yaml("bundle_prefix: \"v2ray/\"\nofficial_channel: false\n")
            .unwrap();
        assert_eq!(cfg.bundle_prefix, "v2ray/");
        assert!(!cfg.official_channel);
        assert_eq!(cfg.bundle_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_from_yaml_empty_document() {
        let cfg = ProvisionConfig::from_yaml("").unwrap();
        assert_eq!(cfg, ProvisionConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_directories() {
        let cfg = ProvisionConfig {
            internal_dir: PathBuf::from("/app/files"),
            external_dir: PathBuf::from("/sdcard/app"),
            ..ProvisionConfig::default()
        };
        let yaml = cfg.to_yaml().unwrap();
        assert!(yaml.contains("/sdcard/app"));
        assert_eq!(ProvisionConfig::from_yaml(&yaml).unwrap(), cfg);
    }

    #[test]
    fn test_from_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ProvisionConfig::from_path(&temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_from_path_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "internal_dir: [unclosed").unwrap();
        let err = ProvisionConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_validate_rejects_shared_directory() {
        let cfg = ProvisionConfig {
            internal_dir: PathBuf::from("/data"),
            external_dir: PathBuf::from("/data"),
            ..ProvisionConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_directory() {
        let cfg = ProvisionConfig {
            internal_dir: PathBuf::new(),
            ..ProvisionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_explicit_path_with_env_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "internal_dir: /from/file/internal\nexternal_dir: /from/file/external\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var(EXTERNAL_DIR_ENV, temp.path().join("ext"));
        }

        let result = ProvisionConfig::load(Some(&path));

        unsafe {
            std::env::remove_var(EXTERNAL_DIR_ENV);
        }

        let cfg = result.unwrap();
        assert_eq!(cfg.internal_dir, PathBuf::from("/from/file/internal"));
        assert_eq!(cfg.external_dir, temp.path().join("ext"));
    }

    #[test]
    #[serial]
    fn test_load_from_config_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        fs::write(&path, "bundle_dir: /opt/bundle\n").unwrap();

        unsafe {
            std::env::set_var(CONFIG_ENV, &path);
        }

        let result = ProvisionConfig::load(None);

        unsafe {
            std::env::remove_var(CONFIG_ENV);
        }

        assert_eq!(result.unwrap().bundle_dir, PathBuf::from("/opt/bundle"));
    }
}
