//! The fixed set of auxiliary resources shipped in the asset bundle
//!
//! A **resource** is one bundled file that gets extracted to disk. Its sibling
//! **version marker** records which bundle version the extracted copy came from.
//!
//! Replaceable resources live in the external directory, where a user or another
//! installer may drop their own build. The others live in the internal, app-private
//! directory and always follow the official channel.

use std::path::{Path, PathBuf};

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};

/// Entry point of the browser helper, always served straight from the bundle
pub const BROWSER_ENTRY_POINT: &str = "index.html";

/// Where an extracted resource lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// App-private directory
    Internal,
    /// User-writable directory
    External,
}

/// Static description of one managed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// File name, both in the bundle and on disk
    pub name: &'static str,

    /// File name of the sibling version marker
    pub version_marker_name: &'static str,

    /// Whether the user may replace this resource with a custom build
    pub replaceable: bool,
}

/// GeoIP routing database
pub const GEOIP: ResourceDescriptor = ResourceDescriptor {
    name: "geoip.dat",
    version_marker_name: "geoip.version.txt",
    replaceable: true,
};

/// GeoSite routing database
pub const GEOSITE: ResourceDescriptor = ResourceDescriptor {
    name: "geosite.dat",
    version_marker_name: "geosite.version.txt",
    replaceable: true,
};

/// Browser forwarder script, versioned together with the core
pub const BROWSER_FORWARDER: ResourceDescriptor = ResourceDescriptor {
    name: "index.js",
    version_marker_name: "core.version.txt",
    replaceable: false,
};

/// All managed resources, in provisioning order
pub const ALL: [ResourceDescriptor; 3] = [GEOIP, GEOSITE, BROWSER_FORWARDER];

impl ResourceDescriptor {
    /// Look up a managed resource by file name
    pub fn find(name: &str) -> Result<ResourceDescriptor> {
        ALL.iter()
            .copied()
            .find(|descriptor| descriptor.name == name)
            .ok_or_else(|| ProvisionError::UnknownResource {
                name: name.to_string(),
            })
    }

    pub fn location(&self) -> Location {
        if self.replaceable {
            Location::External
        } else {
            Location::Internal
        }
    }

    /// Directory this resource is extracted into
    pub fn target_dir<'a>(&self, config: &'a ProvisionConfig) -> &'a Path {
        match self.location() {
            Location::Internal => &config.internal_dir,
            Location::External => &config.external_dir,
        }
    }

    pub fn resource_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.name)
    }

    pub fn marker_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.version_marker_name)
    }
}
