//! Error types and handling for assetprov
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Asset bundle errors
//! - [`fs`]: Marker, extraction and lookup errors
//! - [`config`]: Configuration errors

pub mod bundle;
pub mod config;
pub mod fs;


use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for provisioning and lookup operations
#[derive(Error, Diagnostic, Debug)]
pub enum ProvisionError {
    // Bundle errors
    #[error("Entry '{name}' not found in asset bundle")]
    #[diagnostic(
        code(assetprov::bundle::entry_not_found),
        help("The application bundle is incomplete; reinstall it or check `bundle_prefix`")
    )]
    BundleEntryNotFound { name: String },

    #[error("Failed to read bundle entry '{name}': {reason}")]
    #[diagnostic(code(assetprov::bundle::read_failed))]
    BundleReadFailed { name: String, reason: String },

    // Resource errors
    #[error("Unknown resource: {name}")]
    #[diagnostic(
        code(assetprov::resource::unknown),
        help("Known resources: geoip.dat, geosite.dat, index.js")
    )]
    UnknownResource { name: String },

    // Marker and extraction errors
    #[error("Version marker unreadable: {path}: {reason}")]
    #[diagnostic(code(assetprov::fs::marker_unreadable))]
    VersionMarkerUnreadable { path: String, reason: String },

    #[error("Failed to extract '{resource}': {reason}")]
    #[diagnostic(
        code(assetprov::fs::extraction_failed),
        help("Extraction is retried on the next run")
    )]
    ExtractionFailed { resource: String, reason: String },

    #[error("Failed to write version marker: {path}: {reason}")]
    #[diagnostic(
        code(assetprov::fs::marker_write_failed),
        help("The resource was extracted; the marker is rewritten on the next run")
    )]
    MarkerWriteFailed { path: String, reason: String },

    // Lookup errors
    #[error("No extracted copy of '{name}' found")]
    #[diagnostic(
        code(assetprov::resolver::not_found),
        help("Run 'assetprov provision' to extract bundled assets")
    )]
    ResolverNotFound {
        name: String,
        #[source]
        source: io::Error,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(assetprov::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(assetprov::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(assetprov::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(assetprov::config::invalid))]
    ConfigInvalid { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(assetprov::fs::io_error))]
    IoError { message: String },
}

impl ProvisionError {
    /// Whether this error means "the requested file does not exist anywhere"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProvisionError::BundleEntryNotFound { .. } | ProvisionError::ResolverNotFound { .. }
        )
    }
}

impl From<io::Error> for ProvisionError {
    fn from(err: io::Error) -> Self {
        ProvisionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ProvisionError {
    fn from(err: serde_yaml::Error) -> Self {
        ProvisionError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Maps onto the standard I/O error kinds expected by filesystem consumers
impl From<ProvisionError> for io::Error {
    fn from(err: ProvisionError) -> Self {
        let kind = if err.is_not_found() {
            io::ErrorKind::NotFound
        } else {
            io::ErrorKind::Other
        };
        io::Error::new(kind, err)
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ProvisionError>;
