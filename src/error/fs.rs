//! Marker, extraction and lookup errors

use std::io;
use std::path::Path;

use super::ProvisionError;

/// Creates a version marker unreadable error
pub fn marker_unreadable(path: &Path, reason: impl ToString) -> ProvisionError {
    ProvisionError::VersionMarkerUnreadable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a version marker write failed error
pub fn marker_write_failed(path: &Path, reason: impl ToString) -> ProvisionError {
    ProvisionError::MarkerWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an extraction failed error
pub fn extraction_failed(resource: impl Into<String>, reason: impl ToString) -> ProvisionError {
    ProvisionError::ExtractionFailed {
        resource: resource.into(),
        reason: reason.to_string(),
    }
}

/// Creates a resolver not found error wrapping the last probe failure
pub fn resolver_not_found(name: impl Into<String>, source: io::Error) -> ProvisionError {
    ProvisionError::ResolverNotFound {
        name: name.into(),
        source,
    }
}
