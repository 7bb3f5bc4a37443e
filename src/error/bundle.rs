//! Asset bundle errors

use super::ProvisionError;

/// Creates a bundle entry not found error
pub fn entry_not_found(name: impl Into<String>) -> ProvisionError {
    ProvisionError::BundleEntryNotFound { name: name.into() }
}

/// Creates a bundle read failed error
pub fn read_failed(name: impl Into<String>, reason: impl ToString) -> ProvisionError {
    ProvisionError::BundleReadFailed {
        name: name.into(),
        reason: reason.to_string(),
    }
}
