//! Version markers and their on-disk store
//!
//! A version marker is a short text token stored next to an extracted resource.
//! Official builds use a decimal number; custom builds may use anything.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_error};
use crate::resource::ResourceDescriptor;

/// Opaque version token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionMarker(String);

impl VersionMarker {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the token is an unsigned 64-bit decimal
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Whether `self`, coming from the bundle, should replace `installed`
    ///
    /// Two numeric tokens compare numerically and only a strictly newer bundle wins.
    /// Anything else compares as exact strings and any difference wins.
    pub fn supersedes(&self, installed: &VersionMarker) -> bool {
        match (self.numeric(), installed.numeric()) {
            (Some(bundled), Some(local)) => bundled > local,
            _ => self.0 != installed.0,
        }
    }
}

impl fmt::Display for VersionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionMarker {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// State of a resource's on-disk marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerState {
    /// No marker file exists
    Absent,
    /// A marker file exists but could not be read
    Unreadable(String),
    /// Marker read successfully
    Present(VersionMarker),
}

/// Snapshot of what is on disk for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnDiskState {
    pub marker: MarkerState,
    pub resource_present: bool,
}

/// Reads and writes version markers in one extraction directory
#[derive(Debug, Clone, Copy)]
pub struct VersionStore<'a> {
    dir: &'a Path,
}

impl<'a> VersionStore<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Capture the marker and resource presence for a resource
    pub fn inspect(&self, descriptor: &ResourceDescriptor) -> OnDiskState {
        let marker = match self.read(descriptor) {
            Ok(Some(marker)) => MarkerState::Present(marker),
            Ok(None) => MarkerState::Absent,
            Err(e) => MarkerState::Unreadable(e.to_string()),
        };
        let resource_present = fs::metadata(descriptor.resource_path(self.dir)).is_ok();

        OnDiskState {
            marker,
            resource_present,
        }
    }

    /// Read the marker, `None` when no marker file exists
    pub fn read(&self, descriptor: &ResourceDescriptor) -> Result<Option<VersionMarker>> {
        let path = descriptor.marker_path(self.dir);
        if fs::metadata(&path).is_err() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(|token| Some(VersionMarker::new(token)))
            .map_err(|e| fs_error::marker_unreadable(&path, e))
    }

    /// Replace the marker atomically
    ///
    /// The token goes to a temporary sibling first and is renamed over the old
    /// marker, so readers never observe a half-written token.
    pub fn write(&self, descriptor: &ResourceDescriptor, marker: &VersionMarker) -> Result<()> {
        let path = descriptor.marker_path(self.dir);
        write_atomic(self.dir, &path, marker.as_str().as_bytes())
            .map_err(|e| fs_error::marker_write_failed(&path, e))
    }

    /// Remove a marker that can no longer be trusted
    pub fn discard(&self, descriptor: &ResourceDescriptor) {
        let path = descriptor.marker_path(self.dir);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = result {
            if e.kind() != io::ErrorKind::NotFound {
                log::debug!("Could not remove stale marker {}: {}", path.display(), e);
            }
        }
    }
}

fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{BROWSER_FORWARDER, GEOIP};
    use tempfile::TempDir;

    fn v(token: &str) -> VersionMarker {
        VersionMarker::new(token)
    }

    #[test]
    fn test_numeric_supersedes() {
        assert!(v("5").supersedes(&v("3")));
        assert!(!v("3").supersedes(&v("5")));
        assert!(!v("5").supersedes(&v("5")));
        assert!(v("10").supersedes(&v("9")));
        assert!(!v("0010").supersedes(&v("10")));
    }

    #[test]
    fn test_string_supersedes() {
        assert!(v("custom-b").supersedes(&v("custom-a")));
        assert!(v("custom-a").supersedes(&v("custom-b")));
        assert!(!v("custom").supersedes(&v("custom")));
        assert!(v("3").supersedes(&v("custom")));
        assert!(v("custom").supersedes(&v("3")));
    }

    #[test]
    fn test_tokens_are_compared_verbatim() {
        assert!(v("5").supersedes(&v("5\n")));
        assert_eq!(v("5\n").numeric(), None);
    }

    #[test]
    fn test_u64_bounds() {
        assert_eq!(v("18446744073709551615").numeric(), Some(u64::MAX));
        assert_eq!(v("18446744073709551616").numeric(), None);
        assert_eq!(v("-1").numeric(), None);
    }

    #[test]
    fn test_inspect_empty_dir() {
        let temp = TempDir::new().unwrap();
        let state = VersionStore::new(temp.path()).inspect(&GEOIP);
        assert_eq!(state.marker, MarkerState::Absent);
        assert!(!state.resource_present);
    }

    #[test]
    fn test_write_then_inspect() {
        let temp = TempDir::new().unwrap();
        let store = VersionStore::new(temp.path());
        std::fs::write(temp.path().join("geoip.dat"), b"db").unwrap();
        store.write(&GEOIP, &VersionMarker::from("202401")).unwrap();

        let state = store.inspect(&GEOIP);
        assert_eq!(
            state.marker,
            MarkerState::Present(VersionMarker::from("202401"))
        );
        assert!(state.resource_present);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("geoip.version.txt")).unwrap(),
            "202401"
        );
    }

    #[test]
    fn test_write_overwrites_previous_marker() {
        let temp = TempDir::new().unwrap();
        let store = VersionStore::new(temp.path());
        store.write(&GEOIP, &VersionMarker::from("3")).unwrap();
        store.write(&GEOIP, &VersionMarker::from("5")).unwrap();
        assert_eq!(
            store.read(&GEOIP).unwrap(),
            Some(VersionMarker::from("5"))
        );
    }

    #[test]
    fn test_invalid_utf8_marker_is_unreadable() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("core.version.txt"), [0xff, 0x00, 0xfe]).unwrap();
        let state = VersionStore::new(temp.path()).inspect(&BROWSER_FORWARDER);
        assert!(matches!(state.marker, MarkerState::Unreadable(_)));
    }

    #[test]
    fn test_directory_marker_is_unreadable_and_discardable() {
        let temp = TempDir::new().unwrap();
        let store = VersionStore::new(temp.path());
        std::fs::create_dir(temp.path().join("geoip.version.txt")).unwrap();
        assert!(matches!(
            store.inspect(&GEOIP).marker,
            MarkerState::Unreadable(_)
        ));

        store.discard(&GEOIP);
        assert_eq!(store.inspect(&GEOIP).marker, MarkerState::Absent);
    }

    #[test]
    fn test_discard_missing_marker_is_noop() {
        let temp = TempDir::new().unwrap();
        VersionStore::new(temp.path()).discard(&GEOIP);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let err = VersionStore::new(&missing)
            .write(&GEOIP, &VersionMarker::from("1"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ProvisionError::MarkerWriteFailed { .. }
        ));
    }
}
