//! Ordered probing of candidate locations
//!
//! Candidates are tried in order and the first one that has the file wins. When
//! none does, the error of the last candidate is returned.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use crate::bundle::BundleEntry;

/// One place a file may live
pub trait Candidate: Send + Sync {
    /// Path of `file_name` in this candidate, if it exists there
    fn locate(&self, file_name: &str) -> io::Result<PathBuf>;

    fn open(&self, file_name: &str) -> io::Result<BundleEntry> {
        let path = self.locate(file_name)?;
        Ok(Box::new(File::open(path)?))
    }
}

/// A directory holding extracted files
#[derive(Debug, Clone)]
pub struct DirectoryCandidate {
    dir: PathBuf,
}

impl DirectoryCandidate {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Candidate for DirectoryCandidate {
    fn locate(&self, file_name: &str) -> io::Result<PathBuf> {
        let path = self.dir.join(file_name);
        if fs::metadata(&path)?.is_file() {
            Ok(path)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a regular file", path.display()),
            ))
        }
    }
}

/// Candidates tried in priority order
#[derive(Default)]
pub struct OrderedProbe {
    candidates: Vec<Box<dyn Candidate>>,
}

impl OrderedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, candidate: impl Candidate + 'static) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    pub fn locate(&self, file_name: &str) -> io::Result<PathBuf> {
        self.first(|candidate| candidate.locate(file_name))
    }

    pub fn open(&self, file_name: &str) -> io::Result<BundleEntry> {
        self.first(|candidate| candidate.open(file_name))
    }

    fn first<T>(&self, mut attempt: impl FnMut(&dyn Candidate) -> io::Result<T>) -> io::Result<T> {
        let mut last_err =
            io::Error::new(io::ErrorKind::NotFound, "no candidate locations configured");
        for candidate in &self.candidates {
            match attempt(candidate.as_ref()) {
                Ok(found) => return Ok(found),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Failing(&'static str);

    impl Candidate for Failing {
        fn locate(&self, _file_name: &str) -> io::Result<PathBuf> {
            Err(io::Error::other(self.0))
        }
    }

    #[test]
    fn test_first_success_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(first.path().join("geoip.dat"), "first").unwrap();
        std::fs::write(second.path().join("geoip.dat"), "second").unwrap();

        let probe = OrderedProbe::new()
            .then(DirectoryCandidate::new(first.path()))
            .then(DirectoryCandidate::new(second.path()));
        assert_eq!(
            probe.locate("geoip.dat").unwrap(),
            first.path().join("geoip.dat")
        );
    }

    #[test]
    fn test_falls_through_to_later_candidate() {
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("geoip.dat"), "second").unwrap();

        let probe = OrderedProbe::new()
            .then(Failing("first failed"))
            .then(DirectoryCandidate::new(second.path()));
        assert!(probe.open("geoip.dat").is_ok());
    }

    #[test]
    fn test_last_error_is_surfaced() {
        let probe = OrderedProbe::new()
            .then(Failing("first failed"))
            .then(Failing("second failed"));
        let err = probe.locate("geoip.dat").unwrap_err();
        assert_eq!(err.to_string(), "second failed");
    }

    #[test]
    fn test_empty_probe_is_not_found() {
        let err = OrderedProbe::new().locate("geoip.dat").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("geoip.dat")).unwrap();
        let err = DirectoryCandidate::new(dir.path())
            .locate("geoip.dat")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
