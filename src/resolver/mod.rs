//! Filename-keyed lookup of extracted assets
//!
//! The proxy engine asks for files by path; only the final component matters.
//! The browser helper entry point is always served from the bundle. Anything else
//! is looked up in the internal directory, then the external one. Nothing is
//! cached, so every call sees the current state of the filesystem.

mod probe;

pub use probe::{Candidate, DirectoryCandidate, OrderedProbe};

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::bundle::{AssetBundle, BundleEntry, Prefixed};
use crate::config::ProvisionConfig;
use crate::error::{Result, fs as fs_error};
use crate::resource::BROWSER_ENTRY_POINT;

/// Read access to files, injected into the engine consuming the assets
pub trait FileSystemAccess: Send + Sync {
    /// Open a file for sequential reads
    fn open_reader(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Open a file for random-access reads
    fn open_seeker(&self, path: &Path) -> io::Result<BundleEntry>;
}

/// Where a logical file is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Entry in the asset bundle
    Bundle(String),
    /// Extracted file on disk
    Disk(PathBuf),
}

/// Resolves logical file names to the bundle or an extraction directory
pub struct VirtualFileResolver {
    bundle: Box<dyn AssetBundle>,
    probe: OrderedProbe,
}

impl VirtualFileResolver {
    /// Resolver over the directories in `config`, reading entries under its bundle prefix
    pub fn new<B: AssetBundle + 'static>(config: &ProvisionConfig, bundle: B) -> Self {
        let probe = OrderedProbe::new()
            .then(DirectoryCandidate::new(&config.internal_dir))
            .then(DirectoryCandidate::new(&config.external_dir));
        Self::with_probe(Prefixed::new(bundle, config.bundle_prefix.clone()), probe)
    }

    /// Resolver with a custom probe order; `bundle` is used as is
    pub fn with_probe<B: AssetBundle + 'static>(bundle: B, probe: OrderedProbe) -> Self {
        Self {
            bundle: Box::new(bundle),
            probe,
        }
    }

    /// Open `logical_path` for reading
    pub fn open_for_read(&self, logical_path: &Path) -> Result<BundleEntry> {
        let name = file_name(logical_path)?;
        if name == BROWSER_ENTRY_POINT {
            return self.bundle.open(name);
        }
        self.probe
            .open(name)
            .map_err(|e| fs_error::resolver_not_found(name, e))
    }

    /// Report where `logical_path` would be served from
    pub fn locate(&self, logical_path: &Path) -> Result<Source> {
        let name = file_name(logical_path)?;
        if name == BROWSER_ENTRY_POINT {
            // Only confirms the entry exists; the stream is dropped immediately
            self.bundle.open(name)?;
            return Ok(Source::Bundle(name.to_string()));
        }
        self.probe
            .locate(name)
            .map(Source::Disk)
            .map_err(|e| fs_error::resolver_not_found(name, e))
    }
}

impl FileSystemAccess for VirtualFileResolver {
    fn open_reader(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let entry = self.open_seeker(path)?;
        Ok(Box::new(entry))
    }

    fn open_seeker(&self, path: &Path) -> io::Result<BundleEntry> {
        Ok(self.open_for_read(path)?)
    }
}

fn file_name(logical_path: &Path) -> Result<&str> {
    logical_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            fs_error::resolver_not_found(
                logical_path.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })
}
