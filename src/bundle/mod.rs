//! Read-only access to the embedded asset bundle
//!
//! The bundle is an opaque "open by name" capability. Two implementations ship with
//! the crate:
//! - [`DirBundle`]: entries are files in a read-only directory
//! - [`MemoryBundle`]: entries are byte buffers, e.g. from `include_bytes!`

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, bundle};

/// A readable, seekable stream
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// An opened bundle entry
pub type BundleEntry = Box<dyn ReadSeek>;

/// Opens named entries from a read-only resource bundle
pub trait AssetBundle: Send + Sync {
    /// Open an entry by its exact name
    ///
    /// Fails with `BundleEntryNotFound` when the bundle has no such entry.
    fn open(&self, name: &str) -> Result<BundleEntry>;

    /// Read a whole entry as UTF-8 text
    fn read_to_string(&self, name: &str) -> Result<String> {
        let mut entry = self.open(name)?;
        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|e| bundle::read_failed(name, e))?;
        Ok(text)
    }
}

impl<B: AssetBundle + ?Sized> AssetBundle for Arc<B> {
    fn open(&self, name: &str) -> Result<BundleEntry> {
        (**self).open(name)
    }
}

/// Bundle backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetBundle for DirBundle {
    fn open(&self, name: &str) -> Result<BundleEntry> {
        let path = self.root.join(name);
        match File::open(&path) {
            Ok(file) if path.is_file() => Ok(Box::new(file)),
            Ok(_) => Err(bundle::entry_not_found(name)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(bundle::entry_not_found(name)),
            Err(e) => Err(bundle::read_failed(name, e)),
        }
    }
}

/// Bundle held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    entries: HashMap<String, Arc<[u8]>>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), Arc::from(data.into()));
    }

    /// Builder-style variant of [`MemoryBundle::insert`]
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name, data);
        self
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }
}

impl AssetBundle for MemoryBundle {
    fn open(&self, name: &str) -> Result<BundleEntry> {
        let data = self
            .entries
            .get(name)
            .ok_or_else(|| bundle::entry_not_found(name))?;
        Ok(Box::new(Cursor::new(Arc::clone(data))))
    }
}

/// Bundle view that prepends a fixed prefix to every entry name
#[derive(Debug, Clone)]
pub struct Prefixed<B> {
    inner: B,
    prefix: String,
}

impl<B: AssetBundle> Prefixed<B> {
    pub fn new(inner: B, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }
}

impl<B: AssetBundle> AssetBundle for Prefixed<B> {
    fn open(&self, name: &str) -> Result<BundleEntry> {
        self.inner.open(&format!("{}{}", self.prefix, name))
    }
}
