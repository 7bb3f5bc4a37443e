//! Copy, decompress and stamp one resource
//!
//! The compressed entry is streamed into the target directory, decompressed next to
//! itself, and only then is the version marker written. A failure anywhere before
//! the marker write leaves the old marker (or none), so the next run decides to
//! extract again.

mod decompress;

pub use decompress::{Decompressor, Gzip, decompressed_path};

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::bundle::AssetBundle;
use crate::error::{Result, fs as fs_error};
use crate::resource::ResourceDescriptor;
use crate::version::{VersionMarker, VersionStore};

/// Extracts resources from a bundle
pub struct Extractor<'a> {
    bundle: &'a dyn AssetBundle,
    decompressor: &'a dyn Decompressor,
}

impl<'a> Extractor<'a> {
    pub fn new(bundle: &'a dyn AssetBundle, decompressor: &'a dyn Decompressor) -> Self {
        Self {
            bundle,
            decompressor,
        }
    }

    /// Name of the compressed bundle entry for a resource
    pub fn entry_name(&self, descriptor: &ResourceDescriptor) -> String {
        format!("{}{}", descriptor.name, self.decompressor.suffix())
    }

    /// Extract `descriptor` into `target_dir` and stamp it with `marker`
    ///
    /// A marker write failure is reported after the resource itself is in place.
    pub fn extract(
        &self,
        descriptor: &ResourceDescriptor,
        target_dir: &Path,
        marker: &VersionMarker,
    ) -> Result<()> {
        fs::create_dir_all(target_dir)
            .map_err(|e| fs_error::extraction_failed(descriptor.name, e))?;

        let entry_name = self.entry_name(descriptor);
        let staged = target_dir.join(&entry_name);
        let mut entry = self.bundle.open(&entry_name)?;
        copy_to(&mut entry, &staged)
            .map_err(|e| fs_error::extraction_failed(descriptor.name, e))?;
        drop(entry);

        let extracted = match self.decompressor.decompress_in_place(&staged) {
            Ok(path) => path,
            Err(e) => {
                let _ = fs::remove_file(&staged);
                return Err(fs_error::extraction_failed(descriptor.name, e));
            }
        };
        log::debug!("Extract >> {}", extracted.display());

        VersionStore::new(target_dir).write(descriptor, marker)
    }
}

fn copy_to(input: &mut dyn io::Read, path: &Path) -> io::Result<()> {
    let mut output = File::create(path)?;
    io::copy(input, &mut output)?;
    output.sync_all()
}
