//! Decompression of staged bundle entries

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tempfile::NamedTempFile;

/// Turns a compressed file into its decompressed sibling
pub trait Decompressor: Send + Sync {
    /// Suffix carried by compressed entries, including the dot
    fn suffix(&self) -> &str;

    /// Decompress `path` and return the path of the result
    ///
    /// The result lands next to `path` under the same name minus [`Decompressor::suffix`].
    /// The compressed input is consumed.
    fn decompress_in_place(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Strip `suffix` from the file name of `path`
pub fn decompressed_path(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(suffix))
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} does not end with {}", path.display(), suffix),
            )
        })?;
    Ok(path.with_file_name(name))
}

/// gzip decompressor
#[derive(Debug, Clone, Copy, Default)]
pub struct Gzip;

impl Decompressor for Gzip {
    fn suffix(&self) -> &str {
        ".gz"
    }

    fn decompress_in_place(&self, path: &Path) -> io::Result<PathBuf> {
        let target = decompressed_path(path, self.suffix())?;
        let dir = target.parent().unwrap_or_else(|| Path::new("."));

        let input = File::open(path)?;
        let mut decoder = MultiGzDecoder::new(BufReader::new(input));
        let mut output = NamedTempFile::new_in(dir)?;
        io::copy(&mut decoder, &mut output)?;
        output.as_file().sync_all()?;
        output.persist(&target).map_err(|e| e.error)?;

        fs::remove_file(path)?;
        Ok(target)
    }
}
