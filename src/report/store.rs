//! Download boundary: byte-for-byte persistence of export text.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::utils::validation::sanitize_component;

/// Fixed prefix of stored export files, part of the download naming contract
pub const EXPORT_FILE_PREFIX: &str = "probe_screen_results";

/// Persists export text into a directory under a
/// `<prefix>_<taxid>_<timestamp>.txt` name and reads it back unchanged.
///
/// The store is deliberately dumb: it frames the content with a name and a
/// timestamp and never reinterprets it, so a stored file always reproduces
/// the encoded rows exactly.
#[derive(Debug, Clone)]
pub struct ExportStore {
    dir: PathBuf,
}

impl ExportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store writes into
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write export text and return the stored path.
    ///
    /// The species taxid is sanitized to filename-safe characters; the
    /// timestamp is UTC, second precision.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, text: &str, species_taxid: &str) -> io::Result<PathBuf> {
        let taxid = sanitize_component(species_taxid);
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let path = self
            .dir
            .join(format!("{EXPORT_FILE_PREFIX}_{taxid}_{stamp}.txt"));

        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "Stored export text");

        Ok(path)
    }

    /// Read previously stored export text back, unchanged.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read.
    pub fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
