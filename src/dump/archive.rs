//! Staging directory and `.tar.gz` packing.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use super::files::{copy_file, mkdir};
use crate::error::Result;

/// Name the run log gets inside the archive.
pub const SELF_LOG_NAME: &str = "self.log";

/// Scratch directory the dump is assembled in.
///
/// Removed when dropped, whatever happened in between.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create `envdmp-<user>-XXXX` in the system temp dir.
    pub fn new(user: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("envdmp-{}-", user))
            .tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a (not yet created) subdirectory.
    pub fn subdir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Copy the run log in as [`SELF_LOG_NAME`] if it exists.
    pub fn include_log(&self, log_file: Option<&Path>) -> Result<bool> {
        match log_file {
            Some(path) if path.is_file() => {
                copy_file(path, &self.dir.path().join(SELF_LOG_NAME))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Pack the staging directory into a gzip'd tarball at `output`.
    ///
    /// Entries live under a single top-level directory named after the
    /// staging directory.
    pub fn pack(&self, output: &Path) -> Result<PathBuf> {
        if let Some(parent) = output.parent() {
            mkdir(parent)?;
        }

        let root_name = self
            .dir
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "envdump".to_string());

        let file = File::create(output)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_dir_all(&root_name, self.dir.path())?;
        builder.into_inner()?.finish()?;

        tracing::debug!("Wrote archive {}", output.display());
        Ok(output.to_path_buf())
    }
}
