//! Compressed archive of a collection run

use crate::error::{GatherError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Archive path for a destination directory: `<distribution>-<dir>.tar.gz`
/// next to it
pub fn archive_path(dest: &Path, distribution_id: &str) -> Result<PathBuf> {
    let dir_name = dest
        .file_name()
        .ok_or_else(|| GatherError::Archive(format!("{} has no directory name", dest.display())))?;
    let file_name = format!("{distribution_id}-{}.tar.gz", dir_name.to_string_lossy());
    Ok(dest.with_file_name(file_name))
}

/// Write `dest` as a gzip-compressed tarball rooted at its directory name
pub fn create_archive(dest: &Path, distribution_id: &str) -> Result<PathBuf> {
    let path = archive_path(dest, distribution_id)?;
    if path.exists() {
        return Err(GatherError::Archive(format!("{} already exists", path.display())));
    }

    let root = dest
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_default();
    let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(&root, dest)
        .map_err(|e| GatherError::Archive(format!("failed to add {}: {e}", dest.display())))?;
    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .map_err(|e| GatherError::Archive(format!("failed to write {}: {e}", path.display())))?;

    Ok(path)
}
