//! File system-related utilities.
//!
//! Each operation suspends on the underlying I/O, so independent per-file
//! tasks can interleave freely.

use std::io;
use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;

use crate::Error;

/// Read the full contents of a text file.
pub async fn read_text(path: &Path) -> Result<String> {
    Ok(tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Io(path.to_path_buf(), e))?)
}

/// Write text to a file, truncating any existing contents.
pub async fn write_text(path: &Path, contents: &str) -> Result<()> {
    Ok(tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::Io(path.to_path_buf(), e))?)
}

/// Copy a file to the given destination.
pub async fn copy(source: &Path, dest: &Path) -> Result<()> {
    let _ = tokio::fs::copy(source, dest)
        .await
        .map_err(|e| Error::Io(dest.to_path_buf(), e))?;
    Ok(())
}

/// Make sure the given directory exists, creating it and any missing parents
/// if necessary. Creating an already-existing directory is not an error, so
/// concurrent callers targeting the same directory all succeed.
///
/// When `clear_first` is set, the directory is first removed recursively
/// (ignoring "does not exist").
pub async fn ensure_dir(path: &Path, clear_first: bool) -> Result<()> {
    if clear_first {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => debug!("Removed directory tree: {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(path.to_path_buf(), e).into()),
        }
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::Io(path.to_path_buf(), e))?;
    Ok(())
}

/// Expand a glob pattern into the full list of matching paths.
pub fn find_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| Error::FilePattern(pattern.to_string(), e))?;
    let mut files = Vec::new();
    for entry in paths {
        files.push(entry.map_err(Error::Discovery)?);
    }
    Ok(files)
}
