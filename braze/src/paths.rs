//! Path manipulation for mapping source trees onto the output tree.

use std::path::{Path, PathBuf};

use crate::Error;

/// Maps a discovered source file path to its output path by replacing the
/// first occurrence of the source root with the output root, then dropping
/// empty and `.` segments while rejoining.
///
/// Callers must only pass paths that are actually prefixed by `source_root`,
/// which holds by construction since discovery is rooted at that directory.
pub fn source_to_output_path(source_path: &Path, source_root: &str, output_root: &str) -> PathBuf {
    let source = source_path.to_string_lossy();
    let replaced = source.replacen(source_root, output_root, 1);
    let rooted = replaced.starts_with('/');
    let joined = replaced
        .split(|c| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<&str>>()
        .join("/");
    if rooted {
        PathBuf::from(format!("/{}", joined))
    } else {
        PathBuf::from(joined)
    }
}

/// Derives a component's lookup name from its file path: the file name with
/// directory stripped, up to the first `.`.
pub fn component_name(path: &Path) -> Result<String, Error> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::CannotExtractFileName(path.to_path_buf()))?;
    // `split` always yields at least one element.
    Ok(file_name.split('.').next().unwrap().to_string())
}
