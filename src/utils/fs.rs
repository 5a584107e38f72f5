use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::{ConverterError, ConverterResult, is_supported_source};

/// Get file size in bytes
pub fn get_file_size(path: impl AsRef<Path>) -> ConverterResult<u64> {
    fs::metadata(path.as_ref())
        .map(|m| m.len())
        .map_err(|e| ConverterError::io(format!("Failed to get file size: {}", e)))
}

/// Creates `path` (and its parents) unless this is a dry run.
///
/// A folder that already exists is not an error. Fails when the path exists
/// but is not a directory, or when creation fails.
pub fn create_and_check_folder(path: impl AsRef<Path>, dry_run: bool) -> ConverterResult<PathBuf> {
    let path = path.as_ref();
    if dry_run {
        return Ok(path.to_path_buf());
    }

    if path.exists() && !path.is_dir() {
        return Err(ConverterError::io(format!(
            "Could not create {}: a file with that name exists", path.display()
        )));
    }

    fs::create_dir_all(path).map_err(|e| {
        ConverterError::io(format!("Could not create {}: {}", path.display(), e))
    })?;

    Ok(path.to_path_buf())
}

/// File name without its extension, used as the base name of every output
pub fn file_stem(path: impl AsRef<Path>) -> ConverterResult<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConverterError::format(
            format!("Cannot derive a base name from {}", path.display())
        ))
}

/// Lists the supported source images directly inside `dir`, sorted by path.
///
/// Not recursive; sub-directories and unsupported extensions are ignored.
pub fn list_source_files(dir: impl AsRef<Path>) -> ConverterResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && is_supported_source(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract just the file name from a path for log output
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
