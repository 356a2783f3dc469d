use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use log::{debug, info};

use crate::config::file::FileConfig;
use crate::encoder::encode;
use crate::error::{Error, Result};

fn validate_path(path: &Path, config: &FileConfig) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::document("file path must not be empty"));
    }
    let length = path.as_os_str().len();
    if length > config.max_path_length {
        return Err(Error::document(format!(
            "file path too long ({} > {} characters): {}",
            length, config.max_path_length, path.display()
        )));
    }
    Ok(())
}

fn map_io(err: std::io::Error, action: &str, path: &Path) -> Error {
    match err.kind() {
        ErrorKind::PermissionDenied => Error::document(format!("file is not {}: {}", action, path.display())),
        ErrorKind::NotFound => Error::document(format!("file does not exist: {}", path.display())),
        _ => Error::Io(err),
    }
}

/// Read a UTF-8 document, rejecting missing, oversized, empty or blank files.
pub fn read_document<P: AsRef<Path>>(path: P, config: &FileConfig) -> Result<String> {
    let path = path.as_ref();
    validate_path(path, config)?;

    let metadata = fs::metadata(path).map_err(|e| map_io(e, "readable", path))?;
    if !metadata.is_file() {
        return Err(Error::document(format!("not a regular file: {}", path.display())));
    }

    let file_size = metadata.len();
    if file_size > config.max_file_size {
        return Err(Error::document(format!(
            "file too large ({} bytes), exceeds limit of {} bytes: {}",
            file_size, config.max_file_size, path.display()
        )));
    }
    if file_size == 0 {
        return Err(Error::document(format!("file is empty: {}", path.display())));
    }

    let bytes = fs::read(path).map_err(|e| map_io(e, "readable", path))?;
    let content = String::from_utf8(bytes)
        .map_err(|_| Error::document(format!("file is not valid UTF-8: {}", path.display())))?;

    if content.trim().is_empty() {
        return Err(Error::document(format!("file contains only whitespace: {}", path.display())));
    }

    debug!("Read {} bytes from {}", file_size, path.display());
    Ok(content)
}

/// Write the two-decimal rendering of `score` to `path`, without a trailing newline.
pub fn write_result<P: AsRef<Path>>(score: f64, path: P, config: &FileConfig) -> Result<()> {
    let path = path.as_ref();
    validate_path(path, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(Error::document(format!("output directory does not exist: {}", parent.display())));
        }
        if !parent.is_dir() {
            return Err(Error::document(format!("output parent is not a directory: {}", parent.display())));
        }
    }

    let encoded = encode(score)?;
    fs::write(path, &encoded).map_err(|e| map_io(e, "writable", path))?;

    info!("Wrote similarity {} to {}", encoded, path.display());
    Ok(())
}
