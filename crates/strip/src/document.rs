use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse JSON in {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("Failed to serialize schema: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl SchemaError {
    /// Process exit status for this failure, following `sysexits.h`.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchemaError::NotFound { .. } => 66,
            SchemaError::PermissionDenied { .. } => 77,
            SchemaError::Read { .. } => 74,
            SchemaError::Parse { .. } => 65,
            SchemaError::Serialize(_) => 70,
            SchemaError::Write { .. } => 73,
        }
    }

    fn from_read(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => SchemaError::NotFound { path },
            io::ErrorKind::PermissionDenied => SchemaError::PermissionDenied { path },
            _ => SchemaError::Read { path, source },
        }
    }

    fn from_write(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => SchemaError::PermissionDenied { path },
            _ => SchemaError::Write { path, source },
        }
    }
}

pub fn load(path: &Path) -> Result<Value, SchemaError> {
    let contents = fs::read(path).map_err(|e| SchemaError::from_read(path, e))?;
    serde_json::from_slice(&contents)
        .map_err(|source| SchemaError::Parse { path: path.to_path_buf(), source })
}

/// Compact form: no whitespace between tokens and no trailing newline.
pub fn to_compact_string(document: &Value) -> Result<String, SchemaError> {
    serde_json::to_string(document).map_err(SchemaError::Serialize)
}

/// Replaces `path` with the compact encoding of `document`.
///
/// The bytes go to a temporary file next to `path` which is then renamed over
/// it, so readers see either the old document or the new one. A symlinked
/// `path` is resolved first so the link stays and its target is replaced. The
/// target's permissions carry over when it already exists.
pub fn store(path: &Path, document: &Value) -> Result<(), SchemaError> {
    let encoded = to_compact_string(document)?;
    let write_err = |e: io::Error| SchemaError::from_write(path, e);

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(encoded.as_bytes()).map_err(write_err)?;
    if let Ok(metadata) = fs::metadata(&target) {
        temp_file.as_file().set_permissions(metadata.permissions()).map_err(write_err)?;
    }
    temp_file.as_file().sync_all().map_err(write_err)?;
    temp_file.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(())
}
