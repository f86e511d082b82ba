//! JSON snapshot files for whole repository collections.
//!
//! # Responsibility
//! - Serialize a collection as one pretty-printed JSON array.
//! - Read a collection back, treating missing/blank files as "no snapshot".
//!
//! # Invariants
//! - File handles are scoped to each call and closed on every exit path.
//! - Writes overwrite the target file; they never append.
//! - A literal `null` document reads as an empty collection.

use crate::model::entity::EntityId;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type SnapshotResult<T> = Result<T, PersistenceError>;

/// Snapshot read/write failure with the path it happened on.
#[derive(Debug)]
pub enum PersistenceError {
    /// Opening, reading, writing or flushing the file failed.
    Io { path: PathBuf, source: io::Error },
    /// The collection could not be encoded as JSON.
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file content is not a JSON array of the expected records.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file lists the same id more than once.
    DuplicateKey { path: PathBuf, id: EntityId },
}

impl PersistenceError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Encode { path, .. }
            | Self::Decode { path, .. }
            | Self::DuplicateKey { path, .. } => path,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "snapshot_io",
            Self::Encode { .. } => "snapshot_encode",
            Self::Decode { .. } => "snapshot_decode",
            Self::DuplicateKey { .. } => "snapshot_duplicate_id",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "snapshot I/O failed for `{}`: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "failed to encode snapshot `{}`: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "failed to decode snapshot `{}`: {source}", path.display())
            }
            Self::DuplicateKey { path, id } => write!(
                f,
                "snapshot `{}` contains duplicate id {id}",
                path.display()
            ),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::DuplicateKey { .. } => None,
        }
    }
}

/// Writes `entities` to `path` as an indented JSON array.
///
/// # Errors
/// - `Io` when the file cannot be created, written or flushed.
/// - `Encode` when a record fails to serialize.
pub fn write_snapshot<T: Serialize>(path: &Path, entities: &[T]) -> SnapshotResult<()> {
    let started_at = Instant::now();
    let result = write_snapshot_inner(path, entities);
    match &result {
        Ok(()) => info!(
            "event=snapshot_write module=repo status=ok count={} duration_ms={}",
            entities.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=snapshot_write module=repo status=error error_code={} duration_ms={} error={}",
            err.code(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn write_snapshot_inner<T: Serialize>(path: &Path, entities: &[T]) -> SnapshotResult<()> {
    let io_err = |source: io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Encode before touching the file so a bad record never truncates it.
    let mut encoded =
        serde_json::to_vec_pretty(entities).map_err(|source| PersistenceError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    encoded.push(b'\n');

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    writer.write_all(&encoded).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Reads a snapshot written by [`write_snapshot`].
///
/// Returns `Ok(None)` when the file does not exist or holds only whitespace.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `Decode` when the content is not an array of `T`.
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> SnapshotResult<Option<Vec<T>>> {
    let started_at = Instant::now();
    let result = read_snapshot_inner(path);
    match &result {
        Ok(Some(entities)) => info!(
            "event=snapshot_read module=repo status=ok count={} duration_ms={}",
            entities.len(),
            started_at.elapsed().as_millis()
        ),
        Ok(None) => info!("event=snapshot_read module=repo status=empty"),
        Err(err) => error!(
            "event=snapshot_read module=repo status=error error_code={} duration_ms={} error={}",
            err.code(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn read_snapshot_inner<T: DeserializeOwned>(path: &Path) -> SnapshotResult<Option<Vec<T>>> {
    let io_err = |source: io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_err(err)),
    };

    let mut content = String::new();
    BufReader::new(file)
        .read_to_string(&mut content)
        .map_err(io_err)?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    let parsed: Option<Vec<T>> =
        serde_json::from_str(&content).map_err(|source| PersistenceError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(parsed.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::{read_snapshot, write_snapshot, PersistenceError};
    use std::fs;

    #[test]
    fn missing_and_blank_files_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let blank = dir.path().join("blank.json");
        fs::write(&blank, "  \n\t").unwrap();

        assert!(read_snapshot::<u32>(&missing).unwrap().is_none());
        assert!(read_snapshot::<u32>(&blank).unwrap().is_none());
    }

    #[test]
    fn null_document_reads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("null.json");
        fs::write(&path, "null").unwrap();

        assert_eq!(read_snapshot::<u32>(&path).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.json");

        write_snapshot(&path, &[1_u32, 2, 3]).unwrap();
        write_snapshot(&path, &[9_u32]).unwrap();

        assert_eq!(read_snapshot::<u32>(&path).unwrap(), Some(vec![9]));
    }

    #[test]
    fn write_into_missing_directory_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.json");

        let err = write_snapshot(&path, &[1_u32]).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
