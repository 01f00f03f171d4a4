// src/load/mod.rs

pub mod picker;

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Why a load was abandoned before any bytes were handed to the parser.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("path empty: enter a path to a file")]
    EmptyPath,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot open {}: {source}", path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Validate `path` for loading: non-empty, exists, opens for reading.
/// Returns the path as a `PathBuf` on success.
pub fn check_path(path: &str) -> Result<PathBuf, LoadError> {
    open_checked(path).map(|(path, _)| path)
}

/// Run [`check_path`] and read the whole file.
pub fn read_file(path: &str) -> Result<Vec<u8>, LoadError> {
    let (path, mut file) = open_checked(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| LoadError::CannotOpen {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(bytes)
}

fn open_checked(raw: &str) -> Result<(PathBuf, File), LoadError> {
    if raw.trim().is_empty() {
        return Err(LoadError::EmptyPath);
    }
    let path = Path::new(raw).to_path_buf();
    if !path.exists() {
        return Err(LoadError::NotFound(path));
    }
    // a directory opens fine on unix but can't be read as a file
    if path.is_dir() {
        return Err(LoadError::CannotOpen {
            path,
            source: io::Error::other("is a directory"),
        });
    }
    match File::open(&path) {
        Ok(file) => Ok((path, file)),
        Err(source) => Err(LoadError::CannotOpen { path, source }),
    }
}
