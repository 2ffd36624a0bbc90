//! Reading and atomically rewriting the catalog JSON file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::models::Book;

use super::error::{Result, StoreError};

/// What `load_books` found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The file parsed as a JSON array of books (possibly an empty one).
    Loaded(Vec<Book>),
    /// Nothing usable was on disk, so the catalog starts empty.
    Empty(EmptyReason),
}

impl LoadOutcome {
    pub fn into_books(self) -> Vec<Book> {
        match self {
            LoadOutcome::Loaded(books) => books,
            LoadOutcome::Empty(_) => Vec::new(),
        }
    }
}

/// Why a load produced an empty catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    Missing,
    /// The file exists but is not a JSON array of book objects. Carries the
    /// parser message.
    Malformed(String),
}

/// Read the catalog file. Only I/O failures other than "not found" are errors.
pub fn load_books(path: &Path) -> Result<LoadOutcome> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(LoadOutcome::Empty(EmptyReason::Missing));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<Vec<Book>>(&data) {
        Ok(books) => Ok(LoadOutcome::Loaded(books)),
        Err(err) => Ok(LoadOutcome::Empty(EmptyReason::Malformed(err.to_string()))),
    }
}

/// Replace the catalog file with `books`, pretty-printed.
///
/// The JSON goes to a temporary file in the same directory which is then
/// renamed over the target, so an interrupted save leaves the previous
/// catalog intact.
pub fn save_books(path: &Path, books: &[Book]) -> Result<()> {
    let json = serde_json::to_string_pretty(books)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| StoreError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(json.as_bytes()).map_err(write_err)?;
    temp_file.write_all(b"\n").map_err(write_err)?;
    temp_file.flush().map_err(write_err)?;
    // The rename only protects the old catalog if the new bytes are on disk.
    temp_file.as_file().sync_all().map_err(write_err)?;
    temp_file.persist(path).map_err(|err| write_err(err.error))?;

    Ok(())
}
