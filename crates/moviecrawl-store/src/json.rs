//! JSON array persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Indentation used for the output file.
const INDENT: &[u8] = b"    ";

/// Writes `movies` to `path` as a pretty-printed JSON array.
///
/// Non-ASCII characters are written as-is (UTF-8). Missing parent
/// directories are created and an existing file is overwritten. The
/// write is not atomic.
///
/// # Errors
///
/// Returns an error if directory creation, file creation, serialization,
/// or the final flush fails.
pub fn write_movies<T: Serialize>(path: &Path, movies: &[T]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    movies
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize movies to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = movies.len(), "movies written");
    Ok(())
}

/// Reads a JSON array of movie objects from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a JSON array
/// of objects.
pub fn read_movies(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}
