// crates/matcha-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression, HTTP) and delegates the
//! payload to the tolerant JSON parser. These functions report errors; the
//! [`crate::store::EntryStore`] turns a failed load into an empty store.

use crate::error::{DirectoryError, Result};
use crate::model::convert::entries_from_raw;
use crate::model::Entry;
use crate::raw::split_records;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "fetch")]
mod fetch;
#[cfg(feature = "fetch")]
pub use fetch::fetch_entries;

pub const DEFAULT_DATASET_FILENAME: &str = "data.json";

/// Directory searched when no data path is given.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Parse a JSON document into entries. Only a syntactically broken document
/// is an error; bad records and fields are degraded.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    Ok(entries_from_document(doc))
}

pub fn read_entries(reader: impl Read) -> Result<Vec<Entry>> {
    let doc: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(entries_from_document(doc))
}

fn entries_from_document(doc: serde_json::Value) -> Vec<Entry> {
    if !doc.is_array() {
        log::warn!("entry document is not an array");
    }
    let (raw, skipped) = split_records(doc);
    if skipped > 0 {
        log::warn!("skipped {skipped} non-object record(s)");
    }
    entries_from_raw(raw)
}

/// Load entries from a `.json` (or, with `compact`, `.json.gz`) file.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let reader = open_stream(path)?;
    let entries = read_entries(reader)?;
    log::info!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Opens a file, buffers it, and wraps `.gz` files in a Gzip decoder.
/// Returns a generic Reader so the caller doesn't care about the compression.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DirectoryError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        return gunzip(reader, path);
    }
    Ok(Box::new(reader))
}

#[cfg(feature = "compact")]
fn gunzip(reader: BufReader<File>, _path: &Path) -> Result<Box<dyn Read>> {
    use flate2::read::GzDecoder;
    Ok(Box::new(GzDecoder::new(reader)))
}

#[cfg(not(feature = "compact"))]
fn gunzip(_reader: BufReader<File>, path: &Path) -> Result<Box<dyn Read>> {
    Err(DirectoryError::NotFound(format!(
        "{} is gzip-compressed; enable the `compact` feature",
        path.display()
    )))
}
