//! # CSV Tables
//!
//! Every pipeline step exchanges data as CSV with a header row. Rows are
//! `serde` structs from `shared-types`; the header comes from field names.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Read every row of a CSV file.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| StoreError::csv(path, e))
}

/// Read a CSV file, or `None` if it does not exist.
pub fn read_csv_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, StoreError> {
    if path.exists() {
        read_csv(path).map(Some)
    } else {
        Ok(None)
    }
}

/// Replace a CSV file with the given rows.
///
/// The rows are written to `<name>.tmp` and renamed into place.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let tmp = tmp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp).map_err(|e| StoreError::csv(&tmp, e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| StoreError::csv(&tmp, e))?;
        }
        writer.flush().map_err(|e| StoreError::io(&tmp, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

/// Append rows to a CSV file, writing the header only if the file is new.
pub fn append_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), StoreError> {
    let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    if is_new {
        return write_csv(path, rows);
    }
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
