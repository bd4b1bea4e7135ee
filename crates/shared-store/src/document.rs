//! JSON documents (calibration models, reports, lineup caches).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::table::{ensure_parent, tmp_path};

/// Read a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::io(path, e),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::json(path, e))
}

/// Write a pretty-printed JSON document, replacing any previous file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let tmp = tmp_path(path);
    let body = serde_json::to_vec_pretty(value).map_err(|e| StoreError::json(path, e))?;
    fs::write(&tmp, body).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_roundtrip_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("doc.json");
        let mut doc = BTreeMap::new();
        doc.insert("slope".to_string(), 0.92);

        write_json(&path, &doc).unwrap();
        let back: BTreeMap<String, f64> = read_json(&path).unwrap();

        assert_eq!(back, doc);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<BTreeMap<String, f64>>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
