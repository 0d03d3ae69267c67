// Shared JSON file helpers

use chainnet_core::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

// Helper to attach the offending path to I/O errors
pub(crate) fn map_io_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::Storage(format!("{}: {}", path.display(), err))
}

/// Reads and parses a JSON file; `None` if it does not exist
pub(crate) async fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(map_io_error(path, err)),
    };
    let value = serde_json::from_slice(&bytes)?;
    Ok(Some(value))
}

/// Writes a JSON file via a temporary sibling and a rename
pub(crate) async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| map_io_error(parent, e))?;
    }

    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| map_io_error(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| map_io_error(path, e))?;

    debug!(path = %path.display(), "Wrote JSON file");
    Ok(())
}

/// File-name-safe form of a path component (`bank:noun` -> `bank%3Anoun`)
pub(crate) fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' | ':' | '/' | '\\' | '.' => encoded.push_str(&format!("%{:02X}", c as u32)),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Inverse of [`encode_component`]
pub(crate) fn decode_component(encoded: &str) -> String {
    let mut decoded = String::with_capacity(encoded.len());
    let mut chars = encoded.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            decoded.push(c);
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        match u8::from_str_radix(&hex, 16) {
            Ok(byte) => decoded.push(byte as char),
            Err(_) => {
                decoded.push('%');
                decoded.push_str(&hex);
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_encoding() {
        assert_eq!(encode_component("bank:noun"), "bank%3Anoun");
        assert_eq!(encode_component("a.b/c%"), "a%2Eb%2Fc%25");
        for raw in ["bank:noun", "a.b/c%", "plain", "x:y:z"] {
            assert_eq!(decode_component(&encode_component(raw)), raw);
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<serde_json::Value> =
            read_json_opt(&dir.path().join("absent.json")).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("value.json");
        write_json(&path, &vec![1, 2, 3]).await.unwrap();
        let value: Option<Vec<i32>> = read_json_opt(&path).await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }
}
