//! Storage utilities for Tally Computer apps
//!
//! Per-app config directory and JSON documents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read and parse a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a JSON document, creating parent directories as needed.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Load a document, falling back to `T::default()` when the file is missing
/// or unreadable. Malformed files are logged, never fatal.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return T::default();
    }
    match load_json(path) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable config");
            T::default()
        }
    }
}

/// Get the config directory for Tally Computer apps
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "tallycomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        width: u32,
        name: String,
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let prefs = Prefs { width: 12, name: "tape".into() };

        save_json(&prefs, &path).unwrap();
        let loaded: Prefs = load_json(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Prefs = load_or_default(&dir.path().join("absent.json"));
        assert_eq!(loaded, Prefs::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_json::<Prefs>(&path), Err(StorageError::Json(_))));
        let loaded: Prefs = load_or_default(&path);
        assert_eq!(loaded, Prefs::default());
    }

    #[test]
    fn test_load_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_json::<Prefs>(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
