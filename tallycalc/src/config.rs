//! Calculator preferences, stored as JSON in the per-app config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tallycore::storage;
use tallycore::FitParams;

const APP_NAME: &str = "tallycalc";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Longest number that can be typed, sign excluded.
    pub max_digits: usize,
    pub entry_font_size: f32,
    pub pending_font_size: f32,
    pub entry_margin: f32,
    pub pending_margin: f32,
    /// Display font file to try before the standard locations.
    pub font_path: Option<PathBuf>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            max_digits: 16,
            entry_font_size: 40.0,
            pending_font_size: 16.0,
            entry_margin: 60.0,
            pending_margin: 10.0,
            font_path: None,
        }
    }
}

impl CalcConfig {
    pub fn path() -> PathBuf {
        storage::config_dir(APP_NAME).join(CONFIG_FILE)
    }

    /// Load from the default location.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Missing or malformed files give the defaults.
    pub fn load_from(path: &Path) -> Self {
        let config: Self = storage::load_or_default(path);
        config.sanitized()
    }

    pub fn save_to(&self, path: &Path) -> storage::Result<()> {
        storage::save_json(self, path)
    }

    fn sanitized(mut self) -> Self {
        if self.max_digits == 0 {
            tracing::warn!("max_digits must be at least 1");
            self.max_digits = 1;
        }
        self
    }

    pub fn entry_fit(&self) -> FitParams {
        FitParams::new(self.entry_font_size, self.entry_margin)
    }

    pub fn pending_fit(&self) -> FitParams {
        FitParams::new(self.pending_font_size, self.pending_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalcConfig::default();
        assert_eq!(config.max_digits, 16);
        assert_eq!(config.entry_fit(), FitParams::new(40.0, 60.0));
        assert_eq!(config.pending_fit(), FitParams::new(16.0, 10.0));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = CalcConfig {
            max_digits: 10,
            font_path: Some(PathBuf::from("/opt/fonts/Rubik-Regular.ttf")),
            ..CalcConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(CalcConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "max_digits": 12 }"#).unwrap();

        let config = CalcConfig::load_from(&path);
        assert_eq!(config.max_digits, 12);
        assert_eq!(config.entry_font_size, 40.0);
    }

    #[test]
    fn test_zero_digits_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "max_digits": 0 }"#).unwrap();
        assert_eq!(CalcConfig::load_from(&path).max_digits, 1);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "max_digits = 12").unwrap();
        assert_eq!(CalcConfig::load_from(&path), CalcConfig::default());
    }
}
