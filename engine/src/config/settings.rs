// Engine settings, loaded from a JSON file or falling back to defaults
use crate::error::EngineError;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "STOCKROOM_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Single-character delimiter used by stock CSV exports.
    pub csv_delimiter: String,
    /// Stock CSV imported at startup, if any.
    pub stock_csv: Option<String>,
    pub low_stock_threshold: f64,
    pub allow_negative_stock: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            csv_delimiter: ";".to_string(),
            stock_csv: None,
            low_stock_threshold: 5.0,
            allow_negative_stock: false,
        }
    }
}

impl EngineSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&raw)
            .map_err(|e| {
                EngineError::ConfigError(format!("Invalid config '{}': {}", path.display(), e))
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the file named by `STOCKROOM_CONFIG`, or returns the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, EngineError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn delimiter(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        self.delimiter()?;
        if !self.low_stock_threshold.is_finite() || self.low_stock_threshold < 0.0 {
            return Err(EngineError::ConfigError(format!(
                "low_stock_threshold must be a non-negative number, got {}",
                self.low_stock_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.delimiter().unwrap(), b';');
        assert_eq!(settings.low_stock_threshold, 5.0);
        assert!(!settings.allow_negative_stock);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "stock_csv": "estoque.csv", "allow_negative_stock": true }"#);
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.stock_csv.as_deref(), Some("estoque.csv"));
        assert!(settings.allow_negative_stock);
        assert_eq!(settings.csv_delimiter, ";");
    }

    #[test]
    fn test_load_rejects_bad_delimiter() {
        let file = write_config(r#"{ "csv_delimiter": ";;" }"#);
        let err = EngineSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
        assert!(err.to_string().contains("csv_delimiter"));
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let file = write_config("{ not json");
        let err = EngineSettings::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid config"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EngineSettings::load("definitely_missing_config.json").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
