use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("SKU '{0}' not found")]
    UnknownSku(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Pulls the typed cause back out of an `anyhow` chain so callers can tell an
    /// unreadable file apart from a malformed row.
    pub fn from_import(err: anyhow::Error) -> Self {
        if err.downcast_ref::<std::io::Error>().is_some() {
            return match err.downcast::<std::io::Error>() {
                Ok(source) => EngineError::IoError { source },
                Err(err) => EngineError::AnyhowError(err),
            };
        }
        if err.downcast_ref::<csv::Error>().is_some() {
            return match err.downcast::<csv::Error>() {
                Ok(source) => EngineError::CsvSystemError { source },
                Err(err) => EngineError::AnyhowError(err),
            };
        }
        EngineError::CsvDataFormatError(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_import_keeps_io_errors_typed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = EngineError::from_import(anyhow::Error::new(io));
        match err {
            EngineError::IoError { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_import_maps_plain_messages_to_data_format() {
        let err = EngineError::from_import(anyhow::anyhow!("Error parsing 'Preço' at line 3"));
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().starts_with("CSV data format error"));
    }

    #[test]
    fn test_unknown_sku_message() {
        let err = EngineError::UnknownSku("X1".to_string());
        assert_eq!(err.to_string(), "SKU 'X1' not found");
    }
}
