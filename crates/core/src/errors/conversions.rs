//! Conversion implementations for error types

use super::types::Error;
use std::path::PathBuf;

// Fallback for io errors reaching `?` without a known path. Call sites that
// know the file use `Error::file_system` instead.
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}
