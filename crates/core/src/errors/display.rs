//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::Environment { variable, message } => {
                write!(f, "environment variable '{variable}' error: {message}")
            }
            Error::MalformedReference {
                field,
                reference,
                message,
            } => {
                write!(
                    f,
                    "malformed secret reference '{reference}' on field '{field}': {message}"
                )
            }
            Error::SecretResolution {
                reference, message, ..
            } => {
                write!(f, "failed to resolve secret '{reference}': {message}")
            }
            Error::SecretNotFound { reference, key } => {
                write!(f, "secret '{reference}' has no entry named '{key}'")
            }
            Error::SecretType {
                reference,
                key,
                actual,
            } => {
                write!(
                    f,
                    "secret '{reference}' entry '{key}' is {actual}, expected a string"
                )
            }
            Error::Network { endpoint, message } => {
                write!(f, "network error for '{endpoint}': {message}")
            }
        }
    }
}
