//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an environment variable error
    #[must_use]
    pub fn environment(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Environment {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create a malformed secret reference error
    #[must_use]
    pub fn malformed_reference(
        field: impl Into<String>,
        reference: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::MalformedReference {
            field: field.into(),
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a secret resolution error
    #[must_use]
    pub fn secret_resolution(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a secret resolution error with a source error
    #[must_use]
    pub fn secret_resolution_with_source(
        reference: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an error for an entry key missing from a secret bundle
    #[must_use]
    pub fn secret_not_found(reference: impl Into<String>, key: impl Into<String>) -> Self {
        Error::SecretNotFound {
            reference: reference.into(),
            key: key.into(),
        }
    }

    /// Create an error for a secret entry of the wrong type
    #[must_use]
    pub fn secret_type(
        reference: impl Into<String>,
        key: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::SecretType {
            reference: reference.into(),
            key: key.into(),
            actual: actual.into(),
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
