//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for vaultic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vaultic operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Environment variable related errors
    Environment { variable: String, message: String },

    /// A secret reference that does not follow the
    /// `vault://<mount>\<path>\<key>` syntax
    MalformedReference {
        field: String,
        reference: String,
        message: String,
    },

    /// Secret retrieval errors from the store
    SecretResolution {
        reference: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested entry key is absent from the returned bundle
    SecretNotFound { reference: String, key: String },

    /// The requested entry exists but is not a string
    SecretType {
        reference: String,
        key: String,
        actual: String,
    },

    /// Network-related errors
    Network { endpoint: String, message: String },
}
