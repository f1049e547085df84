//! Secret reference syntax
//!
//! A reference names one entry of one secret:
//! `vault://<mount>\<secretPath>\<entryKey>`, exactly three non-empty
//! backslash-separated segments after the scheme. Violations are reported as
//! [`Error::MalformedReference`] naming the field and the offending text,
//! never as a panic.

use std::fmt;
use vaultic_core::{Error, Result, REFERENCE_SCHEME, REFERENCE_SEGMENTS, REFERENCE_SEPARATOR};

/// Parsed location of one secret entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    mount: String,
    path: String,
    key: String,
}

impl SecretReference {
    /// Whether a raw value carries the reference scheme
    #[must_use]
    pub fn is_reference(raw: &str) -> bool {
        raw.starts_with(REFERENCE_SCHEME)
    }

    /// Parse a raw reference, naming `field` in any error
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        let location = raw.strip_prefix(REFERENCE_SCHEME).ok_or_else(|| {
            Error::malformed_reference(field, raw, format!("missing '{REFERENCE_SCHEME}' scheme"))
        })?;

        let segments: Vec<&str> = location.split(REFERENCE_SEPARATOR).collect();
        if segments.len() != REFERENCE_SEGMENTS {
            return Err(Error::malformed_reference(
                field,
                raw,
                format!(
                    "expected {REFERENCE_SEGMENTS} backslash-separated segments (mount, path, key), found {}",
                    segments.len()
                ),
            ));
        }
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::malformed_reference(
                field,
                raw,
                "segments must be non-empty",
            ));
        }

        Ok(Self {
            mount: segments[0].to_string(),
            path: segments[1].to_string(),
            key: segments[2].to_string(),
        })
    }

    /// The KV engine mount name
    #[must_use]
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// The secret path under the mount
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The entry key within the returned bundle
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{REFERENCE_SCHEME}{}{sep}{}{sep}{}",
            self.mount,
            self.path,
            self.key,
            sep = REFERENCE_SEPARATOR
        )
    }
}
