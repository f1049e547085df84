//! Configuration loader for vaultic
//!
//! This module provides a centralized loader that handles all configuration
//! loading at startup: defaults, an optional or required JSON file,
//! environment variables, and registered secret annotations, merged in that
//! precedence order into a [`ConfigTree`].

use crate::tree::{insert_path, merge, ConfigTree};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use vaultic_core::{Error, Result, REFERENCE_SCHEME};

/// A configuration file source
#[derive(Debug, Clone)]
struct FileSource {
    path: PathBuf,
    required: bool,
}

/// Configuration loader that merges layered sources
///
/// Precedence, lowest to highest: defaults, file, environment variables,
/// secret annotations.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    defaults: Map<String, Value>,
    file: Option<FileSource>,
    env_prefix: Option<String>,
    secrets: Vec<(String, String)>,
}

impl Loader {
    /// Create a new configuration loader with no sources
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a default value for a single field path
    #[must_use]
    pub fn default_value(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_path(&mut self.defaults, &path.into(), value.into());
        self
    }

    /// Merge a whole object of defaults
    #[must_use]
    pub fn defaults(mut self, values: Value) -> Self {
        if let Value::Object(map) = values {
            let mut base = Value::Object(std::mem::take(&mut self.defaults));
            merge(&mut base, Value::Object(map));
            if let Value::Object(merged) = base {
                self.defaults = merged;
            }
        }
        self
    }

    /// Read configuration from a JSON file; missing file is an error
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSource {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Read configuration from a JSON file if it exists
    #[must_use]
    pub fn optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSource {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Read environment variables starting with `prefix_` into the tree
    ///
    /// A double underscore descends into a nested object, so
    /// `PREFIX_SUB__HTTP_PORT=x` maps to the path `sub.http_port`. Values
    /// that parse as JSON scalars keep that type; everything else is taken
    /// as a string.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Annotate a field with a secret location
    ///
    /// `reference` is the three-segment `<mount>\<path>\<key>` location; the
    /// `vault://` scheme may be omitted. The annotation is injected as the
    /// highest-precedence source, so the field's merged value becomes the
    /// reference string until an override pass resolves it.
    #[must_use]
    pub fn secret(mut self, path: impl Into<String>, reference: impl Into<String>) -> Self {
        self.secrets.push((path.into(), reference.into()));
        self
    }

    /// Merge all sources and return the configuration tree
    pub fn load(self) -> Result<ConfigTree> {
        let mut root = Value::Object(Map::new());

        merge(&mut root, Value::Object(self.defaults));

        if let Some(source) = &self.file {
            if let Some(parsed) = read_file(&source.path, source.required)? {
                tracing::debug!(path = %source.path.display(), "merged configuration file");
                merge(&mut root, parsed);
            }
        }

        if let Some(prefix) = &self.env_prefix {
            let env = collect_env(prefix);
            if !env.is_empty() {
                tracing::debug!(prefix = %prefix, count = env.len(), "merged environment variables");
                merge(&mut root, Value::Object(env));
            }
        }

        let annotations = secret_annotations(&self.secrets)?;
        if !annotations.is_empty() {
            tracing::debug!(count = annotations.len(), "applied secret annotations");
            merge(&mut root, Value::Object(annotations));
        }

        Ok(ConfigTree::new(root))
    }

    /// Load and deserialize into the caller's typed structure
    ///
    /// Secret annotations are left as unresolved reference strings; use the
    /// secrets crate's override pass to resolve them first.
    pub fn load_into<T: DeserializeOwned>(self) -> Result<T> {
        self.load()?.into_typed()
    }
}

fn read_file(path: &Path, required: bool) -> Result<Option<Value>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "optional configuration file not found");
            return Ok(None);
        }
        Err(e) => return Err(Error::file_system(path, "read", e)),
    };

    let parsed: Value = serde_json::from_str(&contents)?;
    if !parsed.is_object() {
        return Err(Error::configuration(format!(
            "configuration file '{}' must contain a JSON object",
            path.display()
        )));
    }
    Ok(Some(parsed))
}

fn collect_env(prefix: &str) -> Map<String, Value> {
    let marker = format!("{prefix}_");
    let mut out = Map::new();

    for (key, value) in std::env::vars() {
        if let Some(rest) = key.strip_prefix(&marker) {
            if rest.is_empty() {
                continue;
            }
            let path = rest.to_lowercase().replace("__", ".");
            insert_path(&mut out, &path, parse_scalar(&value));
        }
    }
    out
}

/// Keep JSON scalar types for values that parse as one; JSON strings and
/// anything composite stay as the raw text
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Bool(_) | Value::Number(_) | Value::Null)) => v,
        _ => Value::String(raw.to_string()),
    }
}

fn secret_annotations(secrets: &[(String, String)]) -> Result<Map<String, Value>> {
    let mut out = Map::new();

    for (path, reference) in secrets {
        if path.is_empty() {
            return Err(Error::configuration(
                "secret annotation requires a field path",
            ));
        }
        if reference.is_empty() {
            return Err(Error::configuration(format!(
                "secret annotation for field '{path}' requires a reference"
            )));
        }

        let normalized = if reference.starts_with(REFERENCE_SCHEME) {
            reference.clone()
        } else {
            format!("{REFERENCE_SCHEME}{reference}")
        };
        insert_path(&mut out, path, Value::String(normalized));
    }
    Ok(out)
}
