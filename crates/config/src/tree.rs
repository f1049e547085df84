//! Merged configuration tree and field traversal
//!
//! The tree is the loader's output: a JSON object holding every configured
//! value after source merging. Traversal visits leaf fields depth-first in
//! declaration order, descending into nested objects before moving to the
//! next sibling, and hands the callback an opaque per-field handle.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use vaultic_core::{Error, Result};

/// The merged configuration for one load, prior to typed deserialization
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: Value,
}

/// Read-only handle to a single leaf field, valid for one visit
pub struct Field<'a> {
    path: &'a str,
    value: &'a Value,
}

/// Mutable handle to a single leaf field, valid for one visit
pub struct FieldMut<'a> {
    path: &'a str,
    value: &'a mut Value,
}

impl<'a> Field<'a> {
    /// Dotted path of this field from the tree root, e.g. `sub.float`
    #[must_use]
    pub fn path(&self) -> &str {
        self.path
    }

    /// The field's current value
    #[must_use]
    pub fn value(&self) -> &Value {
        self.value
    }
}

impl<'a> FieldMut<'a> {
    /// Dotted path of this field from the tree root
    #[must_use]
    pub fn path(&self) -> &str {
        self.path
    }

    /// The field's current value
    #[must_use]
    pub fn value(&self) -> &Value {
        self.value
    }

    /// Overwrite the field's value, whatever was present before
    pub fn set(self, value: Value) {
        *self.value = value;
    }
}

impl ConfigTree {
    pub(crate) fn new(root: Value) -> Self {
        Self { root }
    }

    /// The underlying merged value tree
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Look up a field by dotted path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Visit every leaf field in declaration order
    pub fn walk_fields<F>(&self, mut visit: F)
    where
        F: FnMut(Field<'_>),
    {
        walk(&self.root, String::new(), &mut visit);
    }

    /// Visit every leaf field in declaration order with a mutable handle
    ///
    /// The callback's error aborts the walk and propagates to the caller.
    pub fn walk_fields_mut<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(FieldMut<'_>) -> Result<()>,
    {
        walk_mut(&mut self.root, String::new(), &mut visit)
    }

    /// Deserialize the merged tree into the caller's typed structure
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.root).map_err(Error::from)
    }
}

fn walk<F>(node: &Value, prefix: String, visit: &mut F)
where
    F: FnMut(Field<'_>),
{
    if let Value::Object(map) = node {
        for (key, value) in map {
            let path = join(&prefix, key);
            if value.is_object() {
                walk(value, path, visit);
            } else {
                visit(Field { path: &path, value });
            }
        }
    }
}

fn walk_mut<F>(node: &mut Value, prefix: String, visit: &mut F) -> Result<()>
where
    F: FnMut(FieldMut<'_>) -> Result<()>,
{
    if let Value::Object(map) = node {
        for (key, value) in map {
            let path = join(&prefix, key);
            if value.is_object() {
                walk_mut(value, path, visit)?;
            } else {
                visit(FieldMut { path: &path, value })?;
            }
        }
    }
    Ok(())
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Merge `overlay` into `base`: objects merge key-wise, anything else
/// replaces the base node wholesale
pub(crate) fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, overlay) => *base_slot = overlay,
    }
}

/// Insert a value at a dotted path, creating intermediate objects as needed
pub(crate) fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }

        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            // A scalar in the way is replaced, matching overlay semantics
            *entry = Value::Object(Map::new());
        }
        match entry.as_object_mut() {
            Some(map) => current = map,
            None => unreachable!("entry was just made an object"),
        }
    }
}
