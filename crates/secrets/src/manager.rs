//! Secret override coordination
//!
//! The manager performs the post-load pass: it walks every field of the
//! loaded configuration tree in declaration order, resolves each reference
//! strictly sequentially (one store request per annotated field, no batching
//! and no parallelism), and overwrites the annotated fields in place before
//! the tree is deserialized into the caller's structure.

use crate::client::VaultConfig;
use crate::reference::SecretReference;
use crate::resolver::{SecretResolver, VaultResolver};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use vaultic_config::{ConfigTree, Loader};
use vaultic_core::Result;

/// Outcome of one override pass
#[derive(Debug, Default)]
pub struct OverrideReport {
    /// Dotted paths of overridden fields, in visit order
    pub resolved: Vec<String>,
}

/// Coordinates secret resolution over a loaded configuration tree
pub struct SecretManager {
    resolver: Box<dyn SecretResolver>,
}

impl SecretManager {
    /// Create a manager backed by a Vault KV v2 resolver
    pub fn new(config: VaultConfig) -> Result<Self> {
        Ok(Self {
            resolver: Box::new(VaultResolver::new(config)?),
        })
    }

    /// Create a manager with a custom resolver
    #[must_use]
    pub fn with_resolver(resolver: Box<dyn SecretResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve every annotated field in the tree
    ///
    /// Fields without a reference are skipped with no side effect. Every
    /// reference is validated before the first store request, so a malformed
    /// annotation fails the pass without issuing any fetch. The first
    /// resolution failure aborts the pass and propagates.
    pub async fn apply(&self, tree: &mut ConfigTree) -> Result<OverrideReport> {
        let mut pending: Vec<(String, String)> = Vec::new();
        tree.walk_fields(|field| {
            tracing::debug!(field = field.path(), "inspecting field");
            if let Some(raw) = field.value().as_str() {
                if SecretReference::is_reference(raw) {
                    pending.push((field.path().to_string(), raw.to_string()));
                }
            }
        });

        for (path, raw) in &pending {
            SecretReference::parse(path, raw)?;
        }

        let mut resolved: HashMap<String, String> = HashMap::new();
        let mut order = Vec::new();
        for (path, raw) in pending {
            if let Some(value) = self.resolver.resolve(&path, &raw).await? {
                tracing::info!(field = %path, reference = %raw, "field overridden from secret store");
                resolved.insert(path.clone(), value);
                order.push(path);
            }
        }

        tree.walk_fields_mut(|field| {
            if let Some(value) = resolved.remove(field.path()) {
                field.set(Value::String(value));
            }
            Ok(())
        })?;

        Ok(OverrideReport { resolved: order })
    }
}

/// Load, resolve secret annotations, and deserialize in one step
///
/// The override pass runs strictly after the base load, so a secret-backed
/// field always ends up with the store's value rather than its default,
/// file, or environment value.
pub async fn load_with_secrets<T: DeserializeOwned>(
    loader: Loader,
    secrets: &SecretManager,
) -> Result<T> {
    let mut tree = loader.load()?;
    let report = secrets.apply(&mut tree).await?;
    tracing::debug!(count = report.resolved.len(), "secret overrides applied");
    tree.into_typed()
}
