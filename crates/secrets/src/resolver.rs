//! Secret resolver implementations
//!
//! This module provides the resolution seam as a trait, with a Vault-backed
//! implementation. A resolver is handed each candidate field and reports
//! whether it handled the value, so other stores can be plugged in behind
//! the same contract.

use crate::client::{VaultClient, VaultConfig};
use crate::reference::SecretReference;
use async_trait::async_trait;
use vaultic_core::Result;

/// Trait for resolving secret references from a store
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolve a field's secret reference to its value
    ///
    /// # Arguments
    /// * `field` - dotted path of the field carrying the reference
    /// * `reference` - the raw reference text
    ///
    /// # Returns
    /// * `Ok(Some(value))` - the reference was resolved
    /// * `Ok(None)` - the value is not a reference this resolver handles
    /// * `Err(error)` - an error occurred during resolution
    async fn resolve(&self, field: &str, reference: &str) -> Result<Option<String>>;
}

/// Resolver backed by a Vault KV v2 store
pub struct VaultResolver {
    client: VaultClient,
}

impl VaultResolver {
    /// Create a resolver connecting with the given parameters
    pub fn new(config: VaultConfig) -> Result<Self> {
        Ok(Self {
            client: VaultClient::new(config)?,
        })
    }

    /// Create a resolver over an existing client
    #[must_use]
    pub fn with_client(client: VaultClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretResolver for VaultResolver {
    async fn resolve(&self, field: &str, reference: &str) -> Result<Option<String>> {
        if !SecretReference::is_reference(reference) {
            return Ok(None);
        }

        let parsed = SecretReference::parse(field, reference)?;
        tracing::debug!(field, reference = %parsed, "fetching secret");

        let bundle = self.client.kv2_get(parsed.mount(), parsed.path()).await?;
        let value = bundle.entry_str(parsed.key())?;
        Ok(Some(value.to_string()))
    }
}
