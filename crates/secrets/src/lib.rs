//! Secret resolution for vaultic configuration
//!
//! This crate materializes secret-backed configuration fields after the base
//! load. A [`SecretManager`] walks the loaded tree, finds fields whose value
//! is a `vault://<mount>\<path>\<key>` reference, fetches each secret from a
//! Vault KV v2 store, and overwrites the field with the retrieved string
//! through the loader's public traversal contract.
//!
//! Every failure is a typed error propagated to the caller: connection
//! failures, missing secrets, absent entry keys, non-string entries, and
//! malformed references all surface as [`vaultic_core::Error`] variants
//! rather than aborting the process.

mod client;
mod manager;
mod reference;
mod resolver;

#[cfg(test)]
mod tests;

pub use client::{SecretBundle, VaultClient, VaultConfig};
pub use manager::{load_with_secrets, OverrideReport, SecretManager};
pub use reference::SecretReference;
pub use resolver::{SecretResolver, VaultResolver};
