//! Vault KV v2 client
//!
//! A minimal client for the versioned key-value secrets engine: given a
//! mount and a secret path it returns the latest version's bundle of named
//! entries. Connection parameters follow a documented override order:
//! explicit values beat `VAULT_ADDR`/`VAULT_TOKEN`/`VAULT_NAMESPACE`, which
//! beat the default dev-server address. There is no default token.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;
use vaultic_core::{
    Error, Result, DEFAULT_VAULT_ADDR, VAULT_ADDR_VAR, VAULT_NAMESPACE_VAR, VAULT_TOKEN_VAR,
};

/// Connection parameters for a Vault server
#[derive(Debug, Clone)]
pub struct VaultConfig {
    address: String,
    token: String,
    namespace: Option<String>,
}

impl VaultConfig {
    /// Create a configuration with an explicit address and token
    #[must_use]
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            namespace: None,
        }
    }

    /// Build a configuration from the standard Vault environment variables
    ///
    /// `VAULT_ADDR` falls back to the local dev-server address; a missing
    /// `VAULT_TOKEN` is an error, since no credential is ever baked in.
    pub fn from_env() -> Result<Self> {
        let address =
            std::env::var(VAULT_ADDR_VAR).unwrap_or_else(|_| DEFAULT_VAULT_ADDR.to_string());
        let token = std::env::var(VAULT_TOKEN_VAR).map_err(|_| {
            Error::environment(VAULT_TOKEN_VAR, "not set; a Vault token is required")
        })?;
        let namespace = std::env::var(VAULT_NAMESPACE_VAR).ok();

        Ok(Self {
            address,
            token,
            namespace,
        })
    }

    /// Set the Vault enterprise namespace
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// The configured server address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// HTTP client for the Vault KV v2 API
#[derive(Debug)]
pub struct VaultClient {
    http: reqwest::Client,
    config: VaultConfig,
}

impl VaultClient {
    /// Create a client, validating the configured address
    pub fn new(config: VaultConfig) -> Result<Self> {
        Url::parse(&config.address).map_err(|e| {
            Error::configuration(format!("invalid Vault address '{}': {e}", config.address))
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Read the latest version of a secret from a KV v2 engine
    pub async fn kv2_get(&self, mount: &str, path: &str) -> Result<SecretBundle> {
        let endpoint = format!(
            "{}/v1/{mount}/data/{path}",
            self.config.address.trim_end_matches('/')
        );

        let mut request = self
            .http
            .get(&endpoint)
            .header("X-Vault-Token", &self.config.token);
        if let Some(namespace) = &self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::network(endpoint.clone(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<VaultErrorBody>()
                .await
                .ok()
                .filter(|body| !body.errors.is_empty())
                .map_or_else(
                    || format!("server returned {status}"),
                    |body| body.errors.join("; "),
                );
            return Err(Error::secret_resolution(format!("{mount}/{path}"), message));
        }

        let body: KvV2Response = response.json().await.map_err(|e| {
            Error::secret_resolution_with_source(
                format!("{mount}/{path}"),
                "unexpected response body",
                e,
            )
        })?;

        Ok(SecretBundle {
            origin: format!("{mount}/{path}"),
            entries: body.data.data,
        })
    }
}

/// Error body returned by Vault on non-success statuses
#[derive(Debug, Deserialize)]
struct VaultErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KvV2Response {
    data: KvV2Data,
}

#[derive(Debug, Deserialize)]
struct KvV2Data {
    data: Map<String, Value>,
}

/// The named entries of one secret path at its latest version
///
/// Transient: consumed during one override pass and never retained.
#[derive(Debug)]
pub struct SecretBundle {
    origin: String,
    entries: Map<String, Value>,
}

impl SecretBundle {
    /// Extract a named entry as a string
    pub fn entry_str(&self, key: &str) -> Result<&str> {
        match self.entries.get(key) {
            None => Err(Error::secret_not_found(&self.origin, key)),
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(Error::secret_type(&self.origin, key, json_type_name(other))),
        }
    }

    /// Number of entries in the bundle
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
