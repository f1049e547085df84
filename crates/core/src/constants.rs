/// Constants used throughout the vaultic codebase
// Secret reference syntax
pub const REFERENCE_SCHEME: &str = "vault://";
pub const REFERENCE_SEPARATOR: char = '\\';
pub const REFERENCE_SEGMENTS: usize = 3;

// Environment variable names honored by `VaultConfig::from_env`
pub const VAULT_ADDR_VAR: &str = "VAULT_ADDR";
pub const VAULT_TOKEN_VAR: &str = "VAULT_TOKEN";
pub const VAULT_NAMESPACE_VAR: &str = "VAULT_NAMESPACE";

// Default Vault endpoint, matching a local `vault server -dev`
pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";
