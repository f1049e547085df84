//! Tests for the secrets module
//!
//! Covers reference parsing, the override pass over loaded configuration
//! trees, and connection parameter handling. Store behavior over HTTP is
//! exercised by the wiremock integration tests in `tests/`.

use super::*;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vaultic_config::Loader;
use vaultic_core::{Error, Result};

/// Resolver serving canned values keyed by canonical reference text
struct MapResolver {
    values: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MapResolver {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            values: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn call_count(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SecretResolver for MapResolver {
    async fn resolve(&self, field: &str, reference: &str) -> Result<Option<String>> {
        if !SecretReference::is_reference(reference) {
            return Ok(None);
        }
        let parsed = SecretReference::parse(field, reference)?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        let canonical = parsed.to_string();
        match self.values.get(&canonical) {
            Some(value) => Ok(Some(value.clone())),
            None => Err(Error::secret_resolution(
                canonical,
                "no test secret configured",
            )),
        }
    }
}

mod reference_tests {
    use super::*;

    #[test]
    fn parses_a_three_segment_reference() {
        let parsed = SecretReference::parse("str", r"vault://secret\TestPath1\S1").unwrap();
        assert_eq!(parsed.mount(), "secret");
        assert_eq!(parsed.path(), "TestPath1");
        assert_eq!(parsed.key(), "S1");
    }

    #[test]
    fn two_segments_is_malformed() {
        let err = SecretReference::parse("str", r"vault://secret\TestPath1").unwrap_err();
        match err {
            Error::MalformedReference {
                field, reference, ..
            } => {
                assert_eq!(field, "str");
                assert_eq!(reference, r"vault://secret\TestPath1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn four_segments_is_malformed() {
        let err = SecretReference::parse("str", r"vault://a\b\c\d").unwrap_err();
        assert!(matches!(err, Error::MalformedReference { .. }));
    }

    #[test]
    fn empty_segments_are_malformed() {
        let err = SecretReference::parse("str", r"vault://secret\\S1").unwrap_err();
        assert!(matches!(err, Error::MalformedReference { .. }));
    }

    #[test]
    fn missing_scheme_is_malformed() {
        let err = SecretReference::parse("str", r"secret\TestPath1\S1").unwrap_err();
        assert!(matches!(err, Error::MalformedReference { .. }));
    }

    #[test]
    fn is_reference_checks_the_scheme() {
        assert!(SecretReference::is_reference(
            r"vault://secret\TestPath1\S1"
        ));
        assert!(!SecretReference::is_reference("str-def"));
        assert!(!SecretReference::is_reference(r"secret\TestPath1\S1"));
    }

    #[test]
    fn display_renders_the_canonical_form() {
        let parsed = SecretReference::parse("str", r"vault://secret\TestPath1\S1").unwrap();
        assert_eq!(parsed.to_string(), r"vault://secret\TestPath1\S1");
    }

    // Property-based test for reference parsing
    #[test]
    fn reference_parsing_roundtrips() {
        use proptest::prelude::*;

        proptest!(|(
            mount in "[a-zA-Z0-9_.-]{1,16}",
            path in "[a-zA-Z0-9_/.-]{1,24}",
            key in "[a-zA-Z0-9_.-]{1,16}",
        )| {
            let raw = format!(r"vault://{mount}\{path}\{key}");
            let parsed = SecretReference::parse("field", &raw).unwrap();
            prop_assert_eq!(parsed.mount(), mount.as_str());
            prop_assert_eq!(parsed.path(), path.as_str());
            prop_assert_eq!(parsed.key(), key.as_str());
            prop_assert_eq!(parsed.to_string(), raw);
        });
    }
}

mod manager_tests {
    use super::*;

    #[tokio::test]
    async fn annotated_field_is_overridden() {
        let mut tree = Loader::new()
            .default_value("str", "str-def")
            .secret("str", r"secret\TestPath1\S1")
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[(r"vault://secret\TestPath1\S1", "str-secret")]);
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let report = manager.apply(&mut tree).await.unwrap();

        assert_eq!(report.resolved, vec!["str"]);
        assert_eq!(tree.get("str"), Some(&json!("str-secret")));
    }

    #[tokio::test]
    async fn fields_without_annotations_are_untouched() {
        let mut tree = Loader::new()
            .defaults(json!({ "str": "str-def", "http_port": 8080 }))
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[]);
        let calls = resolver.call_count();
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let report = manager.apply(&mut tree).await.unwrap();

        assert!(report.resolved.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(tree.get("str"), Some(&json!("str-def")));
        assert_eq!(tree.get("http_port"), Some(&json!(8080)));
    }

    #[tokio::test]
    async fn nested_annotations_are_each_fetched_exactly_once() {
        let mut tree = Loader::new()
            .defaults(json!({
                "str": "str-def",
                "sub": { "inner": "inner-def", "deeper": { "leaf": "leaf-def" } },
                "em": "em-def",
            }))
            .secret("str", r"secret\TestPath1\S1")
            .secret("sub.inner", r"secret\TestPath1\S2")
            .secret("sub.deeper.leaf", r"secret\TestPath2\S1")
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[
            (r"vault://secret\TestPath1\S1", "one"),
            (r"vault://secret\TestPath1\S2", "two"),
            (r"vault://secret\TestPath2\S1", "three"),
        ]);
        let calls = resolver.call_count();
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let report = manager.apply(&mut tree).await.unwrap();

        // Visit order follows the tree, nested fields before the next sibling
        assert_eq!(report.resolved, vec!["str", "sub.inner", "sub.deeper.leaf"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(tree.get("str"), Some(&json!("one")));
        assert_eq!(tree.get("sub.inner"), Some(&json!("two")));
        assert_eq!(tree.get("sub.deeper.leaf"), Some(&json!("three")));
        assert_eq!(tree.get("em"), Some(&json!("em-def")));
    }

    #[tokio::test]
    async fn inline_references_in_sources_are_resolved_too() {
        let mut tree = Loader::new()
            .default_value("inline", r"vault://secret\TestPath1\S1")
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[(r"vault://secret\TestPath1\S1", "str-secret")]);
        let manager = SecretManager::with_resolver(Box::new(resolver));

        manager.apply(&mut tree).await.unwrap();
        assert_eq!(tree.get("inline"), Some(&json!("str-secret")));
    }

    #[tokio::test]
    async fn secret_wins_over_default_value() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestConfig {
            str: String,
            em: String,
        }

        let loader = Loader::new()
            .default_value("str", "str-def")
            .default_value("em", "em-def")
            .secret("str", r"secret\TestPath1\S1");

        let resolver = MapResolver::new(&[(r"vault://secret\TestPath1\S1", "str-secret")]);
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let cfg: TestConfig = load_with_secrets(loader, &manager).await.unwrap();

        assert_eq!(
            cfg,
            TestConfig {
                str: "str-secret".to_string(),
                em: "em-def".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_annotation_fails_before_any_fetch() {
        let mut tree = Loader::new()
            .default_value("str", "str-def")
            .default_value("other", "other-def")
            .secret("str", r"secret\TestPath1\S1")
            .secret("other", r"secret\TestPath1")
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[(r"vault://secret\TestPath1\S1", "str-secret")]);
        let calls = resolver.call_count();
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let err = manager.apply(&mut tree).await.unwrap_err();

        assert!(matches!(err, Error::MalformedReference { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // The tree is left as loaded, references included
        assert_eq!(
            tree.get("str"),
            Some(&json!(r"vault://secret\TestPath1\S1"))
        );
    }

    #[tokio::test]
    async fn resolution_failures_propagate() {
        let mut tree = Loader::new()
            .default_value("str", "str-def")
            .secret("str", r"secret\Missing\S1")
            .load()
            .unwrap();

        let resolver = MapResolver::new(&[]);
        let manager = SecretManager::with_resolver(Box::new(resolver));

        let err = manager.apply(&mut tree).await.unwrap_err();
        assert!(matches!(err, Error::SecretResolution { .. }));
    }
}

mod config_tests {
    use super::*;
    use serial_test::serial;
    use vaultic_core::{VAULT_ADDR_VAR, VAULT_NAMESPACE_VAR, VAULT_TOKEN_VAR};

    #[test]
    #[serial]
    fn from_env_requires_a_token() {
        std::env::remove_var(VAULT_ADDR_VAR);
        std::env::remove_var(VAULT_TOKEN_VAR);
        std::env::remove_var(VAULT_NAMESPACE_VAR);

        let err = VaultConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::Environment { .. }));
    }

    #[test]
    #[serial]
    fn from_env_reads_address_token_and_namespace() {
        std::env::set_var(VAULT_ADDR_VAR, "http://vault.internal:8200");
        std::env::set_var(VAULT_TOKEN_VAR, "env-token");
        std::env::set_var(VAULT_NAMESPACE_VAR, "team-a");

        let config = VaultConfig::from_env().unwrap();
        assert_eq!(config.address(), "http://vault.internal:8200");

        std::env::remove_var(VAULT_ADDR_VAR);
        std::env::remove_var(VAULT_TOKEN_VAR);
        std::env::remove_var(VAULT_NAMESPACE_VAR);
    }

    #[test]
    #[serial]
    fn from_env_falls_back_to_the_default_address() {
        std::env::remove_var(VAULT_ADDR_VAR);
        std::env::set_var(VAULT_TOKEN_VAR, "env-token");

        let config = VaultConfig::from_env().unwrap();
        assert_eq!(config.address(), vaultic_core::DEFAULT_VAULT_ADDR);

        std::env::remove_var(VAULT_TOKEN_VAR);
    }

    #[test]
    fn invalid_address_is_rejected_at_client_construction() {
        let err = VaultClient::new(VaultConfig::new("not a url", "token")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
