use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use toml::{Table, Value};

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_at_path, ConfigSource};
use super::{ScopeConfig, ScopeType, StoreError};

/// A scoped configuration store assembled from layered sources.
///
/// The merged document holds global values under `[default]` and per-store
/// overrides under `[stores.<id>]`. Setting paths such as
/// `mfgoogletagmanager/general/enabled` are walked through the nested tables:
///
/// ```toml
/// default_store = "en"
///
/// [default.mfgoogletagmanager.general]
/// enabled = true
///
/// [stores.en.mfgoogletagmanager.general]
/// public_id = "GTM-XXXX"
/// ```
///
/// A store lookup reads the store's own value first and falls back to the
/// default one. Without a store id it uses the default store, if any.
#[derive(Debug, Clone, Default)]
pub struct LayeredStore {
    defaults: Table,
    stores: BTreeMap<String, Table>,
    default_store: Option<String>,
}

/// The merged document, before it becomes a [`LayeredStore`].
#[derive(Debug, Deserialize)]
struct Document {
    default_store: Option<StoreId>,
    #[serde(default)]
    default: Table,
    #[serde(default)]
    stores: BTreeMap<String, Table>,
}

/// Store ids may be written as strings or as bare integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoreId {
    Name(String),
    Number(i64),
}

impl From<StoreId> for String {
    fn from(id: StoreId) -> Self {
        match id {
            StoreId::Name(name) => name,
            StoreId::Number(n) => n.to_string(),
        }
    }
}

impl LayeredStore {
    /// Creates a new store builder.
    pub fn builder() -> LayeredStoreBuilder {
        LayeredStoreBuilder::default()
    }

    /// The store used for store-scoped lookups that carry no store id.
    pub fn default_store(&self) -> Option<&str> {
        self.default_store.as_deref()
    }

    /// Ids of every store with at least one override.
    pub fn store_ids(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }
}

impl ScopeConfig for LayeredStore {
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>) -> Option<Value> {
        if scope_type == ScopeType::Store {
            if let Some(id) = scope_id.or(self.default_store.as_deref()) {
                if let Some(value) = self.stores.get(id).and_then(|t| lookup(t, path)) {
                    return Some(value.clone());
                }
                tracing::trace!(store = id, path, "no store override, using default scope");
            }
        }

        lookup(&self.defaults, path).cloned()
    }
}

/// Walks a `/`-separated setting path through nested tables.
fn lookup<'a>(table: &'a Table, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('/');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Builder for loading a [`LayeredStore`] from TOML files and the environment.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use gtm_config::LayeredStore;
///
/// // defaults -> env overrides -> local file overrides env
/// let store = LayeredStore::builder()
///     .with_file("config/gtm.toml", true)
///     .with_env("GTM", "__")
///     .with_file("config/gtm.local.toml", false)
///     .build()?;
/// # Ok::<(), gtm_config::StoreError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct LayeredStoreBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    default_store: Option<String>,
}

impl LayeredStoreBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads overrides from environment variables with the given prefix.
    ///
    /// Variable names are mapped to document paths by removing the prefix
    /// and separator, splitting on the separator and lowercasing each
    /// segment. Values stay strings. An empty separator fails the build.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Sets the store used when a store lookup carries no id.
    ///
    /// Takes precedence over a `default_store` key in the loaded documents.
    pub fn with_default_store(mut self, id: impl Into<String>) -> Self {
        self.default_store = Some(id.into());
        self
    }

    /// Loads and merges every source, then splits the result into scopes.
    pub fn build(self) -> Result<LayeredStore, StoreError> {
        let mut merged = Table::new();

        for source in &self.sources {
            let entries = source.entries()?;
            tracing::debug!(source = %source.name(), entries = entries.len(), "loaded config source");
            for entry in entries {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        let document: Document = Value::Table(merged).try_into()?;

        Ok(LayeredStore {
            defaults: document.default,
            stores: document.stores,
            default_store: self
                .default_store
                .or_else(|| document.default_store.map(String::from)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigEntry;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PUBLIC_ID: &str = "mfgoogletagmanager/general/public_id";
    const ENABLED: &str = "mfgoogletagmanager/general/enabled";

    #[derive(Debug)]
    struct StaticSource(Vec<(Vec<&'static str>, Value)>);

    impl ConfigSource for StaticSource {
        fn name(&self) -> String {
            "static".into()
        }

        fn entries(&self) -> Result<Vec<ConfigEntry>, StoreError> {
            Ok(self
                .0
                .iter()
                .map(|(path, value)| {
                    ConfigEntry::at_path(path.iter().map(|s| s.to_string()).collect(), value.clone())
                })
                .collect())
        }
    }

    /// An [`EnvSource`] fed from a fixed variable list instead of the process.
    #[derive(Debug)]
    struct FixedEnv(EnvSource, Vec<(&'static str, &'static str)>);

    impl ConfigSource for FixedEnv {
        fn name(&self) -> String {
            self.0.name()
        }

        fn entries(&self) -> Result<Vec<ConfigEntry>, StoreError> {
            self.0.entries_from(crate::store::env::tests::vars(&self.1))
        }
    }

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_store_override_wins() {
        let file = toml_file(
            r#"
            [default.mfgoogletagmanager.general]
            enabled = true
            public_id = "GTM-DEFAULT"

            [stores.fr.mfgoogletagmanager.general]
            public_id = "GTM-FR"
            "#,
        );
        let store = LayeredStore::builder().with_file(file.path(), true).build().unwrap();

        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, Some("fr")),
            Some(Value::String("GTM-FR".into()))
        );
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, Some("de")),
            Some(Value::String("GTM-DEFAULT".into()))
        );
        assert_eq!(
            store.get_value(ENABLED, ScopeType::Store, Some("fr")),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Default, Some("fr")),
            Some(Value::String("GTM-DEFAULT".into()))
        );
    }

    #[test]
    fn test_default_store_used_without_id() {
        let file = toml_file(
            r#"
            default_store = "en"

            [stores.en.mfgoogletagmanager.general]
            public_id = "GTM-EN"
            "#,
        );
        let store = LayeredStore::builder().with_file(file.path(), true).build().unwrap();

        assert_eq!(store.default_store(), Some("en"));
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, None),
            Some(Value::String("GTM-EN".into()))
        );
        assert_eq!(store.get_value(PUBLIC_ID, ScopeType::Default, None), None);
    }

    #[test]
    fn test_builder_default_store_takes_precedence() {
        let file = toml_file(r#"default_store = "en""#);
        let store = LayeredStore::builder()
            .with_file(file.path(), true)
            .with_default_store("fr")
            .build()
            .unwrap();

        assert_eq!(store.default_store(), Some("fr"));
    }

    #[test]
    fn test_numeric_default_store() {
        let store = LayeredStore::builder()
            .with_source(StaticSource(vec![(vec!["default_store"], Value::Integer(1))]))
            .build()
            .unwrap();

        assert_eq!(store.default_store(), Some("1"));
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let base = toml_file(
            r#"
            [default.mfgoogletagmanager.general]
            public_id = "GTM-BASE"
            account_id = "100"
            "#,
        );
        let local = toml_file(
            r#"
            [default.mfgoogletagmanager.general]
            public_id = "GTM-LOCAL"
            "#,
        );
        let store = LayeredStore::builder()
            .with_file(base.path(), true)
            .with_file(local.path(), true)
            .with_file("/nonexistent/gtm.toml", false)
            .build()
            .unwrap();

        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, None),
            Some(Value::String("GTM-LOCAL".into()))
        );
        assert_eq!(
            store.get_value("mfgoogletagmanager/general/account_id", ScopeType::Store, None),
            Some(Value::String("100".into()))
        );
    }

    #[test]
    fn test_path_entries_merge_into_stores() {
        let store = LayeredStore::builder()
            .with_source(StaticSource(vec![(
                vec!["stores", "en", "mfgoogletagmanager", "general", "public_id"],
                Value::String("GTM-ENV".into()),
            )]))
            .build()
            .unwrap();

        assert_eq!(store.store_ids().collect::<Vec<_>>(), ["en"]);
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, Some("en")),
            Some(Value::String("GTM-ENV".into()))
        );
    }

    #[test]
    fn test_partial_and_overlong_paths_are_absent() {
        let file = toml_file(
            r#"
            [default.mfgoogletagmanager.general]
            public_id = "GTM-1"
            "#,
        );
        let store = LayeredStore::builder().with_file(file.path(), true).build().unwrap();

        assert!(store
            .get_value("mfgoogletagmanager/general/public_id/extra", ScopeType::Store, None)
            .is_none());
        assert!(store.get_value("", ScopeType::Store, None).is_none());
        assert!(store
            .get_value("mfgoogletagmanager/general", ScopeType::Store, None)
            .is_some_and(|v| v.is_table()));
    }

    #[test]
    fn test_non_table_stores_rejected() {
        let file = toml_file(r#"stores = "en""#);
        let result = LayeredStore::builder().with_file(file.path(), true).build();

        assert!(matches!(result, Err(StoreError::InvalidLayout(_))));
    }

    #[test]
    fn test_required_file_missing() {
        let result = LayeredStore::builder()
            .with_file("/nonexistent/gtm.toml", true)
            .build();

        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_builder_yields_empty_store() {
        let store = LayeredStore::builder().build().unwrap();

        assert_eq!(store.default_store(), None);
        assert_eq!(store.get_value(PUBLIC_ID, ScopeType::Store, Some("en")), None);
    }

    #[test]
    fn test_env_overlays_file() {
        let file = toml_file(
            r#"
            [default.mfgoogletagmanager.general]
            public_id = "GTM-FILE"

            [stores.fr.mfgoogletagmanager.general]
            public_id = "GTM-FR"
            "#,
        );
        let store = LayeredStore::builder()
            .with_file(file.path(), true)
            .with_source(FixedEnv(
                EnvSource::new("GTM", "__"),
                vec![
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__GENERAL__PUBLIC_ID", "GTM-ENV"),
                    ("GTM__DEFAULT_STORE", "1"),
                ],
            ))
            .build()
            .unwrap();

        assert_eq!(store.default_store(), Some("1"));
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, None),
            Some(Value::String("GTM-ENV".into()))
        );
        assert_eq!(
            store.get_value(PUBLIC_ID, ScopeType::Store, Some("fr")),
            Some(Value::String("GTM-FR".into()))
        );
    }

    #[test]
    fn test_env_identifiers_keep_their_text() {
        let store = LayeredStore::builder()
            .with_source(FixedEnv(
                EnvSource::new("GTM", "__"),
                vec![
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__GENERAL__ENABLED", "1"),
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__GENERAL__ACCOUNT_ID", "0012345"),
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__GENERAL__CONTAINER_ID", "1.10"),
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__GENERAL__PUBLIC_ID", "GTM-ENV"),
                    ("GTM__DEFAULT__MFGOOGLETAGMANAGER__ANALYTICS__ENABLE", "0"),
                ],
            ))
            .build()
            .unwrap();
        let config = crate::TagManagerConfig::new(store);

        assert_eq!(config.account_id(None), "0012345");
        assert_eq!(config.container_id(Some("en")), "1.10");
        assert!(config.is_enabled(None));
        assert!(!config.is_analytics_enabled(None));
    }

    #[test]
    fn test_empty_env_separator_fails_build() {
        let result = LayeredStore::builder().with_env("GTM", "").build();

        assert!(matches!(result, Err(StoreError::EmptyEnvSeparator(_))));
    }
}
