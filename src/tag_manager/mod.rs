//! Typed access to the tag-manager integration settings.

pub mod paths;

use toml::Value;

use crate::store::{ScopeConfig, ScopeType};
use crate::value;

/// Reads the tag-manager settings for a store.
///
/// Every getter takes an optional store id; `None` leaves store selection to
/// the underlying [`ScopeConfig`]. Getters never fail: unset values read as
/// `false` or `""`.
///
/// ## Example
///
/// ```
/// use gtm_config::{paths, MemoryStore, Scope, TagManagerConfig};
///
/// let store = MemoryStore::new()
///     .with(paths::EXTENSION_ENABLED, Scope::Default, true)
///     .with(paths::PUBLIC_ID, Scope::store("fr"), "GTM-FR");
/// let config = TagManagerConfig::new(store);
///
/// assert!(config.is_enabled(Some("fr")));
/// assert!(!config.is_enabled(None));
/// assert_eq!(config.public_id(Some("fr")), "GTM-FR");
/// ```
#[derive(Debug, Clone)]
pub struct TagManagerConfig<S> {
    store: S,
}

impl<S: ScopeConfig> TagManagerConfig<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the extension is switched on and has a public id.
    pub fn is_enabled(&self, store_id: Option<&str>) -> bool {
        value::to_bool(self.get_config(paths::EXTENSION_ENABLED, store_id).as_ref())
            && !self.public_id(store_id).is_empty()
    }

    pub fn account_id(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::ACCOUNT_ID, store_id)
    }

    pub fn container_id(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::CONTAINER_ID, store_id)
    }

    pub fn public_id(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::PUBLIC_ID, store_id)
    }

    pub fn is_analytics_enabled(&self, store_id: Option<&str>) -> bool {
        value::to_bool(self.get_config(paths::ANALYTICS_ENABLED, store_id).as_ref())
    }

    /// Analytics measurement id, e.g. `G-XXXXXXX`.
    pub fn measurement_id(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::ANALYTICS_MEASUREMENT_ID, store_id)
    }

    /// Code of the catalog attribute pushed as the product identifier.
    pub fn product_attribute(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::ATTRIBUTES_PRODUCT, store_id)
    }

    /// Code of the catalog attribute pushed as the product brand.
    pub fn brand_attribute(&self, store_id: Option<&str>) -> String {
        self.get_string(paths::ATTRIBUTES_BRAND, store_id)
    }

    /// Reads the raw store-scoped value at `path`.
    pub fn get_config(&self, path: &str, store_id: Option<&str>) -> Option<Value> {
        let value = self.store.get_value(path, ScopeType::Store, store_id);
        tracing::trace!(path, store = ?store_id, found = value.is_some(), "read config value");
        value
    }

    fn get_string(&self, path: &str, store_id: Option<&str>) -> String {
        value::to_string(self.get_config(path, store_id).as_ref())
    }
}
