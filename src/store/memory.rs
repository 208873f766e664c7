use std::collections::HashMap;

use toml::Value;

use super::{ScopeConfig, ScopeType};

/// Where a [`MemoryStore`] value applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Default,
    Store(String),
}

impl Scope {
    pub fn store(id: impl Into<String>) -> Self {
        Self::Store(id.into())
    }
}

#[derive(Debug, Clone, Default)]
struct ScopedValues {
    default: Option<Value>,
    stores: HashMap<String, Value>,
}

/// An in-memory scoped store.
///
/// Store lookups read the store's own value and fall back to the default
/// one; a store lookup without an id reads the default value directly.
///
/// ```
/// use gtm_config::{MemoryStore, Scope, ScopeConfig, ScopeType};
///
/// let store = MemoryStore::new()
///     .with("general/public_id", Scope::Default, "GTM-1")
///     .with("general/public_id", Scope::store("fr"), "GTM-FR");
///
/// let fr = store.get_value("general/public_id", ScopeType::Store, Some("fr"));
/// assert_eq!(fr.as_ref().and_then(|v| v.as_str()), Some("GTM-FR"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, ScopedValues>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the store for chaining.
    pub fn with(mut self, path: impl Into<String>, scope: Scope, value: impl Into<Value>) -> Self {
        self.set(path, scope, value);
        self
    }

    /// Sets a value, returning the one it replaced.
    pub fn set(
        &mut self,
        path: impl Into<String>,
        scope: Scope,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let entry = self.values.entry(path.into()).or_default();
        match scope {
            Scope::Default => entry.default.replace(value.into()),
            Scope::Store(id) => entry.stores.insert(id, value.into()),
        }
    }

    /// Removes a value, returning it if it was set.
    pub fn remove(&mut self, path: &str, scope: &Scope) -> Option<Value> {
        let entry = self.values.get_mut(path)?;
        match scope {
            Scope::Default => entry.default.take(),
            Scope::Store(id) => entry.stores.remove(id),
        }
    }
}

impl ScopeConfig for MemoryStore {
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>) -> Option<Value> {
        let entry = self.values.get(path)?;
        let store_value = match (scope_type, scope_id) {
            (ScopeType::Store, Some(id)) => entry.stores.get(id),
            _ => None,
        };
        store_value.or(entry.default.as_ref()).cloned()
    }
}
