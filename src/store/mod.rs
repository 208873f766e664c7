//! Scoped configuration providers.
//!
//! A provider answers one question: what is the raw value at `path` for a
//! given scope? [`MemoryStore`] keeps values in memory, [`LayeredStore`]
//! assembles them from TOML files and environment variables.

mod env;
mod error;
mod file;
mod layered;
mod memory;
mod source;

use std::sync::Arc;

use toml::Value;

pub use env::EnvSource;
pub use error::StoreError;
pub use file::FileSource;
pub use layered::{LayeredStore, LayeredStoreBuilder};
pub use memory::{MemoryStore, Scope};
pub use source::{ConfigEntry, ConfigSource};

/// The level a lookup is resolved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeType {
    /// Global values, shared by every store.
    Default,
    /// Per-store values, falling back to [`ScopeType::Default`].
    Store,
}

/// A read-only source of scoped configuration values.
pub trait ScopeConfig {
    /// Returns the raw value at `path` for the given scope, if one is set.
    ///
    /// `scope_id` narrows a [`ScopeType::Store`] lookup to one store; `None`
    /// leaves the choice of store to the provider.
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>)
        -> Option<Value>;
}

impl<T: ScopeConfig + ?Sized> ScopeConfig for &T {
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>) -> Option<Value> {
        (**self).get_value(path, scope_type, scope_id)
    }
}

impl<T: ScopeConfig + ?Sized> ScopeConfig for Box<T> {
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>) -> Option<Value> {
        (**self).get_value(path, scope_type, scope_id)
    }
}

impl<T: ScopeConfig + ?Sized> ScopeConfig for Arc<T> {
    fn get_value(&self, path: &str, scope_type: ScopeType, scope_id: Option<&str>) -> Option<Value> {
        (**self).get_value(path, scope_type, scope_id)
    }
}
