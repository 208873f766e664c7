pub mod store;
pub mod tag_manager;
pub mod value;
mod error;

pub use error::Error;
pub use store::{LayeredStore, MemoryStore, Scope, ScopeConfig, ScopeType, StoreError};
pub use tag_manager::{paths, TagManagerConfig};
