use crate::store::StoreError;
use thiserror::Error;

/// Top-level error type for the gtm-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
