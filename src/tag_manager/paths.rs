//! Setting paths read by [`TagManagerConfig`](super::TagManagerConfig).

// General
pub const EXTENSION_ENABLED: &str = "mfgoogletagmanager/general/enabled";
pub const ACCOUNT_ID: &str = "mfgoogletagmanager/general/account_id";
pub const CONTAINER_ID: &str = "mfgoogletagmanager/general/container_id";
pub const PUBLIC_ID: &str = "mfgoogletagmanager/general/public_id";

// Analytics
pub const ANALYTICS_ENABLED: &str = "mfgoogletagmanager/analytics/enable";
pub const ANALYTICS_MEASUREMENT_ID: &str = "mfgoogletagmanager/analytics/measurement_id";

// Product attributes
pub const ATTRIBUTES_PRODUCT: &str = "mfgoogletagmanager/attributes/product";
pub const ATTRIBUTES_BRAND: &str = "mfgoogletagmanager/attributes/brand";
