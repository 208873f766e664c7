use std::ffi::OsString;

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::StoreError;

/// Environment variables as a configuration layer.
///
/// `GTM__STORES__EN__MFGOOGLETAGMANAGER__GENERAL__PUBLIC_ID=GTM-1` with prefix
/// `GTM` and separator `__` lands at `stores.en.mfgoogletagmanager.general.public_id`.
///
/// Values are kept as strings: settings are identifiers, so `0012345` must
/// not turn into a number. Variables whose name or value is not valid UTF-8
/// are skipped.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    /// Creates a new env source. An empty separator fails at load time.
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }

    pub(crate) fn entries_from(
        &self,
        vars: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Result<Vec<ConfigEntry>, StoreError> {
        if self.separator.is_empty() {
            return Err(StoreError::EmptyEnvSeparator(self.prefix.clone()));
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);

        Ok(vars
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.into_string().ok()?;
                let path_str = key.strip_prefix(&prefix_with_sep)?;
                if path_str.is_empty() {
                    return None;
                }

                let Ok(value) = value.into_string() else {
                    tracing::debug!(var = %key, "skipping env var with non UTF-8 value");
                    return None;
                };

                let path = path_str
                    .split(&self.separator)
                    .map(|s| s.to_lowercase())
                    .collect();
                Some(ConfigEntry::at_path(path, Value::String(value)))
            })
            .collect())
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> String {
        format!("env:{}{}*", self.prefix, self.separator)
    }

    fn entries(&self) -> Result<Vec<ConfigEntry>, StoreError> {
        self.entries_from(std::env::vars_os())
    }
}
