use super::error::SettingsError;
use std::path::PathBuf;

pub const STORE_PATH_VAR: &str = "TAXONOMY_STORE_PATH";
pub const BATCH_SIZE_VAR: &str = "TAXONOMY_BATCH_SIZE";

/// Settings taken from the environment. They win over the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub store_path: Option<PathBuf>,
    /// Applied to every kind.
    pub batch_size: Option<usize>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build overrides from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let batch_size = match get(BATCH_SIZE_VAR) {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| SettingsError::InvalidEnv {
                key: BATCH_SIZE_VAR,
                value: raw,
            })?),
            None => None,
        };

        Ok(Self {
            store_path: get(STORE_PATH_VAR).map(PathBuf::from),
            batch_size,
        })
    }
}
