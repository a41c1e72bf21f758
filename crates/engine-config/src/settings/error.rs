use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating import settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read manifest '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("No store path configured and no home directory to default to")]
    NoStorePath,

    #[error("Settings validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
