use engine_config::SettingsError;
use engine_core::error::StoreError;
use engine_runtime::error::RunError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid import settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to run: {0}")]
    Runner(#[from] RunError),

    #[error("Failed to open the store: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Unknown kind '{0}'")]
    InvalidKind(String),
}
