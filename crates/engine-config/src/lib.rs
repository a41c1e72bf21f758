pub mod manifest;
pub mod settings;

pub use manifest::{ImportManifest, SourceEntry};
pub use settings::{
    batch_size::BatchSizes, env::EnvOverrides, error::SettingsError,
    validated::ValidatedImportSettings, validator::SettingsValidator,
};
