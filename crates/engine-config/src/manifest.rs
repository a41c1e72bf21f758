use crate::settings::error::SettingsError;
use model::taxonomy::ImportKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Import manifest as written by the user, before validation.
///
/// ```json
/// {
///   "model_id": "esco-1.1",
///   "store_path": "/var/lib/taxonomy",
///   "batch_sizes": { "entities": 500 },
///   "sources": [
///     { "kind": "skills", "path": "data/skills.csv" },
///     { "kind": "skill_to_skill_relations", "url": "https://example.org/s2s.csv" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportManifest {
    pub model_id: String,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub batch_sizes: BatchSizesConfig,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSizesConfig {
    pub entities: Option<usize>,
    pub hierarchy: Option<usize>,
    pub relations: Option<usize>,
}

/// One CSV file to import. Exactly one of `path` and `url` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(with = "kind_name")]
    pub kind: ImportKind,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ImportManifest {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let mut manifest = Self::from_json(&json)?;
        manifest.resolve_relative_paths(path.parent().unwrap_or(Path::new(".")));
        Ok(manifest)
    }

    /// Local source paths in a manifest file are relative to the manifest.
    fn resolve_relative_paths(&mut self, base: &Path) {
        for source in &mut self.sources {
            if let Some(path) = &source.path
                && path.is_relative()
            {
                source.path = Some(base.join(path));
            }
        }
    }
}

mod kind_name {
    use model::taxonomy::ImportKind;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(kind: &ImportKind, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(kind.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ImportKind, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(D::Error::custom)
    }
}
