use super::{
    batch_size::BatchSizes, env::EnvOverrides, error::SettingsError,
    validated::ValidatedImportSettings,
};
use crate::manifest::{BatchSizesConfig, ImportManifest, SourceEntry};
use connectors::source::CsvSource;
use std::path::PathBuf;
use tracing::{info, warn};

const LARGE_BATCH_SIZE: usize = 100_000;

/// Default store location: `~/.taxonomy/store`.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taxonomy").join("store"))
}

/// Validates an [`ImportManifest`] together with environment overrides.
pub struct SettingsValidator {
    env: EnvOverrides,
}

impl SettingsValidator {
    pub fn new(env: EnvOverrides) -> Self {
        Self { env }
    }

    /// Collects every problem in the manifest and reports them together.
    pub fn validate(&self, manifest: &ImportManifest) -> Result<ValidatedImportSettings, SettingsError> {
        let mut errors = Vec::new();

        let model_id = manifest.model_id.trim();
        if model_id.is_empty() {
            errors.push("model_id must not be empty".to_string());
        }

        let batch_sizes = self.batch_sizes(&manifest.batch_sizes, &mut errors);

        let mut sources = Vec::with_capacity(manifest.sources.len());
        for (idx, entry) in manifest.sources.iter().enumerate() {
            match source_location(entry) {
                Ok(location) => sources.push((entry.kind, location)),
                Err(e) => errors.push(format!("sources[{idx}] ({}): {e}", entry.kind)),
            }
        }
        if manifest.sources.is_empty() {
            warn!("Manifest lists no sources; nothing will be imported");
        }

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        // Stable sort keeps manifest order within a kind.
        sources.sort_by_key(|(kind, _)| *kind);

        let store_path = self
            .env
            .store_path
            .clone()
            .or_else(|| manifest.store_path.clone())
            .or_else(default_store_path)
            .ok_or(SettingsError::NoStorePath)?;

        let validated = ValidatedImportSettings {
            model_id: model_id.to_string(),
            store_path,
            batch_sizes,
            sources,
        };

        info!(
            model_id = %validated.model_id,
            store = %validated.store_path.display(),
            sources = validated.sources.len(),
            batch_sizes = ?validated.batch_sizes,
            "Import settings validated"
        );
        Ok(validated)
    }

    fn batch_sizes(&self, config: &BatchSizesConfig, errors: &mut Vec<String>) -> BatchSizes {
        let base = BatchSizes::uniform(self.env.batch_size.unwrap_or(super::batch_size::DEFAULT_BATCH_SIZE));
        let sizes = match self.env.batch_size {
            Some(_) => base,
            None => BatchSizes {
                entities: config.entities.unwrap_or(base.entities),
                hierarchy: config.hierarchy.unwrap_or(base.hierarchy),
                relations: config.relations.unwrap_or(base.relations),
            },
        };

        for (name, size) in [
            ("entities", sizes.entities),
            ("hierarchy", sizes.hierarchy),
            ("relations", sizes.relations),
        ] {
            if size == 0 {
                errors.push(format!("batch size for {name} must be greater than zero"));
            } else if size > LARGE_BATCH_SIZE {
                warn!("Batch size {size} for {name} is very large, may cause memory issues");
            }
        }

        sizes
    }
}

fn source_location(entry: &SourceEntry) -> Result<CsvSource, String> {
    match (&entry.path, &entry.url) {
        (Some(path), None) => Ok(CsvSource::File(path.clone())),
        (None, Some(url)) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(CsvSource::Url(url.clone()))
        }
        (None, Some(url)) => Err(format!("'{url}' is not an http(s) URL")),
        (Some(_), Some(_)) => Err("set either path or url, not both".to_string()),
        (None, None) => Err("either path or url is required".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::taxonomy::ImportKind;

    fn manifest(json: &str) -> ImportManifest {
        ImportManifest::from_json(json).unwrap()
    }

    #[test]
    fn orders_entities_before_links() {
        let m = manifest(
            r#"{"model_id":"m","store_path":"/s","sources":[
                {"kind":"skill_to_skill_relations","path":"s2s.csv"},
                {"kind":"skills","path":"skills-a.csv"},
                {"kind":"occupation_groups","url":"https://example.org/g.csv"},
                {"kind":"skills","path":"skills-b.csv"}
            ]}"#,
        );

        let settings = SettingsValidator::new(EnvOverrides::default()).validate(&m).unwrap();
        let kinds: Vec<_> = settings.sources.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                ImportKind::OccupationGroups,
                ImportKind::Skills,
                ImportKind::Skills,
                ImportKind::SkillToSkillRelations
            ]
        );
        assert_eq!(settings.sources[1].1, CsvSource::File("skills-a.csv".into()));
        assert_eq!(settings.entity_sources().count(), 3);
        assert_eq!(settings.link_sources().count(), 1);
    }

    #[test]
    fn env_overrides_win() {
        let m = manifest(r#"{"model_id":"m","store_path":"/s","batch_sizes":{"entities":5}}"#);
        let env = EnvOverrides {
            store_path: Some("/env".into()),
            batch_size: Some(42),
        };

        let settings = SettingsValidator::new(env).validate(&m).unwrap();
        assert_eq!(settings.store_path, PathBuf::from("/env"));
        assert_eq!(settings.batch_sizes, BatchSizes::uniform(42));
    }

    #[test]
    fn manifest_batch_sizes_fill_defaults() {
        let m = manifest(r#"{"model_id":"m","store_path":"/s","batch_sizes":{"relations":7}}"#);
        let settings = SettingsValidator::new(EnvOverrides::default()).validate(&m).unwrap();
        assert_eq!(settings.batch_sizes.relations, 7);
        assert_eq!(settings.batch_sizes.entities, 1000);
    }

    #[test]
    fn reports_every_problem() {
        let m = manifest(
            r#"{"model_id":" ","store_path":"/s","batch_sizes":{"hierarchy":0},"sources":[
                {"kind":"skills"},
                {"kind":"skills","url":"ftp://example.org/s.csv"}
            ]}"#,
        );

        match SettingsValidator::new(EnvOverrides::default()).validate(&m) {
            Err(SettingsError::ValidationFailed(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
