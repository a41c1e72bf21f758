//! Entity-to-row mapping and the CSV export loop.
//!
//! Every kind is written with the same headers its import reads, and the `ID`
//! column carries the storage id, so an export can be re-imported as is.

use crate::{
    error::ExportError,
    transform::{hierarchy, occupation, occupation_group, relation, skill, skill_group},
};
use connectors::file::csv::CsvRowWriter;
use engine_core::repository::Repository;
use futures::TryStreamExt;
use model::{
    core::utils::join_list,
    taxonomy::{
        HierarchyPair, Occupation, OccupationGroup, OccupationHierarchyPair,
        OccupationToSkillRelationPair, Skill, SkillGroup, SkillHierarchyPair,
        SkillToSkillRelationPair,
    },
};
use tokio::io::AsyncWrite;
use tracing::info;

pub trait ExportRow {
    const HEADERS: &'static [&'static str];

    /// Cells in `HEADERS` order.
    fn to_row(&self) -> Vec<String>;
}

/// Stream every entity of `model_id` from `repository` into `writer` as CSV.
/// Returns the number of data rows written.
pub async fn export_csv<R, W>(repository: &R, model_id: &str, writer: W) -> Result<u64, ExportError>
where
    R: Repository,
    R::Entity: ExportRow,
    W: AsyncWrite + Unpin,
{
    let mut csv = CsvRowWriter::new(writer);
    csv.write_headers(<R::Entity as ExportRow>::HEADERS).await?;

    let mut entities = repository.find_all(model_id);
    while let Some(entity) = entities.try_next().await? {
        csv.write_row(&entity.to_row()).await?;
    }

    let rows = csv.finish().await?;
    info!(model_id, rows, "Export finished");
    Ok(rows)
}

impl ExportRow for OccupationGroup {
    const HEADERS: &'static [&'static str] = occupation_group::HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.origin_uri.clone(),
            self.id.clone(),
            join_list(&self.uuid_history),
            self.code.clone(),
            self.group_type.to_string(),
            self.preferred_label.clone(),
            join_list(&self.alt_labels),
            self.description.clone(),
        ]
    }
}

impl ExportRow for SkillGroup {
    const HEADERS: &'static [&'static str] = skill_group::HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.origin_uri.clone(),
            self.id.clone(),
            join_list(&self.uuid_history),
            self.code.clone(),
            self.preferred_label.clone(),
            join_list(&self.alt_labels),
            self.description.clone(),
            self.scope_note.clone(),
        ]
    }
}

impl ExportRow for Skill {
    const HEADERS: &'static [&'static str] = skill::HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.origin_uri.clone(),
            self.id.clone(),
            join_list(&self.uuid_history),
            self.skill_type.to_string(),
            self.reuse_level.to_string(),
            self.preferred_label.clone(),
            join_list(&self.alt_labels),
            self.description.clone(),
            self.definition.clone(),
            self.scope_note.clone(),
        ]
    }
}

impl ExportRow for Occupation {
    const HEADERS: &'static [&'static str] = occupation::HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.origin_uri.clone(),
            self.id.clone(),
            join_list(&self.uuid_history),
            self.occupation_group_code.clone(),
            self.code.clone(),
            self.preferred_label.clone(),
            join_list(&self.alt_labels),
            self.description.clone(),
            self.definition.clone(),
            self.scope_note.clone(),
            self.regulated_profession_note.clone(),
            self.occupation_type.to_string(),
            self.is_localized.to_string(),
        ]
    }
}

fn hierarchy_row(pair: &HierarchyPair) -> Vec<String> {
    vec![
        pair.parent_type.to_string(),
        pair.parent_id.clone(),
        pair.child_id.clone(),
        pair.child_type.to_string(),
    ]
}

impl ExportRow for OccupationHierarchyPair {
    const HEADERS: &'static [&'static str] = hierarchy::HEADERS;

    fn to_row(&self) -> Vec<String> {
        hierarchy_row(self)
    }
}

impl ExportRow for SkillHierarchyPair {
    const HEADERS: &'static [&'static str] = hierarchy::HEADERS;

    fn to_row(&self) -> Vec<String> {
        hierarchy_row(self)
    }
}

impl ExportRow for OccupationToSkillRelationPair {
    const HEADERS: &'static [&'static str] = relation::OCCUPATION_TO_SKILL_HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.requiring_occupation_type.to_string(),
            self.requiring_occupation_id.clone(),
            self.relation_type.to_string(),
            self.required_skill_id.clone(),
        ]
    }
}

impl ExportRow for SkillToSkillRelationPair {
    const HEADERS: &'static [&'static str] = relation::SKILL_TO_SKILL_HEADERS;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.requiring_skill_id.clone(),
            self.relation_type.to_string(),
            self.required_skill_id.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::file::csv::CsvRowReader;
    use engine_core::{
        diagnostics::MemoryDiagnostics,
        repository::SledRepository,
        store::SledStore,
    };
    use model::taxonomy::{NewSkillSpec, ReuseLevel, SkillType};

    #[test]
    fn row_width_matches_headers() {
        let skill = Skill::from_spec(
            "1".into(),
            NewSkillSpec {
                model_id: "m".into(),
                import_id: "s1".into(),
                origin_uri: String::new(),
                uuid_history: vec![],
                skill_type: SkillType::Language,
                reuse_level: ReuseLevel::Transversal,
                preferred_label: "speak French".into(),
                alt_labels: vec!["French".into(), "français".into()],
                description: String::new(),
                definition: String::new(),
                scope_note: String::new(),
            },
        );

        let row = skill.to_row();
        assert_eq!(row.len(), Skill::HEADERS.len());
        assert_eq!(row[3], "language");
        assert_eq!(row[6], "French\nfrançais");
    }

    #[tokio::test]
    async fn exports_only_the_requested_model() {
        let store = SledStore::temporary().unwrap();
        let diag = MemoryDiagnostics::shared();
        let repo = SledRepository::<SkillGroup>::new(&store, diag).unwrap();

        let spec = |model: &str, code: &str| model::taxonomy::NewSkillGroupSpec {
            model_id: model.into(),
            import_id: code.into(),
            origin_uri: String::new(),
            uuid_history: vec![],
            code: code.into(),
            preferred_label: format!("group {code}"),
            alt_labels: vec![],
            description: String::new(),
            scope_note: String::new(),
        };
        repo.create_many("a", vec![spec("a", "S1"), spec("a", "S2")]).await.unwrap();
        repo.create_many("b", vec![spec("b", "S3")]).await.unwrap();

        let mut out = Vec::new();
        let rows = export_csv(&repo, "a", &mut out).await.unwrap();
        assert_eq!(rows, 2);

        let mut reader = CsvRowReader::new(out.as_slice()).await.unwrap();
        assert_eq!(reader.headers(), skill_group::HEADERS);
        let first = reader.next_row().await.unwrap().unwrap();
        assert_eq!(first.get("CODE"), "S1");
        assert_eq!(first.get("PREFERREDLABEL"), "group S1");
    }
}
