use super::{RowTransform, TransformContext, resolve_endpoints};
use model::{
    import_id::SharedImportIds,
    records::row::CsvRow,
    taxonomy::{
        NewOccupationToSkillRelationPairSpec, NewSkillToSkillRelationPairSpec, ObjectType,
        OccupationType, RelationType,
    },
};

pub const OCCUPATION_TO_SKILL_HEADERS: &[&str] =
    &["OCCUPATIONTYPE", "OCCUPATIONID", "RELATIONTYPE", "SKILLID"];

pub const SKILL_TO_SKILL_HEADERS: &[&str] = &["REQUIRINGID", "RELATIONTYPE", "REQUIREDID"];

pub struct OccupationToSkillRelationTransform {
    ctx: TransformContext,
    ids: SharedImportIds,
}

impl OccupationToSkillRelationTransform {
    pub fn new(ctx: TransformContext, ids: SharedImportIds) -> Self {
        Self { ctx, ids }
    }
}

impl RowTransform for OccupationToSkillRelationTransform {
    type Spec = NewOccupationToSkillRelationPairSpec;

    fn name(&self) -> &'static str {
        "occupation to skill relation"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        OCCUPATION_TO_SKILL_HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewOccupationToSkillRelationPairSpec> {
        let occupation_key = row.get_trimmed("OCCUPATIONID");
        let skill_key = row.get_trimmed("SKILLID");
        let reject = |reason: &str| {
            self.ctx
                .reject_link(self.name(), row, occupation_key, skill_key, reason);
            None
        };

        let parsed = row
            .get("OCCUPATIONTYPE")
            .parse::<OccupationType>()
            .and_then(|o| Ok((o, row.get("RELATIONTYPE").parse::<RelationType>()?)));
        let (occupation_type, relation_type) = match parsed {
            Ok(v) => v,
            Err(e) => return reject(&format!("{e}.")),
        };

        match resolve_endpoints(&self.ids, occupation_key, skill_key) {
            Ok((occupation_id, skill_id)) => Some(NewOccupationToSkillRelationPairSpec {
                model_id: self.ctx.model_id.clone(),
                requiring_occupation_type: ObjectType::from(occupation_type),
                requiring_occupation_id: occupation_id,
                relation_type,
                required_skill_id: skill_id,
            }),
            Err(reason) => reject(reason),
        }
    }
}

pub struct SkillToSkillRelationTransform {
    ctx: TransformContext,
    ids: SharedImportIds,
}

impl SkillToSkillRelationTransform {
    pub fn new(ctx: TransformContext, ids: SharedImportIds) -> Self {
        Self { ctx, ids }
    }
}

impl RowTransform for SkillToSkillRelationTransform {
    type Spec = NewSkillToSkillRelationPairSpec;

    fn name(&self) -> &'static str {
        "skill to skill relation"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        SKILL_TO_SKILL_HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewSkillToSkillRelationPairSpec> {
        let requiring_key = row.get_trimmed("REQUIRINGID");
        let required_key = row.get_trimmed("REQUIREDID");
        let reject = |reason: &str| {
            self.ctx
                .reject_link(self.name(), row, requiring_key, required_key, reason);
            None
        };

        let relation_type = match row.get("RELATIONTYPE").parse::<RelationType>() {
            Ok(t) => t,
            Err(e) => return reject(&format!("{e}.")),
        };

        match resolve_endpoints(&self.ids, requiring_key, required_key) {
            Ok((requiring_id, required_id)) => Some(NewSkillToSkillRelationPairSpec {
                model_id: self.ctx.model_id.clone(),
                requiring_skill_id: requiring_id,
                relation_type,
                required_skill_id: required_id,
            }),
            Err(reason) => reject(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::diagnostics::{Diagnostics, MemoryDiagnostics};
    use std::sync::Arc;

    fn setup() -> (TransformContext, SharedImportIds, Arc<MemoryDiagnostics>) {
        let diag = MemoryDiagnostics::shared();
        let ids = SharedImportIds::new();
        ids.insert("o1", "db-o1");
        ids.insert("s1", "db-s1");
        ids.insert("s2", "db-s2");
        (TransformContext::new("m", diag.clone()), ids, diag)
    }

    #[test]
    fn occupation_to_skill_uses_storage_ids() {
        let (ctx, ids, diag) = setup();
        let t = OccupationToSkillRelationTransform::new(ctx, ids);
        let row = CsvRow::from_pairs(&[
            ("OCCUPATIONTYPE", "ESCOOccupation"),
            ("OCCUPATIONID", "o1"),
            ("RELATIONTYPE", "essential"),
            ("SKILLID", "s1"),
        ]);

        let spec = t.transform(&row).unwrap();
        assert_eq!(spec.requiring_occupation_id, "db-o1");
        assert_eq!(spec.requiring_occupation_type, ObjectType::EscoOccupation);
        assert_eq!(spec.required_skill_id, "db-s1");
        assert_eq!(spec.relation_type, RelationType::Essential);
        assert_eq!(diag.warning_count(), 0);
    }

    #[test]
    fn unmapped_skill_rejects_row_with_single_warning() {
        let (ctx, ids, diag) = setup();
        let t = SkillToSkillRelationTransform::new(ctx, ids);
        let row = CsvRow::from_pairs(&[
            ("REQUIRINGID", "s1"),
            ("RELATIONTYPE", "optional"),
            ("REQUIREDID", "ghost"),
        ]);

        assert!(t.transform(&row).is_none());
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'s1'") && warnings[0].contains("'ghost'"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let (ctx, ids, diag) = setup();
        let t = SkillToSkillRelationTransform::new(ctx, ids);
        let row = CsvRow::from_pairs(&[
            ("REQUIRINGID", ""),
            ("RELATIONTYPE", "optional"),
            ("REQUIREDID", "s2"),
        ]);

        assert!(t.transform(&row).is_none());
        assert_eq!(diag.warning_count(), 1);
    }
}
