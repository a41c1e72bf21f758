use super::{RowTransform, TransformContext, resolve_endpoints};
use model::{
    import_id::SharedImportIds,
    records::row::CsvRow,
    taxonomy::{NewOccupationHierarchyPairSpec, NewSkillHierarchyPairSpec, ObjectType},
};

pub const HEADERS: &[&str] = &["PARENTOBJECTTYPE", "PARENTID", "CHILDID", "CHILDOBJECTTYPE"];

/// Endpoints of a hierarchy row after type checks and id resolution.
struct ResolvedPair {
    parent_type: ObjectType,
    parent_id: String,
    child_type: ObjectType,
    child_id: String,
}

fn resolve_pair(
    ctx: &TransformContext,
    ids: &SharedImportIds,
    name: &str,
    row: &CsvRow,
    allowed: fn(ObjectType) -> bool,
) -> Option<ResolvedPair> {
    let parent_key = row.get_trimmed("PARENTID");
    let child_key = row.get_trimmed("CHILDID");
    let reject = |reason: &str| {
        ctx.reject_link(name, row, parent_key, child_key, reason);
        None
    };

    let types = row
        .get("PARENTOBJECTTYPE")
        .parse::<ObjectType>()
        .and_then(|p| Ok((p, row.get("CHILDOBJECTTYPE").parse::<ObjectType>()?)));
    let (parent_type, child_type) = match types {
        Ok(types) => types,
        Err(e) => return reject(&format!("{e}.")),
    };
    if !allowed(parent_type) || !allowed(child_type) {
        return reject(&format!(
            "Object types {parent_type} and {child_type} cannot form a {name}."
        ));
    }

    match resolve_endpoints(ids, parent_key, child_key) {
        Ok((parent_id, child_id)) => Some(ResolvedPair {
            parent_type,
            parent_id,
            child_type,
            child_id,
        }),
        Err(reason) => reject(reason),
    }
}

fn occupation_family(t: ObjectType) -> bool {
    t.is_occupation_group() || t.is_occupation()
}

pub struct OccupationHierarchyTransform {
    ctx: TransformContext,
    ids: SharedImportIds,
}

impl OccupationHierarchyTransform {
    pub fn new(ctx: TransformContext, ids: SharedImportIds) -> Self {
        Self { ctx, ids }
    }
}

impl RowTransform for OccupationHierarchyTransform {
    type Spec = NewOccupationHierarchyPairSpec;

    fn name(&self) -> &'static str {
        "occupation hierarchy"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewOccupationHierarchyPairSpec> {
        let pair = resolve_pair(&self.ctx, &self.ids, self.name(), row, occupation_family)?;
        Some(NewOccupationHierarchyPairSpec {
            model_id: self.ctx.model_id.clone(),
            parent_type: pair.parent_type,
            parent_id: pair.parent_id,
            child_type: pair.child_type,
            child_id: pair.child_id,
        })
    }
}

pub struct SkillHierarchyTransform {
    ctx: TransformContext,
    ids: SharedImportIds,
}

impl SkillHierarchyTransform {
    pub fn new(ctx: TransformContext, ids: SharedImportIds) -> Self {
        Self { ctx, ids }
    }
}

impl RowTransform for SkillHierarchyTransform {
    type Spec = NewSkillHierarchyPairSpec;

    fn name(&self) -> &'static str {
        "skill hierarchy"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewSkillHierarchyPairSpec> {
        let pair = resolve_pair(&self.ctx, &self.ids, self.name(), row, ObjectType::is_skill_family)?;
        Some(NewSkillHierarchyPairSpec {
            model_id: self.ctx.model_id.clone(),
            parent_type: pair.parent_type,
            parent_id: pair.parent_id,
            child_type: pair.child_type,
            child_id: pair.child_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::diagnostics::{Diagnostics, MemoryDiagnostics};

    fn row(parent_type: &str, parent: &str, child_type: &str, child: &str) -> CsvRow {
        CsvRow::from_pairs(&[
            ("PARENTOBJECTTYPE", parent_type),
            ("PARENTID", parent),
            ("CHILDID", child),
            ("CHILDOBJECTTYPE", child_type),
        ])
    }

    fn ids() -> SharedImportIds {
        let ids = SharedImportIds::new();
        ids.insert("g1", "db-g1");
        ids.insert("o1", "db-o1");
        ids.insert("s1", "db-s1");
        ids.insert("sg1", "db-sg1");
        ids
    }

    #[test]
    fn resolves_occupation_pair_to_storage_ids() {
        let diag = MemoryDiagnostics::shared();
        let t = OccupationHierarchyTransform::new(TransformContext::new("m", diag.clone()), ids());

        let spec = t.transform(&row("ISCOGroup", "g1", "ESCOOccupation", "o1")).unwrap();
        assert_eq!(spec.parent_id, "db-g1");
        assert_eq!(spec.parent_type, ObjectType::IscoGroup);
        assert_eq!(spec.child_id, "db-o1");
        assert_eq!(spec.child_type, ObjectType::EscoOccupation);
        assert_eq!(diag.warning_count(), 0);
    }

    #[test]
    fn unmapped_key_warns_once_naming_both_keys() {
        let diag = MemoryDiagnostics::shared();
        let t = OccupationHierarchyTransform::new(TransformContext::new("m", diag.clone()), ids());

        assert!(t.transform(&row("ISCOGroup", "g1", "ESCOOccupation", "o404")).is_none());
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'g1'"));
        assert!(warnings[0].contains("'o404'"));
    }

    #[test]
    fn skill_hierarchy_rejects_occupation_types() {
        let diag = MemoryDiagnostics::shared();
        let t = SkillHierarchyTransform::new(TransformContext::new("m", diag.clone()), ids());

        assert!(t.transform(&row("SkillGroup", "sg1", "Skill", "s1")).is_some());
        assert!(t.transform(&row("ISCOGroup", "g1", "Skill", "s1")).is_none());
        assert_eq!(diag.warning_count(), 1);
    }
}
