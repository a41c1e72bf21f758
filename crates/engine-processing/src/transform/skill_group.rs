use super::{RowTransform, TransformContext, import_id};
use model::{core::utils::split_list, records::row::CsvRow, taxonomy::NewSkillGroupSpec};

pub const HEADERS: &[&str] = &[
    "ORIGINURI",
    "ID",
    "UUIDHISTORY",
    "CODE",
    "PREFERREDLABEL",
    "ALTLABELS",
    "DESCRIPTION",
    "SCOPENOTE",
];

pub struct SkillGroupTransform {
    ctx: TransformContext,
}

impl SkillGroupTransform {
    pub fn new(ctx: TransformContext) -> Self {
        Self { ctx }
    }
}

impl RowTransform for SkillGroupTransform {
    type Spec = NewSkillGroupSpec;

    fn name(&self) -> &'static str {
        "skill group"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewSkillGroupSpec> {
        let code = row.get_trimmed("CODE");
        if code.is_empty() {
            self.ctx.reject_entity(self.name(), row, "Code is empty.");
            return None;
        }

        let preferred_label = row.get_trimmed("PREFERREDLABEL");
        if preferred_label.is_empty() {
            self.ctx.reject_entity(self.name(), row, "Preferred label is empty.");
            return None;
        }

        Some(NewSkillGroupSpec {
            model_id: self.ctx.model_id.clone(),
            import_id: import_id(row),
            origin_uri: row.get_trimmed("ORIGINURI").to_string(),
            uuid_history: split_list(row.get("UUIDHISTORY")),
            code: code.to_string(),
            preferred_label: preferred_label.to_string(),
            alt_labels: split_list(row.get("ALTLABELS")),
            description: row.get("DESCRIPTION").to_string(),
            scope_note: row.get("SCOPENOTE").to_string(),
        })
    }
}
