use super::{RowTransform, TransformContext, import_id};
use model::{
    core::utils::split_list,
    records::row::CsvRow,
    taxonomy::{NewSkillSpec, ReuseLevel, SkillType},
};

pub const HEADERS: &[&str] = &[
    "ORIGINURI",
    "ID",
    "UUIDHISTORY",
    "SKILLTYPE",
    "REUSELEVEL",
    "PREFERREDLABEL",
    "ALTLABELS",
    "DESCRIPTION",
    "DEFINITION",
    "SCOPENOTE",
];

pub struct SkillTransform {
    ctx: TransformContext,
}

impl SkillTransform {
    pub fn new(ctx: TransformContext) -> Self {
        Self { ctx }
    }
}

impl RowTransform for SkillTransform {
    type Spec = NewSkillSpec;

    fn name(&self) -> &'static str {
        "skill"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewSkillSpec> {
        let preferred_label = row.get_trimmed("PREFERREDLABEL");
        if preferred_label.is_empty() {
            self.ctx.reject_entity(self.name(), row, "Preferred label is empty.");
            return None;
        }

        let parsed = row
            .get("SKILLTYPE")
            .parse::<SkillType>()
            .and_then(|skill_type| Ok((skill_type, row.get("REUSELEVEL").parse::<ReuseLevel>()?)));
        let (skill_type, reuse_level) = match parsed {
            Ok(v) => v,
            Err(e) => {
                self.ctx.reject_entity(self.name(), row, &format!("{e}."));
                return None;
            }
        };

        Some(NewSkillSpec {
            model_id: self.ctx.model_id.clone(),
            import_id: import_id(row),
            origin_uri: row.get_trimmed("ORIGINURI").to_string(),
            uuid_history: split_list(row.get("UUIDHISTORY")),
            skill_type,
            reuse_level,
            preferred_label: preferred_label.to_string(),
            alt_labels: split_list(row.get("ALTLABELS")),
            description: row.get("DESCRIPTION").to_string(),
            definition: row.get("DEFINITION").to_string(),
            scope_note: row.get("SCOPENOTE").to_string(),
        })
    }
}
