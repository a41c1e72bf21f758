use super::{RowTransform, TransformContext, import_id};
use model::{
    core::utils::split_list,
    records::row::CsvRow,
    taxonomy::{NewOccupationGroupSpec, OccupationGroupType},
};

pub const HEADERS: &[&str] = &[
    "ORIGINURI",
    "ID",
    "UUIDHISTORY",
    "CODE",
    "GROUPTYPE",
    "PREFERREDLABEL",
    "ALTLABELS",
    "DESCRIPTION",
];

pub struct OccupationGroupTransform {
    ctx: TransformContext,
}

impl OccupationGroupTransform {
    pub fn new(ctx: TransformContext) -> Self {
        Self { ctx }
    }
}

impl RowTransform for OccupationGroupTransform {
    type Spec = NewOccupationGroupSpec;

    fn name(&self) -> &'static str {
        "occupation group"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewOccupationGroupSpec> {
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

        let group_type = match row.get("GROUPTYPE").parse::<OccupationGroupType>() {
            Ok(t) => t,
            Err(e) => {
                self.ctx.reject_entity(self.name(), row, &format!("{e}."));
                return None;
            }
        };

        Some(NewOccupationGroupSpec {
            model_id: self.ctx.model_id.clone(),
            import_id: import_id(row),
            origin_uri: row.get_trimmed("ORIGINURI").to_string(),
            uuid_history: split_list(row.get("UUIDHISTORY")),
            code: code.to_string(),
            group_type,
            preferred_label: preferred_label.to_string(),
            alt_labels: split_list(row.get("ALTLABELS")),
            description: row.get("DESCRIPTION").to_string(),
        })
    }
}
