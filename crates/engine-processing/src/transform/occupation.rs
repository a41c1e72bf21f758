use super::{RowTransform, TransformContext, import_id};
use model::{
    core::utils::{parse_bool, split_list},
    records::row::CsvRow,
    taxonomy::{NewOccupationSpec, OccupationType},
};

pub const HEADERS: &[&str] = &[
    "ORIGINURI",
    "ID",
    "UUIDHISTORY",
    "OCCUPATIONGROUPCODE",
    "CODE",
    "PREFERREDLABEL",
    "ALTLABELS",
    "DESCRIPTION",
    "DEFINITION",
    "SCOPENOTE",
    "REGULATEDPROFESSIONNOTE",
    "OCCUPATIONTYPE",
    "ISLOCALIZED",
];

pub struct OccupationTransform {
    ctx: TransformContext,
}

impl OccupationTransform {
    pub fn new(ctx: TransformContext) -> Self {
        Self { ctx }
    }
}

impl RowTransform for OccupationTransform {
    type Spec = NewOccupationSpec;

    fn name(&self) -> &'static str {
        "occupation"
    }

    fn required_headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn transform(&self, row: &CsvRow) -> Option<NewOccupationSpec> {
        let reject = |reason: &str| {
            self.ctx.reject_entity(self.name(), row, reason);
            None
        };

        let code = row.get_trimmed("CODE");
        if code.is_empty() {
            return reject("Code is empty.");
        }
        let group_code = row.get_trimmed("OCCUPATIONGROUPCODE");
        if group_code.is_empty() {
            return reject("Occupation group code is empty.");
        }
        let preferred_label = row.get_trimmed("PREFERREDLABEL");
        if preferred_label.is_empty() {
            return reject("Preferred label is empty.");
        }

        let occupation_type = match row.get("OCCUPATIONTYPE").parse::<OccupationType>() {
            Ok(t) => t,
            Err(e) => return reject(&format!("{e}.")),
        };

        // An empty flag means "not localized"; anything else must be a boolean.
        let localized = row.get_trimmed("ISLOCALIZED");
        let is_localized = if localized.is_empty() {
            false
        } else {
            match parse_bool(localized) {
                Some(b) => b,
                None => return reject(&format!("invalid localized flag '{localized}'.")),
            }
        };

        Some(NewOccupationSpec {
            model_id: self.ctx.model_id.clone(),
            import_id: import_id(row),
            origin_uri: row.get_trimmed("ORIGINURI").to_string(),
            uuid_history: split_list(row.get("UUIDHISTORY")),
            occupation_group_code: group_code.to_string(),
            code: code.to_string(),
            preferred_label: preferred_label.to_string(),
            alt_labels: split_list(row.get("ALTLABELS")),
            description: row.get("DESCRIPTION").to_string(),
            definition: row.get("DEFINITION").to_string(),
            scope_note: row.get("SCOPENOTE").to_string(),
            regulated_profession_note: row.get("REGULATEDPROFESSIONNOTE").to_string(),
            occupation_type,
            is_localized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::diagnostics::{Diagnostics, MemoryDiagnostics};

    fn row(occupation_type: &str, localized: &str) -> CsvRow {
        CsvRow::from_pairs(&[
            ("ID", "o1"),
            ("OCCUPATIONGROUPCODE", "2512"),
            ("CODE", "2512.4"),
            ("PREFERREDLABEL", "software developer"),
            ("REGULATEDPROFESSIONNOTE", "none"),
            ("OCCUPATIONTYPE", occupation_type),
            ("ISLOCALIZED", localized),
        ])
    }

    #[test]
    fn maps_occupation_row() {
        let diag = MemoryDiagnostics::shared();
        let t = OccupationTransform::new(TransformContext::new("m", diag.clone()));

        let spec = t.transform(&row("ESCOOccupation", "TRUE")).unwrap();
        assert_eq!(spec.occupation_group_code, "2512");
        assert_eq!(spec.occupation_type, OccupationType::Esco);
        assert!(spec.is_localized);
        assert_eq!(spec.regulated_profession_note, "none");

        let spec = t.transform(&row("LocalOccupation", "")).unwrap();
        assert!(!spec.is_localized);
        assert_eq!(diag.warning_count(), 0);
    }

    #[test]
    fn each_bad_field_gives_one_warning() {
        let diag = MemoryDiagnostics::shared();
        let t = OccupationTransform::new(TransformContext::new("m", diag.clone()));

        assert!(t.transform(&row("Freelance", "false")).is_none());
        assert!(t.transform(&row("ESCOOccupation", "maybe")).is_none());
        assert_eq!(diag.warning_count(), 2);
    }
}
