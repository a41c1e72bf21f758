//! Row-to-specification transforms, one per taxonomy kind.
//!
//! A transform is synchronous and never fails: a row it cannot map is
//! rejected with exactly one warning and `None`.

pub mod headers;
pub mod hierarchy;
pub mod occupation;
pub mod occupation_group;
pub mod relation;
pub mod skill;
pub mod skill_group;

pub use headers::HeadersValidator;
pub use hierarchy::{OccupationHierarchyTransform, SkillHierarchyTransform};
pub use occupation::OccupationTransform;
pub use occupation_group::OccupationGroupTransform;
pub use relation::{OccupationToSkillRelationTransform, SkillToSkillRelationTransform};
pub use skill::SkillTransform;
pub use skill_group::SkillGroupTransform;

use engine_core::diagnostics::SharedDiagnostics;
use model::{import_id::SharedImportIds, records::row::CsvRow};

pub trait RowTransform: Send + Sync {
    type Spec: Send + 'static;

    /// Human readable name used in diagnostics, e.g. "occupation group".
    fn name(&self) -> &'static str;

    fn required_headers(&self) -> &'static [&'static str];

    fn transform(&self, row: &CsvRow) -> Option<Self::Spec>;
}

/// Per-run state every transform needs.
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub model_id: String,
    pub diagnostics: SharedDiagnostics,
}

impl TransformContext {
    pub fn new(model_id: impl Into<String>, diagnostics: SharedDiagnostics) -> Self {
        Self {
            model_id: model_id.into(),
            diagnostics,
        }
    }

    /// Log the single warning for an entity row that cannot be imported.
    pub(crate) fn reject_entity(&self, name: &str, row: &CsvRow, reason: &str) {
        self.diagnostics.log_warning(
            &format!(
                "Failed to import {name} row with id:'{}'. {reason} (line {})",
                row.get_trimmed("ID"),
                row.line
            ),
            None,
        );
    }

    /// Log the single warning for a link row that cannot be imported.
    pub(crate) fn reject_link(&self, name: &str, row: &CsvRow, from: &str, to: &str, reason: &str) {
        self.diagnostics.log_warning(
            &format!(
                "Failed to import {name} row from '{from}' to '{to}'. {reason} (line {})",
                row.line
            ),
            None,
        );
    }
}

/// Resolves both endpoints of a link row through the import-ID map.
///
/// Returns `Err(reason)` naming the offending side when either key is empty
/// or was never imported.
pub(crate) fn resolve_endpoints(
    ids: &SharedImportIds,
    from: &str,
    to: &str,
) -> Result<(String, String), &'static str> {
    if from.is_empty() || to.is_empty() {
        return Err("One of the endpoint ids is empty.");
    }
    let Some(from_id) = ids.resolve(from) else {
        return Err("The source endpoint was not imported.");
    };
    let Some(to_id) = ids.resolve(to) else {
        return Err("The target endpoint was not imported.");
    };
    Ok((from_id, to_id))
}

/// Natural key of an entity row. Rows without one still import but cannot be
/// referenced by links.
pub(crate) fn import_id(row: &CsvRow) -> String {
    row.get_trimmed("ID").to_string()
}
