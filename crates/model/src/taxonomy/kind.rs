use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::enums::ParseEnumError;

/// The eight CSV file kinds that make up a taxonomy dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    OccupationGroups,
    SkillGroups,
    Skills,
    Occupations,
    OccupationHierarchy,
    SkillHierarchy,
    OccupationToSkillRelations,
    SkillToSkillRelations,
}

/// Which import phase a kind belongs to, and which batch function persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFamily {
    Entity,
    Hierarchy,
    Relation,
}

impl ImportKind {
    pub const ALL: [ImportKind; 8] = [
        ImportKind::OccupationGroups,
        ImportKind::SkillGroups,
        ImportKind::Skills,
        ImportKind::Occupations,
        ImportKind::OccupationHierarchy,
        ImportKind::SkillHierarchy,
        ImportKind::OccupationToSkillRelations,
        ImportKind::SkillToSkillRelations,
    ];

    pub fn family(&self) -> KindFamily {
        match self {
            ImportKind::OccupationGroups
            | ImportKind::SkillGroups
            | ImportKind::Skills
            | ImportKind::Occupations => KindFamily::Entity,
            ImportKind::OccupationHierarchy | ImportKind::SkillHierarchy => KindFamily::Hierarchy,
            ImportKind::OccupationToSkillRelations | ImportKind::SkillToSkillRelations => {
                KindFamily::Relation
            }
        }
    }

    pub fn is_entity(&self) -> bool {
        self.family() == KindFamily::Entity
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::OccupationGroups => "occupation_groups",
            ImportKind::SkillGroups => "skill_groups",
            ImportKind::Skills => "skills",
            ImportKind::Occupations => "occupations",
            ImportKind::OccupationHierarchy => "occupation_hierarchy",
            ImportKind::SkillHierarchy => "skill_hierarchy",
            ImportKind::OccupationToSkillRelations => "occupation_to_skill_relations",
            ImportKind::SkillToSkillRelations => "skill_to_skill_relations",
        }
    }

    /// Conventional file name for this kind in an exported dataset directory.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ImportKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or(ParseEnumError {
                kind: "import kind",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
