use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares an enum whose variants map one-to-one onto the literal strings
/// used in taxonomy CSV files.
macro_rules! csv_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ParseEnumError {
                    kind: $label,
                    value: s.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

csv_enum!(
    /// Whether an occupation group comes from ISCO or was added locally.
    OccupationGroupType, "occupation group type" {
        IscoGroup => "ISCOGroup",
        LocalGroup => "LocalGroup",
    }
);

csv_enum!(
    OccupationType, "occupation type" {
        Esco => "ESCOOccupation",
        Local => "LocalOccupation",
    }
);

csv_enum!(
    /// Empty cells map to `None`.
    SkillType, "skill type" {
        None => "",
        SkillCompetence => "skill/competence",
        Knowledge => "knowledge",
        Language => "language",
        Attitude => "attitude",
    }
);

csv_enum!(
    ReuseLevel, "reuse level" {
        None => "",
        SectorSpecific => "sector-specific",
        OccupationSpecific => "occupation-specific",
        CrossSector => "cross-sector",
        Transversal => "transversal",
    }
);

csv_enum!(
    RelationType, "relation type" {
        Essential => "essential",
        Optional => "optional",
    }
);

csv_enum!(
    /// Object types that may appear at either end of a hierarchy pair.
    ObjectType, "object type" {
        IscoGroup => "ISCOGroup",
        LocalGroup => "LocalGroup",
        EscoOccupation => "ESCOOccupation",
        LocalOccupation => "LocalOccupation",
        SkillGroup => "SkillGroup",
        Skill => "Skill",
    }
);

impl ObjectType {
    pub fn is_occupation_group(self) -> bool {
        matches!(self, ObjectType::IscoGroup | ObjectType::LocalGroup)
    }

    pub fn is_occupation(self) -> bool {
        matches!(self, ObjectType::EscoOccupation | ObjectType::LocalOccupation)
    }

    pub fn is_skill_family(self) -> bool {
        matches!(self, ObjectType::SkillGroup | ObjectType::Skill)
    }
}

impl From<OccupationGroupType> for ObjectType {
    fn from(value: OccupationGroupType) -> Self {
        match value {
            OccupationGroupType::IscoGroup => ObjectType::IscoGroup,
            OccupationGroupType::LocalGroup => ObjectType::LocalGroup,
        }
    }
}

impl From<OccupationType> for ObjectType {
    fn from(value: OccupationType) -> Self {
        match value {
            OccupationType::Esco => ObjectType::EscoOccupation,
            OccupationType::Local => ObjectType::LocalOccupation,
        }
    }
}
