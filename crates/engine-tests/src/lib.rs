#![allow(dead_code)]

use connectors::source::CsvSource;
use engine_config::{BatchSizes, ValidatedImportSettings};
use model::taxonomy::ImportKind;
use std::path::Path;

pub mod integration;
pub mod utils;

const MODEL_ID: &str = "esco-test";

pub const OCCUPATION_GROUPS_CSV: &str = "\
ORIGINURI,ID,UUIDHISTORY,CODE,GROUPTYPE,PREFERREDLABEL,ALTLABELS,DESCRIPTION
http://data.example.org/isco/C1,g1,u-g1-old,1,ISCOGroup,Managers,\"Chiefs
Heads\",Plan and direct organisations
http://data.example.org/isco/C2,g2,,2,ISCOGroup,Professionals,,Apply knowledge
,g3,,2.L1,LocalGroup,Local professionals,,
";

pub const SKILL_GROUPS_CSV: &str = "\
ORIGINURI,ID,UUIDHISTORY,CODE,PREFERREDLABEL,ALTLABELS,DESCRIPTION,SCOPENOTE
http://data.example.org/skill/S1,sg1,,S1,communication,talking,Exchange information,Excludes writing
";

pub const SKILLS_CSV: &str = "\
ORIGINURI,ID,UUIDHISTORY,SKILLTYPE,REUSELEVEL,PREFERREDLABEL,ALTLABELS,DESCRIPTION,DEFINITION,SCOPENOTE
http://data.example.org/skill/1,s1,,skill/competence,transversal,negotiate,bargain,Reach agreements,,
http://data.example.org/skill/2,s2,,knowledge,cross-sector,contract law,,,Law of contracts,
http://data.example.org/skill/3,s3,,language,,speak French,\"French
français\",,,
";

pub const OCCUPATIONS_CSV: &str = "\
ORIGINURI,ID,UUIDHISTORY,OCCUPATIONGROUPCODE,CODE,PREFERREDLABEL,ALTLABELS,DESCRIPTION,DEFINITION,SCOPENOTE,REGULATEDPROFESSIONNOTE,OCCUPATIONTYPE,ISLOCALIZED
http://data.example.org/occ/1,o1,,1,1120.1,chief executive,CEO,Runs the company,,,,ESCOOccupation,false
,o2,,2.L1,2.L1.1,local interpreter,,,,,regulated,LocalOccupation,true
";

pub const OCCUPATION_HIERARCHY_CSV: &str = "\
PARENTOBJECTTYPE,PARENTID,CHILDID,CHILDOBJECTTYPE
ISCOGroup,g1,o1,ESCOOccupation
ISCOGroup,g2,g3,LocalGroup
LocalGroup,g3,o2,LocalOccupation
";

pub const SKILL_HIERARCHY_CSV: &str = "\
PARENTOBJECTTYPE,PARENTID,CHILDID,CHILDOBJECTTYPE
SkillGroup,sg1,s1,Skill
SkillGroup,sg1,s3,Skill
";

pub const OCCUPATION_TO_SKILL_CSV: &str = "\
OCCUPATIONTYPE,OCCUPATIONID,RELATIONTYPE,SKILLID
ESCOOccupation,o1,essential,s1
ESCOOccupation,o1,optional,s2
LocalOccupation,o2,essential,s3
";

pub const SKILL_TO_SKILL_CSV: &str = "\
REQUIRINGID,RELATIONTYPE,REQUIREDID
s1,optional,s2
";

/// The complete fixture dataset, entity kinds first.
pub const DATASET: [(ImportKind, &str); 8] = [
    (ImportKind::OccupationGroups, OCCUPATION_GROUPS_CSV),
    (ImportKind::SkillGroups, SKILL_GROUPS_CSV),
    (ImportKind::Skills, SKILLS_CSV),
    (ImportKind::Occupations, OCCUPATIONS_CSV),
    (ImportKind::OccupationHierarchy, OCCUPATION_HIERARCHY_CSV),
    (ImportKind::SkillHierarchy, SKILL_HIERARCHY_CSV),
    (ImportKind::OccupationToSkillRelations, OCCUPATION_TO_SKILL_CSV),
    (ImportKind::SkillToSkillRelations, SKILL_TO_SKILL_CSV),
];

/// Write every fixture file into `dir` under its conventional name.
pub fn write_dataset(dir: &Path) -> Vec<(ImportKind, CsvSource)> {
    DATASET
        .iter()
        .map(|(kind, contents)| (*kind, utils::write_csv(dir, &kind.file_name(), contents)))
        .collect()
}

/// Settings for importing `sources` into a store under `dir`.
pub fn settings_for(
    dir: &Path,
    model_id: &str,
    sources: Vec<(ImportKind, CsvSource)>,
) -> ValidatedImportSettings {
    ValidatedImportSettings {
        model_id: model_id.to_string(),
        store_path: dir.join("store"),
        batch_sizes: BatchSizes::default(),
        sources,
    }
}
