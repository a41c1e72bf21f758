#[cfg(test)]
mod tests {
    use crate::{
        MODEL_ID, OCCUPATION_GROUPS_CSV, OCCUPATION_TO_SKILL_CSV, OCCUPATIONS_CSV, SKILLS_CSV,
        settings_for,
        utils::{fetch_all, write_csv},
        write_dataset,
    };
    use engine_config::BatchSizes;
    use engine_core::{
        diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics},
        repository::SledRepository,
        store::SledStore,
    };
    use engine_processing::error::ImportError;
    use engine_runtime::{
        error::RunError,
        execution::{count_documents, run_manifest_with_store},
    };
    use model::{
        stats::RowsProcessedStats,
        taxonomy::{ImportKind, ObjectType, OccupationGroup, OccupationToSkillRelationPair},
    };
    use tempfile::tempdir;
    use tracing_test::traced_test;

    // Scenario: every kind of the fixture dataset is imported through a manifest.
    // Expected Outcome:
    // - No errors or warnings; every data row is counted and persisted.
    // - Relation documents carry the labels of both endpoints.
    #[traced_test]
    #[tokio::test]
    async fn full_dataset_imports_cleanly() {
        let dir = tempdir().unwrap();
        let settings = settings_for(dir.path(), MODEL_ID, write_dataset(dir.path()));
        let diag = MemoryDiagnostics::shared();
        let store = SledStore::temporary().unwrap();

        let report = run_manifest_with_store(&settings, store.clone(), diag.clone())
            .await
            .unwrap();

        assert!(report.is_clean(), "diagnostics: {:?}", diag.entries());
        assert_eq!(report.files.len(), 8);
        assert_eq!(report.totals, RowsProcessedStats::all_succeeded(18));
        assert!(report.files.iter().all(|f| f.stats.is_balanced()));

        let counts: Vec<usize> = count_documents(&store, MODEL_ID)
            .unwrap()
            .iter()
            .map(|c| c.documents)
            .collect();
        assert_eq!(counts, vec![3, 1, 3, 2, 3, 2, 3, 1]);

        let relations = fetch_all(
            &SledRepository::<OccupationToSkillRelationPair>::new(&store, diag.clone()).unwrap(),
            MODEL_ID,
        )
        .await;
        let requiring = relations[0].requiring_occupation.as_ref().unwrap();
        assert_eq!(requiring.preferred_label, "chief executive");
        assert_eq!(requiring.object_type, ObjectType::EscoOccupation);
        assert_eq!(
            relations[0].required_skill.as_ref().unwrap().preferred_label,
            "negotiate"
        );
        assert!(logs_contain("Import finished"));
    }

    // Scenario: three occupation group rows, the second with an empty CODE.
    // Expected Outcome: stats {3, 2, 1} and exactly one warning for the bad row.
    #[tokio::test]
    async fn empty_code_rejects_single_row() {
        let dir = tempdir().unwrap();
        let source = write_csv(
            dir.path(),
            "groups.csv",
            "ORIGINURI,ID,UUIDHISTORY,CODE,GROUPTYPE,PREFERREDLABEL,ALTLABELS,DESCRIPTION\n\
             ,k1,,1,ISCOGroup,Managers,,\n\
             ,k2,,,ISCOGroup,Professionals,,\n\
             ,k3,,3,ISCOGroup,Technicians,,\n",
        );
        let settings = settings_for(dir.path(), MODEL_ID, vec![(ImportKind::OccupationGroups, source)]);
        let diag = MemoryDiagnostics::shared();

        let report = run_manifest_with_store(&settings, SledStore::temporary().unwrap(), diag.clone())
            .await
            .unwrap();

        assert_eq!(report.files[0].stats, RowsProcessedStats::new(3, 2, 1));
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("id:'k2'"));
        assert_eq!(diag.error_count(), 0);
    }

    // Scenario: the occupation group file lacks the PREFERREDLABEL column.
    // Expected Outcome:
    // - The file fails before any row is processed and nothing is stored.
    // - One error names the missing column; later files are not attempted.
    #[tokio::test]
    async fn missing_required_column_rejects_file() {
        let dir = tempdir().unwrap();
        let groups = write_csv(
            dir.path(),
            "groups.csv",
            "ORIGINURI,ID,UUIDHISTORY,CODE,GROUPTYPE,ALTLABELS,DESCRIPTION\n,k1,,1,ISCOGroup,,\n",
        );
        let skills = write_csv(dir.path(), "skills.csv", SKILLS_CSV);
        let settings = settings_for(
            dir.path(),
            MODEL_ID,
            vec![(ImportKind::OccupationGroups, groups), (ImportKind::Skills, skills)],
        );
        let diag = MemoryDiagnostics::shared();
        let store = SledStore::temporary().unwrap();

        let err = run_manifest_with_store(&settings, store.clone(), diag.clone())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunError::Import {
                kind: ImportKind::OccupationGroups,
                error: ImportError::InvalidHeaders { .. },
                ..
            }
        ));
        let errors = diag.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("PREFERREDLABEL"));
        assert!(count_documents(&store, MODEL_ID).unwrap().iter().all(|c| c.documents == 0));
    }

    // Scenario: a skill-to-skill row references a skill that was never imported.
    // Expected Outcome: the row is rejected with one warning naming both keys.
    #[tokio::test]
    async fn unmapped_relation_key_is_rejected() {
        let dir = tempdir().unwrap();
        let skills = write_csv(dir.path(), "skills.csv", SKILLS_CSV);
        let links = write_csv(
            dir.path(),
            "s2s.csv",
            "REQUIRINGID,RELATIONTYPE,REQUIREDID\ns1,essential,s9\ns1,optional,s3\n",
        );
        let settings = settings_for(
            dir.path(),
            MODEL_ID,
            vec![
                (ImportKind::Skills, skills),
                (ImportKind::SkillToSkillRelations, links),
            ],
        );
        let diag = MemoryDiagnostics::shared();

        let report = run_manifest_with_store(&settings, SledStore::temporary().unwrap(), diag.clone())
            .await
            .unwrap();

        assert_eq!(report.files[1].stats, RowsProcessedStats::new(2, 1, 1));
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'s1'") && warnings[0].contains("'s9'"));
    }

    // Scenario: an occupation-to-skill row names an occupation group key in the
    // OCCUPATIONID column.
    // Expected Outcome:
    // - The key resolves but the endpoint is not an occupation, so the row is
    //   counted as failed and never stored.
    // - The valid row of the same batch is stored with both endpoints populated.
    #[tokio::test]
    async fn relation_to_entity_of_wrong_kind_is_rejected() {
        let dir = tempdir().unwrap();
        let groups = write_csv(dir.path(), "groups.csv", OCCUPATION_GROUPS_CSV);
        let skills = write_csv(dir.path(), "skills.csv", SKILLS_CSV);
        let occupations = write_csv(dir.path(), "occupations.csv", OCCUPATIONS_CSV);
        let links = write_csv(
            dir.path(),
            "o2s.csv",
            "OCCUPATIONTYPE,OCCUPATIONID,RELATIONTYPE,SKILLID
             ESCOOccupation,g1,essential,s1
             ESCOOccupation,o1,optional,s2
",
        );
        let settings = settings_for(
            dir.path(),
            MODEL_ID,
            vec![
                (ImportKind::OccupationGroups, groups),
                (ImportKind::Skills, skills),
                (ImportKind::Occupations, occupations),
                (ImportKind::OccupationToSkillRelations, links),
            ],
        );
        let diag = MemoryDiagnostics::shared();
        let store = SledStore::temporary().unwrap();

        let report = run_manifest_with_store(&settings, store.clone(), diag.clone())
            .await
            .unwrap();

        let relations_report = report
            .files
            .iter()
            .find(|f| f.kind == ImportKind::OccupationToSkillRelations)
            .unwrap();
        assert_eq!(relations_report.stats, RowsProcessedStats::new(2, 1, 1));
        assert_eq!(diag.error_count(), 0);
        assert!(
            diag.warnings()
                .iter()
                .any(|w| w.contains("do not exist with the declared type")),
            "warnings: {:?}",
            diag.warnings()
        );

        let stored = fetch_all(
            &SledRepository::<OccupationToSkillRelationPair>::new(&store, diag.clone()).unwrap(),
            MODEL_ID,
        )
        .await;
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].requiring_occupation.as_ref().unwrap().preferred_label,
            "chief executive"
        );
    }

    // Scenario: relation files listed before the entities they reference.
    // Expected Outcome: entities are still imported first and every link resolves.
    #[tokio::test]
    async fn links_wait_for_entities_regardless_of_manifest_order() {
        let dir = tempdir().unwrap();
        let mut sources = write_dataset(dir.path());
        sources.reverse();
        let settings = settings_for(dir.path(), MODEL_ID, sources);
        let diag = MemoryDiagnostics::shared();

        let report = run_manifest_with_store(&settings, SledStore::temporary().unwrap(), diag.clone())
            .await
            .unwrap();

        assert_eq!(diag.warning_count(), 0);
        assert!(report.files[..4].iter().all(|f| f.kind.is_entity()));
        assert_eq!(report.totals.rows_failed, 0);
    }

    // Scenario: five skills with a batch size of two.
    // Expected Outcome: three bulk writes (2 + 2 + 1), all rows persisted.
    #[tokio::test]
    async fn batch_size_bounds_each_write() {
        let dir = tempdir().unwrap();
        let skills = write_csv(
            dir.path(),
            "skills.csv",
            "ID,SKILLTYPE,REUSELEVEL,PREFERREDLABEL,ORIGINURI,UUIDHISTORY,ALTLABELS,DESCRIPTION,DEFINITION,SCOPENOTE\n\
             a,,,one,,,,,,\nb,,,two,,,,,,\nc,,,three,,,,,,\nd,,,four,,,,,,\ne,,,five,,,,,,\n",
        );
        let mut settings = settings_for(dir.path(), MODEL_ID, vec![(ImportKind::Skills, skills)]);
        settings.batch_sizes = BatchSizes::uniform(2);

        let report = run_manifest_with_store(
            &settings,
            SledStore::temporary().unwrap(),
            MemoryDiagnostics::shared(),
        )
        .await
        .unwrap();

        assert_eq!(report.metrics.batches_flushed, 3);
        assert_eq!(report.totals, RowsProcessedStats::all_succeeded(5));
    }

    // Scenario: two occupation groups in one batch share the same CODE.
    // Expected Outcome:
    // - The bulk write partially succeeds; the recovered groups are kept.
    // - One warning from the partial write and one batch summary warning.
    // - Only the stored groups are resolvable by relation rows.
    #[traced_test]
    #[tokio::test]
    async fn duplicate_code_partially_fails_batch() {
        let dir = tempdir().unwrap();
        let groups = write_csv(
            dir.path(),
            "groups.csv",
            "ORIGINURI,ID,UUIDHISTORY,CODE,GROUPTYPE,PREFERREDLABEL,ALTLABELS,DESCRIPTION\n\
             ,k1,,1,ISCOGroup,Managers,,\n\
             ,k2,,1,ISCOGroup,Managers again,,\n\
             ,k3,,3,ISCOGroup,Technicians,,\n",
        );
        let hierarchy = write_csv(
            dir.path(),
            "hierarchy.csv",
            "PARENTOBJECTTYPE,PARENTID,CHILDID,CHILDOBJECTTYPE\n\
             ISCOGroup,k1,k3,ISCOGroup\n\
             ISCOGroup,k2,k3,ISCOGroup\n",
        );
        let settings = settings_for(
            dir.path(),
            MODEL_ID,
            vec![
                (ImportKind::OccupationGroups, groups),
                (ImportKind::OccupationHierarchy, hierarchy),
            ],
        );
        let diag = TracingDiagnostics::shared();
        let store = SledStore::temporary().unwrap();

        let report = run_manifest_with_store(&settings, store.clone(), diag.clone())
            .await
            .unwrap();

        assert_eq!(report.files[0].stats, RowsProcessedStats::new(3, 2, 1));
        assert_eq!(report.files[0].warnings, 2);
        assert!(logs_contain(
            "occupation_groups: 2 out of 3 documents were inserted successfully"
        ));

        let stored = fetch_all(
            &SledRepository::<OccupationGroup>::new(&store, diag.clone()).unwrap(),
            MODEL_ID,
        )
        .await;
        let labels: Vec<_> = stored.iter().map(|g| g.preferred_label.as_str()).collect();
        assert_eq!(labels, vec!["Managers", "Technicians"]);

        // k2 never made it into the store, so its hierarchy row cannot resolve.
        assert_eq!(report.files[1].stats, RowsProcessedStats::new(2, 1, 1));
    }

    // Scenario: the same dataset is imported twice into one model.
    // Expected Outcome: every unique key collides, so coded entities and all
    // links are reported as failed while uncoded skills are stored again.
    #[tokio::test]
    async fn reimport_into_same_model_collides_on_unique_keys() {
        let dir = tempdir().unwrap();
        let settings = settings_for(dir.path(), MODEL_ID, write_dataset(dir.path()));
        let store = SledStore::temporary().unwrap();

        run_manifest_with_store(&settings, store.clone(), MemoryDiagnostics::shared())
            .await
            .unwrap();
        let diag = MemoryDiagnostics::shared();
        let report = run_manifest_with_store(&settings, store.clone(), diag.clone())
            .await
            .unwrap();

        let groups = &report.files[0];
        assert_eq!(groups.stats, RowsProcessedStats::all_failed(3));
        let skills = report
            .files
            .iter()
            .find(|f| f.kind == ImportKind::Skills)
            .unwrap();
        assert_eq!(skills.stats, RowsProcessedStats::all_succeeded(3));
        assert!(diag.warning_count() > 0);
        assert_eq!(diag.error_count(), 0);
        assert_eq!(
            report
                .files
                .iter()
                .find(|f| f.kind == ImportKind::OccupationToSkillRelations)
                .unwrap()
                .stats
                .rows_processed,
            OCCUPATION_TO_SKILL_CSV.lines().count() as u64 - 1
        );
    }
}
