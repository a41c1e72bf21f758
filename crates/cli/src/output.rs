use crate::error::CliError;
use engine_runtime::{
    execution::{ExportSummary, KindCount},
    report::ImportReport,
};
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub async fn write_json<T: Serialize + ?Sized>(value: &T, path: &str) -> Result<(), CliError> {
    tokio::fs::write(path, to_json(value)?).await?;
    Ok(())
}

pub fn print_import_report(report: &ImportReport) {
    println!("Import run {} for model '{}'", report.run_id, report.model_id);
    println!("{}", "-".repeat(96));
    println!(
        "{:<30} {:>10} {:>10} {:>10} {:>8} {:>8}  {}",
        "Kind", "Rows", "Success", "Failed", "Errors", "Warns", "Source"
    );
    for file in &report.files {
        println!(
            "{:<30} {:>10} {:>10} {:>10} {:>8} {:>8}  {}",
            file.kind.as_str(),
            file.stats.rows_processed,
            file.stats.rows_success,
            file.stats.rows_failed,
            file.errors,
            file.warnings,
            file.source
        );
        if let Some(failure) = &file.failure {
            println!("{:<30} failed: {failure}", "");
        }
    }
    println!("{}", "-".repeat(96));
    println!(
        "{:<30} {:>10} {:>10} {:>10} {:>8} {:>8}",
        "Total",
        report.totals.rows_processed,
        report.totals.rows_success,
        report.totals.rows_failed,
        report.errors,
        report.warnings
    );
    if report.is_clean() {
        println!("Run completed cleanly.");
    }
}

pub fn print_export_summary(summaries: &[ExportSummary]) {
    for s in summaries {
        println!("{:<30} {:>10}  {}", s.kind.as_str(), s.rows, s.path.display());
    }
}

pub fn print_counts(model_id: &str, counts: &[KindCount]) {
    println!("Documents stored for model '{model_id}':");
    println!("-----------------------------");
    for c in counts {
        println!("{:<30} {}", c.kind.as_str(), c.documents);
    }
}
