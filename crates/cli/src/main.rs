use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use engine_config::{
    EnvOverrides, ImportManifest, SettingsValidator, settings::validator::default_store_path,
};
use engine_core::{diagnostics::TracingDiagnostics, store::SledStore};
use engine_runtime::execution::{Exporter, count_documents, run_manifest};
use model::taxonomy::ImportKind;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "taxonomy", version = "0.1.0", about = "Taxonomy CSV import/export tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            manifest,
            output,
            json,
        } => {
            info!("Importing from manifest: {manifest}");
            let manifest = ImportManifest::load(&manifest).await?;
            let settings = SettingsValidator::new(EnvOverrides::from_env()?).validate(&manifest)?;
            let report = run_manifest(&settings, TracingDiagnostics::shared()).await?;

            match output {
                Some(path) => output::write_json(&report, &path).await?,
                None if json => println!("{}", output::to_json(&report)?),
                None => output::print_import_report(&report),
            }
        }
        Commands::Export {
            store,
            model_id,
            out_dir,
            kind,
        } => {
            let store = open_store(store)?;
            let exporter = Exporter::new(store, TracingDiagnostics::shared());

            match kind {
                Some(kind) => {
                    let kind: ImportKind = kind.parse().map_err(|_| CliError::InvalidKind(kind))?;
                    let dir = Path::new(&out_dir);
                    tokio::fs::create_dir_all(dir).await?;
                    let path = dir.join(kind.file_name());
                    let file = tokio::fs::File::create(&path).await?;
                    let rows = exporter
                        .export_kind(kind, &model_id, tokio::io::BufWriter::new(file))
                        .await?;
                    println!("{:<30} {:>10}  {}", kind.as_str(), rows, path.display());
                }
                None => {
                    let summaries = exporter.export_all(&model_id, Path::new(&out_dir)).await?;
                    output::print_export_summary(&summaries);
                }
            }
        }
        Commands::Inspect {
            store,
            model_id,
            json,
        } => {
            let store = open_store(store)?;
            let counts = count_documents(&store, &model_id)?;
            if json {
                println!("{}", output::to_json(&counts)?);
            } else {
                output::print_counts(&model_id, &counts);
            }
        }
    }

    Ok(())
}

/// Explicit path, then `TAXONOMY_STORE_PATH`, then `~/.taxonomy/store`.
fn open_store(explicit: Option<String>) -> Result<SledStore, CliError> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => EnvOverrides::from_env()?
            .store_path
            .or_else(default_store_path)
            .ok_or(engine_config::SettingsError::NoStorePath)?,
    };
    info!("Opening store at {}", path.display());
    Ok(SledStore::open(path)?)
}
