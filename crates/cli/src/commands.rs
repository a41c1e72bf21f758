use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Import the CSV sources listed in a manifest
    Import {
        #[arg(long, help = "Manifest file path")]
        manifest: String,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<String>,

        #[arg(long, help = "Print the report as JSON instead of a table")]
        json: bool,
    },
    /// Write the stored taxonomy of a model back to CSV
    Export {
        #[arg(long, help = "Store directory (defaults to TAXONOMY_STORE_PATH or ~/.taxonomy/store)")]
        store: Option<String>,

        #[arg(long, help = "Model to export")]
        model_id: String,

        #[arg(long, help = "Directory receiving one CSV file per kind")]
        out_dir: String,

        #[arg(long, help = "Export a single kind, e.g. skill_groups")]
        kind: Option<String>,
    },
    /// Count stored documents per kind
    Inspect {
        #[arg(long, help = "Store directory (defaults to TAXONOMY_STORE_PATH or ~/.taxonomy/store)")]
        store: Option<String>,

        #[arg(long, help = "Model to inspect")]
        model_id: String,

        #[arg(long, help = "Print the counts as JSON instead of a table")]
        json: bool,
    },
}
