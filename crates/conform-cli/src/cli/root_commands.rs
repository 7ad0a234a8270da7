use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Scan every domain hosting a table and persist the results.
    Scan(ScanArgs),
    /// Regenerate schema.md next to a schema.
    Doc(TableArg),
    /// Load and validate a schema without scanning.
    Validate(TableArg),
    /// Summarize the last scan of a table.
    Report(TableArg),
    /// Print the JSON Schema of a persisted or emitted type.
    Schema(SchemaArgs),
}

/// A `schema.json` path, or `entity/model` under the schemas root.
#[derive(Clone, Debug, Args)]
pub struct TableArg {
    pub table: String,
}

#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// A `schema.json` path, or `entity/model` under the schemas root.
    pub table: String,

    /// Maximum domains scanned at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-domain timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Distinct values kept per categorical column.
    #[arg(long)]
    pub sample_limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `domains_file`. Lists every name when omitted.
    pub type_name: Option<String>,
}
