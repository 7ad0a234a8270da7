pub mod doc;
pub mod report;
pub mod scan;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use conform_config::ConformConfig;
use conform_core::address::TableAddress;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: ConformConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Scan(args) => scan::handle(&args, config, flags).await,
        Commands::Doc(arg) => doc::handle(&arg, &config, flags).await,
        Commands::Validate(arg) => validate::handle(&arg, &config, flags),
        Commands::Report(arg) => report::handle(&arg, &config, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}

/// Resolve a table argument to a `schema.json` path.
///
/// Anything naming an existing file or ending in `.json` is a path; otherwise
/// the argument is `entity/model` under `--root` or `general.schemas_root`.
pub fn resolve_schema_path(
    table: &str,
    config: &ConformConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<PathBuf> {
    let as_path = Path::new(table);
    if as_path.is_file() || as_path.extension().is_some_and(|ext| ext == "json") {
        return Ok(as_path.to_path_buf());
    }

    let (entity, model) = table
        .split_once('/')
        .with_context(|| format!("'{table}' is neither a schema.json path nor entity/model"))?;
    let root = flags
        .root
        .as_deref()
        .unwrap_or(config.general.schemas_root.as_str());
    let address = TableAddress::new(root, entity, model)
        .with_context(|| format!("invalid table '{table}'"))?;
    Ok(address.schema_path())
}
