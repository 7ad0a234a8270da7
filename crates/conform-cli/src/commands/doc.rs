use anyhow::Context;
use conform_config::ConformConfig;
use conform_engine::commands::generate_schema_doc;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArg;
use crate::output::output;

/// Handle `conform doc`.
pub async fn handle(
    arg: &TableArg,
    config: &ConformConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let schema_path = super::resolve_schema_path(&arg.table, config, flags)?;
    let response = generate_schema_doc(&schema_path, config.scan.lock_timeout())
        .await
        .with_context(|| format!("failed to document {}", schema_path.display()))?;
    output(&response, flags.format)
}
