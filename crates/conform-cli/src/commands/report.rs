use anyhow::Context;
use conform_config::ConformConfig;
use conform_engine::commands::table_report;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArg;
use crate::output::output;

/// Handle `conform report`.
pub fn handle(arg: &TableArg, config: &ConformConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema_path = super::resolve_schema_path(&arg.table, config, flags)?;
    let response = table_report(&schema_path)
        .with_context(|| format!("no report for {}", schema_path.display()))?;
    output(&response, flags.format)
}
