use anyhow::Context;
use conform_config::ConformConfig;
use conform_engine::commands::validate_schema;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArg;
use crate::output::output;

/// Handle `conform validate`.
pub fn handle(arg: &TableArg, config: &ConformConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema_path = super::resolve_schema_path(&arg.table, config, flags)?;
    let response = validate_schema(&schema_path)
        .with_context(|| format!("{} is not a valid reference schema", schema_path.display()))?;
    output(&response, flags.format)
}
