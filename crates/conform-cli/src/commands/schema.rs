use anyhow::Context;
use conform_schema::JsonSchemas;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `conform schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schemas = JsonSchemas::new().context("failed to build schema catalog")?;
    let Some(name) = args.type_name.as_deref() else {
        return output(&schemas.list(), flags.format);
    };
    let schema = schemas.get(name).with_context(|| {
        format!(
            "unknown type '{name}'; known types: {}",
            schemas.list().join(", ")
        )
    })?;
    output(schema, flags.format)
}
