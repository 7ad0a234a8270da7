use std::sync::Arc;

use anyhow::Context;
use conform_config::ConformConfig;
use conform_engine::ScanEngine;
use conform_engine::commands::scan_table;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScanArgs;
use crate::output::output;
use crate::progress::ScanBar;

/// Handle `conform scan`.
pub async fn handle(
    args: &ScanArgs,
    mut config: ConformConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(concurrency) = args.concurrency {
        config.scan.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout_secs {
        config.scan.domain_timeout_secs = timeout;
    }
    if let Some(limit) = args.sample_limit {
        config.scan.sample_limit = limit;
    }
    config.validate().context("invalid configuration")?;

    let schema_path = super::resolve_schema_path(&args.table, &config, flags)?;
    let progress = Arc::new(ScanBar::new(&args.table));
    let engine = ScanEngine::from_config(&config)
        .context("failed to set up domain discovery")?
        .with_progress(progress.clone());

    let result = scan_table(&engine, &schema_path, interrupted()).await;
    match &result {
        Ok(_) => progress.finish_ok(),
        Err(e) => progress.finish_err(&e.to_string()),
    }
    let response =
        result.with_context(|| format!("scan of {} failed", schema_path.display()))?;
    output(&response, flags.format)
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be
/// installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
