//! Atomic persistence of a table's scan results.
//!
//! Both files are staged as temp files in the table directory before either
//! target is touched. Targets are then replaced by rename, one at a time; if
//! a later rename fails the earlier targets are restored from their backups.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use conform_core::address::TableAddress;
use conform_core::entities::{CategoricalsFile, DomainsFile};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ReportError;
use crate::lock;

/// Writes `domains.json`, `categoricals.json` and `schema.md` for a table.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    lock_timeout: Duration,
}

impl ReportWriter {
    #[must_use]
    pub const fn new(lock_timeout: Duration) -> Self {
        Self { lock_timeout }
    }

    /// Replace both result files for `address` under the table's write lock.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if serialization fails, the lock cannot be
    /// taken, or any file operation fails. The previous files are left in
    /// place on error.
    pub async fn persist(
        &self,
        address: &TableAddress,
        domains: &DomainsFile,
        categoricals: &CategoricalsFile,
    ) -> Result<(), ReportError> {
        let targets = vec![
            (address.domains_path(), to_json_bytes(domains)?),
            (address.categoricals_path(), to_json_bytes(categoricals)?),
        ];

        let lock_path = address.lock_path();
        let timeout = self.lock_timeout;
        let result =
            run_blocking(move || lock::with_lock(&lock_path, timeout, || commit(&targets))).await;

        match &result {
            Ok(()) => tracing::info!(
                table = %address,
                domains = domains.domains.len(),
                categorical_fields = categoricals.fields.len(),
                "persisted scan results"
            ),
            Err(e) => tracing::warn!(table = %address, error = %e, "failed to persist scan results"),
        }
        result
    }

    /// Atomically write `schema.md` next to the schema, under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the lock cannot be taken or staging or
    /// renaming fails.
    pub async fn write_markdown(
        &self,
        address: &TableAddress,
        markdown: String,
    ) -> Result<PathBuf, ReportError> {
        let path = address.markdown_path();
        let target = path.clone();
        let lock_path = address.lock_path();
        let timeout = self.lock_timeout;
        run_blocking(move || {
            lock::with_lock(&lock_path, timeout, || {
                commit(&[(target, markdown.into_bytes())])
            })
        })
        .await?;
        tracing::debug!(path = %path.display(), "wrote schema markdown");
        Ok(path)
    }
}

fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ReportError> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

async fn run_blocking<F>(f: F) -> Result<(), ReportError>
where
    F: FnOnce() -> Result<(), ReportError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ReportError::Task(e.to_string()))?
}

fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.bak"))
}

fn stage(target: &Path, bytes: &[u8]) -> Result<NamedTempFile, ReportError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(dir, e))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| ReportError::io(file.path(), e))?;
    Ok(file)
}

/// Stage every target, back up existing ones, then rename into place.
pub(crate) fn commit(targets: &[(PathBuf, Vec<u8>)]) -> Result<(), ReportError> {
    let mut staged = Vec::with_capacity(targets.len());
    for (target, bytes) in targets {
        staged.push((target, stage(target, bytes)?));
    }

    let mut backups: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(targets.len());
    for (target, _) in targets {
        let backup = if target.is_file() {
            let backup = backup_path(target);
            if let Err(e) = std::fs::copy(target, &backup) {
                remove_backups(&backups);
                return Err(ReportError::io(target, e));
            }
            Some(backup)
        } else {
            None
        };
        backups.push((target.clone(), backup));
    }

    let mut replaced = 0;
    let mut failure = None;
    for (target, temp) in staged {
        if let Err(e) = temp.persist(target) {
            failure = Some(ReportError::io(target, e.error));
            break;
        }
        replaced += 1;
    }

    if let Some(err) = failure {
        restore(&backups[..replaced]);
        remove_backups(&backups);
        return Err(err);
    }

    remove_backups(&backups);
    Ok(())
}

fn restore(replaced: &[(PathBuf, Option<PathBuf>)]) {
    for (target, backup) in replaced {
        let outcome = match backup {
            Some(backup) => std::fs::rename(backup, target),
            None => std::fs::remove_file(target),
        };
        if let Err(e) = outcome {
            tracing::warn!(path = %target.display(), error = %e, "could not restore previous report");
        }
    }
}

fn remove_backups(backups: &[(PathBuf, Option<PathBuf>)]) {
    for backup in backups.iter().filter_map(|(_, b)| b.as_ref()) {
        let _ = std::fs::remove_file(backup);
    }
}
