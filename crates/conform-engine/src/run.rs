//! Scan run orchestration.
//!
//! ```text
//! idle → scanning → aggregating → writing → done | partial_failure
//!   ↘ failed      ↘ cancelled             ↘ failed
//! ```
//!
//! Per-domain scans fan out on a `JoinSet` bounded by a semaphore. Each domain
//! gets its own timeout. Nothing is aggregated or written until every domain
//! has settled.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use conform_config::{ConformConfig, ScanConfig};
use conform_core::address::TableAddress;
use conform_core::entities::{CategoricalField, DomainRecord, DomainRef, ReferenceSchema};
use conform_core::enums::{DomainScanState, DomainStatus, RunOutcome, RunPhase};
use conform_core::responses::{DomainError, ScanTableResponse};
use conform_discovery::{DiscoveryError, DomainDirectory, directory_from_config};
use conform_report::{
    ReportWriter, build_categoricals_file, build_domains_file, generate_schema_markdown,
};
use conform_schema::SchemaRegistry;
use conform_storage::{BackendConnector, StoreConnector};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::categorical::{aggregate, empty_catalog, merge_into};
use crate::conformance::compute;
use crate::error::{EngineError, ScanError};
use crate::scanner::{TableSnapshot, scan};

// ---------------------------------------------------------------------------
// Options and progress
// ---------------------------------------------------------------------------

/// Limits applied to one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub concurrency: usize,
    pub domain_timeout: Duration,
    pub sample_limit: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            domain_timeout: config.domain_timeout(),
            sample_limit: config.sample_limit,
        }
    }
}

/// Observer for per-domain progress, e.g. a terminal progress bar.
pub trait ScanProgress: Send + Sync {
    fn domains_listed(&self, _total: usize) {}
    /// `Pending` once the domain's scan starts, then exactly one settled state.
    fn domain_state(&self, _domain: &str, _state: DomainScanState) {}
}

/// Progress observer that ignores everything.
pub struct NoProgress;

impl ScanProgress for NoProgress {}

// ---------------------------------------------------------------------------
// RunTracker
// ---------------------------------------------------------------------------

/// Tracks a run's phase and rejects transitions the state machine forbids.
#[derive(Debug)]
pub struct RunTracker {
    table: String,
    phase: RunPhase,
}

impl RunTracker {
    #[must_use]
    pub const fn new(table: String) -> Self {
        Self {
            table,
            phase: RunPhase::Idle,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if `next` is not reachable
    /// from the current phase.
    pub fn advance(&mut self, next: RunPhase) -> Result<(), EngineError> {
        if !self.phase.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!(table = %self.table, from = %self.phase, to = %next, "run phase");
        self.phase = next;
        Ok(())
    }

    /// Record a fatal failure. Terminal phases are left untouched.
    pub fn fail(&mut self) {
        if self.phase.can_transition_to(RunPhase::Failed) {
            tracing::warn!(table = %self.table, from = %self.phase, "run failed");
            self.phase = RunPhase::Failed;
        }
    }
}

// ---------------------------------------------------------------------------
// ScanEngine
// ---------------------------------------------------------------------------

/// Runs scans for one table at a time.
pub struct ScanEngine {
    directory: Arc<dyn DomainDirectory>,
    connector: Arc<dyn StoreConnector>,
    writer: ReportWriter,
    options: ScanOptions,
    progress: Arc<dyn ScanProgress>,
    write_markdown: bool,
}

impl ScanEngine {
    pub fn new(
        directory: Arc<dyn DomainDirectory>,
        connector: Arc<dyn StoreConnector>,
        writer: ReportWriter,
        options: ScanOptions,
    ) -> Self {
        Self {
            directory,
            connector,
            writer,
            options,
            progress: Arc::new(NoProgress),
            write_markdown: false,
        }
    }

    /// Build an engine wired to the configured registry and the real
    /// DuckDB/libSQL backends.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NotConfigured`] when no registry is set, or
    /// an HTTP error if the registry client cannot be built.
    pub fn from_config(config: &ConformConfig) -> Result<Self, DiscoveryError> {
        let directory: Arc<dyn DomainDirectory> =
            Arc::from(directory_from_config(&config.discovery)?);
        Ok(Self::new(
            directory,
            Arc::new(BackendConnector::new()),
            ReportWriter::new(config.scan.lock_timeout()),
            ScanOptions::from(&config.scan),
        )
        .with_markdown(config.general.write_markdown_on_scan))
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ScanProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Also regenerate `schema.md` after results are persisted.
    #[must_use]
    pub const fn with_markdown(mut self, write_markdown: bool) -> Self {
        self.write_markdown = write_markdown;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Load the schema at `schema_path` and scan its table.
    ///
    /// # Errors
    ///
    /// See [`Self::scan_loaded`]; additionally [`EngineError::Core`] for a
    /// path outside the `<entity>/<model>/schema.json` layout and
    /// [`EngineError::Schema`] when the schema is missing or malformed.
    pub async fn scan(
        &self,
        schema_path: &Path,
        cancel: impl Future<Output = ()> + Send,
    ) -> Result<ScanTableResponse, EngineError> {
        let mut tracker = RunTracker::new(schema_path.display().to_string());
        let loaded = TableAddress::from_schema_path(schema_path)
            .map_err(EngineError::from)
            .and_then(|address| {
                let schema = SchemaRegistry::new(address.root())?.load_path(schema_path)?;
                Ok((address, schema))
            });
        let (address, schema) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracker.fail();
                return Err(e);
            }
        };
        tracker.table = address.key();
        self.run(tracker, &address, schema, cancel).await
    }

    /// Scan every domain hosting `address` and persist the results.
    ///
    /// Per-domain failures are recorded in the response, never returned as
    /// errors. Resolving `cancel` before all domains settle aborts the
    /// outstanding scans and writes nothing.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DiscoveryUnavailable`] before any domain is scanned
    /// - [`EngineError::Cancelled`] when `cancel` resolves first
    /// - [`EngineError::Persistence`] when results cannot be written
    pub async fn scan_loaded(
        &self,
        address: &TableAddress,
        schema: ReferenceSchema,
        cancel: impl Future<Output = ()> + Send,
    ) -> Result<ScanTableResponse, EngineError> {
        self.run(RunTracker::new(address.key()), address, schema, cancel)
            .await
    }

    async fn run(
        &self,
        mut tracker: RunTracker,
        address: &TableAddress,
        schema: ReferenceSchema,
        cancel: impl Future<Output = ()> + Send,
    ) -> Result<ScanTableResponse, EngineError> {
        let started = Instant::now();
        let table = address.key();

        let domains = match self
            .directory
            .list_domains(address.entity(), address.model())
            .await
        {
            Ok(domains) => domains,
            Err(source) => {
                tracker.fail();
                return Err(EngineError::DiscoveryUnavailable { table, source });
            }
        };

        tracker.advance(RunPhase::Scanning)?;
        tracing::info!(
            table = %table,
            registry = %self.directory.describe(),
            domains = domains.len(),
            "scanning domains"
        );
        self.progress.domains_listed(domains.len());

        let schema = Arc::new(schema);
        let outcomes = tokio::select! {
            biased;
            () = cancel => {
                // Dropping the scan future drops its JoinSet, aborting every task.
                tracker.advance(RunPhase::Cancelled)?;
                tracing::warn!(table = %table, "scan cancelled; nothing written");
                return Err(EngineError::Cancelled { table });
            }
            outcomes = self.scan_domains(&schema, &domains) => outcomes,
        };

        tracker.advance(RunPhase::Aggregating)?;
        let scanned = collect_results(&schema, &domains, outcomes);

        tracker.advance(RunPhase::Writing)?;
        let scanned_at = Utc::now();
        let domains_file = build_domains_file(&schema, address, scanned.records, scanned_at);
        let categoricals_file = build_categoricals_file(&schema, scanned.catalog, scanned_at);

        if let Err(source) = self
            .writer
            .persist(address, &domains_file, &categoricals_file)
            .await
        {
            tracker.fail();
            return Err(EngineError::Persistence { table, source });
        }

        if self.write_markdown
            && let Err(e) = self
                .writer
                .write_markdown(address, generate_schema_markdown(&schema))
                .await
        {
            tracing::warn!(table = %table, error = %e, "could not regenerate schema.md");
        }

        let outcome = if scanned.errors.is_empty() {
            RunOutcome::Done
        } else {
            RunOutcome::PartialFailure
        };
        tracker.advance(outcome.phase())?;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            table = %table,
            outcome = %outcome.phase(),
            domains = domains_file.summary.total_domains,
            active = domains_file.summary.active_domains,
            errors = scanned.errors.len(),
            duration_ms,
            "scan complete"
        );

        Ok(ScanTableResponse {
            table,
            table_name: schema.table_name.clone(),
            outcome,
            domains_found: domains.len(),
            active_domains: domains_file.summary.active_domains,
            duration_ms,
            errors: scanned.errors,
        })
    }

    /// Scan every domain concurrently. Results are returned in `domains` order.
    async fn scan_domains(
        &self,
        schema: &Arc<ReferenceSchema>,
        domains: &[DomainRef],
    ) -> Vec<Result<TableSnapshot, ScanError>> {
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let mut set = JoinSet::new();

        for (idx, domain) in domains.iter().cloned().enumerate() {
            let sem = Arc::clone(&semaphore);
            let connector = Arc::clone(&self.connector);
            let schema = Arc::clone(schema);
            let progress = Arc::clone(&self.progress);
            let timeout = self.options.domain_timeout;
            let sample_limit = self.options.sample_limit;

            set.spawn(async move {
                let Ok(_permit) = sem.acquire().await else {
                    return (idx, Err(ScanError::Internal("scan pool closed".to_string())));
                };
                progress.domain_state(&domain.domain, DomainScanState::Pending);
                let result = tokio::time::timeout(
                    timeout,
                    scan_domain(connector.as_ref(), &domain, &schema, sample_limit),
                )
                .await
                .unwrap_or(Err(ScanError::Timeout {
                    after_secs: timeout.as_secs(),
                }));
                (idx, result)
            });
        }

        let mut results: Vec<Option<Result<TableSnapshot, ScanError>>> =
            domains.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, result)) => {
                    let state = result
                        .as_ref()
                        .map_or_else(ScanError::scan_state, |_| DomainScanState::Success);
                    tracing::debug!(domain = %domains[idx].domain, %state, "domain settled");
                    self.progress.domain_state(&domains[idx].domain, state);
                    results[idx] = Some(result);
                }
                Err(e) => tracing::warn!(error = %e, "domain scan task failed"),
            }
        }

        results
            .into_iter()
            .zip(domains)
            .map(|(result, domain)| {
                result.unwrap_or_else(|| {
                    self.progress
                        .domain_state(&domain.domain, DomainScanState::Error);
                    Err(ScanError::Internal(
                        "scan task ended without a result".to_string(),
                    ))
                })
            })
            .collect()
    }
}

async fn scan_domain(
    connector: &dyn StoreConnector,
    domain: &DomainRef,
    schema: &ReferenceSchema,
    sample_limit: usize,
) -> Result<TableSnapshot, ScanError> {
    let store = connector.connect(domain).await?;
    scan(store.as_ref(), &domain.domain, schema, sample_limit).await
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

struct ScannedDomains {
    records: Vec<DomainRecord>,
    catalog: BTreeMap<String, CategoricalField>,
    errors: Vec<DomainError>,
}

/// Turn per-domain outcomes into records, the categorical catalog and the
/// error list.
fn collect_results(
    schema: &ReferenceSchema,
    domains: &[DomainRef],
    outcomes: Vec<Result<TableSnapshot, ScanError>>,
) -> ScannedDomains {
    let mut records = Vec::with_capacity(domains.len());
    let mut catalog = empty_catalog(schema);
    let mut errors = Vec::new();

    for (domain, outcome) in domains.iter().zip(outcomes) {
        let record = match outcome {
            Ok(snapshot) => {
                let is_reference = schema.is_reference_domain(&domain.domain);
                let status = if domain.is_test {
                    DomainStatus::Test
                } else {
                    DomainStatus::Active
                };
                merge_into(
                    &mut catalog,
                    schema,
                    aggregate(schema, &domain.domain, &snapshot),
                );
                DomainRecord {
                    records: Some(snapshot.row_count),
                    first_record: snapshot.first_record,
                    latest_record: snapshot.last_record,
                    conformance: Some(compute(schema, &snapshot, is_reference)),
                    ..DomainRecord::for_domain(domain, status)
                }
            }
            Err(ScanError::TableEmpty { .. }) => DomainRecord {
                records: Some(0),
                ..DomainRecord::for_domain(domain, DomainStatus::Empty)
            },
            Err(ScanError::TableNotFound { .. }) => {
                DomainRecord::for_domain(domain, DomainStatus::NotFound)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(domain = %domain.domain, error = %message, "domain scan failed");
                if let Some(kind) = err.kind() {
                    errors.push(DomainError {
                        domain: domain.domain.clone(),
                        kind,
                        message: message.clone(),
                    });
                }
                DomainRecord {
                    error: Some(message),
                    ..DomainRecord::for_domain(domain, DomainStatus::Unknown)
                }
            }
        };
        records.push(record);
    }

    errors.sort_by(|a, b| a.domain.cmp(&b.domain));
    ScannedDomains {
        records,
        catalog,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_follows_happy_path() {
        let mut tracker = RunTracker::new("crm/contacts".into());
        for phase in [
            RunPhase::Scanning,
            RunPhase::Aggregating,
            RunPhase::Writing,
            RunPhase::Done,
        ] {
            tracker.advance(phase).unwrap();
        }
        assert!(tracker.phase().is_terminal());
    }

    #[test]
    fn tracker_rejects_skipping_phases() {
        let mut tracker = RunTracker::new("crm/contacts".into());
        let err = tracker.advance(RunPhase::Writing).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition {
                from: RunPhase::Idle,
                to: RunPhase::Writing
            }
        ));
        assert_eq!(tracker.phase(), RunPhase::Idle);
    }

    #[test]
    fn fail_is_ignored_once_terminal() {
        let mut tracker = RunTracker::new("crm/contacts".into());
        tracker.advance(RunPhase::Scanning).unwrap();
        tracker.advance(RunPhase::Cancelled).unwrap();
        tracker.fail();
        assert_eq!(tracker.phase(), RunPhase::Cancelled);
    }

    #[test]
    fn options_follow_scan_config() {
        let options = ScanOptions::default();
        assert_eq!(options.concurrency, 8);
        assert_eq!(options.domain_timeout, Duration::from_secs(30));
        assert_eq!(options.sample_limit, 50);
    }
}
