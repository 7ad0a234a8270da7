//! End-to-end scan runs against in-memory directory and store fakes.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use conform_core::address::TableAddress;
use conform_core::entities::{CategoricalValue, DomainLocation, DomainRef};
use conform_core::enums::{
    ConformanceStatus, DomainErrorKind, DomainScanState, DomainStatus, RunOutcome,
};
use conform_discovery::{DiscoveryError, DomainDirectory};
use conform_engine::commands::{table_report, validate_schema};
use conform_engine::{EngineError, ScanEngine, ScanOptions, ScanProgress};
use conform_report::{ReportReader, ReportWriter};
use conform_storage::{DateRange, StorageError, StoreConnector, TableStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Table {
    Rows {
        columns: Vec<&'static str>,
        rows: u64,
        samples: Vec<(&'static str, Vec<CategoricalValue>)>,
    },
    Empty(Vec<&'static str>),
    Missing,
    QueryFails,
    Unreachable,
    Hangs,
}

struct FakeDirectory {
    domains: Option<Vec<DomainRef>>,
}

#[async_trait]
impl DomainDirectory for FakeDirectory {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    async fn list_domains(
        &self,
        _entity: &str,
        _model: &str,
    ) -> Result<Vec<DomainRef>, DiscoveryError> {
        self.domains.clone().ok_or(DiscoveryError::Api {
            status: 503,
            message: "registry down".to_string(),
        })
    }
}

struct FakeConnector {
    tables: HashMap<String, Table>,
}

#[async_trait]
impl StoreConnector for FakeConnector {
    async fn connect(&self, domain: &DomainRef) -> Result<Arc<dyn TableStore>, StorageError> {
        match self.tables.get(&domain.domain).cloned() {
            Some(Table::Unreachable) | None => Err(StorageError::Connection(format!(
                "{} refused the connection",
                domain.domain
            ))),
            Some(table) => Ok(Arc::new(FakeStore { table })),
        }
    }
}

struct FakeStore {
    table: Table,
}

#[async_trait]
impl TableStore for FakeStore {
    fn backend(&self) -> &'static str {
        "fake"
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        match &self.table {
            Table::Rows { columns, .. } | Table::Empty(columns) => {
                Ok(columns.iter().map(ToString::to_string).collect())
            }
            Table::Missing => Err(StorageError::TableNotFound {
                table: table.to_string(),
            }),
            Table::QueryFails => Err(StorageError::Query("syntax error near FROM".to_string())),
            Table::Hangs => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
            Table::Unreachable => unreachable!("connector refuses unreachable domains"),
        }
    }

    async fn row_count(&self, _table: &str) -> Result<u64, StorageError> {
        match &self.table {
            Table::Rows { rows, .. } => Ok(*rows),
            _ => Ok(0),
        }
    }

    async fn date_range(&self, _table: &str, _column: &str) -> Result<DateRange, StorageError> {
        Ok((
            NaiveDate::from_ymd_opt(2023, 1, 5),
            NaiveDate::from_ymd_opt(2024, 6, 30),
        ))
    }

    async fn sample_categorical(
        &self,
        _table: &str,
        column: &str,
        _limit: usize,
    ) -> Result<Vec<CategoricalValue>, StorageError> {
        let Table::Rows { samples, .. } = &self.table else {
            return Ok(Vec::new());
        };
        Ok(samples
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, values)| values.clone())
            .unwrap_or_default())
    }
}

/// Every domain hosts the full reference table; `list_columns` takes a while
/// and records how many scans are inside it at once.
#[derive(Default)]
struct InFlight {
    now: AtomicUsize,
    peak: AtomicUsize,
}

struct SlowConnector {
    in_flight: Arc<InFlight>,
}

#[async_trait]
impl StoreConnector for SlowConnector {
    async fn connect(&self, _domain: &DomainRef) -> Result<Arc<dyn TableStore>, StorageError> {
        Ok(Arc::new(SlowStore {
            in_flight: Arc::clone(&self.in_flight),
        }))
    }
}

struct SlowStore {
    in_flight: Arc<InFlight>,
}

#[async_trait]
impl TableStore for SlowStore {
    fn backend(&self) -> &'static str {
        "slow"
    }

    async fn list_columns(&self, _table: &str) -> Result<Vec<String>, StorageError> {
        let now = self.in_flight.now.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.now.fetch_sub(1, Ordering::SeqCst);
        Ok(REFERENCE_COLUMNS.iter().map(ToString::to_string).collect())
    }

    async fn row_count(&self, _table: &str) -> Result<u64, StorageError> {
        Ok(1)
    }

    async fn date_range(&self, _table: &str, _column: &str) -> Result<DateRange, StorageError> {
        Ok((None, None))
    }

    async fn sample_categorical(
        &self,
        _table: &str,
        _column: &str,
        _limit: usize,
    ) -> Result<Vec<CategoricalValue>, StorageError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct RecordedProgress {
    events: Mutex<Vec<(String, DomainScanState)>>,
}

impl RecordedProgress {
    fn states_of(&self, slug: &str) -> Vec<DomainScanState> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(domain, _)| domain == slug)
            .map(|(_, state)| *state)
            .collect()
    }
}

impl ScanProgress for RecordedProgress {
    fn domain_state(&self, domain: &str, state: DomainScanState) {
        self.events.lock().unwrap().push((domain.to_string(), state));
    }
}

/// Log sink for asserting on emitted events.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter(Arc::clone(&self.0))
    }
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    /// Capture warnings on this thread until the guard drops.
    fn capture_warnings(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const REFERENCE_COLUMNS: [&str; 4] = ["id", "email", "country", "created_at"];

fn write_schema(root: &Path) -> PathBuf {
    let dir = root.join("crm").join("contacts");
    std::fs::create_dir_all(&dir).unwrap();
    let schema = json!({
        "table_name": "contacts",
        "display_name": "Contacts",
        "freshness_column": "created_at",
        "reference_domain": "acme",
        "fields": [
            {"name": "Contact ID", "column": "id", "type": "text", "is_key": true},
            {"name": "Email", "column": "email", "type": "text"},
            {"name": "Country", "column": "country", "type": "text", "is_categorical": true},
            {"name": "Created", "column": "created_at", "type": "date"}
        ]
    });
    let path = dir.join("schema.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&schema).unwrap()).unwrap();
    path
}

fn domain(slug: &str) -> DomainRef {
    DomainRef {
        domain: slug.to_string(),
        location: DomainLocation::LibSql {
            path: format!("{slug}.db"),
        },
        is_test: false,
        source_systems: Vec::new(),
        brands: Vec::new(),
        notes: None,
    }
}

fn full_table(rows: u64, countries: &[(&str, u64)]) -> Table {
    Table::Rows {
        columns: REFERENCE_COLUMNS.to_vec(),
        rows,
        samples: vec![(
            "country",
            countries
                .iter()
                .map(|(v, c)| CategoricalValue::new(*v, *c))
                .collect(),
        )],
    }
}

fn engine(
    domains: Option<Vec<DomainRef>>,
    tables: Vec<(&str, Table)>,
    domain_timeout: Duration,
) -> ScanEngine {
    ScanEngine::new(
        Arc::new(FakeDirectory { domains }),
        Arc::new(FakeConnector {
            tables: tables
                .into_iter()
                .map(|(slug, table)| (slug.to_string(), table))
                .collect(),
        }),
        ReportWriter::new(Duration::from_secs(5)),
        ScanOptions {
            concurrency: 3,
            domain_timeout,
            sample_limit: 50,
        },
    )
}

async fn never() {
    std::future::pending::<()>().await;
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_failure_records_every_domain() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(["acme", "beta", "gamma", "delta", "omega"].map(domain).to_vec()),
        vec![
            ("acme", full_table(10, &[("US", 7), ("CA", 3)])),
            ("beta", full_table(4, &[("US", 4)])),
            ("gamma", full_table(2, &[("MX", 2)])),
            ("delta", Table::QueryFails),
            ("omega", Table::QueryFails),
        ],
        Duration::from_secs(5),
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.outcome, RunOutcome::PartialFailure);
    assert_eq!(response.domains_found, 5);
    assert_eq!(response.errors.len(), 2);
    assert_eq!(response.errors[0].domain, "delta");
    assert_eq!(response.errors[0].kind, DomainErrorKind::Query);

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    let file = ReportReader::domains(&address).unwrap();
    assert_eq!(file.summary.total_domains, 5);
    assert_eq!(file.summary.unknown_domains, 2);
    assert_eq!(file.summary.total_records, 16);
    assert!(file.summary_is_consistent());

    let failed: Vec<_> = file
        .domains
        .iter()
        .filter(|r| r.status == DomainStatus::Unknown)
        .collect();
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|r| r.conformance.is_none()));
    assert!(failed.iter().all(|r| r.error.is_some()));
}

#[tokio::test]
async fn reference_domain_is_marked_and_others_conform() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("beta"), domain("acme")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("beta", full_table(1, &[("US", 1)])),
        ],
        Duration::from_secs(5),
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.outcome, RunOutcome::Done);
    assert!(response.errors.is_empty());
    assert_eq!(response.active_domains, 2);

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    let file = ReportReader::domains(&address).unwrap();
    let slugs: Vec<_> = file.domains.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(slugs, vec!["acme", "beta"]);

    let acme = file.domains[0].conformance.as_ref().unwrap();
    assert_eq!(acme.status, ConformanceStatus::Reference);
    let beta = file.domains[1].conformance.as_ref().unwrap();
    assert_eq!(beta.status, ConformanceStatus::Aligned);
    assert_eq!(
        file.domains[1].first_record,
        NaiveDate::from_ymd_opt(2023, 1, 5)
    );
}

#[tokio::test]
async fn missing_and_empty_tables_are_statuses_not_errors() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let mut tenant = domain("sandbox");
    tenant.is_test = true;
    let engine = engine(
        Some(vec![domain("acme"), domain("beta"), domain("gamma"), tenant]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("beta", Table::Missing),
            ("gamma", Table::Empty(REFERENCE_COLUMNS.to_vec())),
            ("sandbox", full_table(1, &[("US", 1)])),
        ],
        Duration::from_secs(5),
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.outcome, RunOutcome::Done);
    assert!(response.errors.is_empty());

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    let file = ReportReader::domains(&address).unwrap();
    let statuses: Vec<_> = file.domains.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            DomainStatus::Active,
            DomainStatus::NotFound,
            DomainStatus::Empty,
            DomainStatus::Test,
        ]
    );
    assert_eq!(file.domains[2].records, Some(0));
    assert_eq!(file.domains[1].records, None);
    assert_eq!(file.summary.empty_domains, 1);
    assert_eq!(file.summary.active_domains, 1);
}

#[tokio::test]
async fn slow_domain_times_out_without_blocking_others() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("slow")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("slow", Table::Hangs),
        ],
        Duration::from_millis(100),
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.outcome, RunOutcome::PartialFailure);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].domain, "slow");
    assert_eq!(response.errors[0].kind, DomainErrorKind::Timeout);
    assert_eq!(response.active_domains, 1);
}

#[tokio::test]
async fn unreachable_domain_is_a_connection_error() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("offline")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("offline", Table::Unreachable),
        ],
        Duration::from_secs(5),
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind, DomainErrorKind::Connection);
}

#[tokio::test]
async fn categoricals_are_collected_per_domain() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("beta"), domain("gamma")]),
        vec![
            ("acme", full_table(10, &[("CA", 3), ("US", 7)])),
            ("beta", full_table(4, &[("US", 4)])),
            (
                "gamma",
                Table::Rows {
                    columns: vec!["id", "email", "created_at"],
                    rows: 2,
                    samples: Vec::new(),
                },
            ),
        ],
        Duration::from_secs(5),
    );

    engine.scan(&schema_path, never()).await.unwrap();

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    let catalog = ReportReader::categoricals(&address).unwrap();
    let country = &catalog.fields["Country"];
    assert_eq!(country.column, "country");
    assert_eq!(
        country.by_domain["acme"],
        vec![CategoricalValue::new("US", 7), CategoricalValue::new("CA", 3)]
    );
    assert_eq!(country.by_domain["beta"], vec![CategoricalValue::new("US", 4)]);
    assert!(!country.by_domain.contains_key("gamma"));

    let file = ReportReader::domains(&address).unwrap();
    let gamma = file.domains[2].conformance.as_ref().unwrap();
    assert_eq!(gamma.status, ConformanceStatus::Diverged);
    assert_eq!(gamma.missing.len(), 1);
    assert_eq!(gamma.missing[0].column, "country");
}

#[tokio::test]
async fn discovery_failure_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(None, Vec::new(), Duration::from_secs(5));

    let err = engine.scan(&schema_path, never()).await.unwrap_err();
    assert!(matches!(err, EngineError::DiscoveryUnavailable { ref table, .. } if table == "crm/contacts"));

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    assert!(!address.domains_path().exists());
    assert!(!address.categoricals_path().exists());
}

#[tokio::test]
async fn cancelled_scan_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("slow")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("slow", Table::Hangs),
        ],
        Duration::from_secs(30),
    );

    let err = engine
        .scan(&schema_path, tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Cancelled { .. }));

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    assert!(!address.domains_path().exists());
    assert!(!address.lock_path().exists());
}

#[tokio::test]
async fn missing_schema_is_fatal() {
    let dir = TempDir::new().unwrap();
    let schema_path = dir.path().join("crm").join("leads").join("schema.json");
    let engine = engine(Some(vec![domain("acme")]), Vec::new(), Duration::from_secs(5));

    let logs = LogBuffer::default();
    let _guard = logs.capture_warnings();

    let err = engine.scan(&schema_path, never()).await.unwrap_err();
    assert!(matches!(err, EngineError::Schema(_)));
    let text = logs.text();
    assert!(text.contains("run failed"), "{text}");
    assert!(text.contains("leads"), "{text}");
}

#[tokio::test]
async fn concurrency_bounds_domains_in_flight() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let slugs: Vec<String> = (0..10).map(|n| format!("d{n}")).collect();
    let in_flight = Arc::new(InFlight::default());
    let engine = ScanEngine::new(
        Arc::new(FakeDirectory {
            domains: Some(slugs.iter().map(|s| domain(s)).collect()),
        }),
        Arc::new(SlowConnector {
            in_flight: Arc::clone(&in_flight),
        }),
        ReportWriter::new(Duration::from_secs(5)),
        ScanOptions {
            concurrency: 3,
            domain_timeout: Duration::from_secs(5),
            sample_limit: 50,
        },
    );

    let response = engine.scan(&schema_path, never()).await.unwrap();
    assert_eq!(response.active_domains, 10);
    let peak = in_flight.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak {peak}");
    assert!(peak > 1, "peak {peak}");
}

#[tokio::test]
async fn every_domain_reports_pending_then_one_settled_state() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let progress = Arc::new(RecordedProgress::default());
    let engine = engine(
        Some(vec![domain("acme"), domain("beta"), domain("delta")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("beta", Table::Missing),
            ("delta", Table::QueryFails),
        ],
        Duration::from_secs(5),
    )
    .with_progress(Arc::clone(&progress) as Arc<dyn ScanProgress>);

    engine.scan(&schema_path, never()).await.unwrap();

    assert_eq!(
        progress.states_of("acme"),
        vec![DomainScanState::Pending, DomainScanState::Success]
    );
    assert_eq!(
        progress.states_of("beta"),
        vec![DomainScanState::Pending, DomainScanState::NotFound]
    );
    assert_eq!(
        progress.states_of("delta"),
        vec![DomainScanState::Pending, DomainScanState::Error]
    );
}

#[tokio::test]
async fn duplicate_domain_columns_are_logged_and_dropped() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("beta")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            (
                "beta",
                Table::Rows {
                    columns: vec!["id", "email", "email", "country", "created_at"],
                    rows: 2,
                    samples: Vec::new(),
                },
            ),
        ],
        Duration::from_secs(5),
    );
    let logs = LogBuffer::default();
    let _guard = logs.capture_warnings();

    engine.scan(&schema_path, never()).await.unwrap();

    let text = logs.text();
    let warning = text
        .lines()
        .find(|line| line.contains("duplicate column"))
        .unwrap_or_else(|| panic!("no duplicate column warning in:\n{text}"));
    assert!(warning.contains("WARN"), "{warning}");
    assert!(warning.contains("email"), "{warning}");
    assert!(warning.contains("beta"), "{warning}");

    let address = TableAddress::from_schema_path(&schema_path).unwrap();
    let file = ReportReader::domains(&address).unwrap();
    let beta = file.domains[1].conformance.as_ref().unwrap();
    assert_eq!(beta.status, ConformanceStatus::Aligned);
}

#[tokio::test]
async fn rescan_replaces_previous_results() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let address = TableAddress::from_schema_path(&schema_path).unwrap();

    let first = engine(
        Some(vec![domain("acme"), domain("beta")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            ("beta", full_table(2, &[("MX", 2)])),
        ],
        Duration::from_secs(5),
    );
    first.scan(&schema_path, never()).await.unwrap();

    let second = engine(
        Some(vec![domain("acme")]),
        vec![("acme", full_table(5, &[("US", 5)]))],
        Duration::from_secs(5),
    );
    second.scan(&schema_path, never()).await.unwrap();

    let file = ReportReader::domains(&address).unwrap();
    assert_eq!(file.summary.total_domains, 1);
    assert_eq!(file.summary.total_records, 5);
    let catalog = ReportReader::categoricals(&address).unwrap();
    assert!(!catalog.fields["Country"].by_domain.contains_key("beta"));
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[test]
fn validate_schema_counts_fields() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());

    let response = validate_schema(&schema_path).unwrap();
    assert_eq!(response.table, "crm/contacts");
    assert_eq!(response.fields, 4);
    assert_eq!(response.key_fields, 1);
    assert_eq!(response.categorical_fields, 1);
    assert_eq!(response.reference_domain.as_deref(), Some("acme"));
}

#[tokio::test]
async fn table_report_summarizes_last_scan() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());
    let engine = engine(
        Some(vec![domain("acme"), domain("beta")]),
        vec![
            ("acme", full_table(3, &[("US", 3)])),
            (
                "beta",
                Table::Rows {
                    columns: vec!["id", "email", "created_at", "country", "legacy"],
                    rows: 2,
                    samples: Vec::new(),
                },
            ),
        ],
        Duration::from_secs(5),
    );
    engine.scan(&schema_path, never()).await.unwrap();

    let report = table_report(&schema_path).unwrap();
    assert_eq!(report.summary.total_domains, 2);
    assert_eq!(report.categorical_fields, 1);
    let beta = &report.domains[1];
    assert_eq!(beta.domain, "beta");
    assert_eq!(beta.conformance, Some(ConformanceStatus::Diverged));
    assert_eq!(beta.missing, 0);
    assert_eq!(beta.extra, 1);
    assert!(beta.order_mismatches > 0);
}

#[test]
fn table_report_before_any_scan_is_an_error() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_schema(dir.path());

    let err = table_report(&schema_path).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Report(conform_report::ReportError::NotScanned { .. })
    ));
}
