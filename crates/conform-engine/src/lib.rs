//! # conform-engine
//!
//! Scan orchestration for reference schema conformance.
//!
//! A run loads the reference schema, lists the domains hosting the table,
//! scans each domain concurrently, computes structural conformance and the
//! categorical catalog, then persists both result files in one step.
//!
//! - [`conformance::compute`]: pure column-set and column-order diff
//! - [`categorical::aggregate`] / [`categorical::merge_into`]: pure value catalog
//! - [`scanner::scan`]: one domain, through a `TableStore`
//! - [`ScanEngine`]: fan-out, timeouts, cancellation, persistence
//! - [`commands`]: path-in, response-out entry points

pub mod categorical;
pub mod commands;
pub mod conformance;
mod error;
pub mod run;
pub mod scanner;

pub use error::{EngineError, ScanError};
pub use run::{NoProgress, RunTracker, ScanEngine, ScanOptions, ScanProgress};
pub use scanner::TableSnapshot;
