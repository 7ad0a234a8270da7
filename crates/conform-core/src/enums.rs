//! Status enums for domains, conformance verdicts, and scan runs.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `RunPhase` is a state machine and provides `allowed_next_states()` so the
//! orchestrator can reject illegal transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DomainStatus
// ---------------------------------------------------------------------------

/// Outcome of scanning one domain's copy of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Table present with rows.
    Active,
    /// Table present with rows, in a domain flagged as a test tenant.
    Test,
    /// Table present without rows.
    Empty,
    /// Table absent from the domain.
    NotFound,
    /// Domain could not be scanned (connectivity, query failure, timeout).
    Unknown,
}

impl DomainStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Test => "test",
            Self::Empty => "empty",
            Self::NotFound => "not_found",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a scan with this status produced a usable column list.
    #[must_use]
    pub const fn has_columns(self) -> bool {
        matches!(self, Self::Active | Self::Test)
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConformanceStatus
// ---------------------------------------------------------------------------

/// Structural verdict for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConformanceStatus {
    /// The domain is the designated reference domain.
    Reference,
    /// Same columns in the same relative order as the reference.
    Aligned,
    /// At least one missing, extra, or displaced column.
    Diverged,
}

impl ConformanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Aligned => "aligned",
            Self::Diverged => "diverged",
        }
    }
}

impl fmt::Display for ConformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RunPhase
// ---------------------------------------------------------------------------

/// Phase of a scan run.
///
/// ```text
/// idle → scanning → aggregating → writing → done
///                                         → partial_failure
/// idle | scanning → failed
/// scanning | aggregating → cancelled
/// writing → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Scanning,
    Aggregating,
    Writing,
    Done,
    PartialFailure,
    Failed,
    Cancelled,
}

impl RunPhase {
    /// Valid next phases from the current phase.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Scanning, Self::Failed],
            Self::Scanning => &[Self::Aggregating, Self::Failed, Self::Cancelled],
            Self::Aggregating => &[Self::Writing, Self::Cancelled],
            Self::Writing => &[Self::Done, Self::PartialFailure, Self::Failed],
            Self::Done | Self::PartialFailure | Self::Failed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Aggregating => "aggregating",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::PartialFailure => "partial_failure",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DomainScanState
// ---------------------------------------------------------------------------

/// Per-domain progress inside the `scanning` phase.
///
/// ```text
/// pending → success | empty | not_found | error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainScanState {
    Pending,
    Success,
    Empty,
    NotFound,
    Error,
}

impl DomainScanState {
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Empty => "empty",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DomainScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RunOutcome / DomainErrorKind
// ---------------------------------------------------------------------------

/// Terminal outcome reported to callers of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every domain was reachable.
    Done,
    /// The run completed but at least one domain could not be scanned.
    PartialFailure,
}

impl RunOutcome {
    #[must_use]
    pub const fn phase(self) -> RunPhase {
        match self {
            Self::Done => RunPhase::Done,
            Self::PartialFailure => RunPhase::PartialFailure,
        }
    }
}

/// Nature of a non-fatal per-domain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainErrorKind {
    /// The storage capability could not be opened.
    Connection,
    /// A query against the domain failed.
    Query,
    /// The domain did not answer within the per-domain timeout.
    Timeout,
    /// The per-domain task itself failed (panic or abort).
    Internal,
}

impl DomainErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Query => "query",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
