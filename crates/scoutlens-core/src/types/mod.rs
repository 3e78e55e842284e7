//! # Core Type Definitions
//!
//! This module contains all core types for the Scoutlens deterministic
//! evidence engine:
//! - Opaque identifiers (`MatchId`, `TeamId`, `EvidenceRef`)
//! - Dataset entities (`MatchEvent`, `CriticalMoment`, `Pattern`)
//! - Derived structures (`EvidencePanel`, `IntegrityReport`)
//! - Error types (`ScoutError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer timestamps only (seconds from match start, no floats)
//! - Implement `Ord` where used as `BTreeMap` keys for deterministic ordering
//! - Carry no interior mutability; entities are frozen once loaded

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// OPAQUE IDENTIFIERS
// =============================================================================

/// Identifier of a match in the dataset.
///
/// The external convention is `TEAM_A-TEAM_B-G<n>`, but the engine treats
/// the id as an opaque key and round-trips it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    /// Create a match id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a team in the dataset. Opaque, round-tripped verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    /// Create a team id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque handle that resolves to exactly one underlying [`MatchEvent`].
///
/// The internal format is a store concern; callers resolve a reference only
/// through `DatasetStore::resolve_ref`. Raw reference values are never
/// echoed into user-facing error messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceRef(pub String);

impl EvidenceRef {
    /// Create an evidence reference from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CONFIDENCE LEVEL
// =============================================================================

/// Coarse, deterministic label derived solely from sample size.
///
/// See `confidence::classify` for the (total) derivation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Get the level as the lowercase string used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// =============================================================================
// MATCH EVENT
// =============================================================================

/// A single raw event in a match timeline.
///
/// Natural key is the `(match_id, ts, event_type)` tuple; `evidence_ref`
/// and `seq` are the synthetic ids assigned by the pack builder after
/// deterministic sorting, and `seq` also serves as the last-resort ordering
/// tiebreaker within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// The match this event belongs to.
    pub match_id: MatchId,
    /// Seconds from match start.
    pub ts: u32,
    /// Enum-like event kind, e.g. `SNAPSHOT`, `TEAMFIGHT`, `PATTERN`.
    pub event_type: String,
    /// Opaque key/value payload. `BTreeMap` keeps serialization order stable.
    #[serde(default)]
    pub payload: BTreeMap<String, serde_json::Value>,
    /// The opaque reference that resolves to this event.
    #[serde(alias = "evidence_id")]
    pub evidence_ref: EvidenceRef,
    /// Position in the match's deterministic event order (1-based).
    #[serde(alias = "global_seq")]
    pub seq: u32,
}

// =============================================================================
// CRITICAL MOMENT
// =============================================================================

/// A short, bounded time interval flagged as strategically significant,
/// backed by one primary evidence reference.
///
/// Invariant: `start_ts <= end_ts`. Each match carries 3–5 moments; the
/// bound is a dataset invariant checked at load, never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalMoment {
    /// The match this moment belongs to.
    pub match_id: MatchId,
    /// Unique moment identifier.
    pub moment_id: String,
    pub title: String,
    pub description: String,
    /// Interval start, seconds from match start.
    pub start_ts: u32,
    /// Interval end, inclusive.
    pub end_ts: u32,
    /// Resolves to exactly one event in the same match.
    pub primary_event_ref: EvidenceRef,
    /// Additional supporting references; each must resolve as well.
    #[serde(default)]
    pub related_event_refs: Vec<EvidenceRef>,
    /// Whether the upstream validity filter accepted this moment.
    #[serde(default = "default_true")]
    pub passes_validity_filter: bool,
    /// Human-readable reasons recorded by the upstream selection step.
    #[serde(default)]
    pub validity_reasons: Vec<String>,
}

const fn default_true() -> bool {
    true
}

// =============================================================================
// PATTERN
// =============================================================================

/// One evidenced occurrence of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInstance {
    /// The match the instance was observed in.
    pub match_id: MatchId,
    /// Ordered references; the first is "the" example in UI flows, but all
    /// must resolve independently.
    pub evidence_refs: Vec<EvidenceRef>,
    /// Optional builder-supplied annotation.
    #[serde(default)]
    pub note: Option<String>,
}

/// A recurring team tendency backed by one or more evidenced instances.
///
/// Standing invariant: `confidence_level == classify(sample_size)`.
/// The store passes the stored level through unchanged; the verifier
/// cross-checks the invariant and counts violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// The team this pattern describes.
    pub team_id: TeamId,
    /// Unique pattern identifier.
    pub pattern_id: String,
    pub label: String,
    pub description: String,
    /// Stored confidence label, expected to agree with the classifier.
    pub confidence_level: ConfidenceLevel,
    /// Number of observations the pattern is derived from.
    pub sample_size: u32,
    /// Ordered evidenced occurrences.
    pub instances: Vec<PatternInstance>,
}

// =============================================================================
// EVIDENCE PANEL (derived)
// =============================================================================

/// Full, human-reviewable view of one evidence reference.
///
/// Always computed on demand from the immutable store; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidencePanel {
    /// The reference this panel was built for.
    pub evidence_ref: EvidenceRef,
    /// The match the resolved event belongs to.
    pub match_id: MatchId,
    /// The resolved event itself.
    pub event: MatchEvent,
    /// Events of the SAME match within the context radius, ts ascending.
    pub context_window: Vec<MatchEvent>,
    /// Moments of the same match whose interval intersects the window,
    /// ordered by `start_ts` ascending.
    pub related_moments: Vec<CriticalMoment>,
}

// =============================================================================
// INTEGRITY REPORT (derived)
// =============================================================================

/// Outcome of a full cross-reference scan of the dataset.
///
/// `broken_refs == 0` is the passing condition behind the product promise
/// ("All insights verified"). Running the scan twice on an unchanged store
/// yields identical reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub match_count: usize,
    pub total_events: usize,
    pub total_moments: usize,
    pub total_patterns: usize,
    /// Stored references that failed to resolve, across moments (primary
    /// and related refs) and pattern instances.
    pub broken_refs: usize,
    /// Patterns whose stored confidence disagrees with `classify(sample_size)`.
    pub confidence_mismatches: usize,
}

impl IntegrityReport {
    /// True when the scan found no defects of any kind.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.broken_refs == 0 && self.confidence_mismatches == 0
    }
}

// =============================================================================
// DATASET DESCRIPTOR
// =============================================================================

/// Informational metadata shipped with the pack (`metadata.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Provenance label, e.g. `real` or `synthetic`.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub real_matches: u32,
    #[serde(default)]
    pub synthetic_matches: u32,
    /// Free-form builder notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_source() -> String {
    "unknown".to_string()
}

impl Default for DatasetDescriptor {
    fn default() -> Self {
        Self {
            source: default_source(),
            real_matches: 0,
            synthetic_matches: 0,
            notes: None,
        }
    }
}

// =============================================================================
// PASSTHROUGH SECTIONS
// =============================================================================

/// Optional informational sections shipped in the pack and served verbatim.
///
/// These are frozen JSON blobs the pack builder precomputed (masking
/// metrics, benchmark tables, a validation summary). The engine never
/// interprets them: zero compute at runtime, passthrough only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackExtras {
    /// Observation-masking metrics (`processed/observation_masking.json`).
    pub observation_masking: Option<serde_json::Value>,

    /// Benchmark tables (`processed/benchmarks.json`).
    pub benchmarks: Option<serde_json::Value>,

    /// Precomputed validation summary (`processed/validation_summary.json`).
    pub validation_summary: Option<serde_json::Value>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the Scoutlens engine.
///
/// - No silent failures: every defect is surfaced to the caller
/// - `BrokenReference` deliberately carries no reference value; raw
///   evidence ids are internal-only and never shown to end users
/// - The engine never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The requested match id is not present in the dataset.
    #[error("Unknown match id: {0}")]
    MatchNotFound(String),

    /// The requested team id is not present in the dataset.
    #[error("Unknown team id: {0}")]
    TeamNotFound(String),

    /// A stored evidence reference does not resolve to an existing event.
    #[error("Unknown evidence reference")]
    BrokenReference,

    /// The dataset pack failed to load; the engine refuses to serve a
    /// partial or empty store.
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// I/O failure outside the pack loader (socket bind, server loop).
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ScoutError {
    /// True for the two `NotFound` kinds (unknown match/team id).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MatchNotFound(_) | Self::TeamNotFound(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
