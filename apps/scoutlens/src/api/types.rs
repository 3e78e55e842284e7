//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Evidence panels and patterns serialize straight from the core types;
//! only listings, the integrity report, and errors get wrapper shapes.

use scoutlens_core::{
    CriticalMoment, DatasetDescriptor, IntegrityReport, MatchId, Pattern, TeamId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub match_count: usize,
    pub version: String,
}

impl HealthResponse {
    #[must_use]
    pub fn new(match_count: usize) -> Self {
        Self {
            status: "ok".to_string(),
            mode: "frozen".to_string(),
            match_count,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// LISTING RESPONSES
// =============================================================================

/// Match listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub match_count: usize,
    pub matches: Vec<MatchId>,
}

/// Team listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub team_count: usize,
    pub teams: Vec<TeamId>,
}

// =============================================================================
// MOMENTS RESPONSE
// =============================================================================

/// Critical moments for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentsResponse {
    pub match_id: MatchId,
    pub moment_count: usize,
    pub moments: Vec<CriticalMoment>,
}

// =============================================================================
// SCOUT RESPONSE
// =============================================================================

/// Tactical patterns for one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutResponse {
    pub team_id: TeamId,
    pub pattern_count: usize,
    pub patterns: Vec<Pattern>,
}

// =============================================================================
// INTEGRITY RESPONSE
// =============================================================================

/// Full dataset integrity report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityResponse {
    /// True when the report contains no defects.
    pub integrity_ok: bool,
    #[serde(flatten)]
    pub report: IntegrityReport,
}

impl From<IntegrityReport> for IntegrityResponse {
    fn from(report: IntegrityReport) -> Self {
        Self {
            integrity_ok: report.is_clean(),
            report,
        }
    }
}

// =============================================================================
// DATASET RESPONSE
// =============================================================================

/// Dataset provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub match_count: usize,
    #[serde(flatten)]
    pub descriptor: DatasetDescriptor,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Uniform error body for all failing endpoints.
///
/// Broken evidence references are reported with a generic message; the
/// raw reference value never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Build an error body from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
