//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler is a read against the shared facade; there is no write
//! path. Error bodies for broken evidence references never include the
//! raw reference value.

use super::{
    AppState,
    types::{
        DatasetResponse, ErrorResponse, HealthResponse, IntegrityResponse, MatchesResponse,
        MomentsResponse, ScoutResponse, TeamsResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scoutlens_core::{EvidenceRef, MatchId, ScoutError, TeamId};
use serde::Deserialize;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map an engine error onto an HTTP status and body.
///
/// - Unknown match/team ids come back as 404 with the id in the message
/// - Broken evidence references come back as 404 with a generic message
/// - Everything else is a 500
fn error_response(err: &ScoutError) -> Response {
    let status = match err {
        ScoutError::MatchNotFound(_) | ScoutError::TeamNotFound(_) => StatusCode::NOT_FOUND,
        ScoutError::BrokenReference => StatusCode::NOT_FOUND,
        ScoutError::DatasetUnavailable(_) | ScoutError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
///
/// Reports the serving mode and the size of the frozen dataset alongside
/// liveness, so a UI can show the banner without a second request.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse::new(state.facade.match_count()))
}

// =============================================================================
// LISTING HANDLERS
// =============================================================================

/// List all match ids.
pub async fn matches_handler(State(state): State<AppState>) -> impl IntoResponse {
    let matches = state.facade.list_matches();
    Json(MatchesResponse {
        match_count: matches.len(),
        matches,
    })
}

/// List all team ids.
pub async fn teams_handler(State(state): State<AppState>) -> impl IntoResponse {
    let teams = state.facade.list_teams();
    Json(TeamsResponse {
        team_count: teams.len(),
        teams,
    })
}

// =============================================================================
// MOMENTS HANDLER
// =============================================================================

/// Query parameters for `/moments`.
#[derive(Debug, Deserialize)]
pub struct MomentsQuery {
    pub match_id: String,
}

/// Critical moments for one match.
pub async fn moments_handler(
    State(state): State<AppState>,
    Query(query): Query<MomentsQuery>,
) -> Response {
    let match_id = MatchId::new(query.match_id);
    match state.facade.moments_for(&match_id) {
        Ok(moments) => Json(MomentsResponse {
            match_id,
            moment_count: moments.len(),
            moments,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// SCOUT HANDLER
// =============================================================================

/// Query parameters for `/scout`.
#[derive(Debug, Deserialize)]
pub struct ScoutQuery {
    pub team_id: String,
}

/// Tactical patterns for one team.
pub async fn scout_handler(
    State(state): State<AppState>,
    Query(query): Query<ScoutQuery>,
) -> Response {
    let team_id = TeamId::new(query.team_id);
    match state.facade.patterns_for(&team_id) {
        Ok(patterns) => Json(ScoutResponse {
            team_id,
            pattern_count: patterns.len(),
            patterns,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// EVIDENCE HANDLER
// =============================================================================

/// Query parameters for `/evidence`.
#[derive(Debug, Deserialize)]
pub struct EvidenceQuery {
    pub evidence_ref: String,
    pub radius: Option<u32>,
}

/// Evidence panel for one reference.
///
/// An unresolvable reference yields a 404 whose body does not echo the
/// requested value.
pub async fn evidence_handler(
    State(state): State<AppState>,
    Query(query): Query<EvidenceQuery>,
) -> Response {
    let evidence_ref = EvidenceRef::new(query.evidence_ref);
    match state.facade.evidence_panel(&evidence_ref, query.radius) {
        Ok(panel) => Json(panel).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// INTEGRITY HANDLER
// =============================================================================

/// Full dataset integrity report.
pub async fn integrity_handler(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.facade.integrity_report();
    Json(IntegrityResponse::from(report))
}

// =============================================================================
// DATASET HANDLER
// =============================================================================

/// Dataset provenance metadata.
pub async fn dataset_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(DatasetResponse {
        match_count: state.facade.match_count(),
        descriptor: state.facade.descriptor(),
    })
}

// =============================================================================
// PACK SECTION HANDLERS
// =============================================================================

// Optional pack sections are served verbatim. A pack built without one still
// gets a 200 so a UI can render the "missing" note instead of an error page.

fn pack_section(section: Option<serde_json::Value>, note: &str) -> Response {
    match section {
        Some(value) => Json(value).into_response(),
        None => Json(serde_json::json!({ "status": "missing", "note": note })).into_response(),
    }
}

/// Observation-masking metrics shipped with the pack, if any.
pub async fn masking_handler(State(state): State<AppState>) -> impl IntoResponse {
    pack_section(
        state.facade.observation_masking(),
        "No observation masking metrics in this pack.",
    )
}

/// Baseline benchmark numbers shipped with the pack, if any.
pub async fn benchmarks_handler(State(state): State<AppState>) -> impl IntoResponse {
    pack_section(state.facade.benchmarks(), "No benchmarks in this pack.")
}

/// Validation summary shipped with the pack, if any.
pub async fn validation_handler(State(state): State<AppState>) -> impl IntoResponse {
    pack_section(
        state.facade.validation_summary(),
        "No validation summary shipped in this pack.",
    )
}
