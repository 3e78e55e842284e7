//! # Scoutlens HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! All endpoints are read-only GETs; the dataset is frozen at startup.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /matches` - List all match ids
//! - `GET /teams` - List all team ids
//! - `GET /moments?match_id=` - Critical moments for one match
//! - `GET /scout?team_id=` - Tactical patterns for one team
//! - `GET /evidence?evidence_ref=&radius=` - Evidence panel for one reference
//! - `GET /integrity` - Full dataset integrity report
//! - `GET /dataset` - Dataset provenance metadata
//! - `GET /masking` - Observation-masking metrics (pack passthrough)
//! - `GET /benchmarks` - Benchmark tables (pack passthrough)
//! - `GET /validation` - Precomputed validation summary (pack passthrough)
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `SCOUTLENS_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `SCOUTLENS_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

// Re-export handlers and types for integration tests (via `scoutlens::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    benchmarks_handler, dataset_handler, evidence_handler, health_handler, integrity_handler,
    masking_handler, matches_handler, moments_handler, scout_handler, teams_handler,
    validation_handler,
};
#[allow(unused_imports)]
pub use types::{
    DatasetResponse, ErrorResponse, HealthResponse, IntegrityResponse, MatchesResponse,
    MomentsResponse, ScoutResponse, TeamsResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use middleware::QueryThrottle;
use scoutlens_core::{QueryFacade, ScoutError};
use std::num::NonZeroU32;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the query facade.
///
/// The facade is read-only, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The facade over the frozen dataset.
    pub facade: Arc<QueryFacade>,
}

impl AppState {
    /// Create new app state around a loaded facade.
    #[must_use]
    pub fn new(facade: Arc<QueryFacade>) -> Self {
        Self { facade }
    }
}

// =============================================================================
// ENVIRONMENT CONFIGURATION
// =============================================================================

/// Default request quota when `SCOUTLENS_RATE_LIMIT` is not set.
const DEFAULT_RATE_LIMIT: u32 = 100;

/// Read the request quota from `SCOUTLENS_RATE_LIMIT`.
///
/// `None` means throttling is disabled (explicit `0`). Unparseable
/// values fall back to the default rather than silently disabling.
fn rate_limit_from_env() -> Option<NonZeroU32> {
    let rps = std::env::var("SCOUTLENS_RATE_LIMIT")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);
    NonZeroU32::new(rps)
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `SCOUTLENS_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("SCOUTLENS_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (SCOUTLENS_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in SCOUTLENS_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No SCOUTLENS_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. CORS - handles preflight requests
/// 2. Tracing - logs all requests
/// 3. Rate Limiting - protects against DoS (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let throttle = match rate_limit_from_env() {
        Some(rps) => {
            tracing::info!("Throttling enabled: {} requests/second", rps);
            Some(QueryThrottle::new(rps))
        }
        None => {
            tracing::info!("Throttling disabled");
            None
        }
    };

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/matches", get(handlers::matches_handler))
        .route("/teams", get(handlers::teams_handler))
        .route("/moments", get(handlers::moments_handler))
        .route("/scout", get(handlers::scout_handler))
        .route("/evidence", get(handlers::evidence_handler))
        .route("/integrity", get(handlers::integrity_handler))
        .route("/dataset", get(handlers::dataset_handler))
        .route("/masking", get(handlers::masking_handler))
        .route("/benchmarks", get(handlers::benchmarks_handler))
        .route("/validation", get(handlers::validation_handler));

    if let Some(throttle) = throttle {
        router = router.layer(axum_middleware::from_fn_with_state(
            throttle,
            middleware::throttle_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, facade: Arc<QueryFacade>) -> Result<(), ScoutError> {
    let state = AppState::new(facade);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ScoutError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Scoutlens HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ScoutError::IoError(format!("Server error: {}", e)))
}
