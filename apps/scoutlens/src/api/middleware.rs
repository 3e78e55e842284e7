//! # Middleware Module
//!
//! Request throttling for the query surface.
//!
//! Every endpoint is a cheap read over the in-memory dataset, so one
//! process-wide quota is enough; there is no per-client keying. The
//! quota itself comes from the router configuration (see
//! `rate_limit_from_env` in the api module).

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

// =============================================================================
// QUERY THROTTLE
// =============================================================================

/// Process-wide request throttle shared by every route.
pub struct QueryThrottle {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl QueryThrottle {
    /// Build a throttle admitting `requests_per_second` requests.
    #[must_use]
    pub fn new(requests_per_second: NonZeroU32) -> Arc<Self> {
        Arc::new(Self {
            limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
        })
    }

    /// Whether one more request fits the quota right now.
    fn admit(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

/// Throttling middleware.
///
/// Returns 429 Too Many Requests once the quota is exhausted; admitted
/// requests pass through untouched.
pub async fn throttle_middleware(
    State(throttle): State<Arc<QueryThrottle>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if throttle.admit() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Throttled {} {}", request.method(), request.uri().path());
        Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
    }
}

// =============================================================================
// TESTS
// =============================================================================
