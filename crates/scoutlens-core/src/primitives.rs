//! # Engine Constants
//!
//! Hardcoded runtime constants for the Scoutlens engine.
//!
//! The engine starts with zero data but fixed rules. These values are
//! compiled into the binary and are immutable at runtime; the pack builder
//! that produced the dataset used the same values.

/// Default context radius around a resolved event, in seconds.
///
/// An evidence panel contains every event of the same match within
/// `[ts - radius, ts + radius]`, inclusive on both ends.
pub const DEFAULT_CONTEXT_RADIUS_SECS: u32 = 60;

/// Upper bound on a caller-supplied context radius.
///
/// Keeps `events_in_window` bounded under load; larger requests are capped,
/// not rejected.
pub const MAX_CONTEXT_RADIUS_SECS: u32 = 600;

/// Minimum sample size for a `high` confidence label.
pub const HIGH_CONFIDENCE_MIN_SAMPLES: u32 = 20;

/// Minimum sample size for a `medium` confidence label.
///
/// Everything below this is `low`.
pub const MEDIUM_CONFIDENCE_MIN_SAMPLES: u32 = 10;

/// Dataset invariant: fewest moments a match may carry.
pub const MIN_MOMENTS_PER_MATCH: usize = 3;

/// Dataset invariant: most moments a match may carry.
pub const MAX_MOMENTS_PER_MATCH: usize = 5;

/// Maximum size of a single pack JSON file (100 MB).
///
/// Validated BEFORE reading to prevent memory exhaustion from a corrupted
/// or malicious pack.
pub const MAX_PACK_FILE_SIZE: u64 = 100 * 1024 * 1024;
