//! # Confidence Classifier
//!
//! Pure, total mapping from sample size to a confidence label.
//!
//! The rule is deliberately coarse and integer-only so the same inputs
//! always produce the same label:
//! - `n >= 20` → high
//! - `10 <= n < 20` → medium
//! - `n < 10` → low
//!
//! Used two ways: to validate the `confidence_level` stored with each
//! pattern (integrity verifier), and to assign a level when patterns are
//! computed live rather than pre-baked.

use crate::primitives::{HIGH_CONFIDENCE_MIN_SAMPLES, MEDIUM_CONFIDENCE_MIN_SAMPLES};
use crate::types::ConfidenceLevel;

/// Classify a sample size into a confidence level.
///
/// Total function: every `u32` maps to exactly one level, no failure mode,
/// no side effects.
#[must_use]
pub const fn classify(sample_size: u32) -> ConfidenceLevel {
    if sample_size >= HIGH_CONFIDENCE_MIN_SAMPLES {
        ConfidenceLevel::High
    } else if sample_size >= MEDIUM_CONFIDENCE_MIN_SAMPLES {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

// =============================================================================
// TESTS
// =============================================================================
