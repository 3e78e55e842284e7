//! # scoutlens-core
//!
//! The deterministic evidence engine for Scoutlens - THE ENGINE.
//!
//! This crate indexes a closed, immutable dataset of match events, critical
//! moments, and team patterns, and answers the read operations a coaching
//! UI consumes: listings, moments-for-match, patterns-for-team, evidence
//! panels, and a full integrity scan. Every derived insight traces back to
//! the raw event(s) that produced it; a reference that does not resolve is
//! surfaced, never papered over.
//!
//! ## Architectural Constraints
//!
//! - The store is built once, synchronously, before serving; strictly
//!   read-only afterwards (concurrent reads need no locking)
//! - Deterministic: `BTreeMap` only, integer timestamps, no randomness —
//!   same inputs always produce the same moments/patterns/evidence
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod confidence;
pub mod evidence;
pub mod facade;
pub mod integrity;
pub mod pack;
pub mod primitives;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ConfidenceLevel, CriticalMoment, DatasetDescriptor, EvidencePanel, EvidenceRef,
    IntegrityReport, MatchEvent, MatchId, PackExtras, Pattern, PatternInstance, ScoutError,
    TeamId,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use confidence::classify;
pub use evidence::{build_panel, build_panel_default};
pub use facade::QueryFacade;
pub use integrity::verify;
pub use pack::{PackConfig, load_pack};
pub use store::DatasetStore;
