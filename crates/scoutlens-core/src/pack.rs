//! # Pack Loader
//!
//! Deserializes a frozen dataset pack from disk into a [`DatasetStore`].
//!
//! Loading is intentionally "zero compute": the pack ships pre-built
//! entities as plain JSON and the loader only reads, validates sizes, and
//! indexes. Expected layout under the pack root:
//!
//! ```text
//! <root>/
//!   metadata.json                      (optional descriptor)
//!   processed/
//!     events_store.json                {"matches": {"<id>": [event, ..]}}
//!     moments_store.json               {"matches": {"<id>": [moment, ..]}}
//!     patterns_store.json              {"patterns": [pattern, ..]}
//!     observation_masking.json         (optional passthrough)
//!     benchmarks.json                  (optional passthrough)
//!     validation_summary.json          (optional passthrough)
//! ```
//!
//! Evidence panels are NEVER loaded from the pack, even if an older builder
//! shipped a precomputed `evidence_refs.json`; panels are always computed
//! on demand so the two lookup paths cannot diverge.
//!
//! The pack location is an explicit [`PackConfig`] value handed to
//! [`load_pack`]; the engine reads no environment variables.

use crate::store::DatasetStore;
use crate::types::{
    CriticalMoment, DatasetDescriptor, MatchEvent, MatchId, PackExtras, Pattern, ScoutError,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Where the pack lives. Immutable after construction.
#[derive(Debug, Clone)]
pub struct PackConfig {
    root: PathBuf,
}

impl PackConfig {
    /// Point the loader at a pack root directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured pack root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

// =============================================================================
// PACK FILE SHAPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct EventsFile {
    #[serde(default)]
    matches: BTreeMap<MatchId, Vec<MatchEvent>>,
}

#[derive(Debug, Deserialize)]
struct MomentsFile {
    #[serde(default)]
    matches: BTreeMap<MatchId, Vec<CriticalMoment>>,
}

#[derive(Debug, Deserialize)]
struct PatternsFile {
    #[serde(default)]
    patterns: Vec<Pattern>,
}

// =============================================================================
// LOADING
// =============================================================================

/// Load a frozen pack into an immutable store.
///
/// Every failure maps to `DatasetUnavailable`: a missing file, unparseable
/// JSON, an oversized file, or a structurally unusable dataset. The engine
/// refuses to serve a partial store rather than degrade silently.
pub fn load_pack(config: &PackConfig) -> Result<DatasetStore, ScoutError> {
    let processed = config.root().join("processed");

    let events: EventsFile = read_json(&processed.join("events_store.json"))?;
    let moments: MomentsFile = read_json(&processed.join("moments_store.json"))?;
    let patterns: PatternsFile = read_json(&processed.join("patterns_store.json"))?;
    let descriptor: DatasetDescriptor =
        try_read_json(&config.root().join("metadata.json"))?.unwrap_or_default();

    // Optional informational sections; absent files mean the loader keeps
    // `None`, and a present-but-corrupted file still fails the load.
    let extras = PackExtras {
        observation_masking: try_read_json(&processed.join("observation_masking.json"))?,
        benchmarks: try_read_json(&processed.join("benchmarks.json"))?,
        validation_summary: try_read_json(&processed.join("validation_summary.json"))?,
    };

    Ok(DatasetStore::from_parts(
        events.matches,
        moments.matches,
        patterns.patterns,
        descriptor,
    )?
    .with_extras(extras))
}

/// Read and deserialize a required pack file.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScoutError> {
    match try_read_json(path)? {
        Some(value) => Ok(value),
        None => Err(ScoutError::DatasetUnavailable(format!(
            "missing required pack file: {}",
            path.display()
        ))),
    }
}

/// Read and deserialize an optional pack file; `Ok(None)` if absent.
fn try_read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, ScoutError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ScoutError::DatasetUnavailable(format!(
                "cannot stat pack file {}: {e}",
                path.display()
            )));
        }
    };

    // Size is validated BEFORE reading to bound allocation.
    if metadata.len() > crate::primitives::MAX_PACK_FILE_SIZE {
        return Err(ScoutError::DatasetUnavailable(format!(
            "pack file {} is {} bytes, exceeds maximum {}",
            path.display(),
            metadata.len(),
            crate::primitives::MAX_PACK_FILE_SIZE
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        ScoutError::DatasetUnavailable(format!("cannot read pack file {}: {e}", path.display()))
    })?;

    let value = serde_json::from_slice(&bytes).map_err(|e| {
        ScoutError::DatasetUnavailable(format!("pack JSON is corrupted: {}: {e}", path.display()))
    })?;
    Ok(Some(value))
}

// =============================================================================
// TESTS
// =============================================================================
