//! # Query Facade
//!
//! Thin, deterministic composition layer over the store, the classifier,
//! and the resolver. This is exactly the read surface the presentation
//! layer consumes; each call is independent and side-effect-free, so the
//! facade has no session state and is cheap to share behind an `Arc` with
//! no lock.

use crate::evidence;
use crate::integrity;
use crate::store::DatasetStore;
use crate::types::{
    CriticalMoment, DatasetDescriptor, EvidencePanel, EvidenceRef, IntegrityReport, MatchId,
    Pattern, ScoutError, TeamId,
};

/// Owns the immutable store and exposes the read operations.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: DatasetStore,
}

impl QueryFacade {
    /// Wrap a loaded store.
    #[must_use]
    pub fn new(store: DatasetStore) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// All match ids, stable order.
    #[must_use]
    pub fn list_matches(&self) -> Vec<MatchId> {
        self.store.list_matches()
    }

    /// All team ids, stable order.
    #[must_use]
    pub fn list_teams(&self) -> Vec<TeamId> {
        self.store.list_teams()
    }

    /// Moments of one match, `start_ts`-ascending.
    pub fn moments_for(&self, match_id: &MatchId) -> Result<Vec<CriticalMoment>, ScoutError> {
        Ok(self.store.moments_for(match_id)?.to_vec())
    }

    /// Patterns of one team. Stored `confidence_level` values are passed
    /// through unchanged, never recomputed; mismatches are the verifier's
    /// business.
    pub fn patterns_for(&self, team_id: &TeamId) -> Result<Vec<Pattern>, ScoutError> {
        Ok(self.store.patterns_for(team_id)?.to_vec())
    }

    /// Evidence panel for one reference; `radius_secs` defaults to 60.
    pub fn evidence_panel(
        &self,
        evidence_ref: &EvidenceRef,
        radius_secs: Option<u32>,
    ) -> Result<EvidencePanel, ScoutError> {
        match radius_secs {
            Some(radius) => evidence::build_panel(&self.store, evidence_ref, radius),
            None => evidence::build_panel_default(&self.store, evidence_ref),
        }
    }

    /// Full cross-reference scan of the dataset.
    #[must_use]
    pub fn integrity_report(&self) -> IntegrityReport {
        integrity::verify(&self.store)
    }

    /// Informational pack metadata.
    #[must_use]
    pub fn descriptor(&self) -> DatasetDescriptor {
        self.store.descriptor().clone()
    }

    /// Observation-masking metrics, served verbatim from the pack.
    #[must_use]
    pub fn observation_masking(&self) -> Option<serde_json::Value> {
        self.store.observation_masking().cloned()
    }

    /// Benchmark tables, served verbatim from the pack.
    #[must_use]
    pub fn benchmarks(&self) -> Option<serde_json::Value> {
        self.store.benchmarks().cloned()
    }

    /// Precomputed validation summary, served verbatim from the pack.
    #[must_use]
    pub fn validation_summary(&self) -> Option<serde_json::Value> {
        self.store.validation_summary().cloned()
    }

    /// Number of matches in the dataset.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.store.match_count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceLevel, MatchEvent};
    use std::collections::BTreeMap;

    fn fixture() -> QueryFacade {
        let mut events = BTreeMap::new();
        events.insert(
            MatchId::new("NAVI-FNC-G1"),
            vec![MatchEvent {
                match_id: MatchId::new("NAVI-FNC-G1"),
                ts: 0,
                event_type: "SNAPSHOT".to_string(),
                payload: BTreeMap::new(),
                evidence_ref: EvidenceRef::new("NAVI-FNC-G1:000001"),
                seq: 1,
            }],
        );

        // Stored level deliberately disagrees with classify(6).
        let patterns = vec![Pattern {
            team_id: TeamId::new("NAVI"),
            pattern_id: "NAVI:river_risk".to_string(),
            label: "River Risk".to_string(),
            description: "Team enters river with higher contest risk.".to_string(),
            confidence_level: ConfidenceLevel::High,
            sample_size: 6,
            instances: vec![],
        }];

        let store = DatasetStore::from_parts(
            events,
            BTreeMap::new(),
            patterns,
            crate::types::DatasetDescriptor::default(),
        )
        .expect("store");
        QueryFacade::new(store)
    }

    #[test]
    fn stored_confidence_is_passed_through_unchanged() {
        let facade = fixture();
        let patterns = facade.patterns_for(&TeamId::new("NAVI")).expect("patterns");
        assert_eq!(patterns[0].confidence_level, ConfidenceLevel::High);

        // The verifier, not the facade, surfaces the disagreement.
        let report = facade.integrity_report();
        assert_eq!(report.confidence_mismatches, 1);
    }

    #[test]
    fn calls_are_independent_of_ordering() {
        let facade = fixture();
        let panel_first = facade
            .evidence_panel(&EvidenceRef::new("NAVI-FNC-G1:000001"), None)
            .expect("panel");
        let _ = facade.integrity_report();
        let panel_second = facade
            .evidence_panel(&EvidenceRef::new("NAVI-FNC-G1:000001"), None)
            .expect("panel");
        assert_eq!(panel_first, panel_second);
    }
}
