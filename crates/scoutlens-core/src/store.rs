//! # Dataset Store
//!
//! Immutable, in-memory index of the frozen dataset: matches, events,
//! critical moments, and team patterns.
//!
//! All collections are `BTreeMap` so that listing order is deterministic.
//! The store is built once (see `pack::load_pack` or
//! [`DatasetStore::from_parts`]) and is strictly read-only afterwards:
//! every method takes `&self`, which makes concurrent reads safe with no
//! locking.

use crate::primitives::{MAX_CONTEXT_RADIUS_SECS, MAX_MOMENTS_PER_MATCH, MIN_MOMENTS_PER_MATCH};
use crate::types::{
    CriticalMoment, DatasetDescriptor, EvidenceRef, MatchEvent, MatchId, PackExtras, Pattern,
    ScoutError, TeamId,
};
use std::collections::BTreeMap;

// =============================================================================
// DATASET STORE
// =============================================================================

/// The closed set of matches, teams, events, moments, and patterns.
///
/// Lookup is O(log n) by match id, team id, and evidence reference.
/// Events within a match are kept sorted by `(ts, event_type, seq)`, so a
/// time window is a contiguous slice located via binary search.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    /// Per-match event timelines, each sorted by `(ts, event_type, seq)`.
    events_by_match: BTreeMap<MatchId, Vec<MatchEvent>>,

    /// Per-match moments, each sorted by `(start_ts, moment_id)`.
    moments_by_match: BTreeMap<MatchId, Vec<CriticalMoment>>,

    /// Per-team patterns, each sorted by `pattern_id`.
    patterns_by_team: BTreeMap<TeamId, Vec<Pattern>>,

    /// Reverse index: evidence reference -> (match, position in timeline).
    ref_index: BTreeMap<EvidenceRef, (MatchId, usize)>,

    /// Informational pack metadata.
    descriptor: DatasetDescriptor,

    /// Frozen passthrough sections served verbatim, never interpreted.
    extras: PackExtras,
}

impl DatasetStore {
    /// Build a store from already-deserialized entities.
    ///
    /// Sorts events and moments into their deterministic orders, builds the
    /// reference index, and rejects structurally unusable input:
    /// - an empty match set (`DatasetUnavailable`)
    /// - a duplicate evidence reference (`DatasetUnavailable`)
    ///
    /// Softer dataset invariants (moment counts, ref resolvability) are NOT
    /// enforced here; the integrity verifier exists to surface them.
    pub fn from_parts(
        mut events_by_match: BTreeMap<MatchId, Vec<MatchEvent>>,
        mut moments_by_match: BTreeMap<MatchId, Vec<CriticalMoment>>,
        patterns: Vec<Pattern>,
        descriptor: DatasetDescriptor,
    ) -> Result<Self, ScoutError> {
        if events_by_match.is_empty() {
            return Err(ScoutError::DatasetUnavailable(
                "dataset contains no matches".to_string(),
            ));
        }

        let mut ref_index: BTreeMap<EvidenceRef, (MatchId, usize)> = BTreeMap::new();
        for (match_id, events) in &mut events_by_match {
            events.sort_by(|a, b| {
                (a.ts, &a.event_type, a.seq).cmp(&(b.ts, &b.event_type, b.seq))
            });
            for (idx, event) in events.iter().enumerate() {
                let previous =
                    ref_index.insert(event.evidence_ref.clone(), (match_id.clone(), idx));
                if previous.is_some() {
                    return Err(ScoutError::DatasetUnavailable(format!(
                        "duplicate evidence reference in match {}",
                        match_id.as_str()
                    )));
                }
            }
        }

        for moments in moments_by_match.values_mut() {
            moments.sort_by(|a, b| (a.start_ts, &a.moment_id).cmp(&(b.start_ts, &b.moment_id)));
        }

        let mut patterns_by_team: BTreeMap<TeamId, Vec<Pattern>> = BTreeMap::new();
        for pattern in patterns {
            patterns_by_team
                .entry(pattern.team_id.clone())
                .or_default()
                .push(pattern);
        }
        for team_patterns in patterns_by_team.values_mut() {
            team_patterns.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));
        }

        Ok(Self {
            events_by_match,
            moments_by_match,
            patterns_by_team,
            ref_index,
            descriptor,
            extras: PackExtras::default(),
        })
    }

    /// Attach the pack's optional passthrough sections.
    #[must_use]
    pub fn with_extras(mut self, extras: PackExtras) -> Self {
        self.extras = extras;
        self
    }

    // =========================================================================
    // LISTINGS
    // =========================================================================

    /// All match ids in stable (lexicographic) order.
    #[must_use]
    pub fn list_matches(&self) -> Vec<MatchId> {
        self.events_by_match.keys().cloned().collect()
    }

    /// All team ids in stable order.
    ///
    /// Teams come from the pattern store; the engine never derives them by
    /// parsing match ids (match ids are opaque keys).
    #[must_use]
    pub fn list_teams(&self) -> Vec<TeamId> {
        self.patterns_by_team.keys().cloned().collect()
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// Moments of a match, sorted by `start_ts`.
    ///
    /// Fails with `MatchNotFound` if the match id is unknown. A known match
    /// with no moments entry yields an empty slice (the verifier flags the
    /// count violation separately).
    pub fn moments_for(&self, match_id: &MatchId) -> Result<&[CriticalMoment], ScoutError> {
        if !self.events_by_match.contains_key(match_id) {
            return Err(ScoutError::MatchNotFound(match_id.as_str().to_string()));
        }
        Ok(self
            .moments_by_match
            .get(match_id)
            .map_or(&[], Vec::as_slice))
    }

    /// Patterns of a team, sorted by `pattern_id`.
    ///
    /// Stored confidence levels are returned unchanged; nothing is
    /// recomputed here.
    pub fn patterns_for(&self, team_id: &TeamId) -> Result<&[Pattern], ScoutError> {
        self.patterns_by_team
            .get(team_id)
            .map(Vec::as_slice)
            .ok_or_else(|| ScoutError::TeamNotFound(team_id.as_str().to_string()))
    }

    /// Resolve an opaque evidence reference to its event.
    pub fn resolve_ref(&self, evidence_ref: &EvidenceRef) -> Result<&MatchEvent, ScoutError> {
        let (match_id, idx) = self
            .ref_index
            .get(evidence_ref)
            .ok_or(ScoutError::BrokenReference)?;
        self.events_by_match
            .get(match_id)
            .and_then(|events| events.get(*idx))
            .ok_or(ScoutError::BrokenReference)
    }

    /// Events of ONE match within `[center - radius, center + radius]`,
    /// inclusive, sorted by `ts` ascending.
    ///
    /// Context never crosses matches: the slice is taken from the match's
    /// own timeline only. The radius is capped by
    /// `MAX_CONTEXT_RADIUS_SECS` to keep the scan bounded.
    pub fn events_in_window(
        &self,
        match_id: &MatchId,
        center_ts: u32,
        radius_secs: u32,
    ) -> Result<&[MatchEvent], ScoutError> {
        let events = self
            .events_by_match
            .get(match_id)
            .ok_or_else(|| ScoutError::MatchNotFound(match_id.as_str().to_string()))?;

        let radius = radius_secs.min(MAX_CONTEXT_RADIUS_SECS);
        let lo = center_ts.saturating_sub(radius);
        let hi = center_ts.saturating_add(radius);

        // Timeline is ts-sorted, so the window is one contiguous slice.
        let start = events.partition_point(|e| e.ts < lo);
        let end = events.partition_point(|e| e.ts <= hi);
        Ok(&events[start..end])
    }

    // =========================================================================
    // CARDINALITIES & SCAN SUPPORT
    // =========================================================================

    /// Number of matches in the dataset.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.events_by_match.len()
    }

    /// Total events across all matches.
    #[must_use]
    pub fn total_events(&self) -> usize {
        self.events_by_match.values().map(Vec::len).sum()
    }

    /// Total moments across all matches.
    #[must_use]
    pub fn total_moments(&self) -> usize {
        self.moments_by_match.values().map(Vec::len).sum()
    }

    /// Total patterns across all teams.
    #[must_use]
    pub fn total_patterns(&self) -> usize {
        self.patterns_by_team.values().map(Vec::len).sum()
    }

    /// All moments in deterministic order (match id, then start_ts).
    pub fn all_moments(&self) -> impl Iterator<Item = &CriticalMoment> {
        self.moments_by_match.values().flatten()
    }

    /// All patterns in deterministic order (team id, then pattern id).
    pub fn all_patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns_by_team.values().flatten()
    }

    /// Informational pack metadata.
    #[must_use]
    pub fn descriptor(&self) -> &DatasetDescriptor {
        &self.descriptor
    }

    /// Observation-masking metrics shipped in the pack, if any.
    #[must_use]
    pub fn observation_masking(&self) -> Option<&serde_json::Value> {
        self.extras.observation_masking.as_ref()
    }

    /// Benchmark tables shipped in the pack, if any.
    #[must_use]
    pub fn benchmarks(&self) -> Option<&serde_json::Value> {
        self.extras.benchmarks.as_ref()
    }

    /// Precomputed validation summary shipped in the pack, if any.
    #[must_use]
    pub fn validation_summary(&self) -> Option<&serde_json::Value> {
        self.extras.validation_summary.as_ref()
    }

    /// Matches whose moment count falls outside the 3–5 dataset invariant,
    /// with the offending count.
    ///
    /// Checked, never repaired: callers decide how to surface violations
    /// (the binary logs them at load).
    #[must_use]
    pub fn moment_count_violations(&self) -> Vec<(MatchId, usize)> {
        self.events_by_match
            .keys()
            .filter_map(|match_id| {
                let count = self
                    .moments_by_match
                    .get(match_id)
                    .map_or(0, Vec::len);
                if (MIN_MOMENTS_PER_MATCH..=MAX_MOMENTS_PER_MATCH).contains(&count) {
                    None
                } else {
                    Some((match_id.clone(), count))
                }
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfidenceLevel;

    fn event(match_id: &str, ts: u32, event_type: &str, seq: u32) -> MatchEvent {
        MatchEvent {
            match_id: MatchId::new(match_id),
            ts,
            event_type: event_type.to_string(),
            payload: BTreeMap::new(),
            evidence_ref: EvidenceRef::new(format!("{match_id}:{seq:06}")),
            seq,
        }
    }

    fn moment(match_id: &str, n: u32, start_ts: u32, end_ts: u32, primary_seq: u32) -> CriticalMoment {
        CriticalMoment {
            match_id: MatchId::new(match_id),
            moment_id: format!("{match_id}:M{n:02}"),
            title: "Critical Moment".to_string(),
            description: "test moment".to_string(),
            start_ts,
            end_ts,
            primary_event_ref: EvidenceRef::new(format!("{match_id}:{primary_seq:06}")),
            related_event_refs: vec![],
            passes_validity_filter: true,
            validity_reasons: vec![],
        }
    }

    fn fixture() -> DatasetStore {
        let mut events = BTreeMap::new();
        events.insert(
            MatchId::new("NAVI-FNC-G1"),
            vec![
                event("NAVI-FNC-G1", 120, "SNAPSHOT", 3),
                event("NAVI-FNC-G1", 0, "SNAPSHOT", 1),
                event("NAVI-FNC-G1", 60, "TEAMFIGHT", 2),
                event("NAVI-FNC-G1", 180, "PATTERN", 4),
            ],
        );
        events.insert(
            MatchId::new("NAVI-FNC-G2"),
            vec![
                event("NAVI-FNC-G2", 60, "SNAPSHOT", 1),
                event("NAVI-FNC-G2", 120, "TEAMFIGHT", 2),
            ],
        );

        let mut moments = BTreeMap::new();
        moments.insert(
            MatchId::new("NAVI-FNC-G1"),
            vec![
                moment("NAVI-FNC-G1", 1, 30, 90, 2),
                moment("NAVI-FNC-G1", 2, 150, 210, 4),
                moment("NAVI-FNC-G1", 3, 0, 30, 1),
            ],
        );

        let patterns = vec![Pattern {
            team_id: TeamId::new("NAVI"),
            pattern_id: "NAVI:tempo_reset".to_string(),
            label: "Tempo Reset".to_string(),
            description: "Team stabilizes after a high-variance sequence.".to_string(),
            confidence_level: ConfidenceLevel::Low,
            sample_size: 6,
            instances: vec![],
        }];

        DatasetStore::from_parts(events, moments, patterns, DatasetDescriptor::default())
            .expect("fixture store")
    }

    #[test]
    fn listings_are_stable() {
        let store = fixture();
        assert_eq!(
            store.list_matches(),
            vec![MatchId::new("NAVI-FNC-G1"), MatchId::new("NAVI-FNC-G2")]
        );
        assert_eq!(store.list_teams(), vec![TeamId::new("NAVI")]);
    }

    #[test]
    fn events_sorted_after_load() {
        let store = fixture();
        let window = store
            .events_in_window(&MatchId::new("NAVI-FNC-G1"), 90, 600)
            .expect("window");
        let ts: Vec<u32> = window.iter().map(|e| e.ts).collect();
        assert_eq!(ts, vec![0, 60, 120, 180]);
    }

    #[test]
    fn window_is_inclusive_and_bounded() {
        let store = fixture();
        let match_id = MatchId::new("NAVI-FNC-G1");

        let window = store.events_in_window(&match_id, 60, 60).expect("window");
        let ts: Vec<u32> = window.iter().map(|e| e.ts).collect();
        // [0, 120] inclusive on both ends.
        assert_eq!(ts, vec![0, 60, 120]);

        let empty = store.events_in_window(&match_id, 1000, 10).expect("window");
        assert!(empty.is_empty());
    }

    #[test]
    fn window_never_crosses_matches() {
        let store = fixture();
        let window = store
            .events_in_window(&MatchId::new("NAVI-FNC-G2"), 90, 600)
            .expect("window");
        assert!(window.iter().all(|e| e.match_id == MatchId::new("NAVI-FNC-G2")));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn window_saturates_near_zero() {
        let store = fixture();
        // center - radius would underflow; must clamp to 0, not wrap.
        let window = store
            .events_in_window(&MatchId::new("NAVI-FNC-G1"), 10, 60)
            .expect("window");
        let ts: Vec<u32> = window.iter().map(|e| e.ts).collect();
        assert_eq!(ts, vec![0, 60]);
    }

    #[test]
    fn moments_sorted_by_start_ts() {
        let store = fixture();
        let moments = store
            .moments_for(&MatchId::new("NAVI-FNC-G1"))
            .expect("moments");
        let starts: Vec<u32> = moments.iter().map(|m| m.start_ts).collect();
        assert_eq!(starts, vec![0, 30, 150]);
    }

    #[test]
    fn unknown_match_is_not_found() {
        let store = fixture();
        let err = store
            .moments_for(&MatchId::new("UNKNOWN-MATCH"))
            .expect_err("must fail");
        assert!(matches!(err, ScoutError::MatchNotFound(_)));

        let err = store
            .events_in_window(&MatchId::new("UNKNOWN-MATCH"), 0, 60)
            .expect_err("must fail");
        assert!(matches!(err, ScoutError::MatchNotFound(_)));
    }

    #[test]
    fn unknown_team_is_not_found() {
        let store = fixture();
        let err = store
            .patterns_for(&TeamId::new("NOBODY"))
            .expect_err("must fail");
        assert!(matches!(err, ScoutError::TeamNotFound(_)));
    }

    #[test]
    fn resolve_ref_round_trip() {
        let store = fixture();
        let event = store
            .resolve_ref(&EvidenceRef::new("NAVI-FNC-G1:000002"))
            .expect("resolve");
        assert_eq!(event.ts, 60);
        assert_eq!(event.event_type, "TEAMFIGHT");

        let err = store
            .resolve_ref(&EvidenceRef::new("NAVI-FNC-G1:999999"))
            .expect_err("must fail");
        assert!(matches!(err, ScoutError::BrokenReference));
    }

    #[test]
    fn empty_dataset_is_unavailable() {
        let err = DatasetStore::from_parts(
            BTreeMap::new(),
            BTreeMap::new(),
            vec![],
            DatasetDescriptor::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, ScoutError::DatasetUnavailable(_)));
    }

    #[test]
    fn duplicate_reference_is_rejected() {
        let mut events = BTreeMap::new();
        events.insert(
            MatchId::new("NAVI-FNC-G1"),
            vec![
                event("NAVI-FNC-G1", 0, "SNAPSHOT", 1),
                event("NAVI-FNC-G1", 60, "SNAPSHOT", 1),
            ],
        );
        let err = DatasetStore::from_parts(
            events,
            BTreeMap::new(),
            vec![],
            DatasetDescriptor::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, ScoutError::DatasetUnavailable(_)));
    }

    #[test]
    fn extras_default_empty_and_attach_verbatim() {
        let store = fixture();
        assert!(store.observation_masking().is_none());
        assert!(store.benchmarks().is_none());
        assert!(store.validation_summary().is_none());

        let masking = serde_json::json!({"masked_fields": ["player_inputs"], "coverage": 1});
        let store = store.with_extras(PackExtras {
            observation_masking: Some(masking.clone()),
            benchmarks: None,
            validation_summary: None,
        });
        // Served verbatim, never reshaped.
        assert_eq!(store.observation_masking(), Some(&masking));
        assert!(store.benchmarks().is_none());
    }

    #[test]
    fn moment_count_violations_flag_short_matches() {
        let store = fixture();
        let violations = store.moment_count_violations();
        // G1 has exactly 3 moments (valid); G2 has none.
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, MatchId::new("NAVI-FNC-G2"));
        assert_eq!(violations[0].1, 0);
    }
}
