//! # Evidence Resolver
//!
//! Turns one opaque evidence reference into a full, human-reviewable panel:
//! the resolved event, its match-scoped context window, and every moment
//! whose interval intersects that window.
//!
//! The result is fully reproducible for a given `(reference, radius)` pair:
//! no randomness, no external calls, no caching.

use crate::primitives::DEFAULT_CONTEXT_RADIUS_SECS;
use crate::store::DatasetStore;
use crate::types::{EvidencePanel, EvidenceRef, ScoutError};

/// Build an evidence panel with the default 60-second context radius.
pub fn build_panel_default(
    store: &DatasetStore,
    evidence_ref: &EvidenceRef,
) -> Result<EvidencePanel, ScoutError> {
    build_panel(store, evidence_ref, DEFAULT_CONTEXT_RADIUS_SECS)
}

/// Build an evidence panel for one reference.
///
/// Fails with `BrokenReference` if the reference does not resolve; a panel
/// cannot be built from nothing. The context window and related moments are
/// taken from the resolved event's own match only — context never leaks
/// across matches.
pub fn build_panel(
    store: &DatasetStore,
    evidence_ref: &EvidenceRef,
    radius_secs: u32,
) -> Result<EvidencePanel, ScoutError> {
    let event = store.resolve_ref(evidence_ref)?.clone();

    let context_window = store
        .events_in_window(&event.match_id, event.ts, radius_secs)?
        .to_vec();

    // Same capped, saturating bounds events_in_window applied.
    let radius = radius_secs.min(crate::primitives::MAX_CONTEXT_RADIUS_SECS);
    let lo = event.ts.saturating_sub(radius);
    let hi = event.ts.saturating_add(radius);

    // Moments are stored sorted by start_ts, so the filtered list stays
    // start_ts-ascending. Interval intersection includes the moment the
    // event itself belongs to, if any.
    let related_moments = store
        .moments_for(&event.match_id)?
        .iter()
        .filter(|m| m.start_ts <= hi && m.end_ts >= lo)
        .cloned()
        .collect();

    Ok(EvidencePanel {
        evidence_ref: evidence_ref.clone(),
        match_id: event.match_id.clone(),
        event,
        context_window,
        related_moments,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CriticalMoment, DatasetDescriptor, MatchEvent, MatchId,
    };
    use std::collections::BTreeMap;

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

    fn moment(match_id: &str, n: u32, start_ts: u32, end_ts: u32) -> CriticalMoment {
        CriticalMoment {
            match_id: MatchId::new(match_id),
            moment_id: format!("{match_id}:M{n:02}"),
            title: "Critical Moment".to_string(),
            description: "test moment".to_string(),
            start_ts,
            end_ts,
            primary_event_ref: EvidenceRef::new(format!("{match_id}:000001")),
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
                event("NAVI-FNC-G1", 0, "SNAPSHOT", 1),
                event("NAVI-FNC-G1", 60, "SNAPSHOT", 2),
                event("NAVI-FNC-G1", 120, "TEAMFIGHT", 3),
                event("NAVI-FNC-G1", 300, "SNAPSHOT", 4),
            ],
        );
        events.insert(
            MatchId::new("NAVI-FNC-G2"),
            vec![event("NAVI-FNC-G2", 120, "SNAPSHOT", 1)],
        );

        let mut moments = BTreeMap::new();
        moments.insert(
            MatchId::new("NAVI-FNC-G1"),
            vec![
                moment("NAVI-FNC-G1", 1, 90, 150),
                moment("NAVI-FNC-G1", 2, 170, 200),
                moment("NAVI-FNC-G1", 3, 280, 320),
            ],
        );

        DatasetStore::from_parts(events, moments, vec![], DatasetDescriptor::default())
            .expect("fixture store")
    }

    #[test]
    fn panel_centers_on_resolved_event() {
        let store = fixture();
        let panel =
            build_panel_default(&store, &EvidenceRef::new("NAVI-FNC-G1:000003")).expect("panel");

        assert_eq!(panel.match_id, MatchId::new("NAVI-FNC-G1"));
        assert_eq!(panel.event.ts, 120);
        // Window [60, 180] picks up the two neighbors, not the far snapshot.
        let ts: Vec<u32> = panel.context_window.iter().map(|e| e.ts).collect();
        assert_eq!(ts, vec![60, 120]);
    }

    #[test]
    fn related_moments_use_interval_intersection() {
        let store = fixture();
        let panel =
            build_panel_default(&store, &EvidenceRef::new("NAVI-FNC-G1:000003")).expect("panel");

        // ts=120, radius 60 -> window [60, 180].
        // M01 [90,150] contains the event; M02 [170,200] merely touches the
        // window edge; M03 [280,320] is outside.
        let ids: Vec<&str> = panel
            .related_moments
            .iter()
            .map(|m| m.moment_id.as_str())
            .collect();
        assert_eq!(ids, vec!["NAVI-FNC-G1:M01", "NAVI-FNC-G1:M02"]);
    }

    #[test]
    fn context_never_leaks_across_matches() {
        let store = fixture();
        // G2's lone event sits at the same ts as G1's teamfight.
        let panel =
            build_panel_default(&store, &EvidenceRef::new("NAVI-FNC-G2:000001")).expect("panel");

        assert_eq!(panel.match_id, MatchId::new("NAVI-FNC-G2"));
        assert!(panel
            .context_window
            .iter()
            .all(|e| e.match_id == MatchId::new("NAVI-FNC-G2")));
        assert_eq!(panel.context_window.len(), 1);
        assert!(panel.related_moments.is_empty());
    }

    #[test]
    fn broken_reference_fails() {
        let store = fixture();
        let err = build_panel_default(&store, &EvidenceRef::new("NAVI-FNC-G1:424242"))
            .expect_err("must fail");
        assert!(matches!(err, ScoutError::BrokenReference));
    }

    #[test]
    fn panel_is_reproducible() {
        let store = fixture();
        let evidence_ref = EvidenceRef::new("NAVI-FNC-G1:000002");
        let first = build_panel(&store, &evidence_ref, 90).expect("panel");
        let second = build_panel(&store, &evidence_ref, 90).expect("panel");
        assert_eq!(first, second);
    }

    #[test]
    fn wider_radius_widens_the_window() {
        let store = fixture();
        let evidence_ref = EvidenceRef::new("NAVI-FNC-G1:000003");
        let narrow = build_panel(&store, &evidence_ref, 10).expect("panel");
        let wide = build_panel(&store, &evidence_ref, 240).expect("panel");
        assert_eq!(narrow.context_window.len(), 1);
        assert_eq!(wide.context_window.len(), 4);
        assert_eq!(wide.related_moments.len(), 3);
    }
}
