//! # Dataset Scenario Tests
//!
//! End-to-end tests over a realistic six-match fixture, exercising the
//! full read path: store construction, moment listings, pattern lookups,
//! panel assembly, and integrity verification.

#![allow(clippy::unwrap_used, clippy::panic)]

use scoutlens_core::{
    ConfidenceLevel, CriticalMoment, DatasetDescriptor, DatasetStore, EvidenceRef, MatchEvent,
    MatchId, Pattern, PatternInstance, QueryFacade, ScoutError, TeamId, build_panel_default,
    classify, verify,
};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// FIXTURE
// =============================================================================

const MATCH_IDS: [&str; 6] = [
    "NAVI-FNC-G1",
    "NAVI-FNC-G2",
    "NAVI-FNC-G3",
    "G2-VIT-G1",
    "G2-VIT-G2",
    "G2-VIT-G3",
];

fn event(match_id: &str, seq: u32, ts: u32, event_type: &str) -> MatchEvent {
    MatchEvent {
        match_id: MatchId::new(match_id),
        ts,
        event_type: event_type.to_string(),
        payload: BTreeMap::new(),
        evidence_ref: EvidenceRef::new(format!("{match_id}:{seq:06}")),
        seq,
    }
}

fn moment(match_id: &str, idx: u32, start_ts: u32, end_ts: u32, primary_seq: u32) -> CriticalMoment {
    CriticalMoment {
        match_id: MatchId::new(match_id),
        moment_id: format!("{match_id}:m{idx}"),
        title: format!("Moment {idx}"),
        description: "fixture".to_string(),
        start_ts,
        end_ts,
        primary_event_ref: EvidenceRef::new(format!("{match_id}:{primary_seq:06}")),
        related_event_refs: vec![],
        passes_validity_filter: true,
        validity_reasons: vec![],
    }
}

/// Six matches, 40 events each, 3-5 moments per match, two teams with
/// one pattern apiece.
fn fixture() -> DatasetStore {
    let mut events_by_match = BTreeMap::new();
    let mut moments_by_match = BTreeMap::new();

    for (i, id) in MATCH_IDS.iter().enumerate() {
        let events: Vec<MatchEvent> = (1..=40)
            .map(|seq| event(id, seq, seq * 30, if seq % 5 == 0 { "TEAMFIGHT" } else { "SNAPSHOT" }))
            .collect();
        events_by_match.insert(MatchId::new(*id), events);

        // Cycle through 3, 4, 5 moments per match.
        let count = 3 + (i as u32 % 3);
        let moments: Vec<CriticalMoment> = (0..count)
            .map(|m| {
                let primary_seq = 5 + m * 8;
                let center = primary_seq * 30;
                moment(id, m, center.saturating_sub(45), center + 45, primary_seq)
            })
            .collect();
        moments_by_match.insert(MatchId::new(*id), moments);
    }

    let patterns = vec![
        Pattern {
            team_id: TeamId::new("NAVI"),
            pattern_id: "NAVI:early_pressure".to_string(),
            label: "Early Pressure".to_string(),
            description: "Aggression in the opening minutes.".to_string(),
            confidence_level: ConfidenceLevel::Medium,
            sample_size: 12,
            instances: vec![PatternInstance {
                match_id: MatchId::new("NAVI-FNC-G1"),
                evidence_refs: vec![EvidenceRef::new("NAVI-FNC-G1:000005")],
                note: Some("opening teamfight".to_string()),
            }],
        },
        Pattern {
            team_id: TeamId::new("G2"),
            pattern_id: "G2:late_scaling".to_string(),
            label: "Late Scaling".to_string(),
            description: "Preference for long games.".to_string(),
            confidence_level: ConfidenceLevel::Low,
            sample_size: 6,
            instances: vec![PatternInstance {
                match_id: MatchId::new("G2-VIT-G2"),
                evidence_refs: vec![EvidenceRef::new("G2-VIT-G2:000035")],
                note: None,
            }],
        },
    ];

    DatasetStore::from_parts(
        events_by_match,
        moments_by_match,
        patterns,
        DatasetDescriptor {
            source: "fixture".to_string(),
            real_matches: 4,
            synthetic_matches: 2,
            notes: None,
        },
    )
    .expect("fixture store")
}

// =============================================================================
// SCENARIOS
// =============================================================================

/// Six matches load cleanly and every match carries 3-5 moments.
#[test]
fn six_match_dataset_is_well_formed() {
    let store = fixture();
    assert_eq!(store.match_count(), 6);
    assert!(store.moment_count_violations().is_empty());

    for id in MATCH_IDS {
        let moments = store.moments_for(&MatchId::new(id)).expect("moments");
        assert!((3..=5).contains(&moments.len()), "match {id} has {} moments", moments.len());
    }

    let report = verify(&store);
    assert!(report.is_clean());
    assert_eq!(report.match_count, 6);
    assert_eq!(report.total_events, 240);
}

/// A six-observation pattern is classified low, and the stored level is
/// served as-is.
#[test]
fn small_sample_pattern_is_low_confidence() {
    let store = fixture();
    assert_eq!(classify(6), ConfidenceLevel::Low);

    let patterns = store.patterns_for(&TeamId::new("G2")).expect("patterns");
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].sample_size, 6);
    assert_eq!(patterns[0].confidence_level, ConfidenceLevel::Low);
    assert_eq!(verify(&store).confidence_mismatches, 0);
}

/// One corrupted primary reference is counted by the verifier, and
/// trying to build a panel from it fails without echoing the value.
#[test]
fn corrupted_primary_ref_is_detected() {
    let mut events_by_match = BTreeMap::new();
    let mut moments_by_match = BTreeMap::new();
    events_by_match.insert(
        MatchId::new("NAVI-FNC-G1"),
        vec![event("NAVI-FNC-G1", 1, 300, "TEAMFIGHT")],
    );
    let mut bad = moment("NAVI-FNC-G1", 0, 255, 345, 1);
    bad.primary_event_ref = EvidenceRef::new("NAVI-FNC-G1:999999");
    moments_by_match.insert(MatchId::new("NAVI-FNC-G1"), vec![bad.clone()]);

    let store = DatasetStore::from_parts(
        events_by_match,
        moments_by_match,
        vec![],
        DatasetDescriptor::default(),
    )
    .expect("store");

    let report = verify(&store);
    assert_eq!(report.broken_refs, 1);
    assert!(!report.is_clean());

    let err = build_panel_default(&store, &bad.primary_event_ref).expect_err("must fail");
    assert!(matches!(err, ScoutError::BrokenReference));
    assert!(!err.to_string().contains("999999"));
}

/// Unknown match ids surface as not-found, with the id included.
#[test]
fn unknown_match_is_not_found() {
    let store = fixture();
    let err = store
        .moments_for(&MatchId::new("NAVI-FNC-G9"))
        .expect_err("must fail");
    assert!(err.is_not_found());
    assert!(err.to_string().contains("NAVI-FNC-G9"));
}

/// Verification and panel assembly run concurrently against the same
/// store without interference.
#[test]
fn concurrent_verify_and_panel_succeed() {
    let facade = Arc::new(QueryFacade::new(fixture()));

    std::thread::scope(|scope| {
        let verifier = {
            let facade = Arc::clone(&facade);
            scope.spawn(move || {
                for _ in 0..50 {
                    assert!(facade.integrity_report().is_clean());
                }
            })
        };
        let panelist = {
            let facade = Arc::clone(&facade);
            scope.spawn(move || {
                let evidence_ref = EvidenceRef::new("G2-VIT-G1:000013");
                for _ in 0..50 {
                    let panel = facade.evidence_panel(&evidence_ref, None).expect("panel");
                    assert_eq!(panel.event.seq, 13);
                }
            })
        };
        verifier.join().expect("verifier thread");
        panelist.join().expect("panelist thread");
    });
}

/// Every moment's primary reference resolves into its own match.
#[test]
fn moment_primaries_resolve_into_their_match() {
    let store = fixture();
    for moment in store.all_moments() {
        let panel = build_panel_default(&store, &moment.primary_event_ref).expect("panel");
        assert_eq!(panel.match_id, moment.match_id);
        assert!(
            panel.related_moments.iter().any(|m| m.moment_id == moment.moment_id),
            "panel centered on a moment's primary must surface that moment"
        );
    }
}
