//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command loads the dataset pack fresh from disk, runs a read-only
//! query, and prints the result. The dataset is never mutated.

use crate::api;
use scoutlens_core::{
    EvidenceRef, MatchId, PackConfig, QueryFacade, ScoutError, TeamId, load_pack,
};
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// PACK LOADING
// =============================================================================

/// Load the dataset pack and wrap it in a query facade.
///
/// Moment-count violations (a match with fewer than 3 or more than 5
/// moments) are logged but do not block loading; the verifier reports
/// them separately.
fn load_facade(pack_root: &Path) -> Result<QueryFacade, ScoutError> {
    let config = PackConfig::new(pack_root);
    let store = load_pack(&config)?;

    for (match_id, count) in store.moment_count_violations() {
        tracing::warn!(
            "Match {} has {} moments (expected 3-5)",
            match_id.as_str(),
            count
        );
    }

    Ok(QueryFacade::new(store))
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
///
/// Before binding, a preflight pass exercises every read path against
/// the loaded dataset. If any of them fails, the server refuses to
/// start; a broken dataset must never be served silently.
pub async fn cmd_server(pack_root: &Path, host: &str, port: u16) -> Result<(), ScoutError> {
    let facade = Arc::new(load_facade(pack_root)?);

    preflight(&facade).await?;

    println!("Scoutlens Evidence Resolution Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Pack:     {:?}", pack_root);
    println!("  Matches:  {}", facade.match_count());
    println!();
    println!("Endpoints:");
    println!("  GET /health    - Health check");
    println!("  GET /matches   - List match ids");
    println!("  GET /teams     - List team ids");
    println!("  GET /moments   - Critical moments for a match");
    println!("  GET /scout     - Tactical patterns for a team");
    println!("  GET /evidence  - Evidence panel for a reference");
    println!("  GET /integrity - Full dataset integrity report");
    println!("  GET /dataset   - Dataset provenance metadata");
    println!("  GET /masking   - Observation-masking metrics (if shipped)");
    println!("  GET /benchmarks - Baseline benchmarks (if shipped)");
    println!("  GET /validation - Validation summary (if shipped)");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, facade).await
}

/// Run startup checks concurrently; the first failure aborts startup.
///
/// An unclean integrity report is a warning, not a startup failure: the
/// dataset is frozen, so operators need the server up to inspect it.
async fn preflight(facade: &Arc<QueryFacade>) -> Result<(), ScoutError> {
    let first = match facade.list_matches().first() {
        Some(id) => id.clone(),
        None => {
            return Err(ScoutError::DatasetUnavailable(
                "pack contains no matches".to_string(),
            ));
        }
    };

    let matches = {
        let facade = Arc::clone(facade);
        tokio::spawn(async move { facade.list_matches().len() })
    };
    let teams = {
        let facade = Arc::clone(facade);
        tokio::spawn(async move { facade.list_teams().len() })
    };
    let moments = {
        let facade = Arc::clone(facade);
        tokio::spawn(async move { facade.moments_for(&first).map(|m| m.len()) })
    };
    let report = {
        let facade = Arc::clone(facade);
        tokio::spawn(async move { facade.integrity_report() })
    };
    let descriptor = {
        let facade = Arc::clone(facade);
        tokio::spawn(async move { facade.descriptor() })
    };

    let (matches, teams, moments, report, descriptor) =
        tokio::try_join!(matches, teams, moments, report, descriptor)
            .map_err(|e| ScoutError::DatasetUnavailable(format!("Preflight task failed: {e}")))?;
    let moment_count = moments?;

    tracing::info!(
        "Preflight: {} matches, {} teams, {} moments in first match, source {}",
        matches,
        teams,
        moment_count,
        descriptor.source
    );

    if !report.is_clean() {
        tracing::warn!(
            "Dataset integrity is NOT clean: {} broken refs, {} confidence mismatches",
            report.broken_refs,
            report.confidence_mismatches
        );
    }

    Ok(())
}

// =============================================================================
// LISTING COMMANDS
// =============================================================================

/// List all match ids.
pub fn cmd_matches(pack_root: &Path, json_mode: bool) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let matches = facade.list_matches();

    if json_mode {
        let output = serde_json::json!({
            "match_count": matches.len(),
            "matches": matches,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Matches ({})", matches.len());
    println!("============");
    for match_id in &matches {
        println!("  {}", match_id.as_str());
    }

    Ok(())
}

/// List all team ids.
pub fn cmd_teams(pack_root: &Path, json_mode: bool) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let teams = facade.list_teams();

    if json_mode {
        let output = serde_json::json!({
            "team_count": teams.len(),
            "teams": teams,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Teams ({})", teams.len());
    println!("==========");
    for team_id in &teams {
        println!("  {}", team_id.as_str());
    }

    Ok(())
}

// =============================================================================
// MOMENTS COMMAND
// =============================================================================

/// List critical moments for one match.
pub fn cmd_moments(pack_root: &Path, json_mode: bool, match_id: &str) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let moments = facade.moments_for(&MatchId::new(match_id))?;

    if json_mode {
        let output = serde_json::json!({
            "match_id": match_id,
            "moment_count": moments.len(),
            "moments": moments,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Critical Moments: {}", match_id);
    println!("=================={}", "=".repeat(match_id.len()));
    for moment in &moments {
        let validity = if moment.passes_validity_filter {
            "valid"
        } else {
            "filtered"
        };
        println!();
        println!("  [{}s - {}s] {}", moment.start_ts, moment.end_ts, moment.title);
        println!("    {}", moment.description);
        println!("    validity: {}", validity);
        if !moment.validity_reasons.is_empty() {
            println!("    reasons:  {}", moment.validity_reasons.join(", "));
        }
    }

    Ok(())
}

// =============================================================================
// SCOUT COMMAND
// =============================================================================

/// Show tactical patterns for one team.
pub fn cmd_scout(pack_root: &Path, json_mode: bool, team_id: &str) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let patterns = facade.patterns_for(&TeamId::new(team_id))?;

    if json_mode {
        let output = serde_json::json!({
            "team_id": team_id,
            "pattern_count": patterns.len(),
            "patterns": patterns,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Scouting Report: {}", team_id);
    println!("================={}", "=".repeat(team_id.len()));
    for pattern in &patterns {
        println!();
        println!(
            "  {} [{} confidence, {} observations]",
            pattern.label,
            pattern.confidence_level.as_str(),
            pattern.sample_size
        );
        println!("    {}", pattern.description);
        println!("    instances: {}", pattern.instances.len());
    }

    Ok(())
}

// =============================================================================
// EVIDENCE COMMAND
// =============================================================================

/// Build an evidence panel for one reference.
pub fn cmd_evidence(
    pack_root: &Path,
    json_mode: bool,
    evidence_ref: &str,
    radius: u32,
) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let panel = facade.evidence_panel(&EvidenceRef::new(evidence_ref), Some(radius))?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&panel).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Evidence Panel");
    println!("==============");
    println!("Match:   {}", panel.match_id.as_str());
    println!(
        "Event:   [{}s] {} (seq {})",
        panel.event.ts, panel.event.event_type, panel.event.seq
    );
    println!();
    println!("Context window ({} events):", panel.context_window.len());
    for event in &panel.context_window {
        let marker = if event.seq == panel.event.seq {
            " <-- anchor"
        } else {
            ""
        };
        println!("  [{}s] {}{}", event.ts, event.event_type, marker);
    }
    println!();
    println!("Related moments ({}):", panel.related_moments.len());
    for moment in &panel.related_moments {
        println!(
            "  [{}s - {}s] {}",
            moment.start_ts, moment.end_ts, moment.title
        );
    }

    Ok(())
}

// =============================================================================
// VERIFY COMMAND
// =============================================================================

/// Run the integrity verifier over the whole dataset.
pub fn cmd_verify(pack_root: &Path, json_mode: bool) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let report = facade.integrity_report();

    if json_mode {
        let output = serde_json::json!({
            "integrity_ok": report.is_clean(),
            "match_count": report.match_count,
            "total_events": report.total_events,
            "total_moments": report.total_moments,
            "total_patterns": report.total_patterns,
            "broken_refs": report.broken_refs,
            "confidence_mismatches": report.confidence_mismatches,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Dataset Integrity Report");
    println!("========================");
    println!("Matches:               {}", report.match_count);
    println!("Events:                {}", report.total_events);
    println!("Moments:               {}", report.total_moments);
    println!("Patterns:              {}", report.total_patterns);
    println!("Broken references:     {}", report.broken_refs);
    println!("Confidence mismatches: {}", report.confidence_mismatches);
    println!();
    if report.is_clean() {
        println!("OK: every claim is backed by resolvable evidence.");
    } else {
        println!("FAIL: dataset contains unverifiable claims.");
    }

    Ok(())
}

// =============================================================================
// DATASET COMMAND
// =============================================================================

/// Show dataset provenance metadata.
pub fn cmd_dataset(pack_root: &Path, json_mode: bool) -> Result<(), ScoutError> {
    let facade = load_facade(pack_root)?;
    let descriptor = facade.descriptor();

    if json_mode {
        let output = serde_json::json!({
            "source": descriptor.source,
            "real_matches": descriptor.real_matches,
            "synthetic_matches": descriptor.synthetic_matches,
            "notes": descriptor.notes,
            "match_count": facade.match_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Dataset Provenance");
    println!("==================");
    println!("Source:            {}", descriptor.source);
    println!("Real matches:      {}", descriptor.real_matches);
    println!("Synthetic matches: {}", descriptor.synthetic_matches);
    println!("Loaded matches:    {}", facade.match_count());
    if let Some(notes) = &descriptor.notes {
        println!("Notes:             {}", notes);
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
