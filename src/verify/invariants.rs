use std::collections::HashSet;
use std::fmt;

use crate::catalog::SecurityCatalog;
use crate::engine::scoring::{compute_logic_health_with, ScoringConfig};
use crate::engine::state::AppState;
use crate::model::watchpoint::find_watchpoint;
use crate::model::{CheckpointStatus, Thesis, ThesisStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Which check fired
    pub check: &'static str,
    pub msg: String,
}

impl InvariantViolation {
    fn new(check: &'static str, msg: impl Into<String>) -> Self {
        Self { check, msg: msg.into() }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.msg)
    }
}

impl std::error::Error for InvariantViolation {}

/// Offline integrity pass over authored content.
pub fn validate_catalog(catalog: &SecurityCatalog) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let mut tickers = HashSet::new();

    for entry in catalog.entries() {
        if !tickers.insert(entry.ticker.as_str()) {
            out.push(InvariantViolation::new(
                "duplicate_ticker",
                format!("{} appears more than once", entry.ticker),
            ));
        }

        let mut wp_ids = HashSet::new();
        for wp in &entry.watchpoints {
            if !wp_ids.insert(wp.id) {
                out.push(InvariantViolation::new(
                    "duplicate_watchpoint",
                    format!("{}: watchpoint {} defined twice", entry.ticker, wp.id),
                ));
            }
            if wp.options.len() < 2 {
                out.push(InvariantViolation::new(
                    "watchpoint_options",
                    format!("{}: watchpoint {} has {} option(s)", entry.ticker, wp.id, wp.options.len()),
                ));
            }
        }

        for event in &entry.events {
            for cp in &event.checkpoints {
                if find_watchpoint(&entry.watchpoints, cp.watchpoint_id).is_none() {
                    out.push(InvariantViolation::new(
                        "dangling_checkpoint",
                        format!(
                            "{}: event {} references unknown watchpoint {}",
                            entry.ticker, event.id, cp.watchpoint_id
                        ),
                    ));
                }
            }
        }
    }
    out
}

pub fn assert_unique_tickers(theses: &[Thesis]) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::new();
    for t in theses {
        if !seen.insert(t.ticker.as_str()) {
            return Err(InvariantViolation::new(
                "unique_tickers",
                format!("ticker {} held by more than one thesis", t.ticker),
            ));
        }
    }
    Ok(())
}

/// Nothing moves backward between two successive states: theses are never
/// dropped or downgraded, event statuses never regress, settled
/// checkpoints stay settled with the same outcome.
pub fn assert_monotonic(prev: &AppState, next: &AppState) -> Result<(), InvariantViolation> {
    for before in &prev.theses {
        let Some(after) = next.thesis(before.id) else {
            return Err(InvariantViolation::new(
                "monotonic",
                format!("thesis {} ({}) disappeared", before.id, before.ticker),
            ));
        };
        if before.status == ThesisStatus::Invested && after.status == ThesisStatus::Watching {
            return Err(InvariantViolation::new(
                "monotonic",
                format!("thesis {} downgraded to Watching", before.id),
            ));
        }
        for ev in &before.events {
            let Some(ev_after) = after.event(&ev.id) else {
                return Err(InvariantViolation::new(
                    "monotonic",
                    format!("thesis {} lost event {}", before.id, ev.id),
                ));
            };
            if ev_after.status < ev.status {
                return Err(InvariantViolation::new(
                    "monotonic",
                    format!(
                        "event {} regressed {} -> {}",
                        ev.id,
                        ev.status.as_str(),
                        ev_after.status.as_str()
                    ),
                ));
            }
            for cp in ev.checkpoints.iter().filter(|c| c.status != CheckpointStatus::Pending) {
                let settled = ev_after.checkpoint(cp.watchpoint_id).map(|c| c.status);
                if settled != Some(cp.status) {
                    return Err(InvariantViolation::new(
                        "monotonic",
                        format!("event {} checkpoint {} changed after settling", ev.id, cp.watchpoint_id),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// A thesis whose events moved between `prev` and `next` stores the health
/// recomputed from its new events. Theses created by the transition start
/// neutral and are not rescored until one of their events moves.
pub fn assert_health_consistent(
    prev: &AppState,
    next: &AppState,
    cfg: &ScoringConfig,
) -> Result<(), InvariantViolation> {
    for t in &next.theses {
        match prev.thesis(t.id) {
            Some(before) if before.events != t.events => {}
            _ => continue,
        }
        let expected = compute_logic_health_with(&t.events, cfg);
        if t.logic_health != expected {
            return Err(InvariantViolation::new(
                "health_consistent",
                format!(
                    "thesis {} stores {} ({:?}), recomputed {} ({:?})",
                    t.id, t.logic_health.score, t.logic_health.status, expected.score, expected.status
                ),
            ));
        }
    }
    Ok(())
}

/// Every check that applies to a single applied action.
pub fn audit_transition(prev: &AppState, next: &AppState, cfg: &ScoringConfig) -> Vec<InvariantViolation> {
    [
        assert_unique_tickers(&next.theses),
        assert_monotonic(prev, next),
        assert_health_consistent(prev, next, cfg),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::model::{
        Checkpoint, CompanyProfile, Event, EventAnalysis, EventStatus, LogicHealth, MarketReaction,
        Narrative, Side, Watchpoint, WatchpointOption,
    };

    fn option(side: Side) -> WatchpointOption {
        WatchpointOption { label: "x".to_string(), side, implications: String::new() }
    }

    fn watchpoint(id: u32, options: usize) -> Watchpoint {
        Watchpoint {
            id,
            title: format!("wp{}", id),
            question: "?".to_string(),
            context: String::new(),
            options: (0..options).map(|i| option(if i % 2 == 0 { Side::Bull } else { Side::Bear })).collect(),
        }
    }

    fn event(id: &str, status: EventStatus, cps: &[(u32, CheckpointStatus)]) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            date: String::new(),
            kind: "Earnings".to_string(),
            status,
            checkpoints: cps
                .iter()
                .map(|(wp, s)| Checkpoint { watchpoint_id: *wp, status: *s, actual_value: None })
                .collect(),
            market_reaction: MarketReaction::default(),
            analysis: EventAnalysis::default(),
            scenarios: Vec::new(),
            my_action_history: None,
        }
    }

    fn entry(ticker: &str, watchpoints: Vec<Watchpoint>, events: Vec<Event>) -> CatalogEntry {
        CatalogEntry {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            current_price: 1.0,
            change_rate: 0.0,
            company_profile: CompanyProfile::placeholder(),
            chart_context: String::new(),
            narrative: None,
            watchpoints,
            events,
            chart_history: Default::default(),
            chart_narratives: Default::default(),
        }
    }

    fn thesis(id: u64, ticker: &str, status: ThesisStatus, events: Vec<Event>) -> Thesis {
        let logic_health = compute_logic_health_with(&events, &ScoringConfig::default());
        Thesis {
            id,
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            current_price: 1.0,
            change_rate: 0.0,
            status,
            narrative: Narrative::placeholder(),
            watchpoints: Vec::new(),
            events,
            logic_health,
            company_profile: CompanyProfile::placeholder(),
            news: Vec::new(),
            daily_briefing: String::new(),
            chart_history: Default::default(),
            chart_narratives: Default::default(),
        }
    }

    fn state(theses: Vec<Thesis>) -> AppState {
        let mut s = AppState::default();
        s.theses = theses;
        s
    }

    #[test]
    fn test_clean_catalog() {
        let c = SecurityCatalog::new(vec![entry(
            "PLTR",
            vec![watchpoint(1, 2), watchpoint(2, 2)],
            vec![event("q3", EventStatus::Completed, &[(1, CheckpointStatus::Pass), (2, CheckpointStatus::Fail)])],
        )]);
        assert!(validate_catalog(&c).is_empty());
    }

    #[test]
    fn test_catalog_violations() {
        let c = SecurityCatalog::new(vec![
            entry("PLTR", vec![watchpoint(1, 1), watchpoint(1, 2)], vec![event("q3", EventStatus::Upcoming, &[(9, CheckpointStatus::Pending)])]),
            entry("PLTR", Vec::new(), Vec::new()),
        ]);
        let checks: Vec<_> = validate_catalog(&c).iter().map(|v| v.check).collect();
        assert!(checks.contains(&"watchpoint_options"));
        assert!(checks.contains(&"duplicate_watchpoint"));
        assert!(checks.contains(&"dangling_checkpoint"));
        assert!(checks.contains(&"duplicate_ticker"));
    }

    #[test]
    fn test_duplicate_ticker_in_book() {
        let theses = vec![
            thesis(1, "TSLA", ThesisStatus::Watching, Vec::new()),
            thesis(2, "TSLA", ThesisStatus::Invested, Vec::new()),
        ];
        assert!(assert_unique_tickers(&theses).is_err());
    }

    #[test]
    fn test_downgrade_detected() {
        let prev = state(vec![thesis(1, "TSLA", ThesisStatus::Invested, Vec::new())]);
        let next = state(vec![thesis(1, "TSLA", ThesisStatus::Watching, Vec::new())]);
        assert!(assert_monotonic(&prev, &next).is_err());
        assert!(assert_monotonic(&next, &prev).is_ok());
    }

    #[test]
    fn test_event_regression_detected() {
        let prev = state(vec![thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Active, &[])])]);
        let next = state(vec![thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Upcoming, &[])])]);
        assert!(assert_monotonic(&prev, &next).is_err());
    }

    #[test]
    fn test_settled_checkpoint_flip_detected() {
        let prev = state(vec![thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Completed, &[(1, CheckpointStatus::Pass)])])]);
        let next = state(vec![thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Completed, &[(1, CheckpointStatus::Fail)])])]);
        assert!(assert_monotonic(&prev, &next).is_err());
    }

    #[test]
    fn test_disappearance_detected() {
        let prev = state(vec![thesis(1, "A", ThesisStatus::Watching, Vec::new())]);
        assert!(assert_monotonic(&prev, &state(Vec::new())).is_err());
    }

    #[test]
    fn test_stale_health_detected() {
        let cfg = ScoringConfig::default();
        let prev = state(vec![thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Active, &[(1, CheckpointStatus::Pending)])])]);
        let mut t = thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Active, &[(1, CheckpointStatus::Fail)])]);
        assert!(assert_health_consistent(&prev, &state(vec![t.clone()]), &cfg).is_ok());
        t.logic_health = LogicHealth::neutral();
        let err = assert_health_consistent(&prev, &state(vec![t]), &cfg).unwrap_err();
        assert_eq!(err.check, "health_consistent");
    }

    #[test]
    fn test_new_thesis_starts_neutral_without_violation() {
        let mut t = thesis(1, "A", ThesisStatus::Watching, vec![event("e", EventStatus::Completed, &[(1, CheckpointStatus::Pass)])]);
        t.logic_health = LogicHealth::neutral();
        let next = state(vec![t]);
        let cfg = ScoringConfig::default();
        assert!(assert_health_consistent(&state(Vec::new()), &next, &cfg).is_ok());
        // untouched events are not rescored either
        assert!(assert_health_consistent(&next, &next, &cfg).is_ok());
    }

    #[test]
    fn test_audit_collects_all() {
        let prev = state(vec![thesis(1, "A", ThesisStatus::Invested, Vec::new())]);
        let next = state(vec![
            thesis(1, "A", ThesisStatus::Watching, Vec::new()),
            thesis(2, "A", ThesisStatus::Watching, Vec::new()),
        ]);
        assert_eq!(audit_transition(&prev, &next, &ScoringConfig::default()).len(), 2);
    }
}
