//! Logic Health scoring: purity, bounds and the reference scenarios.

use chrono::NaiveDate;

use thesisbook::engine::scoring::{breakdown, compute_logic_health, ScoringConfig};
use thesisbook::model::{
    ActionHistory, Checkpoint, CheckpointStatus, Decision, Event, EventAnalysis, EventStatus,
    HealthStatus, LogicHealth, MarketReaction,
};

fn event(id: &str, cps: &[CheckpointStatus], decision: Option<Decision>) -> Event {
    Event {
        id: id.to_string(),
        title: id.to_string(),
        date: String::new(),
        kind: "Earnings".to_string(),
        status: if decision.is_some() { EventStatus::Completed } else { EventStatus::Active },
        checkpoints: cps
            .iter()
            .enumerate()
            .map(|(i, s)| Checkpoint { watchpoint_id: i as u32 + 1, status: *s, actual_value: None })
            .collect(),
        market_reaction: MarketReaction::default(),
        analysis: EventAnalysis::default(),
        scenarios: Vec::new(),
        my_action_history: decision.map(|decision| ActionHistory {
            decision,
            date: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
        }),
    }
}

use CheckpointStatus::{Fail, Pass, Pending};

#[test]
fn empty_history_is_neutral() {
    assert_eq!(compute_logic_health(&[]), LogicHealth { score: 50, status: HealthStatus::Warning });
}

#[test]
fn one_pass_no_decision() {
    let h = compute_logic_health(&[event("e", &[Pass], None)]);
    assert_eq!(h, LogicHealth { score: 60, status: HealthStatus::Warning });
}

#[test]
fn one_fail_plus_sell() {
    let h = compute_logic_health(&[event("e", &[Fail], Some(Decision::Sell))]);
    assert_eq!(h, LogicHealth { score: 30, status: HealthStatus::Danger });
}

#[test]
fn two_pass_plus_buy() {
    let h = compute_logic_health(&[event("e", &[Pass, Pass], Some(Decision::Buy))]);
    assert_eq!(h, LogicHealth { score: 75, status: HealthStatus::Good });
}

#[test]
fn recomputation_is_pure() {
    let events = vec![
        event("a", &[Pass, Fail, Pending], Some(Decision::Hold)),
        event("b", &[Pass], Some(Decision::Buy)),
    ];
    let copy = events.clone();
    let first = compute_logic_health(&events);
    assert_eq!(first, compute_logic_health(&events));
    assert_eq!(first, compute_logic_health(&copy));
}

#[test]
fn score_stays_in_bounds() {
    let cases = [
        vec![event("x", &[Fail; 12], Some(Decision::Sell))],
        vec![event("x", &[Pass; 12], Some(Decision::Buy))],
        (0..30).map(|i| event(&i.to_string(), &[Fail, Pass], Some(Decision::Sell))).collect(),
    ];
    for events in &cases {
        let h = compute_logic_health(events);
        assert!(h.score <= 100);
        let b = breakdown(events, &ScoringConfig::default());
        assert_eq!(b.score, h.score);
    }
    assert_eq!(compute_logic_health(&cases[0]).score, 0);
    assert_eq!(compute_logic_health(&cases[1]).score, 100);
}

#[test]
fn order_of_events_does_not_matter() {
    let a = event("a", &[Fail], Some(Decision::Sell));
    let b = event("b", &[Pass, Pass], Some(Decision::Buy));
    assert_eq!(
        compute_logic_health(&[a.clone(), b.clone()]),
        compute_logic_health(&[b, a])
    );
}
