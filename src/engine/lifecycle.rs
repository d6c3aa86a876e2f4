//! Event lifecycle: `Upcoming → Active → Completed`, forward only.
//!
//! Transitions are applied by value: the input event is left alone and a
//! replacement is returned, so callers substitute it into a fresh
//! collection instead of editing shared data in place.

use std::fmt;

use chrono::NaiveDate;

use super::scoring::{compute_logic_health_with, ScoringConfig};
use crate::model::{
    ActionHistory, CheckpointStatus, Decision, Event, EventStatus, LogicHealth, Thesis, ThesisId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleInput {
    /// Real-world timing reported by the content source.
    Advance(EventStatus),
    /// A checkpoint outcome became known.
    Settle {
        watchpoint_id: u32,
        status: CheckpointStatus,
        actual_value: Option<String>,
    },
    /// The user resolved the event's scenario prompt.
    Decide { decision: Decision, date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub msg: String,
}

impl TransitionError {
    fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for TransitionError {}

pub fn apply_input(event: &Event, input: LifecycleInput) -> Result<Event, TransitionError> {
    let mut next = event.clone();
    match (event.status, input) {
        (_, LifecycleInput::Decide { decision, date }) => {
            next.status = EventStatus::Completed;
            next.my_action_history = Some(ActionHistory { decision, date });
        }
        (from, LifecycleInput::Advance(to)) => {
            if to <= from {
                return Err(TransitionError::new(format!(
                    "event {} cannot move from {} to {}",
                    event.id,
                    from.as_str(),
                    to.as_str()
                )));
            }
            next.status = to;
        }
        (_, LifecycleInput::Settle { watchpoint_id, status, actual_value }) => {
            if status == CheckpointStatus::Pending {
                return Err(TransitionError::new("checkpoint cannot be settled to Pending"));
            }
            let cp = next
                .checkpoints
                .iter_mut()
                .find(|c| c.watchpoint_id == watchpoint_id)
                .ok_or_else(|| {
                    TransitionError::new(format!(
                        "event {} has no checkpoint for watchpoint {}",
                        event.id, watchpoint_id
                    ))
                })?;
            if cp.status != CheckpointStatus::Pending {
                return Err(TransitionError::new(format!(
                    "checkpoint for watchpoint {} already settled",
                    watchpoint_id
                )));
            }
            cp.status = status;
            if actual_value.is_some() {
                cp.actual_value = actual_value;
            }
        }
    }
    Ok(next)
}

/// What happened when an input was routed to a thesis.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated { previous: LogicHealth, health: LogicHealth },
    /// Accepted, but the event came out identical (same decision, same day).
    Unchanged,
    ThesisNotFound,
    EventNotFound,
    Rejected(TransitionError),
}

/// Route a lifecycle input to one event of one thesis and recompute that
/// thesis's health from its full event list. Lookup misses, rejected
/// transitions and inputs that leave the event as it was hand the
/// collection back untouched.
pub fn apply_to_thesis(
    mut theses: Vec<Thesis>,
    thesis_id: ThesisId,
    event_id: &str,
    input: LifecycleInput,
    cfg: &ScoringConfig,
) -> (Vec<Thesis>, Applied) {
    let Some(t_idx) = theses.iter().position(|t| t.id == thesis_id) else {
        return (theses, Applied::ThesisNotFound);
    };
    let current = &theses[t_idx];
    let Some(e_idx) = current.events.iter().position(|e| e.id == event_id) else {
        return (theses, Applied::EventNotFound);
    };

    let event = match apply_input(&current.events[e_idx], input) {
        Ok(event) => event,
        Err(err) => return (theses, Applied::Rejected(err)),
    };
    if event == current.events[e_idx] {
        return (theses, Applied::Unchanged);
    }

    let mut events = current.events.clone();
    events[e_idx] = event;
    let health = compute_logic_health_with(&events, cfg);
    let previous = current.logic_health;
    let updated = Thesis {
        events,
        logic_health: health,
        ..current.clone()
    };
    theses[t_idx] = updated;

    (theses, Applied::Updated { previous, health })
}

pub fn record_decision(
    theses: Vec<Thesis>,
    thesis_id: ThesisId,
    event_id: &str,
    decision: Decision,
    date: NaiveDate,
    cfg: &ScoringConfig,
) -> (Vec<Thesis>, Applied) {
    apply_to_thesis(theses, thesis_id, event_id, LifecycleInput::Decide { decision, date }, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Checkpoint, CompanyProfile, EventAnalysis, HealthStatus, MarketReaction, Narrative,
        ThesisStatus,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 4).unwrap()
    }

    fn event(id: &str, status: EventStatus, cps: &[CheckpointStatus]) -> Event {
        Event {
            id: id.to_string(),
            title: format!("event {}", id),
            date: String::new(),
            kind: "Earnings".to_string(),
            status,
            checkpoints: cps
                .iter()
                .enumerate()
                .map(|(i, s)| Checkpoint { watchpoint_id: i as u32 + 1, status: *s, actual_value: None })
                .collect(),
            market_reaction: MarketReaction::default(),
            analysis: EventAnalysis::default(),
            scenarios: Vec::new(),
            my_action_history: None,
        }
    }

    fn thesis(id: ThesisId, events: Vec<Event>) -> Thesis {
        Thesis {
            id,
            ticker: format!("T{}", id),
            name: "n".to_string(),
            current_price: 1.0,
            change_rate: 0.0,
            status: ThesisStatus::Invested,
            narrative: Narrative::placeholder(),
            watchpoints: Vec::new(),
            events,
            logic_health: LogicHealth::neutral(),
            company_profile: CompanyProfile::placeholder(),
            news: Vec::new(),
            daily_briefing: String::new(),
            chart_history: Default::default(),
            chart_narratives: Default::default(),
        }
    }

    use CheckpointStatus::*;

    #[test]
    fn test_advance_forward() {
        let e = event("e1", EventStatus::Upcoming, &[]);
        let next = apply_input(&e, LifecycleInput::Advance(EventStatus::Active)).unwrap();
        assert_eq!(next.status, EventStatus::Active);
        assert_eq!(e.status, EventStatus::Upcoming);
    }

    #[test]
    fn test_advance_never_regresses() {
        let e = event("e1", EventStatus::Completed, &[]);
        assert!(apply_input(&e, LifecycleInput::Advance(EventStatus::Active)).is_err());
        let e = event("e1", EventStatus::Active, &[]);
        assert!(apply_input(&e, LifecycleInput::Advance(EventStatus::Active)).is_err());
    }

    #[test]
    fn test_decide_completes_from_upcoming() {
        let e = event("e1", EventStatus::Upcoming, &[]);
        let next = apply_input(&e, LifecycleInput::Decide { decision: Decision::Hold, date: day() }).unwrap();
        assert_eq!(next.status, EventStatus::Completed);
        assert_eq!(next.decision(), Some(Decision::Hold));
    }

    #[test]
    fn test_settle_pending_only() {
        let e = event("e1", EventStatus::Active, &[Pending, Pass]);
        let settle = |wp: u32, status| LifecycleInput::Settle { watchpoint_id: wp, status, actual_value: Some("+12%".to_string()) };

        let next = apply_input(&e, settle(1, Fail)).unwrap();
        assert_eq!(next.checkpoints[0].status, Fail);
        assert_eq!(next.checkpoints[0].actual_value.as_deref(), Some("+12%"));

        assert!(apply_input(&e, settle(2, Fail)).is_err());
        assert!(apply_input(&e, settle(1, Pending)).is_err());
        assert!(apply_input(&e, settle(7, Pass)).is_err());
    }

    #[test]
    fn test_record_decision_recomputes_health() {
        let theses = vec![
            thesis(1, vec![event("a", EventStatus::Active, &[Pass, Pass])]),
            thesis(2, vec![event("b", EventStatus::Active, &[Fail])]),
        ];
        let (out, applied) = record_decision(theses, 1, "a", Decision::Buy, day(), &ScoringConfig::default());
        assert_eq!(
            applied,
            Applied::Updated {
                previous: LogicHealth::neutral(),
                health: LogicHealth { score: 75, status: HealthStatus::Good },
            }
        );
        assert_eq!(out[0].events[0].status, EventStatus::Completed);
        assert_eq!(out[0].events[0].my_action_history.as_ref().map(|h| h.date), Some(day()));
        // untouched neighbour keeps its stored health
        assert_eq!(out[1].logic_health, LogicHealth::neutral());
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_record_decision_twice_does_not_double_count() {
        let theses = vec![thesis(1, vec![event("a", EventStatus::Active, &[Pass])])];
        let cfg = ScoringConfig::default();
        let (once, _) = record_decision(theses, 1, "a", Decision::Buy, day(), &cfg);
        let (twice, applied) = record_decision(once.clone(), 1, "a", Decision::Buy, day(), &cfg);
        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(once, twice);
        assert_eq!(twice[0].logic_health.score, 65);
    }

    #[test]
    fn test_same_decision_next_day_is_an_update() {
        let theses = vec![thesis(1, vec![event("a", EventStatus::Active, &[Pass])])];
        let cfg = ScoringConfig::default();
        let (once, _) = record_decision(theses, 1, "a", Decision::Hold, day(), &cfg);
        let later = day().succ_opt().unwrap();
        let (out, applied) = record_decision(once, 1, "a", Decision::Hold, later, &cfg);
        assert!(matches!(applied, Applied::Updated { .. }));
        assert_eq!(out[0].events[0].my_action_history.as_ref().map(|h| h.date), Some(later));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let theses = vec![thesis(1, vec![event("a", EventStatus::Active, &[Pass])])];
        let cfg = ScoringConfig::default();
        let (out, applied) = record_decision(theses.clone(), 9, "a", Decision::Sell, day(), &cfg);
        assert_eq!(applied, Applied::ThesisNotFound);
        assert_eq!(out, theses);
        let (out, applied) = record_decision(theses.clone(), 1, "zzz", Decision::Sell, day(), &cfg);
        assert_eq!(applied, Applied::EventNotFound);
        assert_eq!(out, theses);
    }
}
