//! Discover → act: create or upgrade the thesis for a candidate security.
//!
//! Intake never duplicates a ticker and never downgrades. Acting with
//! `Invested` on a `Watching` thesis upgrades its status and nothing else.

use crate::catalog::CatalogEntry;
use crate::engine::scoring::ScoringConfig;
use crate::model::{position_by_ticker, Thesis, ThesisId, ThesisStatus};
use crate::reconcile::first_free_id;
use crate::reconcile::synthesize::{self, INTAKE_BRIEFING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    Created,
    Upgraded,
    Unchanged,
    /// No thesis id was left to allocate; nothing was created.
    Exhausted,
}

impl IntakeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeOutcome::Created => "created",
            IntakeOutcome::Upgraded => "upgraded",
            IntakeOutcome::Unchanged => "unchanged",
            IntakeOutcome::Exhausted => "exhausted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub theses: Vec<Thesis>,
    /// The thesis now standing for the candidate's ticker, if there is one.
    pub thesis: Option<Thesis>,
    pub next_id: ThesisId,
    pub outcome: IntakeOutcome,
}

pub fn intake(
    mut theses: Vec<Thesis>,
    candidate: &CatalogEntry,
    intent: ThesisStatus,
    next_id: ThesisId,
    cfg: &ScoringConfig,
) -> Intake {
    if let Some(idx) = position_by_ticker(&theses, &candidate.ticker) {
        let existing = &theses[idx];
        if intent == ThesisStatus::Invested && !existing.is_invested() {
            let upgraded = Thesis {
                status: ThesisStatus::Invested,
                ..existing.clone()
            };
            theses[idx] = upgraded.clone();
            return Intake { theses, thesis: Some(upgraded), next_id, outcome: IntakeOutcome::Upgraded };
        }
        let thesis = Some(existing.clone());
        return Intake { theses, thesis, next_id, outcome: IntakeOutcome::Unchanged };
    }

    let Some(id) = first_free_id(&theses, next_id) else {
        return Intake { theses, thesis: None, next_id, outcome: IntakeOutcome::Exhausted };
    };
    let thesis = synthesize::from_entry(candidate, id, intent, INTAKE_BRIEFING, cfg);
    // most recent first
    theses.insert(0, thesis.clone());
    Intake { theses, thesis: Some(thesis), next_id: id.saturating_add(1), outcome: IntakeOutcome::Created }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Checkpoint, CheckpointStatus, CompanyProfile, Event, EventAnalysis, EventStatus,
        LogicHealth, MarketReaction, Narrative,
    };

    fn candidate(ticker: &str) -> CatalogEntry {
        CatalogEntry {
            ticker: ticker.to_string(),
            name: format!("{} Corp", ticker),
            current_price: 175.5,
            change_rate: 1.2,
            company_profile: CompanyProfile { summary: "s".to_string(), description: "d".to_string() },
            chart_context: String::new(),
            narrative: Some(Narrative::placeholder()),
            watchpoints: Vec::new(),
            events: Vec::new(),
            chart_history: Default::default(),
            chart_narratives: Default::default(),
        }
    }

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_new_candidate_is_prepended() {
        let first = intake(Vec::new(), &candidate("GOOGL"), ThesisStatus::Watching, 1, &cfg());
        let second = intake(first.theses, &candidate("TSLA"), ThesisStatus::Invested, first.next_id, &cfg());

        assert_eq!(second.outcome, IntakeOutcome::Created);
        let tickers: Vec<_> = second.theses.iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["TSLA", "GOOGL"]);
        assert_eq!(second.thesis.as_ref().unwrap().status, ThesisStatus::Invested);
        assert_eq!(second.thesis.as_ref().unwrap().logic_health, LogicHealth::neutral());
        assert_eq!(second.thesis.as_ref().unwrap().daily_briefing, INTAKE_BRIEFING);
        assert_eq!(second.thesis.as_ref().unwrap().id, 2);
        assert_eq!(second.next_id, 3);
    }

    #[test]
    fn test_upgrade_watching_to_invested() {
        let first = intake(Vec::new(), &candidate("GOOGL"), ThesisStatus::Watching, 1, &cfg());
        let out = intake(first.theses, &candidate("GOOGL"), ThesisStatus::Invested, first.next_id, &cfg());

        assert_eq!(out.outcome, IntakeOutcome::Upgraded);
        assert_eq!(out.theses.len(), 1);
        assert_eq!(out.theses[0].status, ThesisStatus::Invested);
        assert_eq!(out.thesis.as_ref(), Some(&out.theses[0]));
        assert_eq!(out.next_id, first.next_id);
    }

    #[test]
    fn test_never_downgrades() {
        let first = intake(Vec::new(), &candidate("GOOGL"), ThesisStatus::Invested, 1, &cfg());
        let out = intake(first.theses.clone(), &candidate("GOOGL"), ThesisStatus::Watching, first.next_id, &cfg());

        assert_eq!(out.outcome, IntakeOutcome::Unchanged);
        assert_eq!(out.theses, first.theses);
        assert_eq!(out.thesis.unwrap().status, ThesisStatus::Invested);
    }

    #[test]
    fn test_repeat_intake_is_idempotent() {
        let first = intake(Vec::new(), &candidate("PLTR"), ThesisStatus::Watching, 1, &cfg());
        let again = intake(first.theses.clone(), &candidate("PLTR"), ThesisStatus::Watching, first.next_id, &cfg());
        assert_eq!(again.outcome, IntakeOutcome::Unchanged);
        assert_eq!(again.theses, first.theses);
    }

    #[test]
    fn test_missing_narrative_falls_back() {
        let mut c = candidate("NEW");
        c.narrative = None;
        let out = intake(Vec::new(), &c, ThesisStatus::Watching, 1, &cfg());
        assert_eq!(out.thesis.unwrap().narrative, Narrative::placeholder());
    }

    #[test]
    fn test_settled_content_still_starts_neutral() {
        let mut c = candidate("PLTR");
        c.events.push(Event {
            id: "q3".to_string(),
            title: "Q3".to_string(),
            date: String::new(),
            kind: "Earnings".to_string(),
            status: EventStatus::Completed,
            checkpoints: vec![Checkpoint { watchpoint_id: 1, status: CheckpointStatus::Fail, actual_value: None }],
            market_reaction: MarketReaction::default(),
            analysis: EventAnalysis::default(),
            scenarios: Vec::new(),
            my_action_history: None,
        });
        let out = intake(Vec::new(), &c, ThesisStatus::Invested, 1, &cfg());
        assert_eq!(out.thesis.unwrap().logic_health, LogicHealth::neutral());
    }

    #[test]
    fn test_exhausted_ids_create_nothing() {
        let last = intake(Vec::new(), &candidate("PLTR"), ThesisStatus::Watching, ThesisId::MAX, &cfg());
        assert_eq!(last.outcome, IntakeOutcome::Created);
        assert_eq!(last.theses[0].id, ThesisId::MAX);
        assert_eq!(last.next_id, ThesisId::MAX);

        let out = intake(last.theses.clone(), &candidate("TSLA"), ThesisStatus::Watching, last.next_id, &cfg());
        assert_eq!(out.outcome, IntakeOutcome::Exhausted);
        assert_eq!(out.thesis, None);
        assert_eq!(out.theses, last.theses);

        // a known ticker needs no new id
        let known = intake(last.theses.clone(), &candidate("PLTR"), ThesisStatus::Invested, last.next_id, &cfg());
        assert_eq!(known.outcome, IntakeOutcome::Upgraded);
    }
}
