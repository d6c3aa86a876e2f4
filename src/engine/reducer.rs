//! Pure reducer: (State, Action) -> (State', Vec<Command>)
//!
//! All state transitions of a thesis book happen here. The reducer owns no
//! state and performs no I/O: notes meant for the log come back as
//! `Command::Log` and are emitted by whoever drives it.
//!
//! An action that changes nothing hands the input state back as-is,
//! `seq` included, so a no-op is indistinguishable from not dispatching.

use chrono::NaiveDate;

use super::actions::{Action, Command, LogLevel};
use super::lifecycle::{self, Applied, LifecycleInput};
use super::scoring::{compute_logic_health_with, ScoringConfig};
use super::state::AppState;
use crate::catalog::{CatalogEntry, SecurityCatalog};
use crate::intake::{intake, IntakeOutcome};
use crate::model::{Decision, LogicHealth, Thesis, ThesisId, ThesisStatus};
use crate::reconcile::reconcile;

/// Read-only collaborators and parameters for one reduction.
#[derive(Debug, Clone, Copy)]
pub struct ReducerContext<'a> {
    pub catalog: &'a SecurityCatalog,
    pub scoring: &'a ScoringConfig,
    /// Date stamped on recorded decisions
    pub today: NaiveDate,
}

/// Result of processing an action
#[derive(Debug)]
pub struct ReducerOutput {
    pub state: AppState,
    /// Set by intake: the thesis standing for the candidate's ticker.
    pub thesis: Option<Thesis>,
    pub changed: bool,
    pub commands: Vec<Command>,
    pub state_hash: u64,
}

pub fn reduce(state: AppState, action: Action, ctx: &ReducerContext<'_>) -> ReducerOutput {
    let mut commands = Vec::new();
    let mut thesis = None;

    let (mut next, changed) = match action {
        Action::ReconcileHoldings => handle_reconcile(state, ctx, &mut commands),

        Action::SetHoldings { holdings } => {
            let holdings_changed = state.user.holdings != holdings;
            let mut state = state;
            state.user.holdings = holdings;
            let (state, reconciled) = handle_reconcile(state, ctx, &mut commands);
            (state, holdings_changed || reconciled)
        }

        Action::IntakeThesis { candidate, intent } => {
            let (state, t, changed) = handle_intake(state, &candidate, intent, ctx, &mut commands);
            thesis = t;
            (state, changed)
        }

        Action::RecordDecision { thesis_id, event_id, decision } => handle_lifecycle(
            state,
            thesis_id,
            &event_id,
            LifecycleInput::Decide { decision, date: ctx.today },
            ctx,
            &mut commands,
        ),

        Action::AdvanceEvent { thesis_id, event_id, status } => handle_lifecycle(
            state,
            thesis_id,
            &event_id,
            LifecycleInput::Advance(status),
            ctx,
            &mut commands,
        ),

        Action::SettleCheckpoint { thesis_id, event_id, watchpoint_id, status, actual_value } => {
            handle_lifecycle(
                state,
                thesis_id,
                &event_id,
                LifecycleInput::Settle { watchpoint_id, status, actual_value },
                ctx,
                &mut commands,
            )
        }

        Action::RenameUser { name } => {
            if state.user.name == name {
                (state, false)
            } else {
                let mut state = state;
                state.user.name = name;
                (state, true)
            }
        }

        Action::MarkNotificationRead { id } => handle_mark_read(state, id, &mut commands),
    };

    if changed {
        next.seq += 1;
    }

    let state_hash = next.hash();
    ReducerOutput { state: next, thesis, changed, commands, state_hash }
}

fn handle_reconcile(
    mut state: AppState,
    ctx: &ReducerContext<'_>,
    commands: &mut Vec<Command>,
) -> (AppState, bool) {
    let theses = std::mem::take(&mut state.theses);
    let out = reconcile(theses, &state.user.holdings, ctx.catalog, state.next_thesis_id, ctx.scoring);
    state.theses = out.theses;

    if !out.report.exhausted.is_empty() {
        commands.push(Command::log(
            LogLevel::Error,
            format!("reconcile: thesis ids exhausted, not created: {}", out.report.exhausted.join(",")),
        ));
    }

    if out.report.is_noop() {
        commands.push(Command::log(
            LogLevel::Debug,
            format!("reconcile: {} holdings already in sync", out.report.unchanged),
        ));
        return (state, false);
    }

    state.next_thesis_id = out.next_id;
    if !out.report.upgraded.is_empty() {
        commands.push(Command::log(
            LogLevel::Info,
            format!("reconcile: upgraded to Invested: {}", out.report.upgraded.join(",")),
        ));
    }
    if !out.report.created.is_empty() {
        commands.push(Command::log(
            LogLevel::Info,
            format!("reconcile: created: {}", out.report.created.join(",")),
        ));
    }
    if !out.report.placeholders.is_empty() {
        commands.push(Command::log(
            LogLevel::Warn,
            format!("reconcile: no catalog entry, placeholder used: {}", out.report.placeholders.join(",")),
        ));
    }
    (state, true)
}

fn handle_intake(
    mut state: AppState,
    candidate: &CatalogEntry,
    intent: ThesisStatus,
    ctx: &ReducerContext<'_>,
    commands: &mut Vec<Command>,
) -> (AppState, Option<Thesis>, bool) {
    let theses = std::mem::take(&mut state.theses);
    let out = intake(theses, candidate, intent, state.next_thesis_id, ctx.scoring);
    state.theses = out.theses;
    state.next_thesis_id = out.next_id;

    match &out.thesis {
        Some(t) => commands.push(Command::log(
            LogLevel::Info,
            format!("intake {}: {} as {} (id {})", out.outcome.as_str(), t.ticker, t.status.as_str(), t.id),
        )),
        None => commands.push(Command::log(
            LogLevel::Error,
            format!("intake {}: no thesis id left for {}", out.outcome.as_str(), candidate.ticker),
        )),
    }
    let changed = matches!(out.outcome, IntakeOutcome::Created | IntakeOutcome::Upgraded);
    (state, out.thesis, changed)
}

fn handle_lifecycle(
    mut state: AppState,
    thesis_id: ThesisId,
    event_id: &str,
    input: LifecycleInput,
    ctx: &ReducerContext<'_>,
    commands: &mut Vec<Command>,
) -> (AppState, bool) {
    let theses = std::mem::take(&mut state.theses);
    let (theses, applied) = lifecycle::apply_to_thesis(theses, thesis_id, event_id, input, ctx.scoring);
    state.theses = theses;

    match applied {
        Applied::Updated { previous, health } => {
            commands.push(Command::log(
                LogLevel::Info,
                format!(
                    "thesis {} event {}: health {} -> {} ({:?})",
                    thesis_id, event_id, previous.score, health.score, health.status
                ),
            ));
            (state, true)
        }
        Applied::Unchanged => {
            commands.push(Command::log(
                LogLevel::Debug,
                format!("thesis {} event {}: nothing to change", thesis_id, event_id),
            ));
            (state, false)
        }
        Applied::ThesisNotFound => {
            commands.push(Command::log(LogLevel::Warn, format!("unknown thesis {}", thesis_id)));
            (state, false)
        }
        Applied::EventNotFound => {
            commands.push(Command::log(
                LogLevel::Warn,
                format!("thesis {} has no event {}", thesis_id, event_id),
            ));
            (state, false)
        }
        Applied::Rejected(err) => {
            commands.push(Command::log(LogLevel::Warn, format!("rejected: {}", err)));
            (state, false)
        }
    }
}

fn handle_mark_read(mut state: AppState, id: u64, commands: &mut Vec<Command>) -> (AppState, bool) {
    match state.notifications.iter_mut().find(|n| n.id == id) {
        Some(n) if !n.is_read => {
            n.is_read = true;
            (state, true)
        }
        Some(_) => (state, false),
        None => {
            commands.push(Command::log(LogLevel::Debug, format!("unknown notification {}", id)));
            (state, false)
        }
    }
}

// =============================================================================
// Operations exposed to the presentation layer
// =============================================================================

pub fn reconcile_holdings(state: AppState, ctx: &ReducerContext<'_>) -> AppState {
    reduce(state, Action::ReconcileHoldings, ctx).state
}

pub fn intake_thesis(
    state: AppState,
    candidate: CatalogEntry,
    intent: ThesisStatus,
    ctx: &ReducerContext<'_>,
) -> (AppState, Option<Thesis>) {
    let mut notes = Vec::new();
    let (mut state, thesis, changed) = handle_intake(state, &candidate, intent, ctx, &mut notes);
    if changed {
        state.seq += 1;
    }
    (state, thesis)
}

pub fn record_decision(
    state: AppState,
    thesis_id: ThesisId,
    event_id: &str,
    decision: Decision,
    ctx: &ReducerContext<'_>,
) -> AppState {
    let action = Action::RecordDecision { thesis_id, event_id: event_id.to_string(), decision };
    reduce(state, action, ctx).state
}

/// Equal to recomputing over the thesis's events under the default weights.
pub fn get_logic_health(thesis: &Thesis) -> LogicHealth {
    get_logic_health_with(thesis, &ScoringConfig::default())
}

pub fn get_logic_health_with(thesis: &Thesis, cfg: &ScoringConfig) -> LogicHealth {
    compute_logic_health_with(&thesis.events, cfg)
}
