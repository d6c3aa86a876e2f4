//! Actions accepted by the reducer and the commands it hands back.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::model::{CheckpointStatus, Decision, EventStatus, Holdings, ThesisId, ThesisStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Re-run reconciliation against the current holdings.
    ReconcileHoldings,
    /// Portfolio import delivered new holdings; store and reconcile.
    SetHoldings { holdings: Holdings },
    IntakeThesis {
        candidate: CatalogEntry,
        intent: ThesisStatus,
    },
    RecordDecision {
        thesis_id: ThesisId,
        event_id: String,
        decision: Decision,
    },
    /// Content source reports real-world event timing.
    AdvanceEvent {
        thesis_id: ThesisId,
        event_id: String,
        status: EventStatus,
    },
    /// Content source reports a checkpoint outcome.
    SettleCheckpoint {
        thesis_id: ThesisId,
        event_id: String,
        watchpoint_id: u32,
        status: CheckpointStatus,
        #[serde(default)]
        actual_value: Option<String>,
    },
    RenameUser { name: String },
    MarkNotificationRead { id: u64 },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReconcileHoldings => "reconcile_holdings",
            Action::SetHoldings { .. } => "set_holdings",
            Action::IntakeThesis { .. } => "intake_thesis",
            Action::RecordDecision { .. } => "record_decision",
            Action::AdvanceEvent { .. } => "advance_event",
            Action::SettleCheckpoint { .. } => "settle_checkpoint",
            Action::RenameUser { .. } => "rename_user",
            Action::MarkNotificationRead { .. } => "mark_notification_read",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Log { level: LogLevel, msg: String },
}

impl Command {
    pub fn log(level: LogLevel, msg: impl Into<String>) -> Self {
        Command::Log { level, msg: msg.into() }
    }
}
