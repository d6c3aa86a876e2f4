//! Events attached to a thesis and the verdicts they carry.
//!
//! Lifecycle is forward-only: `Upcoming → Active → Completed`.
//! Checkpoint outcomes are supplied by the content source; the core
//! only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declaration order is lifecycle order, so `Ord` doubles as "is later than".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Upcoming,
    Active,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Active => "Active",
            EventStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckpointStatus {
    Pending,
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Buy,
    Hold,
    Sell,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Buy => "buy",
            Decision::Hold => "hold",
            Decision::Sell => "sell",
        }
    }
}

/// Per-watchpoint verdict attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub watchpoint_id: u32,
    pub status: CheckpointStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReaction {
    #[serde(default)]
    pub price_change: String,
    #[serde(default)]
    pub volume_change: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAnalysis {
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub action: Decision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionHistory {
    pub decision: Decision,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub status: EventStatus,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub market_reaction: MarketReaction,
    #[serde(default)]
    pub analysis: EventAnalysis,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_action_history: Option<ActionHistory>,
}

/// Checkpoint tallies for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventVerdict {
    pub passed: u32,
    pub failed: u32,
    pub pending: u32,
}

impl EventVerdict {
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }
}

impl Event {
    pub fn verdict(&self) -> EventVerdict {
        let mut v = EventVerdict::default();
        for cp in &self.checkpoints {
            match cp.status {
                CheckpointStatus::Pass => v.passed += 1,
                CheckpointStatus::Fail => v.failed += 1,
                CheckpointStatus::Pending => v.pending += 1,
            }
        }
        v
    }

    pub fn decision(&self) -> Option<Decision> {
        self.my_action_history.as_ref().map(|h| h.decision)
    }

    pub fn checkpoint(&self, watchpoint_id: u32) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.watchpoint_id == watchpoint_id)
    }
}
