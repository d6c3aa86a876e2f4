//! Application state snapshot with deterministic hashing for replay validation.

use serde::{Deserialize, Serialize};

use crate::model::{Holdings, LogicHealth, Thesis, ThesisId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub holdings: Holdings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_id: Option<ThesisId>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub is_read: bool,
}

/// Complete state of one user's thesis book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user: UserProfile,

    /// Most-recent intake first; reconciled holdings are appended.
    pub theses: Vec<Thesis>,

    #[serde(default)]
    pub notifications: Vec<Notification>,

    /// Next id handed to a synthesized thesis
    pub next_thesis_id: ThesisId,

    /// Count of applied actions
    pub seq: u64,
}

impl AppState {
    pub fn new(user_name: &str) -> Self {
        Self {
            user: UserProfile { name: user_name.to_string(), holdings: Holdings::default() },
            theses: Vec::new(),
            notifications: Vec::new(),
            next_thesis_id: 1,
            seq: 0,
        }
    }

    /// Deterministic hash of the canonical JSON encoding.
    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut h = DefaultHasher::new();
        serde_json::to_vec(self).unwrap_or_default().hash(&mut h);
        h.finish()
    }

    pub fn thesis(&self, id: ThesisId) -> Option<&Thesis> {
        self.theses.iter().find(|t| t.id == id)
    }

    pub fn thesis_by_ticker(&self, ticker: &str) -> Option<&Thesis> {
        crate::model::find_by_ticker(&self.theses, ticker)
    }

    pub fn logic_health(&self, id: ThesisId) -> Option<LogicHealth> {
        self.thesis(id).map(|t| t.logic_health)
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("Guest")
    }
}
