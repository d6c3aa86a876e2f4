use serde::{Deserialize, Serialize};

/// Outcome framing of a watchpoint option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bull,
    Bear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchpointOption {
    pub label: String,
    pub side: Side,
    #[serde(default)]
    pub implications: String,
}

/// A falsifiable premise of a thesis. Ids are unique within one thesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchpoint {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    pub question: String,
    #[serde(default)]
    pub context: String,
    pub options: Vec<WatchpointOption>,
}

pub fn find_watchpoint(watchpoints: &[Watchpoint], id: u32) -> Option<&Watchpoint> {
    watchpoints.iter().find(|w| w.id == id)
}
