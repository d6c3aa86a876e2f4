//! The thesis aggregate and the display content carried alongside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::watchpoint::Watchpoint;

pub type ThesisId = u64;

/// `Watching < Invested`: the only permitted transition is upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThesisStatus {
    Watching,
    Invested,
}

impl ThesisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisStatus::Watching => "Watching",
            ThesisStatus::Invested => "Invested",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Warning,
    Danger,
}

/// Derived from the event history, never edited by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicHealth {
    pub score: u8,
    pub status: HealthStatus,
}

impl LogicHealth {
    /// Starting health of a freshly created thesis.
    pub fn neutral() -> Self {
        Self { score: 50, status: HealthStatus::Warning }
    }
}

impl Default for LogicHealth {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

pub type ChartHistory = BTreeMap<TimeFrame, Vec<f64>>;
pub type ChartNarratives = BTreeMap<TimeFrame, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub summary: String,
    pub description: String,
}

impl CompanyProfile {
    pub fn placeholder() -> Self {
        Self { summary: "-".to_string(), description: "-".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStep {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebatePoint {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debate {
    pub title: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub bulls: Vec<DebatePoint>,
    #[serde(default)]
    pub bears: Vec<DebatePoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalBet {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub options: Vec<BetOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSteps {
    pub history: StoryStep,
    pub floor: StoryStep,
    pub upside: StoryStep,
    pub debate: Debate,
    #[serde(rename = "final")]
    pub final_bet: FinalBet,
}

/// Opaque authored content; the core copies it, never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub question: String,
    pub steps: NarrativeSteps,
}

impl Narrative {
    /// Stand-in for securities the catalog knows nothing about.
    pub fn placeholder() -> Self {
        let empty = || StoryStep {
            title: "No data".to_string(),
            content: "No data available.".to_string(),
        };
        Self {
            question: "Portfolio asset".to_string(),
            steps: NarrativeSteps {
                history: empty(),
                floor: empty(),
                upside: empty(),
                debate: Debate {
                    title: "No data".to_string(),
                    question: String::new(),
                    bulls: Vec::new(),
                    bears: Vec::new(),
                },
                final_bet: FinalBet {
                    title: "No data".to_string(),
                    content: String::new(),
                    options: Vec::new(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "type")]
    pub sentiment: Sentiment,
    pub text: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst_comment: Option<String>,
}

/// Aggregate root. `ticker` is unique across a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thesis {
    pub id: ThesisId,
    pub ticker: String,
    pub name: String,
    pub current_price: f64,
    #[serde(default)]
    pub change_rate: f64,
    pub status: ThesisStatus,
    pub narrative: Narrative,
    #[serde(default)]
    pub watchpoints: Vec<Watchpoint>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub logic_health: LogicHealth,
    pub company_profile: CompanyProfile,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub daily_briefing: String,
    #[serde(default)]
    pub chart_history: ChartHistory,
    #[serde(default)]
    pub chart_narratives: ChartNarratives,
}

impl Thesis {
    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn is_invested(&self) -> bool {
        self.status == ThesisStatus::Invested
    }
}

pub fn find_by_ticker<'a>(theses: &'a [Thesis], ticker: &str) -> Option<&'a Thesis> {
    theses.iter().find(|t| t.ticker == ticker)
}

pub fn position_by_ticker(theses: &[Thesis], ticker: &str) -> Option<usize> {
    theses.iter().position(|t| t.ticker == ticker)
}
