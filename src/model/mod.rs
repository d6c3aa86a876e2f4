//! Domain model: entity shapes and their local invariants.

pub mod event;
pub mod holding;
pub mod thesis;
pub mod watchpoint;

pub use event::{
    ActionHistory, Checkpoint, CheckpointStatus, Decision, Event, EventAnalysis, EventStatus,
    EventVerdict, MarketReaction, Scenario,
};
pub use holding::{Currency, Holding, Holdings};
pub use thesis::{
    ChartHistory, ChartNarratives, CompanyProfile, HealthStatus, LogicHealth, Narrative, NewsItem,
    Thesis, ThesisId, ThesisStatus, TimeFrame, find_by_ticker, position_by_ticker,
};
pub use watchpoint::{Side, Watchpoint, WatchpointOption};
