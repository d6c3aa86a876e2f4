//! Building new theses from catalog content or from a bare holding.

use crate::catalog::CatalogEntry;
use crate::engine::scoring::{compute_logic_health_with, ScoringConfig};
use crate::model::{
    ChartHistory, ChartNarratives, CompanyProfile, Holding, LogicHealth, Narrative, Thesis,
    ThesisId, ThesisStatus,
};

pub const SYNCED_BRIEFING: &str = "Portfolio synced. Review your thesis.";
pub const INTAKE_BRIEFING: &str = "New thesis registered.";

/// Copy the authored content of a catalog entry into a new thesis.
///
/// A new thesis starts at neutral health whatever its content says; it is
/// rescored the first time one of its events moves.
pub fn from_entry(
    entry: &CatalogEntry,
    id: ThesisId,
    status: ThesisStatus,
    briefing: &str,
    cfg: &ScoringConfig,
) -> Thesis {
    Thesis {
        id,
        ticker: entry.ticker.clone(),
        name: entry.name.clone(),
        current_price: entry.current_price,
        change_rate: entry.change_rate,
        status,
        narrative: entry.narrative.clone().unwrap_or_else(Narrative::placeholder),
        watchpoints: entry.watchpoints.clone(),
        events: entry.events.clone(),
        logic_health: neutral_health(cfg),
        company_profile: entry.company_profile.clone(),
        news: Vec::new(),
        daily_briefing: briefing.to_string(),
        chart_history: entry.chart_history.clone(),
        chart_narratives: entry.chart_narratives.clone(),
    }
}

/// Minimal thesis for a held security the catalog does not know.
pub fn placeholder(holding: &Holding, id: ThesisId, cfg: &ScoringConfig) -> Thesis {
    Thesis {
        id,
        ticker: holding.ticker.clone(),
        name: holding.name.clone(),
        current_price: holding.implied_price(),
        change_rate: 0.0,
        status: ThesisStatus::Invested,
        narrative: Narrative::placeholder(),
        watchpoints: Vec::new(),
        events: Vec::new(),
        logic_health: neutral_health(cfg),
        company_profile: CompanyProfile::placeholder(),
        news: Vec::new(),
        daily_briefing: SYNCED_BRIEFING.to_string(),
        chart_history: ChartHistory::new(),
        chart_narratives: ChartNarratives::new(),
    }
}

/// Score of a thesis with no evidence yet: `{50, Warning}` under default weights.
pub fn neutral_health(cfg: &ScoringConfig) -> LogicHealth {
    compute_logic_health_with(&[], cfg)
}
