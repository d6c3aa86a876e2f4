//! Holdings → thesis reconciliation.
//!
//! Every held ticker ends up with exactly one `Invested` thesis. Existing
//! theses keep everything the user authored; only their status is
//! upgraded. Tickers the catalog does not know get a placeholder rather
//! than failing the import.

use crate::catalog::SecurityCatalog;
use crate::engine::scoring::ScoringConfig;
use crate::model::{position_by_ticker, Holdings, Thesis, ThesisId, ThesisStatus};

use super::synthesize::{self, SYNCED_BRIEFING};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Watching → Invested
    pub upgraded: Vec<String>,
    /// Newly synthesized, catalog-backed or not
    pub created: Vec<String>,
    /// Subset of `created` built without catalog content
    pub placeholders: Vec<String>,
    /// Held but left without a thesis: no id was left to allocate
    pub exhausted: Vec<String>,
    pub unchanged: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.upgraded.is_empty() && self.created.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub theses: Vec<Thesis>,
    pub next_id: ThesisId,
    pub report: ReconcileReport,
}

/// First id that is both `>= next_id` and above every id in `theses`.
/// `None` once a thesis holds `ThesisId::MAX`.
pub fn first_free_id(theses: &[Thesis], next_id: ThesisId) -> Option<ThesisId> {
    theses
        .iter()
        .try_fold(next_id, |free, t| t.id.checked_add(1).map(|after| free.max(after)))
}

pub fn reconcile(
    mut theses: Vec<Thesis>,
    holdings: &Holdings,
    catalog: &SecurityCatalog,
    next_id: ThesisId,
    cfg: &ScoringConfig,
) -> Reconciled {
    let mut report = ReconcileReport::default();
    let mut next_id = next_id;

    for holding in holdings.iter() {
        match position_by_ticker(&theses, &holding.ticker) {
            Some(idx) if !theses[idx].is_invested() => {
                let upgraded = Thesis {
                    status: ThesisStatus::Invested,
                    ..theses[idx].clone()
                };
                theses[idx] = upgraded;
                report.upgraded.push(holding.ticker.clone());
            }
            Some(_) => report.unchanged += 1,
            None => {
                let Some(id) = first_free_id(&theses, next_id) else {
                    report.exhausted.push(holding.ticker.clone());
                    continue;
                };
                let thesis = match catalog.find(&holding.ticker) {
                    Some(entry) => {
                        let mut t = synthesize::from_entry(
                            entry,
                            id,
                            ThesisStatus::Invested,
                            SYNCED_BRIEFING,
                            cfg,
                        );
                        t.name = holding.name.clone();
                        t
                    }
                    None => {
                        report.placeholders.push(holding.ticker.clone());
                        synthesize::placeholder(holding, id, cfg)
                    }
                };
                next_id = id.saturating_add(1);
                report.created.push(holding.ticker.clone());
                theses.push(thesis);
            }
        }
    }

    Reconciled { theses, next_id, report }
}
