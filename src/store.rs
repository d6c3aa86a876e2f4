//! Single-writer shell around the pure reducer.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Actions    │────►│   Reducer    │────►│  New State   │
//! │ (UI/import)  │     │  (pure fn)   │     │ (Arc, hashed)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │ Notes, audit │
//!                      │  (logging)   │
//!                      └──────────────┘
//! ```
//!
//! Readers hold `Arc<AppState>` snapshots; a dispatch swaps in a fresh
//! state and never touches one a reader may still see.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use crate::catalog::{CatalogEntry, SecurityCatalog};
use crate::config::{load_snapshot, Config};
use crate::engine::actions::Action;
use crate::engine::reducer::{reduce, ReducerContext};
use crate::engine::scoring::ScoringConfig;
use crate::engine::state::AppState;
use crate::logging::{self, Domain};
use crate::model::{
    CheckpointStatus, Decision, EventStatus, Holdings, LogicHealth, Thesis, ThesisId, ThesisStatus,
};
use crate::verify::{audit_transition, InvariantViolation};

/// Source of the date stamped on recorded decisions.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// What a single dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub changed: bool,
    pub seq: u64,
    pub state_hash: u64,
    pub thesis: Option<Thesis>,
}

pub struct Store {
    state: Arc<AppState>,
    catalog: SecurityCatalog,
    scoring: ScoringConfig,
    clock: Box<dyn Clock>,
    audit: bool,
    violations: Vec<InvariantViolation>,
}

impl Store {
    pub fn new(state: AppState, catalog: SecurityCatalog, scoring: ScoringConfig) -> Self {
        Self {
            state: Arc::new(state),
            catalog,
            scoring,
            clock: Box::new(SystemClock),
            audit: cfg!(debug_assertions),
            violations: Vec::new(),
        }
    }

    /// Load the catalog and, if configured, a prior snapshot.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let (catalog, manifest) = SecurityCatalog::load(&cfg.catalog_path)?;
        logging::log_catalog_loaded(&manifest);

        let state = match &cfg.snapshot_path {
            Some(path) if path.exists() => load_snapshot(path)?,
            _ => AppState::new(&cfg.user_name),
        };
        Ok(Self::new(state, catalog, cfg.scoring.clone()))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Post-action invariant checks; on by default in debug builds.
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled;
        self
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatched {
        let name = action.name();
        let domain = domain_for(&action);
        let ctx = ReducerContext {
            catalog: &self.catalog,
            scoring: &self.scoring,
            today: self.clock.today(),
        };

        let out = reduce((*self.state).clone(), action, &ctx);
        logging::log_commands(domain, name, &out.commands);

        self.violations.clear();
        if out.changed {
            if self.audit {
                self.violations = audit_transition(&self.state, &out.state, &self.scoring);
                for v in &self.violations {
                    logging::log_violation(v.check, &v.msg);
                }
            }
            for t in &out.state.theses {
                match self.state.logic_health(t.id) {
                    Some(before) if before != t.logic_health => {
                        logging::log_health_change(t.id, &t.ticker, before, t.logic_health)
                    }
                    _ => {}
                }
            }
            logging::log_audit(name, out.state.seq, out.state_hash);
            self.state = Arc::new(out.state);
        }

        Dispatched {
            changed: out.changed,
            seq: self.state.seq,
            state_hash: out.state_hash,
            thesis: out.thesis,
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    pub fn reconcile_holdings(&mut self) -> Dispatched {
        self.dispatch(Action::ReconcileHoldings)
    }

    pub fn set_holdings(&mut self, holdings: Holdings) -> Dispatched {
        self.dispatch(Action::SetHoldings { holdings })
    }

    /// Returns the thesis that now stands for the candidate's ticker.
    pub fn intake_thesis(&mut self, candidate: CatalogEntry, intent: ThesisStatus) -> Option<Thesis> {
        self.dispatch(Action::IntakeThesis { candidate, intent }).thesis
    }

    pub fn record_decision(&mut self, thesis_id: ThesisId, event_id: &str, decision: Decision) -> Dispatched {
        self.dispatch(Action::RecordDecision { thesis_id, event_id: event_id.to_string(), decision })
    }

    pub fn advance_event(&mut self, thesis_id: ThesisId, event_id: &str, status: EventStatus) -> Dispatched {
        self.dispatch(Action::AdvanceEvent { thesis_id, event_id: event_id.to_string(), status })
    }

    pub fn settle_checkpoint(
        &mut self,
        thesis_id: ThesisId,
        event_id: &str,
        watchpoint_id: u32,
        status: CheckpointStatus,
        actual_value: Option<String>,
    ) -> Dispatched {
        self.dispatch(Action::SettleCheckpoint {
            thesis_id,
            event_id: event_id.to_string(),
            watchpoint_id,
            status,
            actual_value,
        })
    }

    pub fn rename_user(&mut self, name: &str) -> Dispatched {
        self.dispatch(Action::RenameUser { name: name.to_string() })
    }

    pub fn mark_notification_read(&mut self, id: u64) -> Dispatched {
        self.dispatch(Action::MarkNotificationRead { id })
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn thesis(&self, id: ThesisId) -> Option<&Thesis> {
        self.state.thesis(id)
    }

    pub fn logic_health(&self, id: ThesisId) -> Option<LogicHealth> {
        self.state.logic_health(id)
    }

    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        self.catalog.search(query)
    }

    pub fn catalog(&self) -> &SecurityCatalog {
        &self.catalog
    }

    /// Violations found by the audit of the last dispatch.
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }
}

fn domain_for(action: &Action) -> Domain {
    match action {
        Action::ReconcileHoldings | Action::SetHoldings { .. } => Domain::Reconcile,
        Action::IntakeThesis { .. } => Domain::Intake,
        Action::RecordDecision { .. } | Action::AdvanceEvent { .. } | Action::SettleCheckpoint { .. } => {
            Domain::Lifecycle
        }
        Action::RenameUser { .. } | Action::MarkNotificationRead { .. } => Domain::Store,
    }
}
