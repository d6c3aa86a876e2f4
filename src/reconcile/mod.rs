//! Reconciliation of brokerage holdings into the thesis collection.

pub mod holdings;
pub mod synthesize;

pub use holdings::{first_free_id, reconcile, ReconcileReport, Reconciled};
