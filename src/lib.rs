//! Thesis book core: reconcile holdings into investment theses, take in
//! discovered candidates, walk events through their lifecycle and keep each
//! thesis's Logic Health in step with its evidence.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod intake;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod store;
pub mod verify;

pub use engine::reducer::{get_logic_health, intake_thesis, reconcile_holdings, record_decision};
