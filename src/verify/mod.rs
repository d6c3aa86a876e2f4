//! Offline and post-action checks over catalog content and state snapshots.

pub mod invariants;

pub use invariants::{
    assert_health_consistent, assert_monotonic, assert_unique_tickers, audit_transition,
    validate_catalog, InvariantViolation,
};
