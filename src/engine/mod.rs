//! Event lifecycle, Logic Health scoring and the pure reducer.
//!
//! Architecture:
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Actions    │────►│   Reducer    │────►│    State     │
//! │  (ordered)   │     │  (pure fn)   │     │  (hashed)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │   Commands   │
//!                      │ (log notes)  │
//!                      └──────────────┘
//! ```
//!
//! Scoring never accumulates: every transition recomputes a thesis's
//! Logic Health from its full event list.

pub mod actions;
pub mod lifecycle;
pub mod reducer;
pub mod scoring;
pub mod state;
