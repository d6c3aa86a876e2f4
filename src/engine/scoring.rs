//! Logic Health scoring.
//!
//! The score is always a function of the whole event history. Nothing
//! accumulates across calls: recomputing after an unrelated edit, or
//! twice in a row, yields the same value.
//!
//! | Input                      | Default weight |
//! |----------------------------|----------------|
//! | base                       | 50             |
//! | checkpoint `Pass`          | +10            |
//! | checkpoint `Fail`          | -15            |
//! | decision `buy`             | +5             |
//! | decision `sell`            | -5             |
//! | decision `hold`            | 0              |
//!
//! Tiers: `Good` above 70, `Warning` from 40 through 70, `Danger` below 40.

use serde::{Deserialize, Serialize};

use crate::model::{CheckpointStatus, Decision, Event, HealthStatus, LogicHealth};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base: i64,
    pub pass: i64,
    /// Broken premises cost more than confirmed ones earn.
    pub fail: i64,
    pub buy: i64,
    pub sell: i64,
    /// Strictly above this is `Good`.
    pub good_above: i64,
    /// At or above this (and not `Good`) is `Warning`.
    pub warning_from: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: 50,
            pass: 10,
            fail: -15,
            buy: 5,
            sell: -5,
            good_above: 70,
            warning_from: 40,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            base: env_i64("SCORE_BASE", d.base),
            pass: env_i64("SCORE_PASS", d.pass),
            fail: env_i64("SCORE_FAIL", d.fail),
            buy: env_i64("SCORE_BUY", d.buy),
            sell: env_i64("SCORE_SELL", d.sell),
            good_above: env_i64("SCORE_GOOD_ABOVE", d.good_above),
            warning_from: env_i64("SCORE_WARNING_FROM", d.warning_from),
        }
    }

    fn checkpoint_weight(&self, status: CheckpointStatus) -> i64 {
        match status {
            CheckpointStatus::Pass => self.pass,
            CheckpointStatus::Fail => self.fail,
            CheckpointStatus::Pending => 0,
        }
    }

    fn decision_weight(&self, decision: Decision) -> i64 {
        match decision {
            Decision::Buy => self.buy,
            Decision::Sell => self.sell,
            Decision::Hold => 0,
        }
    }

    pub fn tier(&self, score: u8) -> HealthStatus {
        let s = i64::from(score);
        if s > self.good_above {
            HealthStatus::Good
        } else if s >= self.warning_from {
            HealthStatus::Warning
        } else {
            HealthStatus::Danger
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// How a score was reached, for audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub checkpoint_delta: i64,
    pub decision_delta: i64,
    /// Before clamping; may leave [0, 100].
    pub raw: i64,
    pub score: u8,
}

pub fn breakdown(events: &[Event], cfg: &ScoringConfig) -> ScoreBreakdown {
    let mut checkpoint_delta = 0i64;
    let mut decision_delta = 0i64;

    for event in events {
        // Checkpoint verdicts score on status alone; the watchpoint link is not consulted.
        for cp in &event.checkpoints {
            checkpoint_delta += cfg.checkpoint_weight(cp.status);
        }
        if let Some(decision) = event.decision() {
            decision_delta += cfg.decision_weight(decision);
        }
    }

    let raw = cfg.base + checkpoint_delta + decision_delta;
    ScoreBreakdown {
        base: cfg.base,
        checkpoint_delta,
        decision_delta,
        raw,
        score: raw.clamp(0, 100) as u8,
    }
}

pub fn compute_logic_health_with(events: &[Event], cfg: &ScoringConfig) -> LogicHealth {
    let score = breakdown(events, cfg).score;
    LogicHealth { score, status: cfg.tier(score) }
}

/// Logic Health under the default weights.
pub fn compute_logic_health(events: &[Event]) -> LogicHealth {
    compute_logic_health_with(events, &ScoringConfig::default())
}
