use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::scoring::ScoringConfig;
use crate::engine::state::AppState;
use crate::model::Holdings;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub holdings_path: PathBuf,
    /// Prior snapshot to resume from, if any
    pub snapshot_path: Option<PathBuf>,
    pub user_name: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or_else(|_| "./catalog.json".to_string()).into(),
            holdings_path: std::env::var("HOLDINGS_PATH").unwrap_or_else(|_| "./holdings.json".to_string()).into(),
            snapshot_path: std::env::var("SNAPSHOT_PATH").ok().filter(|v| !v.is_empty()).map(PathBuf::from),
            user_name: std::env::var("USER_NAME").unwrap_or_else(|_| "Guest".to_string()),
            scoring: ScoringConfig::from_env(),
        }
    }
}

pub fn load_holdings(path: &Path) -> Result<Holdings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading holdings {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing holdings {}", path.display()))
}

pub fn load_snapshot(path: &Path) -> Result<AppState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

pub fn save_snapshot(path: &Path, state: &AppState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("encoding snapshot")?;
    std::fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))
}
