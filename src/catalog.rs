//! Read-only security catalog: ticker → authored thesis content.
//!
//! Supplied by an external content source as a JSON array of entries.
//! Loading records a SHA-256 fingerprint of the raw bytes so a snapshot
//! can be tied back to the exact catalog revision that produced it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::{ChartHistory, ChartNarratives, CompanyProfile, Event, Narrative, Watchpoint};

/// One security as described by the content source. Also serves as the
/// intake candidate for the discover → act flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub ticker: String,
    pub name: String,
    pub current_price: f64,
    #[serde(default)]
    pub change_rate: f64,
    pub company_profile: CompanyProfile,
    #[serde(default)]
    pub chart_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    #[serde(default)]
    pub watchpoints: Vec<Watchpoint>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub chart_history: ChartHistory,
    #[serde(default)]
    pub chart_narratives: ChartNarratives,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub path: String,
    pub hash_sha256: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityCatalog {
    entries: Vec<CatalogEntry>,
}

impl SecurityCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with an exact ticker match.
    pub fn find(&self, ticker: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.ticker == ticker)
    }

    /// Case-insensitive substring match on ticker or name.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let q = query.trim();
        if q.is_empty() {
            return Vec::new();
        }
        let q = q.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.ticker.to_lowercase().contains(&q) || e.name.to_lowercase().contains(&q))
            .collect()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(raw).context("catalog is not a JSON array of entries")?;
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<(Self, CatalogManifest)> {
        let raw = fs::read(path).with_context(|| format!("reading catalog {}", path.display()))?;
        let hash_sha256 = content_sha256(&raw);
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        let manifest = CatalogManifest {
            path: path.to_string_lossy().to_string(),
            hash_sha256,
            entry_count: entries.len(),
        };
        Ok((Self { entries }, manifest))
    }
}

pub fn content_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
