//! One-shot portfolio import: load the catalog and holdings, reconcile,
//! print the resulting snapshot as JSON.

use anyhow::{Context, Result};
use serde_json::json;

use thesisbook::config::{load_holdings, save_snapshot, Config};
use thesisbook::logging::{self, obj, v_str, Domain, Level};
use thesisbook::store::Store;

fn main() -> Result<()> {
    let cfg = Config::from_env();
    logging::log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("catalog", v_str(&cfg.catalog_path.to_string_lossy())),
            ("holdings", v_str(&cfg.holdings_path.to_string_lossy())),
        ]),
    );

    let mut store = Store::from_config(&cfg)?;
    let holdings = load_holdings(&cfg.holdings_path)?;
    let count = holdings.len();
    let out = store.set_holdings(holdings);

    let state = store.snapshot();
    logging::log(
        Level::Info,
        Domain::System,
        "import_done",
        obj(&[
            ("holdings", json!(count)),
            ("theses", json!(state.theses.len())),
            ("changed", json!(out.changed)),
            ("state_hash", v_str(&format!("{:016x}", out.state_hash))),
        ]),
    );

    if let Some(path) = &cfg.snapshot_path {
        save_snapshot(path, &state)?;
    }
    let json = serde_json::to_string_pretty(&*state).context("encoding snapshot")?;
    println!("{}", json);
    Ok(())
}
