//! Offline integrity pass over a catalog file.
//!
//! Usage: validate_catalog [path]   (default: $CATALOG_PATH or ./catalog.json)

use serde_json::json;
use std::env;
use std::path::PathBuf;

use thesisbook::catalog::SecurityCatalog;
use thesisbook::config::Config;
use thesisbook::engine::scoring::breakdown;
use thesisbook::verify::validate_catalog;

fn main() {
    let cfg = Config::from_env();
    let path = env::args().nth(1).map(PathBuf::from).unwrap_or(cfg.catalog_path);

    let (catalog, manifest) = match SecurityCatalog::load(&path) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("catalog load failed: {:#}", err);
            std::process::exit(1);
        }
    };

    let violations = validate_catalog(&catalog);
    let scores: Vec<_> = catalog
        .entries()
        .iter()
        .map(|e| {
            let b = breakdown(&e.events, &cfg.scoring);
            json!({ "ticker": e.ticker, "score": b.score, "raw": b.raw })
        })
        .collect();

    let payload = json!({
        "manifest": manifest,
        "violations": violations
            .iter()
            .map(|v| json!({ "check": v.check, "msg": v.msg }))
            .collect::<Vec<_>>(),
        "content_scores": scores,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(s) => println!("{}", s),
        Err(err) => eprintln!("failed to encode report: {}", err),
    }

    if !violations.is_empty() {
        std::process::exit(2);
    }
}
