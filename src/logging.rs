//! Structured logging for the thesis book.
//!
//! Design goals:
//! 1. Multi-level granularity (TRACE → FATAL)
//! 2. Domain-specific categories for filtering
//! 3. Replay/audit support via sequence numbers and state hashes
//!
//! Records are JSON lines on stderr. Setting `LOG_DIR` also writes them to
//! `$LOG_DIR/<run_id>/events.jsonl` (info and above) and `trace.jsonl`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::catalog::CatalogManifest;
use crate::engine::actions::{Command, LogLevel};
use crate::model::{LogicHealth, ThesisId};

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_LEVEL").as_deref().unwrap_or("info"))
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Reconcile, // Holdings sync
    Intake,    // Discover → act
    Lifecycle, // Event transitions, decisions
    Score,     // Logic Health recomputation
    Catalog,   // Content loading, validation
    Store,     // Action dispatch
    System,    // Startup, shutdown
    Audit,     // Invariant checks, state hashes
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Reconcile => "reconcile",
            Domain::Intake => "intake",
            Domain::Lifecycle => "lifecycle",
            Domain::Score => "score",
            Domain::Catalog => "catalog",
            Domain::Store => "store",
            Domain::System => "system",
            Domain::Audit => "audit",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // Check LOG_DOMAINS env var (comma-separated list or "all")
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Sequence counter for ordering
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct FileSinks {
    events: Mutex<BufWriter<File>>,
    trace: Mutex<BufWriter<File>>,
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    files: Option<FileSinks>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let files = std::env::var("LOG_DIR")
            .ok()
            .and_then(|base| open_file_sinks(PathBuf::from(base).join(&run_id), &run_id));
        RunContext { run_id, files }
    })
}

fn open_file_sinks(run_dir: PathBuf, run_id: &str) -> Option<FileSinks> {
    if let Err(err) = create_dir_all(&run_dir) {
        eprintln!("[log] failed to create run dir: {}", err);
        return None;
    }
    let _ = std::fs::write(
        run_dir.join("manifest.json"),
        json!({
            "run_id": run_id,
            "ts": ts_now(),
            "pid": process::id(),
            "log_dir": run_dir.to_string_lossy(),
        })
        .to_string(),
    );

    let open = |name: &str| match File::create(run_dir.join(name)) {
        Ok(f) => Some(Mutex::new(BufWriter::new(f))),
        Err(err) => {
            eprintln!("[log] failed to create {}: {}", name, err);
            None
        }
    };
    Some(FileSinks { events: open("events.jsonl")?, trace: open("trace.jsonl")? })
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["ticker", "thesis_id", "event_id", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) {
    if let Ok(mut w) = writer.lock() {
        let _ = writeln!(w, "{}", line);
        let _ = w.flush();
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let min_level = Level::from_env();
    if level < min_level || !domain.is_enabled() {
        return;
    }

    emit_record(level, domain, event, fields);
}

fn build_record(
    run_id: &str,
    seq: u64,
    level: Level,
    domain: Domain,
    event: &str,
    fields: Map<String, Value>,
) -> Value {
    let (mut top, data) = split_fields(fields);

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(seq));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));
    Value::Object(entry)
}

fn emit_record(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let ctx = ensure_run_context();
    let line = build_record(&ctx.run_id, next_seq(), level, domain, event, fields).to_string();

    if let Some(files) = &ctx.files {
        match level {
            Level::Trace | Level::Debug => write_line(&files.trace, &line),
            _ => write_line(&files.events, &line),
        }
    }
    eprintln!("{}", line);
}

// =============================================================================
// Reducer notes
// =============================================================================

/// Emit the notes a reduction handed back.
pub fn log_commands(domain: Domain, action: &str, commands: &[Command]) {
    for cmd in commands {
        match cmd {
            Command::Log { level, msg } => log(
                (*level).into(),
                domain,
                action,
                obj(&[("msg", v_str(msg))]),
            ),
        }
    }
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_health_change(thesis_id: ThesisId, ticker: &str, before: LogicHealth, after: LogicHealth) {
    let level = if before.status == after.status { Level::Debug } else { Level::Info };
    log(
        level,
        Domain::Score,
        "health_change",
        obj(&[
            ("thesis_id", json!(thesis_id)),
            ("ticker", v_str(ticker)),
            ("before", json!(before.score)),
            ("after", json!(after.score)),
            ("status", json!(after.status)),
        ]),
    );
}

pub fn log_catalog_loaded(manifest: &CatalogManifest) {
    log(
        Level::Info,
        Domain::Catalog,
        "catalog_loaded",
        obj(&[
            ("path", v_str(&manifest.path)),
            ("sha256", v_str(&manifest.hash_sha256)),
            ("entries", json!(manifest.entry_count)),
        ]),
    );
}

// =============================================================================
// Audit Trail Logs
// =============================================================================

/// Log an applied action for replay verification
pub fn log_audit(action: &str, seq: u64, state_hash: u64) {
    log(
        Level::Debug,
        Domain::Audit,
        action,
        obj(&[("seq", json!(seq)), ("state_hash", v_str(&format!("{:016x}", state_hash)))]),
    );
}

pub fn log_violation(check: &str, msg: &str) {
    log(
        Level::Error,
        Domain::Audit,
        "invariant_violation",
        obj(&[("check", v_str(check)), ("msg", v_str(msg))]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Tests
// =============================================================================
