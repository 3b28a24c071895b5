use chrono::Utc;
use fs_err as fs;
use serde_json::{json, to_string_pretty, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::errors::Result;

pub fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info,underdog=debug" };

    let filter = std::env::var("UNDERDOG_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| if debug { None } else { EnvFilter::try_from_default_env().ok() })
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

pub fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".underdog").join("tx").join(tx.to_string())
}

/// Write `<root>/.underdog/tx/<tx>/<stage>.json` and return its path.
pub fn save_stage(root: &Path, tx: Uuid, stage: &str, payload: Value) -> Result<PathBuf> {
    let dir = tx_dir(root, tx);
    fs::create_dir_all(&dir)?;
    let record = json!({
        "stage": stage,
        "transaction": tx,
        "timestamp": Utc::now(),
        "payload": payload,
    });
    let path = dir.join(format!("{stage}.json"));
    let text = to_string_pretty(&record).map_err(|e| crate::errors::UnderdogError::Io(e.to_string()))?;
    fs::write(&path, text)?;
    Ok(path)
}
