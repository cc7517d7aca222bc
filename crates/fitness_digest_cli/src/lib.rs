//! Batch driver: read materialized feeds from the data directory, merge them,
//! and write the record store, averages and plan payload back out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fitness_digest::config::Config;
use fitness_digest::feeds::{biometric_feed_from_str, workout_feed_from_str};
use fitness_digest::{Averages, DailyRecordStore, build_payload, merge};

pub const BIOMETRICS_FILE: &str = "biometrics.json";
pub const WORKOUTS_FILE: &str = "workouts.json";
pub const STORE_FILE: &str = "combined.json";
pub const AVERAGES_FILE: &str = "averages.json";
pub const PAYLOAD_FILE: &str = "payload.json";

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub days: usize,
    pub target_date: String,
    pub written: Vec<PathBuf>,
}

/// Configure logging from `FITNESS_DIGEST_LOG_LEVEL` (or `RUST_LOG`, default `info`).
pub fn init_tracing() {
    let log_env = std::env::var("FITNESS_DIGEST_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("fitness_digest: log filter: {}", log_env);
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            tracing::warn!(path = %tmp.display(), error = %e, "could not remove staged output");
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Sibling path an output is staged at before it replaces `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Run one merge-and-compress pass.
///
/// Every output is serialized and staged to a sibling temp file before any
/// output is replaced. A failure up to that point leaves the data directory
/// untouched; the final renames are not atomic as a group.
pub fn run(config: &Config) -> anyhow::Result<RunReport> {
    let dir = &config.data_dir;

    let biometrics = biometric_feed_from_str(&read(&dir.join(BIOMETRICS_FILE))?)
        .context("decoding biometric feed")?;
    let workouts =
        workout_feed_from_str(&read(&dir.join(WORKOUTS_FILE))?).context("decoding workout feed")?;
    tracing::info!(
        biometric_days = biometrics.len(),
        sessions = workouts.len(),
        "loaded feeds"
    );

    let mut store = merge(&biometrics, &workouts, config.bodyweight_lbs);

    let store_path = dir.join(STORE_FILE);
    if store_path.exists() {
        let previous: DailyRecordStore = serde_json::from_str(&read(&store_path)?)
            .with_context(|| format!("decoding {}", store_path.display()))?;
        tracing::info!(previous_days = previous.len(), "folding previous store");
        store = store.fold_previous(previous);
    }

    let averages = Averages::from_store(&store);
    tracing::info!("{}", averages);

    let target_date = config.target_date_or_today();
    let payload = build_payload(&store, &target_date, config.recent_workouts)
        .context("building plan payload")?;

    let outputs = [
        (store_path, store.to_json_pretty()?),
        (
            dir.join(AVERAGES_FILE),
            serde_json::to_string_pretty(&averages)?,
        ),
        (dir.join(PAYLOAD_FILE), serde_json::to_string_pretty(&payload)?),
    ];

    let mut staged = Vec::with_capacity(outputs.len());
    for (path, body) in outputs {
        let tmp = staging_path(&path);
        if let Err(e) = fs::write(&tmp, body) {
            discard(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("writing {}", tmp.display()));
        }
        staged.push((tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        fs::rename(&tmp, &path)
            .with_context(|| format!("replacing {} with {}", path.display(), tmp.display()))?;
        tracing::debug!(path = %path.display(), "wrote output");
        written.push(path);
    }

    Ok(RunReport {
        days: store.len(),
        target_date,
        written,
    })
}
