//! Durable per-turn records
//!
//! The recorder is a write-only collaborator: the dialogue core hands it
//! one record per turn and never reads anything back. A recorder failure
//! must never fail the conversation, so callers go through
//! [`record_best_effort`].

use crate::latency::{LatencyBreakdown, RollingLatencyLog};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// What gets persisted for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub session_key: String,
    pub timestamp: String,
    pub user_text: String,
    pub bot_text: String,
    pub latency_ms: LatencyBreakdown,
    pub average_latency_ms: f64,
    pub turn_count: usize,
}

pub trait TurnRecorder: Send + Sync {
    fn record(
        &self,
        session_key: &str,
        user_text: &str,
        bot_text: &str,
        latency: &LatencyBreakdown,
    ) -> io::Result<()>;
}

/// Writes one JSON file per turn and keeps the process-wide rolling
/// latency average.
pub struct JsonFileRecorder {
    dir: PathBuf,
    log: RollingLatencyLog,
}

impl JsonFileRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            log: RollingLatencyLog::new(),
        })
    }
}

impl TurnRecorder for JsonFileRecorder {
    fn record(
        &self,
        session_key: &str,
        user_text: &str,
        bot_text: &str,
        latency: &LatencyBreakdown,
    ) -> io::Result<()> {
        let now = OffsetDateTime::now_utc();
        let stats = self.log.record(latency.total_ms);
        let record = TurnRecord {
            session_key: session_key.to_string(),
            timestamp: now
                .format(&Rfc3339)
                .unwrap_or_else(|_| now.unix_timestamp().to_string()),
            user_text: user_text.to_string(),
            bot_text: bot_text.to_string(),
            latency_ms: latency.clone(),
            average_latency_ms: stats.average_ms,
            turn_count: stats.count,
        };

        let path = self
            .dir
            .join(format!("{session_key}_{}.json", now.unix_timestamp_nanos()));
        let json = serde_json::to_string_pretty(&record)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        std::fs::write(&path, json)?;
        tracing::info!(
            path = %path.display(),
            total_ms = latency.total_ms,
            average_ms = stats.average_ms,
            "saved turn record"
        );
        Ok(())
    }
}

/// Record a turn, absorbing any failure into a warning. The booking
/// conversation must never fail because the transcript failed to save.
pub fn record_best_effort(
    recorder: &dyn TurnRecorder,
    session_key: &str,
    user_text: &str,
    bot_text: &str,
    latency: &LatencyBreakdown,
) {
    if let Err(err) = recorder.record(session_key, user_text, bot_text, latency) {
        tracing::warn!(session = %session_key, "failed to save turn record: {err}");
    }
}
