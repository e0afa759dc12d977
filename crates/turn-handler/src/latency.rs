//! Per-turn latency accounting and the process-wide rolling log

use serde::Serialize;
use std::sync::Mutex;
use std::time::Instant;

/// Milliseconds elapsed since `start`, from the monotonic clock.
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Phase timings for one turn, in milliseconds. Only the phases a turn
/// actually went through are present; `total` always is. Captured on
/// failure paths too.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatencyBreakdown {
    #[serde(rename = "greeting", skip_serializing_if = "Option::is_none")]
    pub greeting_ms: Option<f64>,
    #[serde(rename = "parser", skip_serializing_if = "Option::is_none")]
    pub parser_ms: Option<f64>,
    #[serde(rename = "fallback_llm", skip_serializing_if = "Option::is_none")]
    pub fallback_ms: Option<f64>,
    #[serde(rename = "total")]
    pub total_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatencyStats {
    pub average_ms: f64,
    pub count: usize,
}

/// Append-only log of per-turn totals, shared by all sessions in the
/// process. Order-insensitive; a mutex is all the discipline it needs.
#[derive(Debug, Default)]
pub struct RollingLatencyLog {
    totals: Mutex<Vec<f64>>,
}

impl RollingLatencyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn total and return the running stats.
    pub fn record(&self, total_ms: f64) -> LatencyStats {
        match self.totals.lock() {
            Ok(mut totals) => {
                totals.push(total_ms);
                let count = totals.len();
                let average_ms = totals.iter().sum::<f64>() / count as f64;
                LatencyStats { average_ms, count }
            }
            Err(_) => LatencyStats {
                average_ms: total_ms,
                count: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_average_accumulates() {
        let log = RollingLatencyLog::new();
        let first = log.record(100.0);
        assert_eq!(first.count, 1);
        assert!((first.average_ms - 100.0).abs() < f64::EPSILON);

        let second = log.record(300.0);
        assert_eq!(second.count, 2);
        assert!((second.average_ms - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_serializes_with_phase_keys() {
        let breakdown = LatencyBreakdown {
            parser_ms: Some(12.5),
            total_ms: 14.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["parser"], 12.5);
        assert_eq!(json["total"], 14.0);
        assert!(json.get("greeting").is_none());
    }
}
