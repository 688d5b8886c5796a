//! telemetry/snapshot.rs
//! Immutable end-of-run telemetry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Counters, throughput, per-stage busy time and elapsed wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub cycles: u64,
    pub capacity: usize,
    pub bytes_read: u64,
    pub bytes_padding: u64,
    pub bytes_written: u64,
    pub letters_input: u64,
    pub letters_output: u64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer, capacity: usize) -> Self {
        let elapsed = timer.elapsed();

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_read as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            cycles: counters.cycles,
            capacity,
            bytes_read: counters.bytes_read,
            bytes_padding: counters.bytes_padding,
            bytes_written: counters.bytes_written,
            letters_input: counters.letters_input,
            letters_output: counters.letters_output,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Internal invariants of a completed run:
    /// - the transform preserves letters, so both tallies agree
    /// - letters never exceed bytes read
    /// - every cycle accounts for exactly `capacity` slots
    /// - five stages cannot be busy longer than five times the wall clock
    pub fn sanity_check(&self) -> bool {
        self.letters_input == self.letters_output
            && self.letters_input <= self.bytes_read
            && self.bytes_read + self.bytes_padding == self.cycles * self.capacity as u64
            && self.total_stage_time() <= self.elapsed * 5
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
