//! telemetry/timers.rs
//! Stage timers for the five-stage pipeline.
//!
//! Summary: records busy time per stage (signal waits excluded) and the
//! wall-clock span of the whole run.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::STAGE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Read,
    Transform,
    Write,
    CountInput,
    CountOutput,
}

impl Stage {
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Read,
        Stage::Transform,
        Stage::Write,
        Stage::CountInput,
        Stage::CountOutput,
    ];

    /// Bracketed tag used in log lines.
    pub fn tag(self) -> &'static str {
        match self {
            Stage::Read        => "[READER]",
            Stage::Transform   => "[TRANSFORMER]",
            Stage::Write       => "[WRITER]",
            Stage::CountInput  => "[COUNTER:input]",
            Stage::CountOutput => "[COUNTER:output]",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read        => "read",
            Stage::Transform   => "transform",
            Stage::Write       => "write",
            Stage::CountInput  => "count-input",
            Stage::CountOutput => "count-output",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Add duration to a stage (accumulates if already present).
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    pub fn get_ms(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000.0
    }

    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    /// True when every expected stage recorded an entry.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    pub fn elapsed(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => Instant::now().duration_since(self.start_time),
        }
    }
}
