use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::telemetry::{Stage, TelemetryCounters};

/// What a stage hands back to the coordinator after its last cycle.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub cycles: u64,
    pub counters: TelemetryCounters,
    /// Time spent working, signal waits excluded.
    pub busy: Duration,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            cycles: 0,
            counters: TelemetryCounters::default(),
            busy: Duration::ZERO,
        }
    }
}

/// Run-wide abort request.
///
/// Set by the writer when the sink fails; the reader observes it at the top
/// of its next cycle and closes the stream instead of reading on.
#[derive(Debug, Default)]
pub struct PipelineControl {
    aborted: AtomicBool,
}

impl PipelineControl {
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}
