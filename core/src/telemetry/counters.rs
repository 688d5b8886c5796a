//! telemetry/counters.rs
//! Mutable counters collected by the stages during a run.
//!
//! Each stage owns its own `TelemetryCounters`; the coordinator merges them
//! after join, so nothing here is shared across threads.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Cycles completed (reader side).
    pub cycles: u64,
    /// Bytes pulled from the source.
    pub bytes_read: u64,
    /// Zero bytes appended to short cycles.
    pub bytes_padding: u64,
    /// Bytes pushed to the sink.
    pub bytes_written: u64,
    /// Letters tallied on the input side.
    pub letters_input: u64,
    /// Letters tallied on the output side.
    pub letters_output: u64,
}

impl TelemetryCounters {
    /// Record one reader cycle: `filled` source bytes out of `capacity` slots.
    pub fn add_read(&mut self, filled: usize, capacity: usize) {
        self.cycles += 1;
        self.bytes_read += filled as u64;
        self.bytes_padding += capacity.saturating_sub(filled) as u64;
    }

    pub fn add_write(&mut self, len: usize) {
        self.bytes_written += len as u64;
    }

    pub fn add_input_letters(&mut self, letters: u64) {
        self.letters_input += letters;
    }

    pub fn add_output_letters(&mut self, letters: u64) {
        self.letters_output += letters;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.cycles         += other.cycles;
        self.bytes_read     += other.bytes_read;
        self.bytes_padding  += other.bytes_padding;
        self.bytes_written  += other.bytes_written;
        self.letters_input  += other.letters_input;
        self.letters_output += other.letters_output;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
