use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::telemetry::Stage;

/// Unified pipeline error covering start-up, mid-stream I/O and protocol faults.
/// - `From<io::Error>` enables `?` on sink/source plumbing outside a cycle.
/// - Messages are stable and contextual for logs and the CLI.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source could not be opened; raised before any stage thread exists.
    #[error("cannot open source {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Sink could not be created; raised before any stage thread exists.
    #[error("cannot open sink {}: {source}", path.display())]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read failed mid-stream.
    #[error("read failed in cycle {cycle} after {filled} bytes: {source}")]
    Read {
        cycle: u64,
        filled: usize,
        #[source]
        source: io::Error,
    },

    /// Write or final flush failed mid-stream.
    #[error("write failed in cycle {cycle}: {source}")]
    Write {
        cycle: u64,
        #[source]
        source: io::Error,
    },

    /// Requested cycle capacity outside the supported range.
    #[error("invalid buffer capacity {requested}: must be between {min} and {max}")]
    InvalidCapacity { requested: usize, min: usize, max: usize },

    /// A peer stage hung up before the protocol finished.
    #[error("{stage} stage lost its peer ({signal} channel closed)")]
    Disconnected { stage: Stage, signal: &'static str },

    /// A buffer was still referenced by another stage when it had to be recycled.
    #[error("{stage} stage could not reclaim the {buffer} buffer in cycle {cycle}")]
    BufferStillShared { stage: Stage, buffer: &'static str, cycle: u64 },

    /// Stage thread panicked.
    #[error("{stage} stage panicked")]
    StagePanicked { stage: Stage },

    /// Stages disagree on the number of completed cycles.
    #[error("stages disagree on cycle count: {counts:?}")]
    CycleMismatch { counts: Vec<(Stage, u64)> },

    /// Generic I/O outside a cycle (e.g. capturing in-memory output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// True for errors that only echo a failure in another stage.
    pub fn is_secondary(&self) -> bool {
        matches!(self, PipelineError::Disconnected { .. })
    }
}
