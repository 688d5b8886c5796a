// ## `mod.rs`: public façade + re-exports

//! stream: the five-stage rotating-substitution pipeline.
//!
//! Two bounded buffers circulate between a reader, a transformer, a writer and
//! two letter counters. `core` is the stable entry point; `pipeline` runs the
//! stages over already-opened streams.

pub mod buffer;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod signals;
pub mod stages;

pub use io::{InputSource, OutputSink};

pub use config::{PaddingMode, PipelineConfig};

pub use pipeline::{run_pipeline, PipelineOutcome};

pub use self::core::{decrypt_stream, encrypt_stream, transform_stream};
