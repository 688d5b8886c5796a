//! rotor-core
//!
//! Five-stage streaming rotating-substitution engine with per-side letter
//! histograms. Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod histogram;
pub mod telemetry;
pub mod transform;

// Stream layer
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::histogram::{render_json, render_text, HistogramReport, LetterHistogram, ReportSide};
    pub use crate::stream::{
        decrypt_stream, encrypt_stream, transform_stream, InputSource, OutputSink, PaddingMode,
        PipelineConfig, PipelineOutcome,
    };
    pub use crate::telemetry::{Stage, TelemetrySnapshot};
    pub use crate::transform::{Direction, RotatingTransform, RotationPhase};
    pub use crate::types::PipelineError;
}
