// ## `core.rs`: stable public API

use tracing::debug;

use crate::stream::config::PipelineConfig;
use crate::stream::io::{open_input, open_output, take_captured, InputSource, OutputSink};
use crate::stream::pipeline::{run_pipeline, PipelineOutcome};
use crate::transform::Direction;
use crate::types::PipelineError;

/// Run the pipeline from `input` to `output` with `config`.
///
/// Configuration is validated and both ends are opened before any stage
/// thread exists, so an unreadable source or unwritable sink fails fast.
/// For `OutputSink::Memory` the captured bytes are attached to the outcome.
pub fn transform_stream(
    input: InputSource,
    output: OutputSink,
    config: PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    config.validate()?;

    let reader = open_input(input)?;
    let (writer, maybe_buf) = open_output(output)?;

    let mut outcome = run_pipeline(reader, writer, &config)?;

    if let Some(ref buf) = maybe_buf {
        let captured = take_captured(buf)?;
        debug!("[PIPELINE] captured {} output bytes", captured.len());
        outcome.attach_output(captured);
    }

    Ok(outcome)
}

/// Forward rotation with `config`'s phase and padding.
pub fn encrypt_stream(
    input: InputSource,
    output: OutputSink,
    config: PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    transform_stream(input, output, config.with_direction(Direction::Forward))
}

/// Inverse rotation; recovers what `encrypt_stream` produced from the same
/// starting phase.
pub fn decrypt_stream(
    input: InputSource,
    output: OutputSink,
    config: PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    transform_stream(input, output, config.with_direction(Direction::Inverse))
}
