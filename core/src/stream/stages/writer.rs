// # `src/stream/stages/writer.rs`

use std::io::{BufWriter, Write};
use std::time::Instant;

use tracing::{debug, error};

use crate::stream::buffer::BoundedStageBuffer;
use crate::stream::config::PaddingMode;
use crate::stream::signals::{
    raise, wait, WriterSignals, CAN_READ, CAN_WRITE, OUTPUT_COUNTED, OUTPUT_RETURNED,
};
use crate::stream::stages::types::{PipelineControl, StageReport};
use crate::telemetry::Stage;
use crate::types::PipelineError;

/// Writer loop: drains `outputBuf` to the sink, waits for the output counter
/// to finish with the same buffer, recycles it and releases the reader.
///
/// On a sink failure the writer stops writing, requests an abort and keeps
/// running the protocol until the reader closes the stream.
pub fn run_writer<W: Write>(
    sink: W,
    padding: PaddingMode,
    signals: WriterSignals,
    control: &PipelineControl,
) -> Result<StageReport, PipelineError> {
    let stage = Stage::Write;
    let mut report = StageReport::new(stage);
    let mut sink = BufWriter::new(sink);
    let mut failure = None;

    debug!("{} starting, padding {:?}", stage.tag(), padding);

    loop {
        // First acquisition: data ready.
        let ready = wait(&signals.can_write, stage, CAN_WRITE)?;

        let start = Instant::now();
        let cycle = ready.cycle();
        let end_of_stream = ready.is_end_of_stream();

        if failure.is_none() {
            let bytes = match padding {
                PaddingMode::Emit => ready.as_slice(),
                PaddingMode::Trim => ready.data(),
            };
            let mut result = sink.write_all(bytes);
            if result.is_ok() {
                report.counters.add_write(bytes.len());
                if end_of_stream {
                    result = sink.flush();
                }
            }
            if let Err(source) = result {
                error!("{} write failed in cycle {cycle}: {source}", stage.tag());
                control.abort();
                failure = Some(PipelineError::Write { cycle, source });
            }
        }
        report.busy += start.elapsed();

        // Second acquisition: output counter is done with the buffer.
        let counted = wait(&signals.output_counted, stage, OUTPUT_COUNTED)?;
        drop(ready);
        report.cycles += 1;

        if end_of_stream {
            break;
        }

        let output = BoundedStageBuffer::reclaim(counted, stage)?;
        raise(&signals.output_returned, output, stage, OUTPUT_RETURNED)?;
        raise(&signals.can_read, (), stage, CAN_READ)?;
    }

    debug!(
        "{} finished after {} cycles, {} bytes",
        stage.tag(),
        report.cycles,
        report.counters.bytes_written
    );

    match failure {
        Some(err) => Err(err),
        None => Ok(report),
    }
}
