// # `src/stream/stages/reader.rs`

use std::io::Read;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::stream::buffer::BoundedStageBuffer;
use crate::stream::io::{CycleSource, PartialRead};
use crate::stream::signals::{
    raise, wait, ReaderSignals, CAN_COUNT_INPUT, CAN_READ, CAN_TRANSFORM, INPUT_RETURNED,
};
use crate::stream::stages::types::{PipelineControl, StageReport};
use crate::telemetry::Stage;
use crate::types::PipelineError;

/// Reader loop: fills `inputBuf` once per cycle and wakes the transformer and
/// the input counter.
///
/// A read error closes the stream with whatever was read so far (zero padded)
/// so that every peer finishes the cycle; the error is returned afterwards.
pub fn run_reader<R: Read>(
    source: R,
    signals: ReaderSignals,
    control: &PipelineControl,
) -> Result<StageReport, PipelineError> {
    let stage = Stage::Read;
    let mut report = StageReport::new(stage);
    let mut source = CycleSource::new(source);
    let mut failure = None;

    debug!("{} starting", stage.tag());

    loop {
        wait(&signals.can_read, stage, CAN_READ)?;
        let returned = wait(&signals.input_returned, stage, INPUT_RETURNED)?;
        let mut input = BoundedStageBuffer::reclaim(returned, stage)?;

        let start = Instant::now();
        let cycle = report.cycles + 1;
        input.begin_cycle(cycle);

        let (filled, end_of_stream) = if control.is_aborted() {
            warn!("{} abort requested, closing stream at cycle {cycle}", stage.tag());
            (0, true)
        } else {
            match source.fill(input.slots_mut()) {
                Ok(fill) => (fill.filled, fill.exhausted),
                Err(PartialRead { filled, source }) => {
                    error!("{} read failed in cycle {cycle} after {filled} bytes: {source}", stage.tag());
                    failure = Some(PipelineError::Read { cycle, filled, source });
                    (filled, true)
                }
            }
        };

        input.commit(filled, end_of_stream);
        report.counters.add_read(filled, input.capacity());
        report.cycles = cycle;
        report.busy += start.elapsed();

        debug!(
            "{} cycle {cycle}: {filled}/{} bytes{}",
            stage.tag(),
            input.capacity(),
            if end_of_stream { ", end of stream" } else { "" }
        );

        let shared = input.share();
        raise(&signals.can_count_input, shared.clone(), stage, CAN_COUNT_INPUT)?;
        raise(&signals.can_transform, shared, stage, CAN_TRANSFORM)?;

        if end_of_stream {
            break;
        }
    }

    debug!("{} finished after {} cycles", stage.tag(), report.cycles);

    match failure {
        Some(err) => Err(err),
        None => Ok(report),
    }
}
