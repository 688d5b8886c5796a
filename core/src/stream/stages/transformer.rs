// # `src/stream/stages/transformer.rs`

use std::time::Instant;

use tracing::{debug, trace};

use crate::stream::signals::{
    raise, wait, TransformerSignals, CAN_COUNT_OUTPUT, CAN_TRANSFORM, CAN_WRITE, OUTPUT_RETURNED,
};
use crate::stream::stages::types::StageReport;
use crate::telemetry::Stage;
use crate::transform::RotatingTransform;
use crate::types::PipelineError;

/// Transformer loop: maps `inputBuf` into `outputBuf` slot by slot and wakes
/// the writer and the output counter.
///
/// The transform is owned here for the whole run, so its phase carries over
/// from one cycle to the next. It is returned for inspection at the end.
pub fn run_transformer(
    mut transform: RotatingTransform,
    signals: TransformerSignals,
) -> Result<(StageReport, RotatingTransform), PipelineError> {
    let stage = Stage::Transform;
    let mut report = StageReport::new(stage);

    debug!("{} starting in phase {}", stage.tag(), transform.phase());

    loop {
        let input = wait(&signals.can_transform, stage, CAN_TRANSFORM)?;
        let mut output = wait(&signals.output_returned, stage, OUTPUT_RETURNED)?;

        let start = Instant::now();
        let end_of_stream = input.is_end_of_stream();
        output.begin_cycle(input.cycle());
        transform.apply_into(input.as_slice(), output.slots_mut());
        output.commit(input.filled(), end_of_stream);

        // inputBuf must be released before the writer can free the reader.
        drop(input);

        report.cycles += 1;
        report.busy += start.elapsed();
        trace!(
            "{} cycle {} done, next phase {}",
            stage.tag(),
            output.cycle(),
            transform.phase()
        );

        let shared = output.share();
        raise(&signals.can_count_output, shared.clone(), stage, CAN_COUNT_OUTPUT)?;
        raise(&signals.can_write, shared, stage, CAN_WRITE)?;

        if end_of_stream {
            break;
        }
    }

    debug!("{} finished after {} cycles", stage.tag(), report.cycles);
    Ok((report, transform))
}
