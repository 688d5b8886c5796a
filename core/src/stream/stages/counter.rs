// # `src/stream/stages/counter.rs`

use std::time::Instant;

use tracing::{debug, trace};

use crate::histogram::LetterHistogram;
use crate::stream::signals::{raise, wait, CounterSignals};
use crate::stream::stages::types::StageReport;
use crate::telemetry::Stage;
use crate::types::PipelineError;

/// Counter loop shared by both sides: tally the buffer, hand it back.
///
/// The input counter hands `inputBuf` back to the reader; the output counter
/// hands `outputBuf` to the writer as its "safe to recycle" signal. After the
/// final cycle the reader may already be gone, so a closed hand-back channel
/// is only an error before the end of stream.
pub fn run_counter(
    stage: Stage,
    signals: CounterSignals,
) -> Result<(StageReport, LetterHistogram), PipelineError> {
    let mut report = StageReport::new(stage);
    let mut histogram = LetterHistogram::new();

    debug!("{} starting", stage.tag());

    loop {
        let buf = wait(&signals.ready, stage, signals.ready_name)?;

        let start = Instant::now();
        let letters = histogram.tally(buf.as_slice());
        match stage {
            Stage::CountInput => report.counters.add_input_letters(letters),
            _ => report.counters.add_output_letters(letters),
        }
        let end_of_stream = buf.is_end_of_stream();
        report.cycles += 1;
        report.busy += start.elapsed();
        trace!("{} cycle {}: {letters} letters", stage.tag(), buf.cycle());

        if let Err(err) = raise(&signals.done, buf, stage, signals.done_name) {
            if !end_of_stream {
                return Err(err);
            }
        }

        if end_of_stream {
            break;
        }
    }

    debug!("{} finished, {} letters", stage.tag(), histogram.total());
    Ok((report, histogram))
}
