// ## `src/stream/pipeline.rs`
// ## Pure pipeline wiring (no transform logic)

use std::io::{Read, Write};
use std::thread::{self, ScopedJoinHandle};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::histogram::LetterHistogram;
use crate::stream::config::PipelineConfig;
use crate::stream::signals::StageSignals;
use crate::stream::stages::{
    run_counter, run_reader, run_transformer, run_writer, PipelineControl,
};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::transform::RotationPhase;
use crate::types::PipelineError;

/// Everything the run produced, available once all five stages have joined.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub input_histogram: LetterHistogram,
    pub output_histogram: LetterHistogram,
    /// Cycles completed; identical for every stage.
    pub cycles: u64,
    pub stage_cycles: Vec<(Stage, u64)>,
    /// Phase the transform would apply to the next letter.
    pub final_phase: RotationPhase,
    pub snapshot: TelemetrySnapshot,
    /// Bytes captured by an in-memory sink.
    #[serde(skip)]
    pub output: Option<Vec<u8>>,
}

impl PipelineOutcome {
    pub fn attach_output(&mut self, output: Vec<u8>) {
        self.output = Some(output);
    }
}

/// Run the five-stage pipeline over already-opened streams.
///
/// Spawns the reader, transformer, writer and both counters as scoped
/// threads, waits for all of them, then checks that they agree on the cycle
/// count. When several stages fail the root cause is reported.
pub fn run_pipeline<R, W>(
    reader: R,
    writer: W,
    config: &PipelineConfig,
) -> Result<PipelineOutcome, PipelineError>
where
    R: Read + Send,
    W: Write + Send,
{
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let control = PipelineControl::default();
    let StageSignals {
        reader: reader_signals,
        transformer: transformer_signals,
        writer: writer_signals,
        input_counter: input_counter_signals,
        output_counter: output_counter_signals,
    } = StageSignals::wire(config.capacity)?;
    let transform = config.transform();
    let padding = config.padding;

    info!(
        "[PIPELINE] start: capacity={} direction={} phase={} padding={:?}",
        config.capacity, config.direction, config.initial_phase, padding
    );

    let (read_res, transform_res, write_res, input_res, output_res) = thread::scope(|scope| {
        let control = &control;

        let reader_handle = scope.spawn(move || run_reader(reader, reader_signals, control));
        let transformer_handle =
            scope.spawn(move || run_transformer(transform, transformer_signals));
        let writer_handle =
            scope.spawn(move || run_writer(writer, padding, writer_signals, control));
        let input_counter_handle =
            scope.spawn(move || run_counter(Stage::CountInput, input_counter_signals));
        let output_counter_handle =
            scope.spawn(move || run_counter(Stage::CountOutput, output_counter_signals));

        debug!("[PIPELINE] five stages spawned, joining");

        (
            join_stage(reader_handle, Stage::Read),
            join_stage(transformer_handle, Stage::Transform),
            join_stage(writer_handle, Stage::Write),
            join_stage(input_counter_handle, Stage::CountInput),
            join_stage(output_counter_handle, Stage::CountOutput),
        )
    });
    timer.finish();

    let (
        reader,
        (transformer, transform),
        writer,
        (input_counter, input_histogram),
        (output_counter, output_histogram),
    ) = match (read_res, transform_res, write_res, input_res, output_res) {
        (Ok(r), Ok(t), Ok(w), Ok(i), Ok(o)) => (r, t, w, i, o),
        (r, t, w, i, o) => {
            let mut errors = [r.err(), t.err(), w.err(), i.err(), o.err()]
                .into_iter()
                .flatten();
            let first = match errors.next() {
                Some(err) => err,
                None => unreachable!("at least one stage result is an error"),
            };
            let root = errors.fold(first, prefer_root_cause);
            warn!("[PIPELINE] aborted: {root}");
            return Err(root);
        }
    };

    let reports = [reader, transformer, writer, input_counter, output_counter];
    let stage_cycles: Vec<(Stage, u64)> = reports.iter().map(|r| (r.stage, r.cycles)).collect();
    let cycles = reports[0].cycles;
    if stage_cycles.iter().any(|(_, n)| *n != cycles) {
        return Err(PipelineError::CycleMismatch { counts: stage_cycles });
    }

    let mut counters = TelemetryCounters::default();
    for report in &reports {
        counters.merge(&report.counters);
        timer.add_stage_time(report.stage, report.busy);
    }
    let snapshot = TelemetrySnapshot::from(&counters, &timer, config.capacity);

    info!(
        "[PIPELINE] done: {} cycles, {} bytes read, {} bytes written, {} letters",
        cycles, snapshot.bytes_read, snapshot.bytes_written, snapshot.letters_input
    );

    Ok(PipelineOutcome {
        input_histogram,
        output_histogram,
        cycles,
        stage_cycles,
        final_phase: transform.phase(),
        snapshot,
        output: None,
    })
}

fn join_stage<T>(
    handle: ScopedJoinHandle<'_, Result<T, PipelineError>>,
    stage: Stage,
) -> Result<T, PipelineError> {
    match handle.join() {
        Ok(res) => res,
        Err(_) => Err(PipelineError::StagePanicked { stage }),
    }
}

/// Keep the first error that is not merely an echo of another stage's failure.
fn prefer_root_cause(best: PipelineError, next: PipelineError) -> PipelineError {
    if best.is_secondary() && !next.is_secondary() {
        next
    } else {
        best
    }
}
