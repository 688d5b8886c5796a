//! stream/signals.rs
//! Hand-off channels between the five stages.
//!
//! Every signal is a bounded channel of depth one. Channels that carry a
//! buffer transfer the right to touch it along with the wake-up:
//!
//! ```text
//! can_read         Writer        -> Reader        ()            seeded with 1 permit
//! input_returned   InputCounter  -> Reader        inputBuf      seeded with inputBuf
//! can_transform    Reader        -> Transformer   inputBuf
//! can_count_input  Reader        -> InputCounter  inputBuf
//! output_returned  Writer        -> Transformer   outputBuf     seeded with outputBuf
//! can_write        Transformer   -> Writer        outputBuf     "data ready"
//! can_count_output Transformer   -> OutputCounter outputBuf
//! output_counted   OutputCounter -> Writer        outputBuf     "safe to recycle"
//! ```
//!
//! The Reader refills only after both `can_read` and `input_returned`, and the
//! Writer releases `can_read` only after both `can_write` and `output_counted`.

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::constants::SIGNAL_DEPTH;
use crate::stream::buffer::{BoundedStageBuffer, SharedStageBuffer};
use crate::telemetry::Stage;
use crate::types::PipelineError;

pub const CAN_READ: &str = "can_read";
pub const INPUT_RETURNED: &str = "input_returned";
pub const CAN_TRANSFORM: &str = "can_transform";
pub const CAN_COUNT_INPUT: &str = "can_count_input";
pub const OUTPUT_RETURNED: &str = "output_returned";
pub const CAN_WRITE: &str = "can_write";
pub const CAN_COUNT_OUTPUT: &str = "can_count_output";
pub const OUTPUT_COUNTED: &str = "output_counted";

pub struct ReaderSignals {
    pub can_read: Receiver<()>,
    pub input_returned: Receiver<SharedStageBuffer>,
    pub can_transform: Sender<SharedStageBuffer>,
    pub can_count_input: Sender<SharedStageBuffer>,
}

pub struct TransformerSignals {
    pub can_transform: Receiver<SharedStageBuffer>,
    pub output_returned: Receiver<BoundedStageBuffer>,
    pub can_write: Sender<SharedStageBuffer>,
    pub can_count_output: Sender<SharedStageBuffer>,
}

pub struct WriterSignals {
    pub can_write: Receiver<SharedStageBuffer>,
    pub output_counted: Receiver<SharedStageBuffer>,
    pub output_returned: Sender<BoundedStageBuffer>,
    pub can_read: Sender<()>,
}

/// Counter stages share one shape: take a buffer, tally, hand it back.
pub struct CounterSignals {
    pub ready: Receiver<SharedStageBuffer>,
    pub ready_name: &'static str,
    pub done: Sender<SharedStageBuffer>,
    pub done_name: &'static str,
}

/// The full set, split per stage so each thread owns only its own ends.
pub struct StageSignals {
    pub reader: ReaderSignals,
    pub transformer: TransformerSignals,
    pub writer: WriterSignals,
    pub input_counter: CounterSignals,
    pub output_counter: CounterSignals,
}

impl StageSignals {
    /// Allocate both buffers with `capacity` slots and wire every channel in
    /// its initial state: one read permit, both buffers parked with their
    /// producers.
    pub fn wire(capacity: usize) -> Result<Self, PipelineError> {
        let (can_read_tx, can_read_rx) = bounded::<()>(SIGNAL_DEPTH);
        let (input_returned_tx, input_returned_rx) = bounded(SIGNAL_DEPTH);
        let (can_transform_tx, can_transform_rx) = bounded(SIGNAL_DEPTH);
        let (can_count_input_tx, can_count_input_rx) = bounded(SIGNAL_DEPTH);
        let (output_returned_tx, output_returned_rx) = bounded(SIGNAL_DEPTH);
        let (can_write_tx, can_write_rx) = bounded(SIGNAL_DEPTH);
        let (can_count_output_tx, can_count_output_rx) = bounded(SIGNAL_DEPTH);
        let (output_counted_tx, output_counted_rx) = bounded(SIGNAL_DEPTH);

        // Initial counts: canRead = 1, every other signal = 0.
        raise(&can_read_tx, (), Stage::Read, CAN_READ)?;
        raise(
            &input_returned_tx,
            BoundedStageBuffer::new("input", capacity).share(),
            Stage::Read,
            INPUT_RETURNED,
        )?;
        raise(
            &output_returned_tx,
            BoundedStageBuffer::new("output", capacity),
            Stage::Transform,
            OUTPUT_RETURNED,
        )?;

        Ok(Self {
            reader: ReaderSignals {
                can_read: can_read_rx,
                input_returned: input_returned_rx,
                can_transform: can_transform_tx,
                can_count_input: can_count_input_tx,
            },
            transformer: TransformerSignals {
                can_transform: can_transform_rx,
                output_returned: output_returned_rx,
                can_write: can_write_tx,
                can_count_output: can_count_output_tx,
            },
            writer: WriterSignals {
                can_write: can_write_rx,
                output_counted: output_counted_rx,
                output_returned: output_returned_tx,
                can_read: can_read_tx,
            },
            input_counter: CounterSignals {
                ready: can_count_input_rx,
                ready_name: CAN_COUNT_INPUT,
                done: input_returned_tx,
                done_name: INPUT_RETURNED,
            },
            output_counter: CounterSignals {
                ready: can_count_output_rx,
                ready_name: CAN_COUNT_OUTPUT,
                done: output_counted_tx,
                done_name: OUTPUT_COUNTED,
            },
        })
    }
}

/// Block until `signal` fires; a hung-up peer becomes `Disconnected`.
pub fn wait<T>(rx: &Receiver<T>, stage: Stage, signal: &'static str) -> Result<T, PipelineError> {
    rx.recv().map_err(|_| PipelineError::Disconnected { stage, signal })
}

/// Fire `signal`, moving `msg` to the peer.
pub fn raise<T>(
    tx: &Sender<T>,
    msg: T,
    stage: Stage,
    signal: &'static str,
) -> Result<(), PipelineError> {
    tx.send(msg).map_err(|_| PipelineError::Disconnected { stage, signal })
}
