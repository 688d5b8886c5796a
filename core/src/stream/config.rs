//! stream/config.rs
//! Run configuration, fixed before the pipeline starts.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
use crate::transform::{Direction, RotatingTransform, RotationPhase};
use crate::types::PipelineError;

/// What the writer pushes to the sink each cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// All N slots, zero padding of the final cycle included.
    #[default]
    Emit,
    /// Only slots that came from the source.
    Trim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Cycle capacity N shared by both stage buffers.
    pub capacity: usize,
    pub padding: PaddingMode,
    pub direction: Direction,
    /// Phase applied to the first letter of the stream.
    pub initial_phase: RotationPhase,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            padding: PaddingMode::Emit,
            direction: Direction::Forward,
            initial_phase: RotationPhase::Increment,
        }
    }
}

impl PipelineConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }

    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_initial_phase(mut self, phase: RotationPhase) -> Self {
        self.initial_phase = phase;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(PipelineError::InvalidCapacity {
                requested: self.capacity,
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }

    /// Fresh transform for the transformer stage.
    pub fn transform(&self) -> RotatingTransform {
        RotatingTransform::new(self.initial_phase, self.direction)
    }
}
