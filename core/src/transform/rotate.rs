//! transform/rotate.rs
//! Per-byte rotating substitution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::phase::RotationPhase;

/// Which way the phase sequence is applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increment / decrement / identity, as phases say.
    #[default]
    Forward,
    /// Undo a forward pass that started from the same phase.
    Inverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Inverse => f.write_str("inverse"),
        }
    }
}

/// Next letter within the same case, Z→A and z→a.
#[inline]
pub fn shift_up(letter: u8) -> u8 {
    match letter {
        b'Z' => b'A',
        b'z' => b'a',
        _ => letter + 1,
    }
}

/// Previous letter within the same case, A→Z and a→z.
#[inline]
pub fn shift_down(letter: u8) -> u8 {
    match letter {
        b'A' => b'Z',
        b'a' => b'z',
        _ => letter - 1,
    }
}

/// Pure step: `(byte, phase) -> (byte', phase')`.
///
/// Non-alphabetic bytes pass through and leave the phase untouched.
pub fn rotate_byte(byte: u8, phase: RotationPhase, direction: Direction) -> (u8, RotationPhase) {
    if !byte.is_ascii_alphabetic() {
        return (byte, phase);
    }

    let out = match (phase, direction) {
        (RotationPhase::Identity, _) => byte,
        (RotationPhase::Increment, Direction::Forward)
        | (RotationPhase::Decrement, Direction::Inverse) => shift_up(byte),
        (RotationPhase::Decrement, Direction::Forward)
        | (RotationPhase::Increment, Direction::Inverse) => shift_down(byte),
    };

    (out, phase.next())
}

/// Stateful transform owned by the transformer stage.
///
/// The phase persists across calls, so a stream split into cycles yields the
/// same bytes as the stream transformed in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingTransform {
    phase: RotationPhase,
    direction: Direction,
    letters_seen: u64,
}

impl Default for RotatingTransform {
    fn default() -> Self {
        Self::new(RotationPhase::default(), Direction::Forward)
    }
}

impl RotatingTransform {
    pub fn new(phase: RotationPhase, direction: Direction) -> Self {
        Self { phase, direction, letters_seen: 0 }
    }

    pub fn forward() -> Self {
        Self::new(RotationPhase::Increment, Direction::Forward)
    }

    pub fn inverse() -> Self {
        Self::new(RotationPhase::Increment, Direction::Inverse)
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Alphabetic bytes processed so far.
    pub fn letters_seen(&self) -> u64 {
        self.letters_seen
    }

    /// Transform one byte, advancing the phase on letters.
    #[inline]
    pub fn apply(&mut self, byte: u8) -> u8 {
        let (out, next) = rotate_byte(byte, self.phase, self.direction);
        if byte.is_ascii_alphabetic() {
            self.letters_seen += 1;
        }
        self.phase = next;
        out
    }

    /// Transform `input` into `output` slot by slot.
    ///
    /// Both slices must have the same length.
    pub fn apply_into(&mut self, input: &[u8], output: &mut [u8]) {
        debug_assert_eq!(input.len(), output.len());
        for (dst, &src) in output.iter_mut().zip(input) {
            *dst = self.apply(src);
        }
    }

    /// Convenience for tests and small payloads.
    pub fn apply_vec(&mut self, input: &[u8]) -> Vec<u8> {
        input.iter().map(|&b| self.apply(b)).collect()
    }
}
