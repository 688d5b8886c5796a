//! stream/buffer.rs
//! Fixed-capacity stage buffer with end-of-stream marker.
//!
//! A buffer is either exclusively owned by its producer (`BoundedStageBuffer`)
//! or frozen and shared by its two consumers (`SharedStageBuffer`). The
//! producer gets it back through `reclaim` once both consumers have handed
//! their references back, so a refill can never race a reader.

use std::sync::Arc;

use bytes::BytesMut;

use crate::telemetry::Stage;
use crate::types::PipelineError;

/// Frozen buffer handed to the consumers of a cycle.
pub type SharedStageBuffer = Arc<BoundedStageBuffer>;

#[derive(Debug)]
pub struct BoundedStageBuffer {
    name: &'static str,
    slots: BytesMut,
    filled: usize,
    cycle: u64,
    end_of_stream: bool,
}

impl BoundedStageBuffer {
    /// Allocate `capacity` zeroed slots. Never resized afterwards.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            slots: BytesMut::zeroed(capacity),
            filled: 0,
            cycle: 0,
            end_of_stream: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots holding real data this cycle; the rest are zero.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn padding(&self) -> usize {
        self.capacity() - self.filled
    }

    /// 1-based cycle the contents belong to (0 before the first cycle).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// All N slots, padding included.
    pub fn as_slice(&self) -> &[u8] {
        &self.slots[..]
    }

    /// Only the slots that carry data.
    pub fn data(&self) -> &[u8] {
        &self.slots[..self.filled]
    }

    /// Start writing cycle `cycle`.
    pub fn begin_cycle(&mut self, cycle: u64) {
        self.cycle = cycle;
        self.filled = 0;
        self.end_of_stream = false;
    }

    pub fn slots_mut(&mut self) -> &mut [u8] {
        &mut self.slots[..]
    }

    /// Publish the cycle: `filled` data slots, the remainder zeroed.
    pub fn commit(&mut self, filled: usize, end_of_stream: bool) {
        let filled = filled.min(self.capacity());
        self.slots[filled..].fill(0);
        self.filled = filled;
        self.end_of_stream = end_of_stream;
    }

    pub fn share(self) -> SharedStageBuffer {
        Arc::new(self)
    }

    /// Take back exclusive ownership once every other reference is gone.
    pub fn reclaim(shared: SharedStageBuffer, stage: Stage) -> Result<Self, PipelineError> {
        Arc::try_unwrap(shared).map_err(|still_shared| PipelineError::BufferStillShared {
            stage,
            buffer: still_shared.name,
            cycle: still_shared.cycle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_zeroes_tail() {
        let mut buf = BoundedStageBuffer::new("input", 6);
        buf.begin_cycle(1);
        buf.slots_mut().copy_from_slice(b"abcdef");
        buf.commit(6, false);
        assert_eq!(buf.data(), b"abcdef");

        buf.begin_cycle(2);
        buf.slots_mut()[..2].copy_from_slice(b"xy");
        buf.commit(2, true);
        assert_eq!(buf.as_slice(), b"xy\0\0\0\0");
        assert_eq!(buf.padding(), 4);
        assert!(buf.is_end_of_stream());
        assert_eq!(buf.cycle(), 2);
    }

    #[test]
    fn reclaim_fails_while_shared() {
        let shared = BoundedStageBuffer::new("output", 4).share();
        let extra = shared.clone();
        let err = BoundedStageBuffer::reclaim(shared, Stage::Write).unwrap_err();
        assert!(matches!(err, PipelineError::BufferStillShared { buffer: "output", .. }));
        drop(extra);
    }

    #[test]
    fn reclaim_succeeds_when_last_reference() {
        let shared = BoundedStageBuffer::new("input", 4).share();
        let other = shared.clone();
        drop(other);
        let buf = BoundedStageBuffer::reclaim(shared, Stage::Read).unwrap();
        assert_eq!(buf.capacity(), 4);
    }
}
