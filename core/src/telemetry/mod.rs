//! telemetry/mod.rs
//! Unified telemetry module: counters, timers, and immutable snapshots.
//!
//! - Stages keep private counters and timings; the coordinator merges them
//!   after join, so no atomics sit on the hot path.
//! - Snapshots are serde-serializable for `--stats` output.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
