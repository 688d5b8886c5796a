//! transform/mod.rs
//! Rotating substitution cipher: +1, -1, 0 on successive letters.
//!
//! Not security relevant; it only gives the pipeline a stateful per-byte
//! function whose output depends on every letter seen before.

pub mod phase;
pub mod rotate;

pub use phase::*;
pub use rotate::*;
