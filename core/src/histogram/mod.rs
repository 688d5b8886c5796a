//! histogram/mod.rs
//! Letter frequency accounting on both sides of the transform.
//!
//! Two independent instances exist per run; each is mutated only by its
//! counter stage and read only after every stage has joined.

pub mod counts;
pub mod report;

pub use counts::*;
pub use report::*;
