//! stream/stages: the five persistent stage loops.
//!
//! Each loop blocks once per cycle on its own signal (the writer twice),
//! does its work on the buffer it was handed, passes the buffer on, and
//! exits after the cycle that carries the end-of-stream marker.

pub mod types;
pub mod reader;
pub mod transformer;
pub mod writer;
pub mod counter;

pub use types::*;
pub use reader::run_reader;
pub use transformer::run_transformer;
pub use writer::run_writer;
pub use counter::run_counter;
