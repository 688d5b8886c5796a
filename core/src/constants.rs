/// Letters per case in the ASCII alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Histogram buckets: 26 uppercase followed by 26 lowercase.
pub const HISTOGRAM_BUCKETS: usize = 2 * ALPHABET_LEN;

/// Offset of the first lowercase bucket.
pub const LOWERCASE_OFFSET: usize = ALPHABET_LEN;

/// Defaults when the caller supplies no cycle capacity.
pub const DEFAULT_CAPACITY: usize = 4 * 1024; // 4 KiB
/// Smallest usable cycle capacity.
pub const MIN_CAPACITY: usize = 1;
/// Max cycle capacity sanity bound (64 MiB).
pub const MAX_CAPACITY: usize = 64 * 1024 * 1024;

/// Number of stage threads spawned per run.
pub const STAGE_COUNT: usize = 5;

/// Every hand-off channel holds at most one message: cycles never overlap.
pub const SIGNAL_DEPTH: usize = 1;

/// Horizontal rule framing each histogram report block.
pub const REPORT_RULE: &str = "------------------------------------------";
