//! histogram/counts.rs
//! 52-bucket letter tally.

use std::ops::AddAssign;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::constants::{ALPHABET_LEN, HISTOGRAM_BUCKETS, LOWERCASE_OFFSET};

/// Bucket for an ASCII letter, `None` for anything else.
///
/// Uppercase letters map to `0..26`, lowercase to `26..52`.
#[inline]
pub fn bucket_of(byte: u8) -> Option<usize> {
    match byte {
        b'A'..=b'Z' => Some((byte - b'A') as usize),
        b'a'..=b'z' => Some(LOWERCASE_OFFSET + (byte - b'a') as usize),
        _ => None,
    }
}

/// Letter stored in `bucket`.
#[inline]
pub fn letter_of(bucket: usize) -> u8 {
    debug_assert!(bucket < HISTOGRAM_BUCKETS);
    if bucket < LOWERCASE_OFFSET {
        b'A' + bucket as u8
    } else {
        b'a' + (bucket - LOWERCASE_OFFSET) as u8
    }
}

/// Letter occurrence counts, written by exactly one counter stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterHistogram {
    counts: [u64; HISTOGRAM_BUCKETS],
}

impl Default for LetterHistogram {
    fn default() -> Self {
        Self { counts: [0; HISTOGRAM_BUCKETS] }
    }
}

impl LetterHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every letter in `bytes`; returns how many letters were counted.
    pub fn tally(&mut self, bytes: &[u8]) -> u64 {
        let mut letters = 0;
        for &b in bytes {
            if let Some(i) = bucket_of(b) {
                self.counts[i] += 1;
                letters += 1;
            }
        }
        letters
    }

    /// Count for a single letter; zero for non-letters.
    pub fn count(&self, letter: u8) -> u64 {
        bucket_of(letter).map(|i| self.counts[i]).unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn merge(&mut self, other: &LetterHistogram) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += *b;
        }
    }

    /// `(letter, count)` over all 52 buckets, uppercase first.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &n)| (letter_of(i) as char, n))
    }

    /// `(upper, upper_count, lower, lower_count)` rows in A–Z order.
    pub fn paired_rows(&self) -> impl Iterator<Item = (char, u64, char, u64)> + '_ {
        (0..ALPHABET_LEN).map(move |i| {
            (
                letter_of(i) as char,
                self.counts[i],
                letter_of(i + LOWERCASE_OFFSET) as char,
                self.counts[i + LOWERCASE_OFFSET],
            )
        })
    }
}

impl AddAssign<&LetterHistogram> for LetterHistogram {
    fn add_assign(&mut self, rhs: &LetterHistogram) {
        self.merge(rhs);
    }
}

// Arrays over 32 elements have no serde impl; emit a letter → count map instead.
impl Serialize for LetterHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HISTOGRAM_BUCKETS))?;
        for (letter, n) in self.iter() {
            map.serialize_entry(&letter, &n)?;
        }
        map.end()
    }
}
