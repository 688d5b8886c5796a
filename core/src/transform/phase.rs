//! transform/phase.rs
//! Rotation phase of the substitution cipher.

use std::fmt;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Three-valued rotation state, advanced once per alphabetic byte.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash,
    IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RotationPhase {
    #[default]
    Increment = 0,
    Decrement = 1,
    Identity  = 2,
}

impl RotationPhase {
    /// Fixed cycle: increment → decrement → identity → increment.
    pub const fn next(self) -> Self {
        match self {
            RotationPhase::Increment => RotationPhase::Decrement,
            RotationPhase::Decrement => RotationPhase::Identity,
            RotationPhase::Identity  => RotationPhase::Increment,
        }
    }

    /// Phase reached after `letters` alphabetic bytes starting from `self`.
    pub fn advance_by(self, letters: u64) -> Self {
        let start = u8::from(self) as u64;
        // Always < 3, so the conversion cannot fail.
        match RotationPhase::try_from(((start + letters % 3) % 3) as u8) {
            Ok(phase) => phase,
            Err(_) => self,
        }
    }
}

impl fmt::Display for RotationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationPhase::Increment => "increment",
            RotationPhase::Decrement => "decrement",
            RotationPhase::Identity  => "identity",
        };
        f.write_str(name)
    }
}

impl FromStr for RotationPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "increment" | "inc" | "+" => Ok(RotationPhase::Increment),
            "decrement" | "dec" | "-" => Ok(RotationPhase::Decrement),
            "identity"  | "id"  | "=" => Ok(RotationPhase::Identity),
            other => Err(format!("unknown rotation phase: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_in_fixed_order() {
        let p = RotationPhase::Increment;
        assert_eq!(p.next(), RotationPhase::Decrement);
        assert_eq!(p.next().next(), RotationPhase::Identity);
        assert_eq!(p.next().next().next(), RotationPhase::Increment);
    }

    #[test]
    fn raw_values_round_trip() {
        assert_eq!(RotationPhase::try_from(1u8).unwrap(), RotationPhase::Decrement);
        assert!(RotationPhase::try_from(3u8).is_err());
    }
}
