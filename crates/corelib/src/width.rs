//! Bit-width of an entropy value, plus the domain checks every extraction relies on.
//! - `x` must fit in `bits` bits
//! - `n` must lie in `[1, 2^bits)`

use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;

pub const MAX_BITS: u32 = 64;

/// A validated entropy width in `0..=64` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Width {
    bits: u32,
}

impl Width {
    pub fn new(bits: u32) -> Result<Self, ExtractError> {
        if bits > MAX_BITS {
            return Err(ExtractError::WidthOutOfRange { bits });
        }
        Ok(Self { bits })
    }

    pub fn bits(self) -> u32 {
        self.bits
    }

    /// `2^bits - 1`: the largest entropy value and the largest range size.
    pub fn mask(self) -> u64 {
        if self.bits == MAX_BITS {
            u64::MAX
        } else {
            (1u64 << self.bits) - 1
        }
    }

    /// Number of distinct entropy values, `2^bits`.
    pub fn domain_size(self) -> u128 {
        1u128 << self.bits
    }

    /// Ensure `x` fits within the width.
    pub fn check_entropy(self, x: u64) -> Result<(), ExtractError> {
        if x & !self.mask() != 0 {
            return Err(ExtractError::EntropyOutOfRange { x, bits: self.bits });
        }
        Ok(())
    }

    /// Ensure `n` is a usable range size: at least one outcome, at most `2^bits - 1`.
    pub fn check_range(self, n: u64) -> Result<(), ExtractError> {
        if n == 0 || n > self.mask() {
            return Err(ExtractError::RangeOutOfDomain { n, bits: self.bits });
        }
        Ok(())
    }
}

impl TryFrom<u32> for Width {
    type Error = ExtractError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Width::new(bits)
    }
}

impl From<Width> for u32 {
    fn from(w: Width) -> u32 {
        w.bits
    }
}

impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} BITS", self.bits)
    }
}
