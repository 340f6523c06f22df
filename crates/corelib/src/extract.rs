//! Range extraction from a fixed-width entropy value.
//!
//! Both extractors treat `x` as a fixed-point fraction `x / 2^bits` of the unit
//! interval and scale it by `n`: the integer part of `x * n / 2^bits` is the
//! output, the fractional part (the low `bits` bits of `x * n`) is the leftover
//! entropy for the next extraction.
//!
//! The simple extractor stops there. Its leftover is in range but is not a
//! permutation of `x`: whenever `n` is even, the low bits of the product are
//! always zero and some leftover values are unreachable. The corrected extractor
//! fills those bits back in from the output (`(n - 1) & !n` selects exactly the
//! trailing zero bits of `n`), which makes `x -> leftover` a bijection on
//! `[0, 2^bits)`.
//!
//! # Preconditions
//! `x < 2^bits` and `0 < n < 2^bits`. The free functions panic when these do not
//! hold; the methods on [`Width`] return an [`ExtractError`] instead.

use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;
use crate::width::Width;

/// Result of one extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extraction {
    /// Value in `[0, n)`.
    pub output: u64,
    /// Remaining entropy, same width as the input.
    pub leftover: u64,
}

impl From<Extraction> for (u64, u64) {
    fn from(e: Extraction) -> Self {
        (e.output, e.leftover)
    }
}

/// Selects one of the two extraction algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Simple,
    Corrected,
}

impl ExtractorKind {
    pub const ALL: [ExtractorKind; 2] = [ExtractorKind::Simple, ExtractorKind::Corrected];

    /// Run this extractor without re-validating its inputs.
    /// Callers guarantee `x` and `n` are inside `width`'s domain.
    #[inline]
    pub fn apply(self, width: Width, x: u64, n: u64) -> Extraction {
        debug_assert!(width.check_entropy(x).is_ok() && width.check_range(n).is_ok());
        match self {
            ExtractorKind::Simple => simple(width, x, n),
            ExtractorKind::Corrected => corrected(width, x, n),
        }
    }
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorKind::Simple => write!(f, "simple"),
            ExtractorKind::Corrected => write!(f, "corrected"),
        }
    }
}

#[inline]
fn simple(width: Width, x: u64, n: u64) -> Extraction {
    let tmp = u128::from(x) * u128::from(n);
    Extraction {
        output: (tmp >> width.bits()) as u64,
        leftover: (tmp as u64) & width.mask(),
    }
}

#[inline]
fn corrected(width: Width, x: u64, n: u64) -> Extraction {
    let low_mask = (n - 1) & !n;
    let tmp = u128::from(x) * u128::from(n);
    let out = (tmp >> width.bits()) as u64;
    Extraction {
        output: out,
        leftover: ((tmp as u64) | (out & low_mask)) & width.mask(),
    }
}

fn checked_width(x: u64, n: u64, bits: u32) -> Width {
    let width = match Width::new(bits) {
        Ok(w) => w,
        Err(e) => panic!("{e}"),
    };
    if let Err(e) = width.check_entropy(x).and_then(|_| width.check_range(n)) {
        panic!("{e}");
    }
    width
}

/// Multiply-shift extraction. Panics if `x`, `n` or `bits` are out of domain.
///
/// ```
/// use urx_corelib::extract::extract_simple;
///
/// let e = extract_simple(200, 3, 8);
/// assert_eq!((e.output, e.leftover), (2, 88));
/// ```
pub fn extract_simple(x: u64, n: u64, bits: u32) -> Extraction {
    simple(checked_width(x, n, bits), x, n)
}

/// Bias-corrected extraction. Panics if `x`, `n` or `bits` are out of domain.
///
/// ```
/// use urx_corelib::extract::extract_corrected;
///
/// let e = extract_corrected(220, 6, 8);
/// assert_eq!((e.output, e.leftover), (5, 41));
/// ```
pub fn extract_corrected(x: u64, n: u64, bits: u32) -> Extraction {
    corrected(checked_width(x, n, bits), x, n)
}

impl Width {
    pub fn extract(self, kind: ExtractorKind, x: u64, n: u64) -> Result<Extraction, ExtractError> {
        self.check_entropy(x)?;
        self.check_range(n)?;
        Ok(kind.apply(self, x, n))
    }

    pub fn extract_simple(self, x: u64, n: u64) -> Result<Extraction, ExtractError> {
        self.extract(ExtractorKind::Simple, x, n)
    }

    pub fn extract_corrected(self, x: u64, n: u64) -> Result<Extraction, ExtractError> {
        self.extract(ExtractorKind::Corrected, x, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_values() {
        assert_eq!(extract_simple(200, 3, 8), Extraction { output: 2, leftover: 88 });
        assert_eq!(extract_corrected(200, 3, 8), Extraction { output: 2, leftover: 88 });
        assert_eq!(extract_simple(220, 6, 8), Extraction { output: 5, leftover: 40 });
        assert_eq!(extract_corrected(220, 6, 8), Extraction { output: 5, leftover: 41 });
    }

    #[test]
    fn single_outcome_range_is_identity() {
        for x in 0..256 {
            assert_eq!(extract_simple(x, 1, 8), Extraction { output: 0, leftover: x });
            assert_eq!(extract_corrected(x, 1, 8), Extraction { output: 0, leftover: x });
        }
    }

    #[test]
    fn full_width_uses_wide_product() {
        let e = extract_corrected(u64::MAX, u64::MAX, 64);
        assert_eq!(e.output, u64::MAX - 1);
        assert_eq!(e.leftover, 1);
    }

    #[test]
    fn checked_methods_reject_bad_input() {
        let w = Width::new(8).unwrap();
        assert_eq!(
            w.extract_simple(256, 3),
            Err(ExtractError::EntropyOutOfRange { x: 256, bits: 8 })
        );
        assert_eq!(
            w.extract_corrected(5, 0),
            Err(ExtractError::RangeOutOfDomain { n: 0, bits: 8 })
        );
        assert_eq!(
            w.extract_corrected(5, 256),
            Err(ExtractError::RangeOutOfDomain { n: 256, bits: 8 })
        );
    }

    #[test]
    #[should_panic(expected = "does not fit in 8 bits")]
    fn free_function_panics_on_wide_entropy() {
        extract_simple(300, 3, 8);
    }

    #[test]
    #[should_panic(expected = "range size 0")]
    fn free_function_panics_on_zero_range() {
        extract_corrected(3, 0, 8);
    }
}
