use thiserror::Error;

use crate::extract::ExtractorKind;

/// Caller misuse of the checked extraction entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("bit-width {bits} out of bounds [0..=64]")]
    WidthOutOfRange { bits: u32 },
    #[error("entropy value {x} does not fit in {bits} bits")]
    EntropyOutOfRange { x: u64, bits: u32 },
    #[error("range size {n} outside [1, 2^{bits})")]
    RangeOutOfDomain { n: u64, bits: u32 },
    #[error("cannot extract from an empty range")]
    EmptyRange,
    #[error("total weight {total} does not fit in {bits} bits")]
    WeightsExceedWidth { total: u128, bits: u32 },
    #[error("hash '{0}' not supported")]
    UnknownHash(String),
}

/// Which output window a frequency counter tracked, as 1-based stage numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub first: usize,
    pub last: usize,
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.first == self.last {
            write!(f, "output {}", self.first)
        } else {
            write!(f, "outputs {}-{}", self.first, self.last)
        }
    }
}

/// A broken invariant found by the verification harness. Every variant carries
/// the width and factor tuple, which is enough to replay the failing trial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error(
        "{kind} extractor: stage {stage} output {output} not below {n} \
         (bits={bits}, factors={factors:?}, x1={x1})"
    )]
    OutputOutOfRange {
        kind: ExtractorKind,
        bits: u32,
        factors: [u64; 4],
        x1: u64,
        stage: usize,
        output: u64,
        n: u64,
    },
    #[error(
        "{kind} extractor: {window} not near-uniform, counts span [{min}, {max}] \
         (bits={bits}, factors={factors:?})"
    )]
    NotNearUniform {
        kind: ExtractorKind,
        bits: u32,
        factors: [u64; 4],
        window: Window,
        min: u32,
        max: u32,
    },
    #[error(
        "leftover after stage {stage} not bijective: value {value} reached {count} times \
         (bits={bits}, factors={factors:?})"
    )]
    LeftoverNotBijective {
        bits: u32,
        factors: [u64; 4],
        stage: usize,
        value: u64,
        count: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_name_width_and_factors() {
        let v = Violation::NotNearUniform {
            kind: ExtractorKind::Simple,
            bits: 4,
            factors: [3, 3, 2, 2],
            window: Window { first: 1, last: 2 },
            min: 0,
            max: 3,
        };
        assert_eq!(
            v.to_string(),
            "simple extractor: outputs 1-2 not near-uniform, counts span [0, 3] \
             (bits=4, factors=[3, 3, 2, 2])"
        );

        let v = Violation::LeftoverNotBijective {
            bits: 3,
            factors: [2, 2, 2, 2],
            stage: 1,
            value: 4,
            count: 2,
        };
        let msg = v.to_string();
        assert!(msg.starts_with("leftover after stage 1 not bijective"));
        assert!(msg.contains("bits=3, factors=[2, 2, 2, 2]"));
    }

    #[test]
    fn violation_survives_anyhow() {
        let v = Violation::OutputOutOfRange {
            kind: ExtractorKind::Corrected,
            bits: 5,
            factors: [7, 3, 2, 4],
            x1: 9,
            stage: 2,
            output: 3,
            n: 3,
        };
        let err = anyhow::Error::from(v.clone());
        assert!(err.to_string().contains("bits=5, factors=[7, 3, 2, 4], x1=9"));
        assert_eq!(err.downcast_ref::<Violation>(), Some(&v));
    }

    #[test]
    fn single_output_window() {
        assert_eq!(Window { first: 3, last: 3 }.to_string(), "output 3");
    }
}
