//! Successive extraction: each stage feeds its leftover into the next.

use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;
use crate::extract::ExtractorKind;
use crate::width::Width;

/// Outputs of a chain of extractions, plus the entropy left after each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOutcome {
    pub outputs: Vec<u64>,
    /// `leftovers[i]` is the entropy remaining after stage `i + 1`.
    pub leftovers: Vec<u64>,
}

impl ChainOutcome {
    /// Entropy remaining after the last stage (the input itself for an empty chain).
    pub fn remaining(&self) -> Option<u64> {
        self.leftovers.last().copied()
    }
}

/// Apply `ranges` in order, starting from `x`. A chain never mixes extractors.
pub fn extract_chain(
    kind: ExtractorKind,
    width: Width,
    x: u64,
    ranges: &[u64],
) -> Result<ChainOutcome, ExtractError> {
    width.check_entropy(x)?;
    let mut outputs = Vec::with_capacity(ranges.len());
    let mut leftovers = Vec::with_capacity(ranges.len());
    let mut cur = x;
    for &n in ranges {
        let e = width.extract(kind, cur, n)?;
        outputs.push(e.output);
        leftovers.push(e.leftover);
        cur = e.leftover;
    }
    Ok(ChainOutcome { outputs, leftovers })
}

/// Combine `outputs` into one index, `outputs[0]` least significant:
/// `sum(outputs[i] * radices[0] * .. * radices[i - 1])`.
#[inline]
pub fn mixed_radix(outputs: &[u64], radices: &[u64]) -> u64 {
    debug_assert_eq!(outputs.len(), radices.len());
    let mut index = 0u64;
    let mut scale = 1u64;
    for (&o, &r) in outputs.iter().zip(radices) {
        index += o * scale;
        scale *= r;
    }
    index
}
