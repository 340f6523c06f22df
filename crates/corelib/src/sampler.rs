//! Drawing many bounded values from a stream of fixed-width entropy words.
//!
//! A [`RangeSampler`] keeps one entropy word and extracts from it with the
//! corrected extractor until the product of the ranges drawn would exceed
//! `2^bits`; then it pulls a fresh word from its [`EntropySource`]. Within one
//! word, every prefix of draws is near-uniform.

use crate::crypto::hash::entropy_from_digest;
use crate::crypto::registry::{entropy_by_id, labeled_hasher_by_id, LabeledHashFn};
use crate::errors::ExtractError;
use crate::extract::ExtractorKind;
use crate::width::Width;

/// A supply of uniformly distributed `width()`-bit values.
pub trait EntropySource {
    fn width(&self) -> Width;
    fn next_entropy(&mut self) -> u64;
}

/// Entropy words `H(label || seed || counter)` for counter = 0, 1, 2, ...
pub struct DigestSource {
    hash: LabeledHashFn,
    label: String,
    seed: Vec<u8>,
    counter: u64,
    width: Width,
}

impl DigestSource {
    pub fn new(
        hash_id: &str,
        label: &str,
        seed: &[u8],
        width: Width,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            hash: labeled_hasher_by_id(hash_id)?,
            label: label.to_string(),
            seed: seed.to_vec(),
            counter: 0,
            width,
        })
    }

    /// Number of words drawn so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

impl EntropySource for DigestSource {
    fn width(&self) -> Width {
        self.width
    }

    fn next_entropy(&mut self) -> u64 {
        let ctr = self.counter.to_le_bytes();
        let digest = (self.hash)(&self.label, &[self.seed.as_slice(), ctr.as_slice()]);
        self.counter += 1;
        entropy_from_digest(&digest, self.width)
    }
}

pub struct RangeSampler<S> {
    source: S,
    entropy: u64,
    /// Largest range still drawable from `entropy`: `floor(2^bits / product drawn)`.
    budget: u128,
}

impl<S: EntropySource> RangeSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entropy: 0,
            budget: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Uniform value in `[0, n)`.
    pub fn next_below(&mut self, n: u64) -> Result<u64, ExtractError> {
        let width = self.source.width();
        if n == 0 {
            return Err(ExtractError::EmptyRange);
        }
        width.check_range(n)?;
        if u128::from(n) > self.budget {
            self.entropy = self.source.next_entropy();
            self.budget = width.domain_size();
        }
        let e = ExtractorKind::Corrected.apply(width, self.entropy, n);
        self.entropy = e.leftover;
        self.budget /= u128::from(n);
        Ok(e.output)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), ExtractError> {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i as u64 + 1)? as usize;
            items.swap(i, j);
        }
        Ok(())
    }

    /// Index `i` with probability `weights[i] / sum(weights)`.
    pub fn pick_weighted(&mut self, weights: &[u64]) -> Result<usize, ExtractError> {
        let width = self.source.width();
        let total: u128 = weights.iter().map(|&w| u128::from(w)).sum();
        if total == 0 {
            return Err(ExtractError::EmptyRange);
        }
        if total > u128::from(width.mask()) {
            return Err(ExtractError::WeightsExceedWidth {
                total,
                bits: width.bits(),
            });
        }
        let mut r = self.next_below(total as u64)?;
        let i = weights
            .iter()
            .position(|&w| {
                if r < w {
                    return true;
                }
                r -= w;
                false
            })
            .expect("draw below total weight lands in a bucket");
        Ok(i)
    }
}

/// Shard in `[0, shards)` for `key`, from a single 64-bit extraction.
pub fn shard_of(
    hash_id: &str,
    label: &str,
    key: &[u8],
    shards: u64,
) -> Result<u64, ExtractError> {
    let width = Width::new(64)?;
    let x = entropy_by_id(hash_id, label, &[key], width)?;
    Ok(width.extract_corrected(x, shards)?.output)
}
