//! Frequency counters used by a single trial.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u32>,
}

impl Histogram {
    pub fn new(buckets: usize) -> Self {
        Self {
            counts: vec![0; buckets],
        }
    }

    #[inline]
    pub fn record(&mut self, bucket: u64) {
        self.counts[bucket as usize] += 1;
    }

    pub fn buckets(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// `(min, max)` over all buckets; `(0, 0)` when there are none.
    pub fn spread(&self) -> (u32, u32) {
        let min = self.counts.iter().copied().min().unwrap_or(0);
        let max = self.counts.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    /// Every bucket was hit `floor` or `ceil` times.
    pub fn is_near_uniform(&self) -> bool {
        let (min, max) = self.spread();
        max - min <= 1
    }

    /// First bucket not hit exactly once, with its count.
    pub fn first_non_unit(&self) -> Option<(u64, u32)> {
        self.counts
            .iter()
            .position(|&c| c != 1)
            .map(|i| (i as u64, self.counts[i]))
    }
}
