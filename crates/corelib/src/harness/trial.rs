//! One exhaustive trial: a fixed factor tuple, every entropy value of the width.

use crate::chain::mixed_radix;
use crate::config::MAX_SWEEP_BITS;
use crate::errors::{Violation, Window};
use crate::extract::{Extraction, ExtractorKind};
use crate::harness::histogram::Histogram;
use crate::width::Width;

pub const STAGES: usize = 4;

type StepFn = fn(Width, u64, u64) -> Extraction;

/// Output windows tracked for an extractor, as 0-based inclusive stage ranges.
///
/// The corrected extractor must be near-uniform on every contiguous window,
/// since its leftover is a fresh entropy value at every stage. The simple
/// extractor only promises that for windows starting at the first output.
pub fn tracked_windows(kind: ExtractorKind) -> Vec<(usize, usize)> {
    match kind {
        ExtractorKind::Simple => (0..STAGES).map(|last| (0, last)).collect(),
        ExtractorKind::Corrected => (0..STAGES)
            .flat_map(|first| (first..STAGES).map(move |last| (first, last)))
            .collect(),
    }
}

struct WindowCounter {
    first: usize,
    last: usize,
    hist: Histogram,
}

/// Counters for one extractor over one trial. Dropped when the trial ends.
struct ChainCounters {
    kind: ExtractorKind,
    step: StepFn,
    windows: Vec<WindowCounter>,
    leftovers: Vec<Histogram>,
}

impl ChainCounters {
    fn new(kind: ExtractorKind, step: StepFn, width: Width, factors: &[u64; STAGES]) -> Self {
        let windows = tracked_windows(kind)
            .into_iter()
            .map(|(first, last)| WindowCounter {
                first,
                last,
                hist: Histogram::new(factors[first..=last].iter().product::<u64>() as usize),
            })
            .collect();
        let leftovers = match kind {
            ExtractorKind::Simple => Vec::new(),
            ExtractorKind::Corrected => (1..STAGES)
                .map(|_| Histogram::new(width.domain_size() as usize))
                .collect(),
        };
        Self {
            kind,
            step,
            windows,
            leftovers,
        }
    }

    fn observe(
        &mut self,
        width: Width,
        factors: &[u64; STAGES],
        x1: u64,
    ) -> Result<(), Violation> {
        let mut outputs = [0u64; STAGES];
        let mut cur = x1;
        for (stage, &n) in factors.iter().enumerate() {
            let e = (self.step)(width, cur, n);
            if e.output >= n {
                return Err(Violation::OutputOutOfRange {
                    kind: self.kind,
                    bits: width.bits(),
                    factors: *factors,
                    x1,
                    stage: stage + 1,
                    output: e.output,
                    n,
                });
            }
            outputs[stage] = e.output;
            if let Some(h) = self.leftovers.get_mut(stage) {
                h.record(e.leftover);
            }
            cur = e.leftover;
        }
        for w in &mut self.windows {
            let range = w.first..=w.last;
            w.hist.record(mixed_radix(&outputs[range.clone()], &factors[range]));
        }
        Ok(())
    }

    fn verify(&self, bits: u32, factors: &[u64; STAGES]) -> Result<(), Violation> {
        for (i, h) in self.leftovers.iter().enumerate() {
            if let Some((value, count)) = h.first_non_unit() {
                return Err(Violation::LeftoverNotBijective {
                    bits,
                    factors: *factors,
                    stage: i + 1,
                    value,
                    count,
                });
            }
        }
        for w in &self.windows {
            if !w.hist.is_near_uniform() {
                let (min, max) = w.hist.spread();
                return Err(Violation::NotNearUniform {
                    kind: self.kind,
                    bits,
                    factors: *factors,
                    window: Window {
                        first: w.first + 1,
                        last: w.last + 1,
                    },
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Walk every `x1` in the width's domain through both extractors and check
/// all tracked distributions. Returns the number of entropy values walked.
///
/// # Panics
/// If `width` is [`MAX_SWEEP_BITS`] or wider, or a factor is not a valid range
/// size for `width`.
pub fn run_trial(width: Width, factors: [u64; STAGES]) -> Result<u64, Violation> {
    let bits = width.bits();
    assert!(bits < MAX_SWEEP_BITS, "cannot sweep {bits} bits exhaustively");
    for n in factors {
        if let Err(e) = width.check_range(n) {
            panic!("invalid trial factors {factors:?}: {e}");
        }
    }
    let steps = ExtractorKind::ALL.map(|kind| {
        let step: StepFn = match kind {
            ExtractorKind::Simple => |w, x, n| ExtractorKind::Simple.apply(w, x, n),
            ExtractorKind::Corrected => |w, x, n| ExtractorKind::Corrected.apply(w, x, n),
        };
        (kind, step)
    });
    run_trial_with(width, factors, &steps)
}

fn run_trial_with(
    width: Width,
    factors: [u64; STAGES],
    steps: &[(ExtractorKind, StepFn)],
) -> Result<u64, Violation> {
    let mut counters: Vec<ChainCounters> = steps
        .iter()
        .map(|&(kind, step)| ChainCounters::new(kind, step, width, &factors))
        .collect();
    let domain = 1u64 << width.bits();
    for x1 in 0..domain {
        for c in &mut counters {
            c.observe(width, &factors, x1)?;
        }
    }
    for c in &counters {
        c.verify(width.bits(), &factors)?;
    }
    tracing::trace!(bits = width.bits(), ?factors, "trial passed");
    Ok(domain)
}
