//! Exhaustive verification of both extractors over small widths.
//!
//! For every width the harness enumerates every product `P` in
//! `[min_product, 2^(2*BITS))`, every ordered factorization of `P` into four
//! factors in `[2, 2^BITS)`, and for each factorization walks all `2^BITS`
//! entropy values through a four-stage chain of each extractor. A trial fails
//! on the first output out of range, non-uniform distribution, or corrected
//! leftover that is not a permutation. The sweep stops at the first failure.

pub mod factor;
pub mod histogram;
pub mod trial;

use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{HarnessConfig, MAX_SWEEP_BITS};
use crate::errors::Violation;
use crate::width::Width;

use self::factor::factorizations;
use self::trial::run_trial;

/// What one width's sweep covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthReport {
    pub bits: u32,
    /// Products with at least one admissible factorization.
    pub products: u64,
    pub factorizations: u64,
    /// Entropy values walked, summed over all trials.
    pub entropy_values: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub widths: Vec<WidthReport>,
}

impl SweepReport {
    pub fn factorizations(&self) -> u64 {
        self.widths.iter().map(|w| w.factorizations).sum()
    }
}

/// Verify every factorization for a single width.
///
/// # Panics
/// If `width` is [`MAX_SWEEP_BITS`] or wider.
pub fn verify_width(width: Width, cfg: &HarnessConfig) -> Result<WidthReport, Violation> {
    let bits = width.bits();
    assert!(bits < MAX_SWEEP_BITS, "cannot sweep {bits} bits exhaustively");
    let mut report = WidthReport {
        bits,
        products: 0,
        factorizations: 0,
        entropy_values: 0,
    };
    if bits == 0 {
        return Ok(report);
    }
    let limit = 1u64 << bits;
    let bound = 1u64 << (2 * bits);
    for p in cfg.min_product..bound {
        let mut hit = false;
        for factors in factorizations(p, limit, cfg.shifts) {
            hit = true;
            report.factorizations += 1;
            report.entropy_values += run_trial(width, factors)?;
        }
        if hit {
            report.products += 1;
        }
    }
    tracing::debug!(
        bits,
        products = report.products,
        factorizations = report.factorizations,
        entropy_values = report.entropy_values,
        "width verified"
    );
    Ok(report)
}

/// Run the full sweep, writing `"<BITS> BITS"` to `progress` before each width.
///
/// A [`Violation`] aborts the sweep; it can be recovered from the returned error
/// with `downcast_ref::<Violation>()`.
pub fn run<W: Write>(cfg: &HarnessConfig, progress: &mut W) -> Result<SweepReport> {
    cfg.validate()?;
    let mut report = SweepReport::default();
    for bits in cfg.min_bits..cfg.max_bits {
        let width = Width::new(bits)?;
        writeln!(progress, "{}", width)?;
        progress.flush()?;
        report.widths.push(verify_width(width, cfg)?);
    }
    Ok(report)
}
