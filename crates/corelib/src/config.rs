use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::harness::factor::FactorShifts;

/// Widths above this would push the `2^(2*BITS)` product bound past `u64`.
pub const MAX_SWEEP_BITS: u32 = 32;

/// Bounds of an exhaustive verification sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    pub min_bits: u32,    // first width tested
    pub max_bits: u32,    // exclusive
    pub min_product: u64, // smallest N1*N2*N3*N4 enumerated
    pub shifts: FactorShifts,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            min_bits: 0,
            max_bits: MAX_SWEEP_BITS,
            min_product: 16,
            shifts: FactorShifts::default(),
        }
    }
}

impl HarnessConfig {
    pub fn new(min_bits: u32, max_bits: u32) -> Self {
        Self {
            min_bits,
            max_bits,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_bits > MAX_SWEEP_BITS {
            return Err(anyhow!(
                "max_bits {} out of allowed range [0..={}]",
                self.max_bits,
                MAX_SWEEP_BITS
            ));
        }
        if self.min_bits > self.max_bits {
            return Err(anyhow!(
                "min_bits {} exceeds max_bits {}",
                self.min_bits,
                self.max_bits
            ));
        }
        if self.shifts.0.iter().any(|&s| s >= 64) {
            return Err(anyhow!("factor shifts {:?} must be < 64", self.shifts.0));
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading harness config {}", path.display()))?;
        let cfg: HarnessConfig = serde_json::from_str(&s)
            .with_context(|| format!("parsing harness config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
