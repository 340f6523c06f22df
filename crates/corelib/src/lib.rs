//! Core library: unbiased range extraction from fixed-width entropy, and the
//! exhaustive harness that verifies it.
//!
//! - **extract**: simple and bias-corrected extractors
//! - **chain**: successive extraction and mixed-radix joint indices
//! - **harness**: exhaustive sweep over small widths
//! - **sampler**: drawing, shuffling and weighted picks from digest entropy

pub mod chain;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod extract;
pub mod harness;
pub mod sampler;
pub mod width;

pub use chain::{extract_chain, mixed_radix, ChainOutcome};
pub use config::HarnessConfig;
pub use crypto::registry::list_hashes;
pub use errors::{ExtractError, Violation};
pub use extract::{extract_corrected, extract_simple, Extraction, ExtractorKind};
pub use harness::{run, verify_width, SweepReport, WidthReport};
pub use sampler::{shard_of, DigestSource, EntropySource, RangeSampler};
pub use width::Width;

/// Version helper for CLI
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
