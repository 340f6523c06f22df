//! Digest-backed entropy.
//! The extractors never need a hash; these wrappers turn BLAKE3 or Keccak-256
//! digests into fixed-width entropy values for the sampler and the CLI.

pub mod blake3;
pub mod hash;
pub mod keccak;
pub mod registry;
