//! String-id -> Hash32 mapping and entropy helpers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::crypto::blake3::Blake3;
use crate::crypto::hash::{entropy_from_digest, hash_labeled};
use crate::crypto::keccak::Keccak256;
use crate::errors::ExtractError;
use crate::width::Width;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashInfo {
    pub id: &'static str,
    pub digest_bits: u32,
}

static SUPPORTED_HASHES: Lazy<Vec<HashInfo>> = Lazy::new(|| {
    vec![
        HashInfo {
            id: "blake3",
            digest_bits: 256,
        },
        HashInfo {
            id: "keccak256",
            digest_bits: 256,
        },
    ]
});

pub fn list_hashes() -> &'static [HashInfo] {
    SUPPORTED_HASHES.as_slice()
}

fn normalize(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// Labeled hashing function for a hash id.
pub type LabeledHashFn = fn(&str, &[&[u8]]) -> [u8; 32];

/// Resolve a hash id once, for callers that hash repeatedly.
///
/// Supported ids: "blake3", "keccak256".
pub fn labeled_hasher_by_id(id: &str) -> Result<LabeledHashFn, ExtractError> {
    match normalize(id).as_str() {
        "blake3" => Ok(hash_labeled::<Blake3> as LabeledHashFn),
        "keccak256" => Ok(hash_labeled::<Keccak256> as LabeledHashFn),
        _ => Err(ExtractError::UnknownHash(id.to_string())),
    }
}

/// Return H(label || parts) for the given hash id.
pub fn hash32_by_id(id: &str, label: &str, parts: &[&[u8]]) -> Result<[u8; 32], ExtractError> {
    labeled_hasher_by_id(id).map(|h| h(label, parts))
}

/// A `width`-bit entropy value taken from the digest's first 8 bytes.
pub fn entropy_by_id(
    id: &str,
    label: &str,
    parts: &[&[u8]],
    width: Width,
) -> Result<u64, ExtractError> {
    hash32_by_id(id, label, parts).map(|digest| entropy_from_digest(&digest, width))
}
