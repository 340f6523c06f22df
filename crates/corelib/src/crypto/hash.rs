//! Generic digest trait and helpers for deriving entropy from it.

use crate::width::Width;

/// A streaming hash with fixed-size 32-byte digests.
pub trait Hash32 {
    fn new() -> Self
    where
        Self: Sized;
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> [u8; 32];
}

pub fn hash_one_shot<H: Hash32>(data: &[u8]) -> [u8; 32] {
    let mut h = H::new();
    h.update(data);
    h.finalize()
}

/// Domain-separated hashing: H(label || len(p0) || p0 || len(p1) || p1 ...).
/// Lengths are 8-byte little endian so that part boundaries are unambiguous.
pub fn hash_labeled<H: Hash32>(label: &str, parts: &[&[u8]]) -> [u8; 32] {
    let mut h = H::new();
    h.update(label.as_bytes());
    for part in parts {
        h.update(&(part.len() as u64).to_le_bytes());
        h.update(part);
    }
    h.finalize()
}

/// The low `width` bits of the first 8 digest bytes (little endian).
pub fn entropy_from_digest(digest: &[u8; 32], width: Width) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes) & width.mask()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_is_masked_little_endian() {
        let mut d = [0u8; 32];
        d[0] = 0x34;
        d[1] = 0x12;
        d[8] = 0xff; // beyond the first word, ignored
        assert_eq!(entropy_from_digest(&d, Width::new(64).unwrap()), 0x1234);
        assert_eq!(entropy_from_digest(&d, Width::new(8).unwrap()), 0x34);
        assert_eq!(entropy_from_digest(&d, Width::new(0).unwrap()), 0);
    }
}
