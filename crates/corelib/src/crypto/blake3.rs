//! BLAKE3 implementation of Hash32.

use crate::crypto::hash::Hash32;

pub struct Blake3 {
    inner: blake3::Hasher,
}

impl Hash32 for Blake3 {
    fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self) -> [u8; 32] {
        *self.inner.finalize().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::{hash_labeled, hash_one_shot};

    #[test]
    fn part_boundaries_matter() {
        let ab_c = hash_labeled::<Blake3>("LBL", &[b"ab", b"c"]);
        let a_bc = hash_labeled::<Blake3>("LBL", &[b"a", b"bc"]);
        assert_ne!(ab_c, a_bc);
        assert_ne!(ab_c, hash_one_shot::<Blake3>(b"LBLabc"));
    }
}
