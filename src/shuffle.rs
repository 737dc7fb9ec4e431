use blake2::{Blake2s256, Digest};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use rand::rngs::OsRng;

const BUFFER_LEN: usize = 512;

/// Uniform index source backed by a ChaCha20 keystream.
pub struct Shuffler {
    cipher: ChaCha20,
    buffer: Vec<u8>,
    pos: usize,
}

impl Shuffler {
    pub fn from_key(key: &[u8; 32]) -> Self {
        let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut buffer = vec![0u8; BUFFER_LEN];
        cipher.apply_keystream(&mut buffer);
        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    pub fn from_entropy() -> Self {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        Self::from_key(&key)
    }

    /// Same seed, same permutations.
    pub fn from_seed(seed: &str) -> Self {
        let digest = Blake2s256::digest(seed.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self::from_key(&key)
    }

    fn next_u64(&mut self) -> u64 {
        if self.pos + 8 > self.buffer.len() {
            self.buffer.fill(0);
            self.cipher.apply_keystream(&mut self.buffer);
            self.pos = 0;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.buffer[self.pos..self.pos + 8]);
        self.pos += 8;
        u64::from_le_bytes(bytes)
    }

    /// Uniform value in `0..n`. Draws at or above the largest multiple of
    /// `n` are rejected.
    pub fn index_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "index_below needs a non-empty range");
        let n = n as u128;
        let space = 1u128 << 64;
        let rejection_threshold = space - (space % n);

        loop {
            let value = u128::from(self.next_u64());
            if value < rejection_threshold {
                return (value % n) as usize;
            }
        }
    }

    /// Fisher-Yates.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_below(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_deterministic() {
        let mut a = Shuffler::from_seed("out of balance");
        let mut b = Shuffler::from_seed("out of balance");
        let draws_a: Vec<usize> = (0..100).map(|_| a.index_below(7776)).collect();
        let draws_b: Vec<usize> = (0..100).map(|_| b.index_below(7776)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = Shuffler::from_seed("life");
        let mut b = Shuffler::from_seed("balance");
        let draws_a: Vec<usize> = (0..32).map(|_| a.index_below(1 << 20)).collect();
        let draws_b: Vec<usize> = (0..32).map(|_| b.index_below(1 << 20)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_index_in_range() {
        let mut s = Shuffler::from_key(&[42u8; 32]);
        for n in [1usize, 2, 3, 6, 90, 7776] {
            for _ in 0..200 {
                assert!(s.index_below(n) < n);
            }
        }
    }

    #[test]
    fn test_all_values_reachable() {
        let mut s = Shuffler::from_key(&[7u8; 32]);
        let seen: HashSet<usize> = (0..1000).map(|_| s.index_below(6)).collect();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_buffer_refill() {
        let mut s = Shuffler::from_key(&[1u8; 32]);
        // More draws than fit into one keystream buffer.
        for _ in 0..(BUFFER_LEN / 8) * 3 {
            assert!(s.index_below(10) < 10);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut s = Shuffler::from_seed("perm");
        let mut items: Vec<u32> = (0..50).collect();
        s.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut s = Shuffler::from_entropy();
        let mut empty: Vec<u8> = vec![];
        s.shuffle(&mut empty);
        assert!(empty.is_empty());
        let mut one = vec![9];
        s.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }
}
