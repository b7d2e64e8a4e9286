//! Seeded generator used for every scrambling operation.
//!
//! A 48-bit linear congruential generator with the classic
//! `0x5DEECE66D` multiplier. Generated exams stay bit-identical to those
//! produced by earlier releases for the same seed, so a lost solutions
//! file can be regenerated years later.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Deterministic generator seeded from a signed 64-bit value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRandom {
    state: u64,
}

impl LegacyRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits.
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.state >> (48 - bits)) as u32 as i32
    }

    /// Uniform value in `0..bound`. `bound` must be positive.
    pub fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive");
        let mut r = self.next_bits(31);
        let m = bound - 1;
        if bound & m == 0 {
            // power of two: take the high bits
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }
        let mut u = r;
        loop {
            r = u % bound;
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next_bits(31);
        }
    }

    /// Uniform index in `0..len`.
    pub fn next_index(&mut self, len: usize) -> usize {
        let bound = i32::try_from(len).unwrap_or(i32::MAX);
        self.next_int(bound) as usize
    }

    /// Fisher-Yates shuffle walking down from the last element.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Shuffle a copy of `items` with a generator freshly seeded by `seed`.
pub fn shuffled<T: Clone>(items: &[T], seed: i64) -> Vec<T> {
    let mut copy = items.to_vec();
    LegacyRandom::new(seed).shuffle(&mut copy);
    copy
}

impl RngCore for LegacyRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = i64::from(self.next_bits(32)) << 32;
        high.wrapping_add(i64::from(self.next_bits(32))) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for LegacyRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    /// Use the value directly instead of expanding it, so `seed_from_u64(n)`
    /// and `new(n as i64)` agree.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}
