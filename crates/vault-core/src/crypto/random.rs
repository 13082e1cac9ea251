//! Secure randomness behind an injectable source

use rand::rngs::OsRng;
use rand::RngCore;

/// Source of cryptographically secure random bytes.
///
/// Production code hands [`OsRandom`] to the engine; tests substitute a
/// deterministic source to pin down sampling behavior.
pub trait RandomSource {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);

    /// Return `n` random bytes.
    fn random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; n];
        self.fill_bytes(&mut bytes);
        bytes
    }

    /// Return a uniformly distributed index in `[0, max)`.
    ///
    /// Rejection sampling over 32-bit draws: a draw at or above the
    /// largest multiple of `max` that fits in 2^32 is discarded and
    /// redrawn, so the final modulo is exactly uniform rather than
    /// approximately. `max == 0` returns 0 without drawing.
    fn random_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        debug_assert!(max <= u32::MAX as usize);
        let max = max as u64;
        let zone = ((1u64 << 32) / max) * max;
        loop {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            let draw = u32::from_be_bytes(buf) as u64;
            if draw < zone {
                return (draw % max) as usize;
            }
        }
    }
}

/// The platform secure RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a scripted byte sequence, then panics if overdrawn.
    struct ScriptedSource {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl ScriptedSource {
        fn new(bytes: Vec<u8>) -> Self {
            Self { bytes, pos: 0 }
        }

        fn consumed(&self) -> usize {
            self.pos
        }
    }

    impl RandomSource for ScriptedSource {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let end = self.pos + dest.len();
            assert!(end <= self.bytes.len(), "scripted source exhausted");
            dest.copy_from_slice(&self.bytes[self.pos..end]);
            self.pos = end;
        }
    }

    #[test]
    fn test_random_bytes_length_and_variation() {
        let mut rng = OsRandom;
        let a = rng.random_bytes(32);
        let b = rng.random_bytes(32);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_index_zero_max_draws_nothing() {
        let mut rng = ScriptedSource::new(vec![]);
        assert_eq!(rng.random_index(0), 0);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_random_index_in_range() {
        let mut rng = OsRandom;
        for _ in 0..1000 {
            assert!(rng.random_index(7) < 7);
        }
    }

    #[test]
    fn test_random_index_rejects_biased_draw() {
        // For max = 3 the acceptance zone is 4_294_967_295, so the
        // all-ones draw must be discarded and the next one (5) used.
        let mut rng = ScriptedSource::new(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x05]);
        assert_eq!(rng.random_index(3), 2);
        assert_eq!(rng.consumed(), 8);
    }

    #[test]
    fn test_random_index_accepts_in_zone_draw() {
        let mut rng = ScriptedSource::new(vec![0x00, 0x00, 0x00, 0x0A]);
        assert_eq!(rng.random_index(7), 10 % 7);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_random_index_covers_all_values() {
        let mut rng = OsRandom;
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rng.random_index(5)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
