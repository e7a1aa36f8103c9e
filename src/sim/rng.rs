//! Spawn placement sampling
//!
//! All randomness in the simulation flows through one seeded generator so a
//! session can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Inclusive integer range sampler over a seeded PCG stream
#[derive(Debug, Clone)]
pub struct RangeSampler {
    rng: Pcg32,
}

impl RangeSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Sample uniformly from the inclusive integer range spanned by `a` and
    /// `b`, in either argument order. Callers habitually pass `(max, min)`;
    /// the draw is normalized as `floor(draw * (|a-b| + 1)) + min(a, b)`.
    pub fn sample(&mut self, a: i32, b: i32) -> i32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let span = (hi as i64 - lo as i64 + 1) as f64;
        let draw: f64 = self.rng.random();
        lo + (draw * span).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RangeSampler::from_seed(42);
        let mut b = RangeSampler::from_seed(42);
        for _ in 0..64 {
            assert_eq!(a.sample(-8, 8), b.sample(-8, 8));
        }
    }

    #[test]
    fn test_single_value_range() {
        let mut sampler = RangeSampler::from_seed(7);
        for _ in 0..16 {
            assert_eq!(sampler.sample(3, 3), 3);
        }
    }

    #[test]
    fn test_endpoints_reachable() {
        let mut sampler = RangeSampler::from_seed(1);
        let mut seen = [false; 3];
        for _ in 0..256 {
            let v = sampler.sample(0, 2);
            seen[v as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    proptest! {
        /// The same pair in either order draws from the identical inclusive
        /// range, and with identical generator state yields the same value.
        #[test]
        fn prop_argument_order_is_irrelevant(a in -1000i32..1000, b in -1000i32..1000, seed in any::<u64>()) {
            let mut fwd = RangeSampler::from_seed(seed);
            let mut rev = RangeSampler::from_seed(seed);
            let x = fwd.sample(a, b);
            let y = rev.sample(b, a);
            prop_assert_eq!(x, y);
            prop_assert!(x >= a.min(b) && x <= a.max(b));
        }
    }
}
