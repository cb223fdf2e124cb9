//! Random draws used by the scorer
//!
//! The geographic factor and the confidence value are the only
//! non-deterministic parts of an assessment. They come from a `Jitter`
//! passed in by the caller, so a seeded generator pins the whole result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const GEOGRAPHIC_RANGE: (f64, f64) = (0.2, 0.8);
pub const CONFIDENCE_RANGE: (f64, f64) = (0.7, 1.0);

/// Source of the two random draws made per assessment
pub trait Jitter {
    /// Geographic factor in [0.2, 0.8)
    fn geographic_factor(&mut self) -> f64;

    /// Confidence in [0.7, 1.0)
    fn confidence(&mut self) -> f64;
}

impl<J: Jitter + ?Sized> Jitter for &mut J {
    fn geographic_factor(&mut self) -> f64 {
        (**self).geographic_factor()
    }

    fn confidence(&mut self) -> f64 {
        (**self).confidence()
    }
}

/// `Jitter` backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        RngJitter { rng }
    }
}

impl RngJitter<StdRng> {
    /// Reproducible jitter; the same seed yields the same sequence of draws
    pub fn seeded(seed: u64) -> Self {
        RngJitter::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from `seed` when given, otherwise from OS entropy
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        log::debug!("Jitter seed: {}", seed);
        RngJitter::seeded(seed)
    }
}

impl<R: Rng> Jitter for RngJitter<R> {
    fn geographic_factor(&mut self) -> f64 {
        self.rng.gen_range(GEOGRAPHIC_RANGE.0..GEOGRAPHIC_RANGE.1)
    }

    fn confidence(&mut self) -> f64 {
        self.rng.gen_range(CONFIDENCE_RANGE.0..CONFIDENCE_RANGE.1)
    }
}

/// Jitter that always returns the same pair of values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter {
    pub geographic: f64,
    pub confidence: f64,
}

impl FixedJitter {
    pub fn new(geographic: f64, confidence: f64) -> Self {
        FixedJitter {
            geographic,
            confidence,
        }
    }
}

impl Jitter for FixedJitter {
    fn geographic_factor(&mut self) -> f64 {
        self.geographic
    }

    fn confidence(&mut self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let mut jitter = RngJitter::seeded(7);
        for _ in 0..10_000 {
            let geo = jitter.geographic_factor();
            let confidence = jitter.confidence();
            assert!((0.2..0.8).contains(&geo), "geographic out of range: {}", geo);
            assert!((0.7..1.0).contains(&confidence), "confidence out of range: {}", confidence);
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RngJitter::seeded(42);
        let mut b = RngJitter::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.geographic_factor().to_bits(), b.geographic_factor().to_bits());
            assert_eq!(a.confidence().to_bits(), b.confidence().to_bits());
        }
    }

    #[test]
    fn test_fixed_jitter() {
        let mut jitter = FixedJitter::new(0.5, 0.9);
        assert_eq!(jitter.geographic_factor(), 0.5);
        assert_eq!(jitter.confidence(), 0.9);
    }
}
