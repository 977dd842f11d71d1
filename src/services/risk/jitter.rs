//! Injectable perturbation source for the score calculator.
//!
//! The calculator adds a small uniform offset to the aggregate score to
//! avoid clustering of identical computed values across near-identical
//! records. Production draws from the thread-local RNG; tests substitute
//! [`NoJitter`] for deterministic assertions.

use rand::Rng;

/// Magnitude bound of the uniform perturbation applied to the raw score.
pub const JITTER_BOUND: f64 = 0.02;

/// Source of the per-assessment score offset.
pub trait Perturbation {
    /// Next offset, in `[-JITTER_BOUND, JITTER_BOUND]`.
    fn sample(&self) -> f64;
}

/// Uniform draw from the thread-local RNG. Safe for concurrent use: each
/// worker thread owns its own generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformJitter;

impl Perturbation for UniformJitter {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(-JITTER_BOUND..=JITTER_BOUND)
    }
}

/// Zero offset, for reproducible scoring in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Perturbation for NoJitter {
    fn sample(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_jitter_stays_within_bound() {
        let jitter = UniformJitter;
        for _ in 0..1000 {
            let offset = jitter.sample();
            assert!(offset >= -JITTER_BOUND && offset <= JITTER_BOUND);
        }
    }

    #[test]
    fn no_jitter_is_zero() {
        assert_eq!(NoJitter.sample(), 0.0);
    }
}
