//! The `Prng` interface and a concrete `rand`-backed implementation.
//!
//! `spec.md` treats random-number generation as an external collaborator: a
//! seedable source exposing `uniform()`, `normal()`, and `log_normal()`
//! primitives. This module supplies both the trait (the contract every
//! `meas-*` crate programs against) and [`StdPrng`], a concrete
//! implementation, because a library that never implements its own central
//! dependency cannot be exercised or tested.
//!
//! # Determinism
//!
//! Per-agent seeding follows the same scheme as `dt_core::rng::AgentRng`:
//! `seed = global_seed XOR (index * MIXING_CONSTANT)`, so agent `i` always
//! draws the same seed regardless of how many workers are used to
//! initialise the population (spec.md §5, §8 S6).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive the deterministic seed for item `index` under `global_seed`.
///
/// Shared by agent initialisation (spec.md §4.7) and by any other per-item
/// seeding this crate family needs — kept as a free function so callers
/// don't have to construct a generator object just to get one seed.
#[inline]
pub fn derive_seed(global_seed: u64, index: u64) -> u64 {
    global_seed ^ index.wrapping_mul(MIXING_CONSTANT)
}

/// A deterministic per-index seed source.
///
/// Used by [`meas-mobility`](../meas_mobility/index.html)'s parallel agent
/// initialisation: a single-threaded producer emits `(index, seed)` pairs so
/// that seed assignment never depends on thread scheduling.
#[derive(Clone, Copy, Debug)]
pub struct SeedGenerator {
    global_seed: u64,
}

impl SeedGenerator {
    pub fn new(global_seed: u64) -> Self {
        Self { global_seed }
    }

    #[inline]
    pub fn seed_for(&self, index: u64) -> u64 {
        derive_seed(self.global_seed, index)
    }
}

/// The out-of-scope collaborator's contract: a seedable PRNG exposing named
/// distributions over a range.
pub trait Prng {
    /// Uniform draw in `[min, max)`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Draw from `Normal(mean, std)`, clamped into `[min, max]`.
    fn normal(&mut self, min: f64, max: f64, mean: f64, std: f64) -> f64;

    /// Draw from `LogNormal(mean, std)` (parameters of the underlying
    /// normal), clamped into `[min, max]`.
    fn log_normal(&mut self, min: f64, max: f64, mean: f64, std: f64) -> f64;

    /// A uniform integer in `[0, n)`. `n == 0` is a programming error.
    fn usize_below(&mut self, n: usize) -> usize;

    /// Sample an index from a cumulative distribution function (values
    /// non-decreasing, last entry `~1.0`) via one uniform draw and a binary
    /// search — the "discrete distribution via CDF" utility of spec.md §2.
    fn discrete(&mut self, cdf: &[f64]) -> usize {
        debug_assert!(!cdf.is_empty());
        let u = self.uniform(0.0, 1.0);
        match cdf.binary_search_by(|probe| probe.partial_cmp(&u).unwrap()) {
            Ok(i) => i,
            Err(i) => i.min(cdf.len() - 1),
        }
    }
}

/// Concrete [`Prng`] backed by `rand::rngs::SmallRng`.
#[derive(Clone)]
pub struct StdPrng(SmallRng);

impl StdPrng {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner RNG for callers that need a raw `rand::Rng`
    /// (e.g. `SliceRandom::choose`/`shuffle`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl Prng for StdPrng {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..max)
    }

    fn normal(&mut self, min: f64, max: f64, mean: f64, std: f64) -> f64 {
        if std <= 0.0 {
            return mean.clamp(min, max);
        }
        let dist = Normal::new(mean, std).expect("finite mean/std");
        dist.sample(&mut self.0).clamp(min, max)
    }

    fn log_normal(&mut self, min: f64, max: f64, mean: f64, std: f64) -> f64 {
        if std <= 0.0 {
            return mean.clamp(min, max);
        }
        let dist = LogNormal::new(mean, std).expect("finite mean/std");
        dist.sample(&mut self.0).clamp(min, max)
    }

    fn usize_below(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

// ── Markov-chain equilibrium solver ───────────────────────────────────────────

pub mod markov {
    //! Power iteration to the stationary distribution of a row-stochastic
    //! transition matrix — backs the integrated destination chooser's
    //! `getSteadyDestination` (spec.md §4.6).

    /// Raised when power iteration fails to converge within `max_iter`
    /// steps — spec.md §7's "ergodicity failure", surfaced as a
    /// configuration error at chooser construction.
    #[derive(Debug, thiserror::Error)]
    #[error("power iteration did not converge to a stationary distribution within {max_iter} iterations (chain may not be ergodic)")]
    pub struct NotErgodic {
        pub max_iter: usize,
    }

    /// Compute the stationary distribution `π` of the row-stochastic matrix
    /// `rows` (each `rows[i]` a probability distribution over destinations)
    /// via power iteration, starting from the uniform distribution.
    ///
    /// Converges when the max-absolute-difference between successive
    /// iterates falls below `tol`. Returns [`NotErgodic`] if it hasn't
    /// converged after `max_iter` iterations.
    pub fn stationary_distribution(
        rows: &[Vec<f64>],
        tol: f64,
        max_iter: usize,
    ) -> Result<Vec<f64>, NotErgodic> {
        let n = rows.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut pi = vec![1.0 / n as f64; n];

        for _ in 0..max_iter {
            let mut next = vec![0.0; n];
            for (i, row) in rows.iter().enumerate() {
                let mass = pi[i];
                if mass == 0.0 {
                    continue;
                }
                for (j, &p) in row.iter().enumerate() {
                    next[j] += mass * p;
                }
            }

            let max_diff = next
                .iter()
                .zip(pi.iter())
                .fold(0.0_f64, |acc, (&a, &b)| acc.max((a - b).abs()));

            pi = next;
            if max_diff < tol {
                return Ok(pi);
            }
        }

        Err(NotErgodic { max_iter })
    }
}
