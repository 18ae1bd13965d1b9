//! The destination chooser (spec.md §4.6): `UniformChooser` and
//! `IntegratedChooser`, both exposing `get_destination`/`get_steady_destination`.
//!
//! Grounded on `meas-core::rng::markov::stationary_distribution` (already
//! built for exactly this purpose) for the integrated chooser's steady-state
//! vector, and on `meas-core::Prng::discrete` for turning a weight row into a
//! single draw.

use meas_core::{Prng, StreetId};
use meas_map::{Map, Waypoint};

use crate::error::{MobilityError, MobilityResult};

/// `getDestination(currentWaypoint, prng)` / `getSteadyDestination(prng)`
/// (spec.md §4.6). `get_steady_destination` cannot fail at call time — any
/// ergodicity problem is caught once, at construction of an
/// [`IntegratedChooser`].
pub trait DestinationChooser {
    fn get_destination(&self, map: &Map, current: Waypoint, prng: &mut dyn Prng) -> Waypoint;
    fn get_steady_destination(&self, map: &Map, prng: &mut dyn Prng) -> Waypoint;
}

fn to_cdf(weights: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    weights.iter().map(|&w| {
        acc += w;
        acc
    }).collect()
}

/// A point chosen uniformly along `street`'s midline (spec.md §4.6 "uniform
/// along the midline").
fn point_along(map: &Map, street: StreetId, distance: f64) -> Waypoint {
    let s = map.street(street);
    let point = s.midline.a + s.direction().scaled_to(distance);
    Waypoint::new(point, street)
}

fn sample_from_cdf(map: &Map, cdf: &[f64], prng: &mut dyn Prng) -> Waypoint {
    let street = StreetId(prng.discrete(cdf) as u32);
    let length = map.street(street).length();
    point_along(map, street, prng.uniform(0.0, length))
}

/// Probability of any point proportional to its street's length; the point
/// within the chosen street is uniform along the midline. The steady-state
/// distribution equals the one-step distribution (spec.md §4.6), so both
/// chooser methods draw from the same length-weighted CDF.
#[derive(Debug, Clone)]
pub struct UniformChooser {
    street_cdf: Vec<f64>,
}

impl UniformChooser {
    pub fn new(map: &Map) -> Self {
        let lengths: Vec<f64> = map.streets.iter().map(|s| s.length()).collect();
        let total: f64 = lengths.iter().sum();
        let weights: Vec<f64> = if total > 0.0 {
            lengths.iter().map(|&l| l / total).collect()
        } else {
            lengths
        };
        Self { street_cdf: to_cdf(&weights) }
    }
}

impl DestinationChooser for UniformChooser {
    fn get_destination(&self, map: &Map, _current: Waypoint, prng: &mut dyn Prng) -> Waypoint {
        sample_from_cdf(map, &self.street_cdf, prng)
    }

    fn get_steady_destination(&self, map: &Map, prng: &mut dyn Prng) -> Waypoint {
        sample_from_cdf(map, &self.street_cdf, prng)
    }
}

/// Centrality-weighted, distance-decaying chooser (spec.md §4.6).
///
/// `T(s, d) = minTurns(s, d)`, `D(s, d) = T(s, d) + 1`; integration
/// `I(d)` is the length-weighted mean `D` of every street within `radius`
/// turns of `d` (including `d` itself, since `T(d, d) = 0`); the unnormalised
/// weight of choosing `d` from source street `s` is `L(d) / (I(d)^α ·
/// D(s, d)^δ)`.
#[derive(Debug, Clone)]
pub struct IntegratedChooser {
    /// Row-normalised CDF per source street.
    row_cdf: Vec<Vec<f64>>,
    /// CDF of the chain's stationary distribution.
    steady_cdf: Vec<f64>,
}

impl IntegratedChooser {
    pub fn new(map: &Map, alpha: f64, delta: f64, radius: u32) -> MobilityResult<Self> {
        if alpha < 0.0 {
            return Err(MobilityError::NegativeAlpha(alpha));
        }
        if delta < 0.0 {
            return Err(MobilityError::NegativeDelta(delta));
        }

        let n = map.street_count();
        let lengths: Vec<f64> = map.streets.iter().map(|s| s.length()).collect();
        let min_turns = |a: usize, b: usize| map.min_turns(StreetId(a as u32), StreetId(b as u32));

        // I(d): length-weighted mean D(i, d) over every street i within
        // `radius` turns of d. T(d, d) == 0 <= radius always holds, so the
        // sum is never empty.
        let integration: Vec<f64> = (0..n)
            .map(|d| {
                let mut num = 0.0;
                let mut den = 0.0;
                for i in 0..n {
                    if min_turns(i, d) <= radius {
                        let dd = (min_turns(i, d) + 1) as f64;
                        num += lengths[i] * dd;
                        den += lengths[i];
                    }
                }
                num / den
            })
            .collect();

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
        for s in 0..n {
            let mut weights = vec![0.0; n];
            let mut total = 0.0;
            for d in 0..n {
                let dsd = (min_turns(s, d) + 1) as f64;
                let w = lengths[d] / (integration[d].powf(alpha) * dsd.powf(delta));
                weights[d] = w;
                total += w;
            }
            if total > 0.0 {
                for w in &mut weights {
                    *w /= total;
                }
            }
            rows.push(weights);
        }

        let steady = meas_core::rng::markov::stationary_distribution(&rows, 1e-9, 10_000)?;

        Ok(Self {
            row_cdf: rows.iter().map(|r| to_cdf(r)).collect(),
            steady_cdf: to_cdf(&steady),
        })
    }
}

impl DestinationChooser for IntegratedChooser {
    fn get_destination(&self, map: &Map, current: Waypoint, prng: &mut dyn Prng) -> Waypoint {
        sample_from_cdf(map, &self.row_cdf[current.street.index()], prng)
    }

    fn get_steady_destination(&self, map: &Map, prng: &mut dyn Prng) -> Waypoint {
        sample_from_cdf(map, &self.steady_cdf, prng)
    }
}

impl IntegratedChooser {
    /// Row `s`'s transition probabilities (differences of its CDF) — spec.md
    /// §8 invariant 8 needs the raw transition matrix to check `πP == π`.
    #[cfg(test)]
    pub(crate) fn row_probabilities(&self, s: usize) -> Vec<f64> {
        cdf_to_probabilities(&self.row_cdf[s])
    }

    #[cfg(test)]
    pub(crate) fn steady_probabilities(&self) -> Vec<f64> {
        cdf_to_probabilities(&self.steady_cdf)
    }
}

#[cfg(test)]
fn cdf_to_probabilities(cdf: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    cdf.iter()
        .map(|&c| {
            let p = c - prev;
            prev = c;
            p
        })
        .collect()
}
