//! The named-distribution-over-a-range shape shared by the speed and pause
//! CLI option groups (spec.md §6: `-speedUniform/-speedNormal/-speedLogNormal`,
//! `-pauseUniform/-pauseNormal/-pauseLogNormal`, all `min max`).

use meas_core::Prng;

/// A sampled quantity clamped to `[min, max]` under one of three named
/// shapes. Used both for agent speed (metres/second) and pause duration
/// (seconds) — the two CLI option groups have an identical shape, so one
/// enum backs both rather than two near-duplicates.
#[derive(Debug, Clone, Copy)]
pub enum RangeDistribution {
    Uniform { min: f64, max: f64 },
    Normal { min: f64, max: f64, mean: f64, std: f64 },
    LogNormal { min: f64, max: f64, mean: f64, std: f64 },
}

impl RangeDistribution {
    pub fn sample(&self, prng: &mut dyn Prng) -> f64 {
        match *self {
            Self::Uniform { min, max } => prng.uniform(min, max),
            Self::Normal { min, max, mean, std } => prng.normal(min, max, mean, std),
            Self::LogNormal { min, max, mean, std } => prng.log_normal(min, max, mean, std),
        }
    }

    /// spec.md §6 default speed distribution: normal, 0.83–2.21 m/s.
    pub fn default_speed() -> Self {
        let (min, max) = (0.83, 2.21);
        Self::Normal { min, max, mean: (min + max) / 2.0, std: (max - min) / 4.0 }
    }
}

pub type SpeedDistribution = RangeDistribution;
pub type PauseDistribution = RangeDistribution;
