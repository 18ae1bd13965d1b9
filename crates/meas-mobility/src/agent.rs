//! Agent lifecycle (spec.md §4.7): construction (speed draw, steady/initial
//! destination, full path, burn-in) and `advance(seconds)`.
//!
//! Grounded on `dt-agent`'s one-RNG-per-agent ownership model (`AgentRngs`):
//! here the RNG is a field of `Agent` itself rather than a parallel array,
//! since an agent's destination resampling happens throughout its lifetime,
//! not just at construction.

use meas_core::{Point, StdPrng};
use meas_crumb::Metric;
use meas_map::{Map, Waypoint};
use meas_pathfind::find_path;

use crate::chooser::DestinationChooser;
use crate::distribution::{PauseDistribution, SpeedDistribution};
use crate::error::MobilityResult;

/// Simulated seconds an agent spends travelling before its time accumulator
/// resets to zero, letting the population reach its steady spatial
/// distribution before anything is observed (spec.md §4.7).
pub const BURN_IN_SECONDS: f64 = 86_400.0;

/// Everything an agent needs to sample destinations, plan paths, and sample
/// pauses — shared read-only state, not owned by the agent (spec.md §5: the
/// map is immutable and shared by reference; the chooser is likewise shared).
pub struct AgentContext<'a> {
    pub map: &'a Map,
    pub metric: Metric,
    pub disable_street_cut: bool,
    pub speed: SpeedDistribution,
    pub pause: PauseDistribution,
    pub chooser: &'a dyn DestinationChooser,
}

#[inline]
fn leg_duration(a: Point, b: Point, speed: f64) -> f64 {
    let distance = a.distance(b);
    if distance == 0.0 {
        0.0
    } else if speed == 0.0 {
        f64::INFINITY
    } else {
        distance / speed
    }
}

/// spec.md §4.7 "Agent state".
#[derive(Clone)]
pub struct Agent {
    rng: StdPrng,
    pub speed: f64,
    pub current: Waypoint,
    /// The rest of the planned path, not including `current`. Empty while
    /// paused.
    pub remaining_path: Vec<Waypoint>,
    pub paused: bool,
    /// Time to the next waypoint, or to the end of the current pause.
    pub remaining_leg_time: f64,
    pub total_simulated_time: f64,
}

impl Agent {
    /// spec.md §4.7 "Agent construction".
    pub fn new(ctx: &AgentContext, seed: u64) -> MobilityResult<Self> {
        let mut rng = StdPrng::from_seed(seed);
        let speed = ctx.speed.sample(&mut rng);
        let previous_destination = ctx.chooser.get_steady_destination(ctx.map, &mut rng);
        let current_destination = ctx.chooser.get_destination(ctx.map, previous_destination, &mut rng);
        let (mut path, _metrics) =
            find_path(ctx.map, previous_destination, current_destination, ctx.metric, ctx.disable_street_cut, &mut rng)?;
        let current = path.remove(0);

        let mut agent = Self {
            rng,
            speed,
            current,
            remaining_path: path,
            paused: false,
            remaining_leg_time: 0.0,
            total_simulated_time: 0.0,
        };
        agent.recompute_remaining_leg_time(ctx);

        let mut elapsed = 0.0;
        while elapsed < BURN_IN_SECONDS {
            let step = (BURN_IN_SECONDS - elapsed).min(agent.remaining_leg_time);
            agent.advance(ctx, step)?;
            elapsed += step;
        }
        agent.total_simulated_time = 0.0;
        Ok(agent)
    }

    fn recompute_remaining_leg_time(&mut self, ctx: &AgentContext) {
        match self.remaining_path.first() {
            Some(next) => {
                self.paused = false;
                self.remaining_leg_time = leg_duration(self.current.point, next.point, self.speed);
            }
            None => {
                self.paused = true;
                self.remaining_leg_time = ctx.pause.sample(&mut self.rng);
            }
        }
    }

    /// spec.md §4.7 `advance(seconds)`. Requires `0 <= seconds <=
    /// remaining_leg_time`.
    pub fn advance(&mut self, ctx: &AgentContext, seconds: f64) -> MobilityResult<()> {
        debug_assert!(seconds >= 0.0 && seconds <= self.remaining_leg_time);

        if seconds < self.remaining_leg_time {
            if !self.paused {
                if let Some(next) = self.remaining_path.first() {
                    let t = seconds / self.remaining_leg_time;
                    self.current.point = self.current.point + self.current.point.vector_to(next.point) * t;
                }
            }
            self.remaining_leg_time -= seconds;
            self.total_simulated_time += seconds;
            return Ok(());
        }

        if self.paused {
            let destination = ctx.chooser.get_destination(ctx.map, self.current, &mut self.rng);
            let (mut path, _metrics) =
                find_path(ctx.map, self.current, destination, ctx.metric, ctx.disable_street_cut, &mut self.rng)?;
            // Discard the head of the new path — it equals the current
            // waypoint the pause just ended at.
            if !path.is_empty() {
                path.remove(0);
            }
            self.remaining_path = path;
        } else if !self.remaining_path.is_empty() {
            self.current = self.remaining_path.remove(0);
        }

        self.recompute_remaining_leg_time(ctx);
        self.total_simulated_time += seconds;
        Ok(())
    }
}
