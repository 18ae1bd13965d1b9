//! `RecordedSimulation` (spec.md §4.8): wraps a fresh discrete simulation and
//! lets a caller scrub to any point in `[0, duration]`, interpolating each
//! agent's position within the leg straddling that instant.
//!
//! Grounded on `meas-mobility`'s `DiscreteSimulation::advance`, which already
//! collapses zero-duration legs — the interpolation window here only ever
//! spans legs with distinct timestamps, so the division in `get_location`
//! never sees a zero denominator once `prev_ms != next_ms`.

use meas_core::{AgentId, Point};
use meas_mobility::{Agent, DiscretePosition, DiscreteSimulation};

use crate::error::ReplayResult;

fn to_point(pos: DiscretePosition) -> Point {
    Point::new(pos.x_mm as f64 / 1000.0, pos.y_mm as f64 / 1000.0)
}

/// The two waypoints-in-time an agent's position is currently interpolated
/// between. `prev_ms == next_ms == 0` at time zero, before any leg has
/// started.
#[derive(Debug, Clone, Copy)]
struct InterpWindow {
    prev_ms: u32,
    prev_pos: DiscretePosition,
    next_ms: u32,
    next_pos: DiscretePosition,
}

impl InterpWindow {
    fn at_rest(pos: DiscretePosition) -> Self {
        Self { prev_ms: 0, prev_pos: pos, next_ms: 0, next_pos: pos }
    }
}

/// Continuous-time playback over a [`DiscreteSimulation`] (spec.md §4.8).
///
/// Keeps, per agent, a deep copy of its state at time zero so the current
/// time can move backward as well as forward: rewinding restores that
/// snapshot and replays forward from zero, rather than attempting to run the
/// simulation in reverse.
pub struct RecordedSimulation {
    sim: DiscreteSimulation,
    initial_snapshot: Vec<Agent>,
    windows: Vec<InterpWindow>,
    current_time_ms: u32,
}

impl RecordedSimulation {
    /// `sim` must be freshly constructed, with every agent at time zero.
    pub fn new(sim: DiscreteSimulation) -> Self {
        let n = sim.agent_count();
        let initial_snapshot: Vec<Agent> =
            (0..n).map(|i| sim.snapshot_agent(AgentId(i as u32))).collect();
        let windows: Vec<InterpWindow> = (0..n)
            .map(|i| InterpWindow::at_rest(sim.position(AgentId(i as u32))))
            .collect();
        Self { sim, initial_snapshot, windows, current_time_ms: 0 }
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.sim.duration_ms()
    }

    #[inline]
    pub fn current_time_ms(&self) -> u32 {
        self.current_time_ms
    }

    /// Move every agent's interpolation window so it straddles `time_ms`
    /// (clamped to `[0, duration_ms()]`), rewinding or advancing each agent
    /// independently as needed.
    pub fn set_time(&mut self, time_ms: u32) -> ReplayResult<()> {
        let target = time_ms.min(self.duration_ms());
        for i in 0..self.windows.len() {
            self.set_agent_time(AgentId(i as u32), target)?;
        }
        self.current_time_ms = target;
        Ok(())
    }

    fn set_agent_time(&mut self, id: AgentId, target_ms: u32) -> ReplayResult<()> {
        let idx = id.index();

        if target_ms < self.windows[idx].prev_ms {
            self.sim.restore_agent(id, self.initial_snapshot[idx].clone());
            self.windows[idx] = InterpWindow::at_rest(self.sim.position(id));
        }

        while self.windows[idx].next_ms < target_ms {
            let prev_ms = self.windows[idx].next_ms;
            let prev_pos = self.windows[idx].next_pos;
            let moved = self.sim.advance(id)?;
            let next_ms = self.sim.time_ms(id);
            let next_pos = self.sim.position(id);
            self.windows[idx] = InterpWindow { prev_ms, prev_pos, next_ms, next_pos };
            if !moved {
                break;
            }
        }

        Ok(())
    }

    /// The agent's position at the current time, linearly interpolated
    /// between the window's endpoints.
    pub fn get_location(&self, id: AgentId) -> Point {
        let w = &self.windows[id.index()];
        if w.next_ms == w.prev_ms {
            return to_point(w.next_pos);
        }
        let t = (self.current_time_ms.saturating_sub(w.prev_ms)) as f64
            / (w.next_ms - w.prev_ms) as f64;
        let a = to_point(w.prev_pos);
        let b = to_point(w.next_pos);
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}
