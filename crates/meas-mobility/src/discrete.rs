//! The discrete (integer ms / integer mm) wrapper (spec.md §4.7 "Discrete
//! wrapper").

use meas_core::AgentId;
use meas_map::Waypoint;

use crate::agent::Agent;
use crate::error::MobilityResult;
use crate::sim::Simulation;

/// A position quantised to integer millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscretePosition {
    pub x_mm: u32,
    pub y_mm: u32,
}

fn to_discrete(wp: Waypoint) -> DiscretePosition {
    DiscretePosition { x_mm: (wp.point.x * 1000.0).round() as u32, y_mm: (wp.point.y * 1000.0).round() as u32 }
}

/// Wraps a [`Simulation`], exposing integer-millisecond time and integer-
/// millimetre coordinates (spec.md §4.7, §6 MVISP framing).
pub struct DiscreteSimulation {
    inner: Simulation,
}

impl DiscreteSimulation {
    pub fn new(inner: Simulation) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.inner.agent_count()
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        (self.inner.duration_seconds() * 1000.0).round() as u32
    }

    #[inline]
    pub fn time_ms(&self, agent_id: AgentId) -> u32 {
        (self.inner.total_simulated_time(agent_id) * 1000.0).round() as u32
    }

    #[inline]
    pub fn position(&self, agent_id: AgentId) -> DiscretePosition {
        to_discrete(self.inner.position(agent_id))
    }

    /// A deep copy of agent `agent_id`'s current state, for rewinding.
    #[inline]
    pub fn snapshot_agent(&self, agent_id: AgentId) -> Agent {
        self.inner.snapshot_agent(agent_id)
    }

    /// Replace agent `agent_id`'s state with a previously captured snapshot.
    #[inline]
    pub fn restore_agent(&mut self, agent_id: AgentId, snapshot: Agent) {
        self.inner.restore_agent(agent_id, snapshot);
    }

    /// Repeats the underlying `advance` until the rounded millisecond time
    /// strictly increases (collapsing zero-duration legs from coincident
    /// waypoints), or the simulation's duration is reached.
    pub fn advance(&mut self, agent_id: AgentId) -> MobilityResult<bool> {
        let before = self.time_ms(agent_id);
        loop {
            if !self.inner.advance(agent_id)? {
                return Ok(false);
            }
            if self.time_ms(agent_id) != before {
                return Ok(true);
            }
        }
    }
}
