//! The simulation (spec.md §4.7 "Simulation", §5 "Concurrency & resource
//! model"): owns `N` agents, initialises them with a `Mutex`/`Condvar`
//! worker pool, and advances them one at a time.
//!
//! The teacher's crates never use a condition variable (`dt-sim`'s intent
//! phase either runs sequentially or hands the whole batch to Rayon's work-
//! stealing pool) — this coordinator is written fresh from the spec's
//! literal wording: a shared claim counter plus a seed generator drawn
//! inside the same critical section, so agent *i* gets the same seed
//! regardless of how many workers are racing for work.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use meas_core::{AgentId, ProgressMonitor, SeedGenerator};
use meas_crumb::Metric;
use meas_map::{Map, Waypoint};

use crate::agent::{Agent, AgentContext};
use crate::chooser::DestinationChooser;
use crate::distribution::{PauseDistribution, SpeedDistribution};
use crate::error::{MobilityError, MobilityResult};

/// Configuration bundling the CLI option surface of spec.md §6 that bears
/// on agent construction and advancement (destination chooser itself is
/// constructed separately and handed in, since its construction can fail
/// independently on ergodicity).
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub metric: Metric,
    pub disable_street_cut: bool,
    pub speed: SpeedDistribution,
    pub pause: PauseDistribution,
    pub agent_count: usize,
    pub duration_seconds: f64,
    pub seed: u64,
    /// Worker threads used for agent initialisation. `None` means "use
    /// every available core" (spec.md §5's default); an explicit count lets
    /// a caller — or a test checking spec.md §8 S6 — pin the thread count
    /// without going through a process-global.
    pub worker_count: Option<usize>,
}

pub struct Simulation {
    map: Arc<Map>,
    chooser: Arc<dyn DestinationChooser + Send + Sync>,
    config: SimConfig,
    agents: Vec<Agent>,
}

impl Simulation {
    /// Construct and initialise `config.agent_count` agents in parallel
    /// (spec.md §4.7 "Simulation", §5), using `config.worker_count` threads
    /// (or every available core if `None`). `monitor` is polled by the main
    /// thread between batches of completions; on cancellation, construction
    /// returns [`MobilityError::Cancelled`] rather than a half-built
    /// simulation. The resulting agent states are independent of the worker
    /// count (spec.md §8 S6): the seed for agent `i` is always drawn inside
    /// the same critical section that claims index `i`.
    pub fn new(
        map: Arc<Map>,
        chooser: Arc<dyn DestinationChooser + Send + Sync>,
        config: SimConfig,
        monitor: &(dyn ProgressMonitor + Sync),
    ) -> MobilityResult<Self> {
        let n = config.agent_count;
        let seed_gen = SeedGenerator::new(config.seed);
        let available = config
            .worker_count
            .unwrap_or_else(|| std::thread::available_parallelism().map(|p| p.get()).unwrap_or(1));
        let worker_count = n.min(available).max(1);

        let next_index = Mutex::new(0usize);
        let completed = Mutex::new(0usize);
        let cv = Condvar::new();
        let slots: Vec<Mutex<Option<MobilityResult<Agent>>>> = (0..n).map(|_| Mutex::new(None)).collect();

        std::thread::scope(|scope| {
            for _ in 0..worker_count {
                scope.spawn(|| {
                    loop {
                        let claimed = {
                            let mut next = next_index.lock().unwrap();
                            if *next >= n {
                                None
                            } else {
                                let idx = *next;
                                *next += 1;
                                // Seed draw happens inside the same critical
                                // section as the index claim: agent `idx`
                                // always gets this seed no matter which
                                // worker claims it or when (spec.md §5).
                                Some((idx, seed_gen.seed_for(idx as u64)))
                            }
                        };
                        let Some((idx, seed)) = claimed else { break };

                        let result = if monitor.should_cancel() {
                            Err(MobilityError::Cancelled)
                        } else {
                            let ctx = AgentContext {
                                map: map.as_ref(),
                                metric: config.metric,
                                disable_street_cut: config.disable_street_cut,
                                speed: config.speed,
                                pause: config.pause,
                                chooser: chooser.as_ref(),
                            };
                            Agent::new(&ctx, seed)
                        };
                        *slots[idx].lock().unwrap() = Some(result);

                        let mut done = completed.lock().unwrap();
                        *done += 1;
                        cv.notify_one();
                    }
                });
            }

            let mut done = completed.lock().unwrap();
            while *done < n && !monitor.should_cancel() {
                done = cv.wait_timeout(done, Duration::from_millis(20)).unwrap().0;
            }
        });

        if monitor.should_cancel() {
            return Err(MobilityError::Cancelled);
        }

        let mut agents = Vec::with_capacity(n);
        for slot in slots {
            match slot.into_inner().unwrap() {
                Some(Ok(agent)) => agents.push(agent),
                Some(Err(err)) => return Err(err),
                None => return Err(MobilityError::Cancelled),
            }
        }

        Ok(Self { map, chooser, config, agents })
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn duration_seconds(&self) -> f64 {
        self.config.duration_seconds
    }

    #[inline]
    pub fn position(&self, agent_id: AgentId) -> Waypoint {
        self.agents[agent_id.index()].current
    }

    #[inline]
    pub fn total_simulated_time(&self, agent_id: AgentId) -> f64 {
        self.agents[agent_id.index()].total_simulated_time
    }

    /// A deep copy of agent `agent_id`'s current state, for
    /// [`meas-replay`](../meas_replay/index.html)'s rewind support.
    #[inline]
    pub fn snapshot_agent(&self, agent_id: AgentId) -> Agent {
        self.agents[agent_id.index()].clone()
    }

    /// Replace agent `agent_id`'s state with a previously captured snapshot.
    #[inline]
    pub fn restore_agent(&mut self, agent_id: AgentId, snapshot: Agent) {
        self.agents[agent_id.index()] = snapshot;
    }

    /// spec.md §4.7 `advance(agentId)`. Returns `false` once the agent has
    /// reached the simulation's duration.
    pub fn advance(&mut self, agent_id: AgentId) -> MobilityResult<bool> {
        let agent = &mut self.agents[agent_id.index()];
        if agent.total_simulated_time >= self.config.duration_seconds {
            return Ok(false);
        }
        let remaining_duration = self.config.duration_seconds - agent.total_simulated_time;
        let step = agent.remaining_leg_time.min(remaining_duration);

        let ctx = AgentContext {
            map: self.map.as_ref(),
            metric: self.config.metric,
            disable_street_cut: self.config.disable_street_cut,
            speed: self.config.speed,
            pause: self.config.pause,
            chooser: self.chooser.as_ref(),
        };
        agent.advance(&ctx, step)?;
        Ok(true)
    }
}
