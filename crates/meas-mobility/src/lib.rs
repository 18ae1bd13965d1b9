//! `meas-mobility` — destination choosers, the agent lifecycle, and the
//! simulation that owns and advances a population of agents (spec.md §4.6,
//! §4.7).

pub mod agent;
pub mod chooser;
pub mod discrete;
pub mod distribution;
pub mod error;
pub mod sim;


pub use agent::{Agent, AgentContext, BURN_IN_SECONDS};
pub use chooser::{DestinationChooser, IntegratedChooser, UniformChooser};
pub use discrete::{DiscretePosition, DiscreteSimulation};
pub use distribution::{PauseDistribution, RangeDistribution, SpeedDistribution};
pub use error::{MobilityError, MobilityResult};
pub use sim::{SimConfig, Simulation};
