//! pdp-planner
//!
//! Single-vehicle pickup-and-delivery planning over a weighted city graph.
//! The host supplies the topology, the vehicle and the tasks through the
//! traits in [`traits`]; the planner returns an ordered [`plan::Plan`].

pub mod traits;
pub mod error;
pub mod config;
pub mod halt;
pub mod task_set;
pub mod instance;
pub mod state;
pub mod transition;
pub mod frontier;
pub mod plan;
pub mod solver;

#[cfg(test)]
mod test_support;

pub use config::{Algorithm, PlannerConfig, SearchLimits};
pub use error::{ConfigError, PlannerError};
pub use halt::CancelToken;
pub use plan::{Plan, PlanAction};
pub use solver::{FleetJob, PlanOutcome, Planner, SearchStats};
