//! Error types raised while configuring the planner or searching for a plan.

use thiserror::Error;

/// Errors raised while reading planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The algorithm name matches none of the supported strategies.
    #[error("unknown planning algorithm `{0}` (expected one of: bfs, exhaustive, astar, best-first)")]
    UnknownAlgorithm(String),
}

/// Errors raised by a planning call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Configuration was rejected before any search started.
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A single task is heavier than the vehicle can ever carry.
    #[error("task #{index} weighs {weight} but vehicle capacity is {capacity}")]
    InfeasibleTask {
        /// Position of the task in the instance task table.
        index: usize,
        weight: f64,
        capacity: f64,
    },
    /// The carried-task seed already exceeds the vehicle capacity.
    #[error("carried tasks weigh {weight} but vehicle capacity is {capacity}")]
    CarriedOverCapacity { weight: f64, capacity: f64 },
    /// The topology has no path from a task's pickup city to its delivery city.
    #[error("task #{index} has no path from its pickup city to its delivery city")]
    NoPath { index: usize },
    /// Every branch was explored without reaching a goal state.
    #[error("no plan delivers every task (expanded {expanded} transitions)")]
    Unsolvable { expanded: usize },
    /// The search was cancelled through its cancel token.
    #[error("planning cancelled after expanding {expanded} transitions")]
    Cancelled { expanded: usize },
    /// The configured expansion budget ran out.
    #[error("expansion limit of {limit} transitions reached")]
    ExpansionLimit { limit: usize },
}
