//! Core domain traits for the pickup-and-delivery planner.
//!
//! The planner never builds graphs, vehicles or tasks itself. Host applications
//! implement these traits for their own data models and hand them over
//! read-only for the duration of a planning call.

use std::hash::Hash;

/// Identity bound shared by cities and task identifiers.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// Distance and shortest-path queries between cities.
///
/// Implementations must be deterministic: repeated calls with the same
/// arguments return the same answer.
pub trait Topology {
    type City: Id;

    /// Symmetric, non-negative distance between two cities.
    fn distance(&self, from: &Self::City, to: &Self::City) -> f64;

    /// Cities visited when travelling from `from` to `to`, excluding `from`
    /// and including `to`. Empty when both cities are the same.
    fn shortest_path(&self, from: &Self::City, to: &Self::City) -> Vec<Self::City>;
}

/// A transport request: carry `weight` from the pickup city to the delivery city.
pub trait Task {
    type Id: Id;
    type City: Id;

    fn id(&self) -> &Self::Id;

    fn pickup_city(&self) -> &Self::City;

    fn delivery_city(&self) -> &Self::City;

    /// Non-negative load occupied while the task is carried.
    fn weight(&self) -> f64;
}

/// The single vehicle executing the plan.
pub trait Vehicle {
    type City: Id;

    /// City the plan starts from.
    fn current_city(&self) -> &Self::City;

    /// Maximum total weight the vehicle may carry at once.
    fn capacity(&self) -> f64;

    /// Multiplier applied to every travelled distance.
    fn cost_per_distance(&self) -> f64 {
        1.0
    }
}
