//! Small in-crate fixtures for unit tests. Scenario fixtures live under `tests/`.

use crate::traits::{Task, Topology, Vehicle};

/// Unbounded straight road with cities one unit apart.
#[derive(Debug)]
pub struct Line;

impl Topology for Line {
    type City = usize;

    fn distance(&self, from: &usize, to: &usize) -> f64 {
        from.abs_diff(*to) as f64
    }

    fn shortest_path(&self, from: &usize, to: &usize) -> Vec<usize> {
        if from <= to {
            (*from + 1..=*to).collect()
        } else {
            (*to..*from).rev().collect()
        }
    }
}

/// `(id, pickup, delivery, weight)`
#[derive(Debug, Clone)]
pub struct TestTask(u32, usize, usize, f64);

impl TestTask {
    pub fn new(id: u32, pickup: usize, delivery: usize, weight: f64) -> Self {
        Self(id, pickup, delivery, weight)
    }
}

impl Task for TestTask {
    type Id = u32;
    type City = usize;

    fn id(&self) -> &u32 {
        &self.0
    }

    fn pickup_city(&self) -> &usize {
        &self.1
    }

    fn delivery_city(&self) -> &usize {
        &self.2
    }

    fn weight(&self) -> f64 {
        self.3
    }
}

/// `(city, capacity, cost per distance)`
#[derive(Debug)]
pub struct TestVehicle(usize, f64, f64);

impl TestVehicle {
    pub fn new(city: usize, capacity: f64) -> Self {
        Self(city, capacity, 1.0)
    }

    pub fn with_cost_per_distance(self, cost_per_distance: f64) -> Self {
        Self(self.0, self.1, cost_per_distance)
    }
}

impl Vehicle for TestVehicle {
    type City = usize;

    fn current_city(&self) -> &usize {
        &self.0
    }

    fn capacity(&self) -> f64 {
        self.1
    }

    fn cost_per_distance(&self) -> f64 {
        self.2
    }
}
