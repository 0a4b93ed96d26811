//! Test fixtures for pdp-planner.
//!
//! Provides:
//! - `Line`: cities `0..n` one unit apart on a straight road (a tree metric)
//! - `RoadMap`: named cities joined by weighted roads, with deterministic
//!   all-pairs shortest paths
//! - Builders for tasks and vehicles

#![allow(dead_code)]

use std::collections::HashMap;

use pdp_planner::traits::{Task, Topology, Vehicle};

// ============================================================================
// Topologies
// ============================================================================

#[derive(Debug, Clone)]
pub struct Line {
    len: usize,
}

impl Line {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

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

/// Undirected weighted road network between named cities.
#[derive(Debug, Clone)]
pub struct RoadMap {
    names: Vec<&'static str>,
    index: HashMap<&'static str, usize>,
    dist: Vec<Vec<f64>>,
    next: Vec<Vec<Option<usize>>>,
}

impl RoadMap {
    /// Build from `(a, b, length)` roads. Ties between equal-length routes are
    /// resolved by road order, so paths are stable across calls.
    pub fn new(roads: &[(&'static str, &'static str, f64)]) -> Self {
        let mut names = Vec::new();
        let mut index = HashMap::new();
        for &(a, b, _) in roads {
            for name in [a, b] {
                index.entry(name).or_insert_with(|| {
                    names.push(name);
                    names.len() - 1
                });
            }
        }

        let n = names.len();
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        let mut next = vec![vec![None; n]; n];
        for i in 0..n {
            dist[i][i] = 0.0;
            next[i][i] = Some(i);
        }
        for &(a, b, length) in roads {
            let (i, j) = (index[a], index[b]);
            if length < dist[i][j] {
                dist[i][j] = length;
                dist[j][i] = length;
                next[i][j] = Some(j);
                next[j][i] = Some(i);
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        Self {
            names,
            index,
            dist,
            next,
        }
    }

    pub fn cities(&self) -> &[&'static str] {
        &self.names
    }
}

impl Topology for RoadMap {
    type City = &'static str;

    fn distance(&self, from: &&'static str, to: &&'static str) -> f64 {
        self.dist[self.index[from]][self.index[to]]
    }

    fn shortest_path(&self, from: &&'static str, to: &&'static str) -> Vec<&'static str> {
        let target = self.index[to];
        let mut current = self.index[from];
        let mut path = Vec::new();
        while current != target {
            match self.next[current][target] {
                Some(hop) => {
                    path.push(self.names[hop]);
                    current = hop;
                }
                None => return Vec::new(),
            }
        }
        path
    }
}

// ============================================================================
// Tasks and vehicles
// ============================================================================

#[derive(Debug, Clone)]
pub struct TestTask<C> {
    pub id: u32,
    pub pickup: C,
    pub delivery: C,
    pub weight: f64,
}

impl<C> TestTask<C> {
    pub fn new(id: u32, pickup: C, delivery: C, weight: f64) -> Self {
        Self {
            id,
            pickup,
            delivery,
            weight,
        }
    }
}

impl<C: Clone + Eq + std::hash::Hash> Task for TestTask<C> {
    type Id = u32;
    type City = C;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn pickup_city(&self) -> &C {
        &self.pickup
    }

    fn delivery_city(&self) -> &C {
        &self.delivery
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Builder for test vehicles with a unit cost per distance.
#[derive(Debug, Clone)]
pub struct TestVehicle<C> {
    pub city: C,
    pub capacity: f64,
    pub cost_per_distance: f64,
}

impl<C> TestVehicle<C> {
    pub fn new(city: C, capacity: f64) -> Self {
        Self {
            city,
            capacity,
            cost_per_distance: 1.0,
        }
    }

    pub fn cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }
}

impl<C: Clone + Eq + std::hash::Hash> Vehicle for TestVehicle<C> {
    type City = C;

    fn current_city(&self) -> &C {
        &self.city
    }

    fn capacity(&self) -> f64 {
        self.capacity
    }

    fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }
}

// ============================================================================
// Plan replay
// ============================================================================

/// What replaying a plan step by step observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay<C> {
    pub final_city: C,
    pub distance: f64,
    pub peak_weight: f64,
    pub delivered: Vec<u32>,
}

/// Execute `plan` against `tasks`, checking every action is legal.
///
/// Moves must go to adjacent cities on the shortest path, pickups and
/// deliveries must happen in the right city, and the vehicle never exceeds
/// its capacity.
pub fn replay<G, C>(
    graph: &G,
    vehicle: &TestVehicle<C>,
    tasks: &[TestTask<C>],
    carried: &[TestTask<C>],
    plan: &pdp_planner::Plan<C, u32>,
) -> Result<Replay<C>, String>
where
    G: Topology<City = C>,
    C: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    use pdp_planner::PlanAction;

    let by_id: HashMap<u32, &TestTask<C>> =
        tasks.iter().chain(carried).map(|task| (task.id, task)).collect();
    let mut on_board: Vec<u32> = carried.iter().map(|task| task.id).collect();
    let mut waiting: Vec<u32> = tasks
        .iter()
        .map(|task| task.id)
        .filter(|id| !on_board.contains(id))
        .collect();
    let mut weight: f64 = carried.iter().map(|task| task.weight).sum();
    let mut peak_weight = weight;
    let mut city = vehicle.city.clone();
    let mut distance = 0.0;
    let mut delivered = Vec::new();

    if plan.start() != &city {
        return Err(format!("plan starts at {:?}, vehicle is at {:?}", plan.start(), city));
    }

    for action in plan.actions() {
        match action {
            PlanAction::Move(to) => {
                if graph.shortest_path(&city, to) != vec![to.clone()] {
                    return Err(format!("move {:?} -> {:?} is not a single hop", city, to));
                }
                distance += graph.distance(&city, to);
                city = to.clone();
            }
            PlanAction::Pickup(id) => {
                let task = by_id[id];
                let position = waiting
                    .iter()
                    .position(|waiting_id| waiting_id == id)
                    .ok_or_else(|| format!("task {id} picked up twice"))?;
                if task.pickup != city {
                    return Err(format!("task {id} picked up away from its pickup city"));
                }
                waiting.remove(position);
                on_board.push(*id);
                weight += task.weight;
                peak_weight = peak_weight.max(weight);
                if weight > vehicle.capacity {
                    return Err(format!("weight {weight} exceeds capacity"));
                }
            }
            PlanAction::Deliver(id) => {
                let task = by_id[id];
                let position = on_board
                    .iter()
                    .position(|carried_id| carried_id == id)
                    .ok_or_else(|| format!("task {id} delivered while not on board"))?;
                if task.delivery != city {
                    return Err(format!("task {id} delivered away from its delivery city"));
                }
                on_board.remove(position);
                weight -= task.weight;
                delivered.push(*id);
            }
        }
    }

    if !waiting.is_empty() || !on_board.is_empty() {
        return Err(format!(
            "plan ends with {} waiting and {} on board",
            waiting.len(),
            on_board.len()
        ));
    }

    Ok(Replay {
        final_city: city,
        distance,
        peak_weight,
        delivered,
    })
}
