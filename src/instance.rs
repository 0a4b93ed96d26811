//! Interned, read-only view of a single planning call.
//!
//! Cities and tasks are mapped to dense indices once so the search can work
//! on bitsets and integers. The per-task shortest-path edges used by the
//! heuristic are resolved here as well, so states never call back into the
//! topology while the search runs.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use tracing::warn;

use crate::error::PlannerError;
use crate::task_set::TaskSet;
use crate::traits::{Id, Task, Topology, Vehicle};

/// A task resolved against the instance city table.
#[derive(Debug, Clone)]
pub struct TaskEntry<I> {
    pub id: I,
    pub pickup: usize,
    pub delivery: usize,
    pub weight: f64,
}

#[derive(Debug)]
pub struct Instance<'g, G: Topology, I> {
    graph: &'g G,
    cities: Vec<G::City>,
    city_index: HashMap<G::City, usize>,
    tasks: Vec<TaskEntry<I>>,
    weights: Vec<f64>,
    start: usize,
    carried: TaskSet,
    capacity: f64,
    cost_per_distance: f64,
    /// Edges of each task's pickup-to-delivery shortest path, as indices into `edge_costs`.
    task_edges: Vec<FixedBitSet>,
    edge_costs: Vec<f64>,
}

impl<'g, G, I> Instance<'g, G, I>
where
    G: Topology,
    I: Id,
{
    /// Build the instance for `vehicle`, with `carried` already on board.
    ///
    /// Carried tasks missing from `tasks` are appended to the task table, so
    /// the pending set is always `tasks` minus `carried`.
    pub fn new<V, T>(
        graph: &'g G,
        vehicle: &V,
        tasks: &[T],
        carried: &[T],
    ) -> Result<Self, PlannerError>
    where
        V: Vehicle<City = G::City>,
        T: Task<Id = I, City = G::City>,
    {
        let mut builder = Builder {
            cities: Vec::new(),
            city_index: HashMap::new(),
        };
        let start = builder.intern(vehicle.current_city());
        let capacity = vehicle.capacity();
        let cost_per_distance = vehicle.cost_per_distance();

        let mut task_index: HashMap<I, usize> = HashMap::new();
        let mut entries: Vec<TaskEntry<I>> = Vec::with_capacity(tasks.len());
        for task in tasks.iter().chain(carried) {
            if task_index.contains_key(task.id()) {
                continue;
            }
            task_index.insert(task.id().clone(), entries.len());
            entries.push(TaskEntry {
                id: task.id().clone(),
                pickup: builder.intern(task.pickup_city()),
                delivery: builder.intern(task.delivery_city()),
                weight: task.weight(),
            });
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.weight > capacity {
                warn!(index, weight = entry.weight, capacity, "task can never fit in the vehicle");
                return Err(PlannerError::InfeasibleTask {
                    index,
                    weight: entry.weight,
                    capacity,
                });
            }
        }

        let weights: Vec<f64> = entries.iter().map(|entry| entry.weight).collect();
        let carried = TaskSet::from_indices(
            entries.len(),
            carried.iter().map(|task| task_index[task.id()]),
        );
        let carried_weight = carried.weight(&weights);
        if carried_weight > capacity {
            warn!(weight = carried_weight, capacity, "carried tasks exceed vehicle capacity");
            return Err(PlannerError::CarriedOverCapacity {
                weight: carried_weight,
                capacity,
            });
        }

        let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edge_costs: Vec<f64> = Vec::new();
        let mut paths: Vec<Vec<usize>> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let pickup = builder.cities[entry.pickup].clone();
            let delivery = builder.cities[entry.delivery].clone();
            let path = graph.shortest_path(&pickup, &delivery);
            if path.is_empty() && entry.pickup != entry.delivery {
                return Err(PlannerError::NoPath { index });
            }

            let mut edges = Vec::with_capacity(path.len());
            let mut previous = entry.pickup;
            let mut previous_city = pickup;
            for city in path {
                let current = builder.intern(&city);
                let edge = *edge_index.entry((previous, current)).or_insert_with(|| {
                    edge_costs.push(graph.distance(&previous_city, &city) * cost_per_distance);
                    edge_costs.len() - 1
                });
                edges.push(edge);
                previous = current;
                previous_city = city;
            }
            paths.push(edges);
        }

        let task_edges = paths
            .into_iter()
            .map(|edges| {
                let mut bits = FixedBitSet::with_capacity(edge_costs.len());
                bits.extend(edges);
                bits
            })
            .collect();

        Ok(Self {
            graph,
            cities: builder.cities,
            city_index: builder.city_index,
            tasks: entries,
            weights,
            start,
            carried,
            capacity,
            cost_per_distance,
            task_edges,
            edge_costs,
        })
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn city(&self, index: usize) -> &G::City {
        &self.cities[index]
    }

    pub fn city_index(&self, city: &G::City) -> Option<usize> {
        self.city_index.get(city).copied()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn task(&self, index: usize) -> &TaskEntry<I> {
        &self.tasks[index]
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Weight of every task, indexed like the task table.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// City the vehicle starts from.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Tasks already on board when planning starts.
    pub fn carried(&self) -> &TaskSet {
        &self.carried
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    /// Raw topology distance between two interned cities.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.graph.distance(&self.cities[from], &self.cities[to])
    }

    /// Cost of moving directly between two interned cities.
    pub fn move_cost(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to) * self.cost_per_distance
    }

    /// Sum of the distinct directed edges on the shortest paths of `pending`.
    ///
    /// An edge shared by several tasks is counted once.
    pub fn heuristic(&self, pending: &TaskSet) -> f64 {
        let mut union = FixedBitSet::with_capacity(self.edge_costs.len());
        for task in pending.iter() {
            union.union_with(&self.task_edges[task]);
        }
        union.ones().map(|edge| self.edge_costs[edge]).sum()
    }
}

struct Builder<C> {
    cities: Vec<C>,
    city_index: HashMap<C, usize>,
}

impl<C: Id> Builder<C> {
    fn intern(&mut self, city: &C) -> usize {
        if let Some(&index) = self.city_index.get(city) {
            return index;
        }
        let index = self.cities.len();
        self.cities.push(city.clone());
        self.city_index.insert(city.clone(), index);
        index
    }
}
