//! Search states.
//!
//! A `State` is an immutable snapshot of where the vehicle is and which tasks
//! are still waiting or on board. Its heuristic is computed once when the
//! state is built and never changes afterwards.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::instance::Instance;
use crate::task_set::TaskSet;
use crate::traits::{Id, Topology};

#[derive(Debug, Clone)]
pub struct State {
    city: usize,
    pending: TaskSet,
    carried: TaskSet,
    weight: f64,
    heuristic: f64,
}

impl State {
    /// Vehicle at `city` with every task in `available` still to pick up.
    pub fn initial<G: Topology, I: Id>(
        instance: &Instance<'_, G, I>,
        city: usize,
        available: TaskSet,
    ) -> Self {
        let carried = TaskSet::empty(instance.task_count());
        Self::new(instance, city, available, carried, 0.0)
    }

    /// Vehicle at `city` that already carries `carried`; everything else in
    /// `all` is pending.
    pub fn with_carried<G: Topology, I: Id>(
        instance: &Instance<'_, G, I>,
        city: usize,
        all: &TaskSet,
        carried: TaskSet,
    ) -> Self {
        let pending = all.difference(&carried);
        let weight = carried.weight(instance.weights());
        Self::new(instance, city, pending, carried, weight)
    }

    /// Root state of `instance`: its start city and carried seed.
    pub fn root<G: Topology, I: Id>(instance: &Instance<'_, G, I>) -> Self {
        let all = TaskSet::full(instance.task_count());
        Self::with_carried(instance, instance.start(), &all, instance.carried().clone())
    }

    fn new<G: Topology, I: Id>(
        instance: &Instance<'_, G, I>,
        city: usize,
        pending: TaskSet,
        carried: TaskSet,
        weight: f64,
    ) -> Self {
        let heuristic = instance.heuristic(&pending);
        Self {
            city,
            pending,
            carried,
            weight,
            heuristic,
        }
    }

    pub fn city(&self) -> usize {
        self.city
    }

    /// Tasks not yet picked up.
    pub fn pending(&self) -> &TaskSet {
        &self.pending
    }

    /// Tasks on board.
    pub fn carried(&self) -> &TaskSet {
        &self.carried
    }

    /// Total weight on board, always summed over the carried set in task order.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Lower bound on the cost still needed to reach a goal.
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    pub fn is_goal(&self) -> bool {
        self.pending.is_empty() && self.carried.is_empty()
    }

    /// Cities worth driving to next, in ascending index order.
    ///
    /// Pickup cities of pending tasks that still fit under `max_load`, plus
    /// delivery cities of carried tasks. The current city is never included.
    pub fn candidate_move_cities<G: Topology, I: Id>(
        &self,
        instance: &Instance<'_, G, I>,
        max_load: f64,
    ) -> BTreeSet<usize> {
        let mut cities = BTreeSet::new();
        for index in self.pending.iter() {
            let task = instance.task(index);
            if self.weight + task.weight <= max_load {
                cities.insert(task.pickup);
            }
        }
        for index in self.carried.iter() {
            cities.insert(instance.task(index).delivery);
        }
        cities.remove(&self.city);
        cities
    }

    /// First carried task that can be delivered where the vehicle stands.
    pub fn deliverable<G: Topology, I: Id>(&self, instance: &Instance<'_, G, I>) -> Option<usize> {
        self.carried
            .iter()
            .find(|&index| instance.task(index).delivery == self.city)
    }

    /// Pending tasks waiting at the current city that fit under `max_load`.
    pub fn pickable<G: Topology, I: Id>(
        &self,
        instance: &Instance<'_, G, I>,
        max_load: f64,
    ) -> Vec<usize> {
        self.pending
            .iter()
            .filter(|&index| {
                let task = instance.task(index);
                task.pickup == self.city && self.weight + task.weight <= max_load
            })
            .collect()
    }

    /// State after loading pending task `index`.
    pub fn pick_up<G: Topology, I: Id>(&self, instance: &Instance<'_, G, I>, index: usize) -> Self {
        debug_assert!(self.pending.contains(index));
        let carried = self.carried.with(index);
        let weight = carried.weight(instance.weights());
        Self::new(instance, self.city, self.pending.without(index), carried, weight)
    }

    /// State after unloading carried task `index`.
    pub fn deliver<G: Topology, I: Id>(&self, instance: &Instance<'_, G, I>, index: usize) -> Self {
        debug_assert!(self.carried.contains(index));
        let carried = self.carried.without(index);
        let weight = carried.weight(instance.weights());
        Self {
            city: self.city,
            pending: self.pending.clone(),
            carried,
            weight,
            heuristic: self.heuristic,
        }
    }

    /// State after driving to `city`. Pending tasks, and so the heuristic, are unchanged.
    pub fn move_to(&self, city: usize) -> Self {
        Self {
            city,
            pending: self.pending.clone(),
            carried: self.carried.clone(),
            weight: self.weight,
            heuristic: self.heuristic,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.city == other.city && self.pending == other.pending && self.carried == other.carried
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.city.hash(state);
        self.pending.hash(state);
        self.carried.hash(state);
    }
}
