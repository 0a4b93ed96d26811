//! Search-tree edges and successor generation.
//!
//! Transitions live in a `TransitionArena` and point at their predecessor by
//! id, so the tree can be walked back to its root without recursion.

use crate::instance::Instance;
use crate::state::State;
use crate::traits::{Id, Topology};

/// The action taken by one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Drive directly from one interned city to another.
    Move { from: usize, to: usize },
    /// Load the task with this index.
    Pickup(usize),
    /// Unload the task with this index.
    Deliver(usize),
}

impl Step {
    pub fn is_move(&self) -> bool {
        matches!(self, Step::Move { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(usize);

impl TransitionId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub step: Step,
    pub state: State,
    /// Absent for transitions generated from the root state.
    pub parent: Option<TransitionId>,
    /// Move cost accumulated from the root up to and including this step.
    pub cost: f64,
}

impl Transition {
    /// Best-first evaluation: cost so far plus the resulting state's heuristic.
    pub fn evaluation(&self) -> f64 {
        self.cost + self.state.heuristic()
    }
}

/// Memory for every transition generated by one search.
#[derive(Debug, Default)]
pub struct TransitionArena {
    nodes: Vec<Transition>,
}

impl TransitionArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition) -> TransitionId {
        let id = TransitionId(self.nodes.len());
        self.nodes.push(transition);
        id
    }

    pub fn get(&self, id: TransitionId) -> &Transition {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids from `id` back to its root, newest first.
    pub fn ancestry(&self, id: TransitionId) -> Ancestry<'_> {
        Ancestry {
            arena: self,
            next: Some(id),
        }
    }
}

pub struct Ancestry<'a> {
    arena: &'a TransitionArena,
    next: Option<TransitionId>,
}

impl Iterator for Ancestry<'_> {
    type Item = TransitionId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.get(current).parent;
        Some(current)
    }
}

/// Legal transitions out of `state`.
///
/// `parent` is the transition that produced `state`, or `None` for the root.
/// A carried task deliverable at the current city is always delivered first
/// and no sibling is generated. Two moves in a row are never generated since
/// a direct move already follows the shortest path.
pub fn successors<G: Topology, I: Id>(
    instance: &Instance<'_, G, I>,
    state: &State,
    parent: Option<(TransitionId, &Transition)>,
) -> Vec<Transition> {
    let max_load = instance.capacity();
    let parent_id = parent.map(|(id, _)| id);
    let cost = parent.map_or(0.0, |(_, transition)| transition.cost);

    if let Some(task) = state.deliverable(instance) {
        return vec![Transition {
            step: Step::Deliver(task),
            state: state.deliver(instance, task),
            parent: parent_id,
            cost,
        }];
    }

    let mut result: Vec<Transition> = state
        .pickable(instance, max_load)
        .into_iter()
        .map(|task| Transition {
            step: Step::Pickup(task),
            state: state.pick_up(instance, task),
            parent: parent_id,
            cost,
        })
        .collect();

    if parent.is_some_and(|(_, transition)| transition.step.is_move()) {
        return result;
    }

    let from = state.city();
    for to in state.candidate_move_cities(instance, max_load) {
        result.push(Transition {
            step: Step::Move { from, to },
            state: state.move_to(to),
            parent: parent_id,
            cost: cost + instance.move_cost(from, to),
        });
    }

    result
}
