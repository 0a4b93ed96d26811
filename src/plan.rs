//! Plans returned to the host and their reconstruction from a goal transition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::instance::Instance;
use crate::transition::{Step, TransitionArena, TransitionId};
use crate::traits::{Id, Topology};

/// One atomic action the host executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction<C, I> {
    /// Drive to a neighbouring city on the shortest path.
    Move(C),
    Pickup(I),
    Deliver(I),
}

impl<C: fmt::Display, I: fmt::Display> fmt::Display for PlanAction<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::Move(city) => write!(f, "move to {city}"),
            PlanAction::Pickup(task) => write!(f, "pickup {task}"),
            PlanAction::Deliver(task) => write!(f, "deliver {task}"),
        }
    }
}

/// Ordered actions starting at the vehicle's city and ending with every task delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan<C, I> {
    start: C,
    actions: Vec<PlanAction<C, I>>,
    total_distance: f64,
    total_cost: f64,
}

impl<C, I> Plan<C, I> {
    /// A plan that stays put and does nothing.
    pub fn empty(start: C) -> Self {
        Self {
            start,
            actions: Vec::new(),
            total_distance: 0.0,
            total_cost: 0.0,
        }
    }

    /// City the vehicle is in before the first action.
    pub fn start(&self) -> &C {
        &self.start
    }

    pub fn actions(&self) -> &[PlanAction<C, I>] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<PlanAction<C, I>> {
        self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sum of the distances driven.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Driven distance scaled by the vehicle's cost per distance.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

impl<C: fmt::Display, I: fmt::Display> fmt::Display for Plan<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "plan from {} (cost {}):", self.start, self.total_cost)?;
        for action in &self.actions {
            writeln!(f, "  {action}")?;
        }
        Ok(())
    }
}

/// Rebuild the plan leading to `goal` by walking its predecessors.
///
/// Each move is expanded into the single-city hops of its shortest path.
pub fn build_plan<G: Topology, I: Id>(
    instance: &Instance<'_, G, I>,
    arena: &TransitionArena,
    goal: TransitionId,
) -> Plan<G::City, I> {
    let mut steps: Vec<Step> = arena.ancestry(goal).map(|id| arena.get(id).step).collect();
    steps.reverse();

    let graph = instance.graph();
    let mut plan = Plan::empty(instance.city(instance.start()).clone());
    for step in steps {
        match step {
            Step::Move { from, to } => {
                let path = graph.shortest_path(instance.city(from), instance.city(to));
                plan.actions.extend(path.into_iter().map(PlanAction::Move));
                plan.total_distance += instance.distance(from, to);
            }
            Step::Pickup(task) => {
                plan.actions.push(PlanAction::Pickup(instance.task(task).id.clone()));
            }
            Step::Deliver(task) => {
                plan.actions.push(PlanAction::Deliver(instance.task(task).id.clone()));
            }
        }
    }
    plan.total_cost = arena.get(goal).cost;
    plan
}
