//! Frontier queues driving the two search strategies.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::transition::{Transition, TransitionId};

/// Working set of transitions that have not been expanded yet.
pub trait Frontier {
    fn push(&mut self, id: TransitionId, transition: &Transition);

    fn pop(&mut self) -> Option<TransitionId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out queue for the exhaustive breadth-first strategy.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<TransitionId>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, id: TransitionId, _: &Transition) {
        self.queue.push_back(id);
    }

    fn pop(&mut self) -> Option<TransitionId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Priority queue ordered by `cost + heuristic`.
///
/// Equal evaluations are broken by the lower heuristic, so the transition
/// closer to a goal goes first, and then by insertion order.
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    queue: BinaryHeap<Reverse<Ticket>>,
    pushed: u64,
}

impl Frontier for BestFirstFrontier {
    fn push(&mut self, id: TransitionId, transition: &Transition) {
        self.queue.push(Reverse(Ticket {
            evaluation: transition.evaluation(),
            bias: transition.state.heuristic(),
            sequence: self.pushed,
            id,
        }));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<TransitionId> {
        self.queue.pop().map(|Reverse(ticket)| ticket.id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Ticket {
    evaluation: f64,
    bias: f64,
    sequence: u64,
    id: TransitionId,
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.evaluation
            .total_cmp(&other.evaluation)
            .then_with(|| self.bias.total_cmp(&other.bias))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}
