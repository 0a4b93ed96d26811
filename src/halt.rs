//! Ways to stop a search before it finishes on its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PlannerError;

/// Checked once per expansion; returning an error aborts the search.
pub trait Halt {
    fn halt(&mut self, expanded: usize) -> Result<(), PlannerError>;
}

/// Never halts.
impl Halt for () {
    fn halt(&mut self, _: usize) -> Result<(), PlannerError> {
        Ok(())
    }
}

impl<A: Halt, B: Halt> Halt for (A, B) {
    fn halt(&mut self, expanded: usize) -> Result<(), PlannerError> {
        self.0.halt(expanded)?;
        self.1.halt(expanded)
    }
}

/// Shared flag another thread can raise to cancel planning.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Halt for CancelToken {
    fn halt(&mut self, expanded: usize) -> Result<(), PlannerError> {
        if self.is_cancelled() {
            return Err(PlannerError::Cancelled { expanded });
        }
        Ok(())
    }
}

/// Allows at most `limit` expansions.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimit(pub Option<usize>);

impl Halt for ExpansionLimit {
    fn halt(&mut self, expanded: usize) -> Result<(), PlannerError> {
        match self.0 {
            Some(limit) if expanded >= limit => Err(PlannerError::ExpansionLimit { limit }),
            _ => Ok(()),
        }
    }
}
