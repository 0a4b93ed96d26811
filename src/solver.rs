//! Search driver: exhaustive breadth-first and best-first planning.

use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::config::{Algorithm, PlannerConfig};
use crate::error::PlannerError;
use crate::frontier::{BestFirstFrontier, FifoFrontier, Frontier};
use crate::halt::{CancelToken, ExpansionLimit, Halt};
use crate::instance::Instance;
use crate::plan::{Plan, build_plan};
use crate::state::State;
use crate::traits::{Id, Task, Topology, Vehicle};
use crate::transition::{TransitionArena, TransitionId, successors};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Transitions taken off the frontier and expanded.
    pub expanded: usize,
    /// Transitions created, including the ones never expanded.
    pub generated: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

#[derive(Debug, Clone)]
pub struct PlanOutcome<C, I> {
    pub plan: Plan<C, I>,
    pub stats: SearchStats,
}

/// One vehicle's planning request for [`Planner::plan_fleet`].
#[derive(Debug, Clone, Copy)]
pub struct FleetJob<'a, V, T> {
    pub vehicle: &'a V,
    pub tasks: &'a [T],
    /// Tasks already on board, empty for a fresh plan.
    pub carried: &'a [T],
}

/// Plans a single vehicle's pickups and deliveries over a topology.
///
/// Every call builds its own search tree, so one planner can serve many
/// vehicles as long as each call gets its own task snapshot.
#[derive(Debug, Clone)]
pub struct Planner<'g, G> {
    graph: &'g G,
    config: PlannerConfig,
    cancel: CancelToken,
}

impl<'g, G: Topology> Planner<'g, G> {
    pub fn new(graph: &'g G, config: PlannerConfig) -> Self {
        Self {
            graph,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Planner configured from a raw `algorithm` property, as read from host settings.
    ///
    /// A missing property selects best-first search.
    pub fn from_property(graph: &'g G, algorithm: Option<&str>) -> Result<Self, PlannerError> {
        let algorithm = Algorithm::from_property(algorithm)?;
        Ok(Self::new(graph, PlannerConfig::new(algorithm)))
    }

    /// Observe `token` between expansions and stop with [`PlannerError::Cancelled`] once raised.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan delivery of every task in `tasks` with an empty vehicle.
    pub fn plan<V, T>(&self, vehicle: &V, tasks: &[T]) -> Result<Plan<G::City, T::Id>, PlannerError>
    where
        V: Vehicle<City = G::City>,
        T: Task<City = G::City>,
    {
        self.solve(vehicle, tasks, &[]).map(|outcome| outcome.plan)
    }

    /// Plan again after an interrupted plan, with `carried` already on board.
    ///
    /// Pending tasks are `tasks` minus `carried`.
    pub fn replan<V, T>(
        &self,
        vehicle: &V,
        tasks: &[T],
        carried: &[T],
    ) -> Result<Plan<G::City, T::Id>, PlannerError>
    where
        V: Vehicle<City = G::City>,
        T: Task<City = G::City>,
    {
        self.solve(vehicle, tasks, carried).map(|outcome| outcome.plan)
    }

    /// Plan and report search statistics alongside the plan.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(algorithm = %self.config.algorithm, tasks = tasks.len(), carried = carried.len())
    )]
    pub fn solve<V, T>(
        &self,
        vehicle: &V,
        tasks: &[T],
        carried: &[T],
    ) -> Result<PlanOutcome<G::City, T::Id>, PlannerError>
    where
        V: Vehicle<City = G::City>,
        T: Task<City = G::City>,
    {
        let instance = Instance::new(self.graph, vehicle, tasks, carried)?;
        let root = State::root(&instance);
        debug!(
            tasks = instance.task_count(),
            carried = root.carried().len(),
            cities = instance.city_count(),
            heuristic = root.heuristic(),
            "starting search"
        );

        if root.is_goal() {
            return Ok(PlanOutcome {
                plan: Plan::empty(instance.city(instance.start()).clone()),
                stats: SearchStats::default(),
            });
        }

        let mut halt = (
            self.cancel.clone(),
            ExpansionLimit(self.config.limits.max_expansions),
        );
        let mut arena = TransitionArena::new();
        let result = match self.config.algorithm {
            Algorithm::Exhaustive => search(
                &instance,
                &root,
                &mut arena,
                FifoFrontier::default(),
                &mut halt,
            ),
            Algorithm::BestFirst => search(
                &instance,
                &root,
                &mut arena,
                BestFirstFrontier::default(),
                &mut halt,
            ),
        };

        let (goal, stats) = match result {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "planning failed");
                return Err(err);
            }
        };

        let plan = build_plan(&instance, &arena, goal);
        info!(
            algorithm = %self.config.algorithm,
            expanded = stats.expanded,
            generated = stats.generated,
            cost = plan.total_cost(),
            actions = plan.len(),
            "plan found"
        );
        Ok(PlanOutcome { plan, stats })
    }
}

impl<G> Planner<'_, G>
where
    G: Topology + Sync,
    G::City: Send,
{
    /// Plan several vehicles independently and in parallel.
    ///
    /// Vehicles do not coordinate: a task listed in two jobs is planned twice.
    /// Results come back in job order.
    pub fn plan_fleet<V, T>(
        &self,
        jobs: &[FleetJob<'_, V, T>],
    ) -> Vec<Result<Plan<G::City, T::Id>, PlannerError>>
    where
        V: Vehicle<City = G::City> + Sync,
        T: Task<City = G::City> + Sync,
        T::Id: Send,
    {
        jobs.par_iter()
            .map(|job| self.replan(job.vehicle, job.tasks, job.carried))
            .collect()
    }
}

/// Expand transitions from `frontier` until one reaches a goal state.
fn search<G, I, F, H>(
    instance: &Instance<'_, G, I>,
    root: &State,
    arena: &mut TransitionArena,
    mut frontier: F,
    halt: &mut H,
) -> Result<(TransitionId, SearchStats), PlannerError>
where
    G: Topology,
    I: Id,
    F: Frontier,
    H: Halt,
{
    let mut stats = SearchStats::default();
    for transition in successors(instance, root, None) {
        let id = arena.push(transition);
        frontier.push(id, arena.get(id));
        stats.generated += 1;
    }
    stats.peak_frontier = frontier.len();

    while let Some(id) = frontier.pop() {
        let current = arena.get(id);
        if current.state.is_goal() {
            return Ok((id, stats));
        }

        halt.halt(stats.expanded)?;
        stats.expanded += 1;
        trace!(
            id = id.index(),
            cost = current.cost,
            heuristic = current.state.heuristic(),
            "expanding"
        );

        let next = successors(instance, &current.state, Some((id, current)));
        for transition in next {
            let child = arena.push(transition);
            frontier.push(child, arena.get(child));
            stats.generated += 1;
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    Err(PlannerError::Unsolvable {
        expanded: stats.expanded,
    })
}
