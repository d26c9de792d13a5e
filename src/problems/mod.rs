//! Search problems over a grid world.
//!
//! All of them step a [`crate::world::World`] to expand states and pay one unit
//! per joint action. They differ in what a state remembers and what a goal is:
//!
//! - [`simple::SimpleSearchProblem`]: every agent reaches an exit.
//! - [`corners::CornerSearchProblem`]: the four grid corners are visited, then
//!   every agent exits.
//! - [`gems::GemSearchProblem`]: every gem is collected, then every agent exits.

use crate::float_cost::StepCost;
use crate::world::Position;

pub mod corners;
pub mod gems;
pub mod simple;

pub use corners::CornerProblemState;
pub use corners::CornerSearchProblem;
pub use gems::GemProblemState;
pub use gems::GemSearchProblem;
pub use simple::SimpleSearchProblem;

/// The cost of every joint action.
pub const STEP_COST: f64 = 1.0;

#[inline(always)]
pub(crate) fn step_cost() -> StepCost {
    StepCost::new(STEP_COST)
}

/// Every agent has to walk to some exit, and they all move in parallel.
///
/// ```
/// use world_search::problems::exit_bound;
/// use world_search::world::Position;
///
/// let exits = [Position::new(0, 4), Position::new(4, 0)];
/// let agents = [Position::new(0, 0), Position::new(2, 0)];
/// assert_eq!(exit_bound(&agents, &exits), 4);
/// ```
#[must_use]
pub fn exit_bound(agents: &[Position], exits: &[Position]) -> usize {
    agents
        .iter()
        .filter_map(|a| a.closest(exits))
        .max()
        .unwrap_or(0)
}

/// Every pending target has to be reached by some agent which then walks on to
/// an exit.
///
/// ```
/// use world_search::problems::detour_bound;
/// use world_search::world::Position;
///
/// let agents = [Position::new(0, 0)];
/// let targets = [Position::new(0, 3), Position::new(2, 1)];
/// let exits = [Position::new(2, 4)];
/// // Reaching (0, 3) takes 3, then 3 more to leave.
/// assert_eq!(detour_bound(&agents, &targets, &exits), 6);
/// ```
#[must_use]
pub fn detour_bound(agents: &[Position], targets: &[Position], exits: &[Position]) -> usize {
    targets
        .iter()
        .filter_map(|t| Some(t.closest(agents)? + t.closest(exits)?))
        .max()
        .unwrap_or(0)
}

#[inline(always)]
pub(crate) fn to_cost(steps: usize) -> StepCost {
    StepCost::new(steps as f64 * STEP_COST)
}
