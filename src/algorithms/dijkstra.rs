//! Uniform-cost search, as A* without guidance.

use crate::algorithms::SearchError;
use crate::algorithms::astar::AStarSearch;
use crate::problem::SearchProblem;
use crate::space::Solution;
use crate::space::Successor;
use crate::world::WorldError;

/// Hides the heuristic of a problem.
#[derive(Debug)]
pub struct Blind<P>(pub P)
where
    P: SearchProblem;

impl<P> SearchProblem for Blind<P>
where
    P: SearchProblem,
{
    type State = P::State;
    type Action = P::Action;
    type Cost = P::Cost;

    fn initial_state(&self) -> &Self::State {
        self.0.initial_state()
    }
    fn is_goal_state(&self, state: &Self::State) -> bool {
        self.0.is_goal_state(state)
    }
    fn get_successors(
        &mut self,
        state: &Self::State,
    ) -> Result<Vec<Successor<Self::State, Self::Action, Self::Cost>>, WorldError> {
        self.0.get_successors(state)
    }
    fn nodes_expanded(&self) -> usize {
        self.0.nodes_expanded()
    }
}

/// Finds a minimum-cost solution expanding states by cost-so-far alone.
pub fn dijkstra<P>(
    problem: P,
) -> Result<Option<Solution<P::State, P::Action, P::Cost>>, SearchError>
where
    P: SearchProblem,
{
    AStarSearch::new(Blind(problem)).find_solution()
}
