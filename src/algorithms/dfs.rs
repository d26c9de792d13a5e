//! Depth-first search.

use crate::algorithms::SearchError;
use crate::algorithms::frontier::Lifo;
use crate::algorithms::uninformed::UninformedSearch;
use crate::problem::SearchProblem;
use crate::search::SearchTreeIndex;
use crate::space::Solution;

pub type DepthFirstSearch<P> = UninformedSearch<P, Lifo<SearchTreeIndex>>;

/// Finds some solution, diving into the most recently discovered state first.
///
/// Solutions may be far from optimal. There's no depth limit, termination
/// relies on every state being expanded at most once.
pub fn dfs<P>(problem: P) -> Result<Option<Solution<P::State, P::Action, P::Cost>>, SearchError>
where
    P: SearchProblem,
{
    DepthFirstSearch::new(problem).find_solution()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::algorithms::test_maps::*;
    use crate::problems::CornerSearchProblem;
    use crate::problems::GemSearchProblem;
    use crate::problems::SimpleSearchProblem;
    use crate::world::World;

    #[test]
    fn corridor() {
        let mut problem = SimpleSearchProblem::new(grid(CORRIDOR));
        let solution = dfs(&mut problem).unwrap().unwrap();
        assert_eq!(solution.n_steps(), 4);
        assert!(problem.nodes_expanded() <= 5);
        assert_eq!(replay(CORRIDOR, &solution), solution.end);
    }

    #[test]
    fn unreachable_exit() {
        let mut problem = SimpleSearchProblem::new(grid(WALLED_OFF));
        assert_eq!(dfs(&mut problem), Ok(None));
        assert_eq!(problem.nodes_expanded(), 4);
    }

    #[test]
    fn solutions_replay_to_a_goal() {
        let mut problem = SimpleSearchProblem::new(grid(TWO_AGENTS));
        let solution = dfs(&mut problem).unwrap().unwrap();
        assert!(solution.n_steps() >= 3);
        assert!(problem.is_goal_state(&solution.end));

        let end = replay(TWO_AGENTS, &solution);
        assert_eq!(end, solution.end);
        assert_eq!(problem.world().get_state(), *problem.initial_state());
    }

    #[test]
    fn corners() {
        let mut problem = CornerSearchProblem::new(grid(CORNERS_2X2));
        let solution = dfs(&mut problem).unwrap().unwrap();
        assert!(solution.n_steps() >= 4);
        assert!(problem.is_goal_state(&solution.end));
    }

    #[test]
    fn gems() {
        let mut problem = GemSearchProblem::new(grid(GEMS_LINE));
        let solution = dfs(&mut problem).unwrap().unwrap();
        assert!(solution.n_steps() >= 6);
        assert_eq!(replay(GEMS_LINE, &solution).n_gems_collected(), 2);
    }
}
