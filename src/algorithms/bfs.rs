//! Breadth-first search.

use crate::algorithms::SearchError;
use crate::algorithms::frontier::Fifo;
use crate::algorithms::uninformed::UninformedSearch;
use crate::problem::SearchProblem;
use crate::search::SearchTreeIndex;
use crate::space::Solution;

pub type BreadthFirstSearch<P> = UninformedSearch<P, Fifo<SearchTreeIndex>>;

/// Finds a solution with the fewest steps, ignoring step costs.
///
/// Pass `&mut problem` to read [`SearchProblem::nodes_expanded`] afterwards.
pub fn bfs<P>(problem: P) -> Result<Option<Solution<P::State, P::Action, P::Cost>>, SearchError>
where
    P: SearchProblem,
{
    BreadthFirstSearch::new(problem).find_solution()
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
        let solution = bfs(&mut problem).unwrap().unwrap();
        assert_eq!(solution.n_steps(), 4);
        assert_eq!(problem.nodes_expanded(), 5);
        assert!(problem.is_goal_state(&solution.end));
        assert_eq!(replay(CORRIDOR, &solution), solution.end);
    }

    #[test]
    fn unreachable_exit() {
        let mut problem = SimpleSearchProblem::new(grid(WALLED_OFF));
        assert_eq!(bfs(&mut problem), Ok(None));
        // Only the four cells left of the wall.
        assert_eq!(problem.nodes_expanded(), 4);
    }

    #[test]
    fn agents_move_in_parallel() {
        let mut problem = SimpleSearchProblem::new(grid(TWO_AGENTS));
        let solution = bfs(&mut problem).unwrap().unwrap();
        assert_eq!(solution.n_steps(), 3);

        let end = replay(TWO_AGENTS, &solution);
        let world = problem.world();
        assert!(
            end.agents_positions
                .iter()
                .all(|p| world.exit_positions().contains(p))
        );
    }

    #[test]
    fn corners() {
        let mut problem = CornerSearchProblem::new(grid(CORNERS_2X2));
        let solution = bfs(&mut problem).unwrap().unwrap();
        assert_eq!(solution.n_steps(), 4);
        assert_eq!(solution.end.visited_corners.len(), 4);
    }

    #[test]
    fn gems() {
        let mut problem = GemSearchProblem::new(grid(GEMS_LINE));
        let solution = bfs(&mut problem).unwrap().unwrap();
        assert_eq!(solution.n_steps(), 6);
        assert_eq!(solution.end.gems_collected.len(), 2);
        assert_eq!(replay(GEMS_LINE, &solution).n_gems_collected(), 2);
    }

    #[test]
    fn leaves_the_world_untouched() {
        let mut problem = SimpleSearchProblem::new(grid(TWO_AGENTS));
        let before = problem.world().get_state();
        bfs(&mut problem).unwrap();
        assert_eq!(problem.world().get_state(), before);
    }
}
