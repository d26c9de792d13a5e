//! The graph search shared by BFS and DFS.

use num_traits::SaturatingAdd;
use num_traits::Zero;

use crate::algorithms::SearchError;
use crate::algorithms::frontier::Frontier;
use crate::problem::SearchProblem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Solution;

type ProblemSolution<P> = Solution<
    <P as SearchProblem>::State,
    <P as SearchProblem>::Action,
    <P as SearchProblem>::Cost,
>;

/// Graph search whose expansion order is given only by its frontier.
///
/// States enter the search tree when first discovered and never again, so a
/// state is queued at most once and expanded at most once. The goal test runs
/// on popped states, after expanding them.
#[derive(Debug)]
pub struct UninformedSearch<P, F>
where
    P: SearchProblem,
    F: Frontier<SearchTreeIndex>,
{
    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: F,
    problem: P,
}

impl<P, F> UninformedSearch<P, F>
where
    P: SearchProblem,
    F: Frontier<SearchTreeIndex>,
{
    #[must_use]
    pub fn new(problem: P) -> Self {
        let mut search = Self {
            search_tree: SearchTree::new(),
            open: F::default(),
            problem,
        };

        let start = search.problem.initial_state().clone();
        let root = search
            .search_tree
            .push(SearchTreeNode::new(start, None, P::Cost::zero()));
        search.open.push(root);
        search
    }

    pub fn find_solution(&mut self) -> Result<Option<ProblemSolution<P>>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FindSolution");

        while let Some(node_index) = self.open.pop() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            let state = self.search_tree[node_index].state().clone();
            let g = self.search_tree[node_index].g();
            self.search_tree.mark_closed(node_index);

            for successor in self.problem.get_successors(&state)? {
                if self.search_tree.find(&successor.state).is_some() {
                    continue;
                }
                let g = g.saturating_add(&successor.cost);
                let parent = Some((node_index, successor.action));
                let i = self
                    .search_tree
                    .push(SearchTreeNode::new(successor.state, parent, g));
                self.open.push(i);
            }

            if self.problem.is_goal_state(&state) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                self.log_summary("Found a solution");
                return Ok(Some(self.search_tree.solution(node_index)));
            }
        }

        self.log_summary("Exhausted the frontier");
        Ok(None)
    }

    fn log_summary(&self, outcome: &str) {
        log::debug!(
            "{outcome}. Expanded {} nodes, discovered {}, {} still open",
            self.problem.nodes_expanded(),
            self.search_tree.len(),
            self.open.len(),
        );
    }
}
