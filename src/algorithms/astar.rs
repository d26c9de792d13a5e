//! A* search.

use num_traits::SaturatingAdd;
use num_traits::Zero;

use crate::algorithms::SearchError;
use crate::cost::Cost;
use crate::data_structures::priority_queue::PriorityQueue;
use crate::problem::SearchProblem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Solution;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower h.
///
/// Keeping the raw h value helps to avoid recomputing it when a node is
/// reached through a cheaper path.
///
/// ```
/// use world_search::algorithms::astar::AStarRank;
///
/// assert!(AStarRank::new(2u32, 0) < AStarRank::new(2u32, 1));
/// assert!(AStarRank::new(2u32, 0) < AStarRank::new(0u32, 3));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    h: C,
}

impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }

    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn h(&self) -> C {
        self.h
    }

    /// Improves `g` in `Rank{f, h}` without recomputing `h`.
    pub fn improve_g(&mut self, new_g: C) {
        let f = new_g.saturating_add(&self.h);
        debug_assert!(f <= self.f);
        self.f = f;
    }
}

type ProblemSolution<P> = Solution<
    <P as SearchProblem>::State,
    <P as SearchProblem>::Action,
    <P as SearchProblem>::Cost,
>;

#[derive(Debug)]
pub struct AStarSearch<P>
where
    P: SearchProblem,
{
    /// All the Search Nodes. Naturally forms a Search Forest as each node may
    /// have a parent Node. Closed nodes are the explored set.
    search_tree: SearchTree<P::State, P::Action, P::Cost>,

    /// Open nodes by `AStarRank`.
    ///
    /// ```pseudocode
    /// for i in self.open:
    ///   assert(!self.search_tree[i].is_closed())
    /// ```
    open: PriorityQueue<SearchTreeIndex, AStarRank<P::Cost>>,

    problem: P,
}

impl<P> AStarSearch<P>
where
    P: SearchProblem,
{
    #[must_use]
    pub fn new(problem: P) -> Self {
        let mut search = Self {
            search_tree: SearchTree::new(),
            open: PriorityQueue::with_capacity(1024),
            problem,
        };

        let start = search.problem.initial_state().clone();
        let g = P::Cost::zero();
        let h = search.problem.heuristic(&start);
        search.push_new(start, None, g, h);
        search
    }

    /// Runs until the first goal popped, which is optimal when the heuristic
    /// is admissible.
    pub fn find_solution(&mut self) -> Result<Option<ProblemSolution<P>>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FindSolution");

        while !self.open.is_empty() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            let node_index = self.open.pop_min()?;
            let state = self.search_tree[node_index].state().clone();
            let g = self.search_tree[node_index].g();
            debug_assert!(!self.search_tree[node_index].is_closed());

            // Mark as closed
            self.search_tree.mark_closed(node_index);

            // Expand state
            for successor in self.problem.get_successors(&state)? {
                #[cfg(feature = "coz_profile")]
                coz::scope!("ReachNode");

                let new_g = g.saturating_add(&successor.cost);

                // Have we seen this State?
                match self.search_tree.find(&successor.state) {
                    Some(neigh_index) => {
                        let neigh = &mut self.search_tree[neigh_index];
                        if neigh.is_closed() {
                            // Yes, and we expanded the State already. Closed
                            // states are never reopened.
                            continue;
                        }
                        if new_g < neigh.g() {
                            // Found better path to an open node
                            neigh.reach((node_index, successor.action), new_g);
                            if let Some(mut rank) = self.open.priority(&neigh_index) {
                                rank.improve_g(new_g);
                                self.open.update(neigh_index, rank);
                            }
                        }
                    }
                    None => {
                        let h = self.problem.heuristic(&successor.state);
                        let parent = Some((node_index, successor.action));
                        self.push_new(successor.state, parent, new_g, h);
                    }
                }
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

    #[inline(always)]
    fn push_new(
        &mut self,
        s: P::State,
        parent: Option<(SearchTreeIndex, P::Action)>,
        g: P::Cost,
        h: P::Cost,
    ) {
        let node_index = self.search_tree.push(SearchTreeNode::new(s, parent, g));
        self.open.push(node_index, AStarRank::new(g, h));
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

/// Finds a minimum-cost solution, guided by the problem's heuristic.
pub fn astar<P>(problem: P) -> Result<Option<ProblemSolution<P>>, SearchError>
where
    P: SearchProblem,
{
    AStarSearch::new(problem).find_solution()
}
