use std::collections::BTreeSet;

use crate::float_cost::StepCost;
use crate::problem::ProblemBase;
use crate::problem::SearchProblem;
use crate::problem::keep_cheapest;
use crate::problems::detour_bound;
use crate::problems::exit_bound;
use crate::problems::step_cost;
use crate::problems::to_cost;
use crate::space::Successor;
use crate::world::JointAction;
use crate::world::Position;
use crate::world::World;
use crate::world::WorldError;
use crate::world::WorldState;

/// A world snapshot plus the corners seen along the way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CornerProblemState {
    pub world_state: WorldState,
    /// Only grows along a path.
    pub visited_corners: BTreeSet<Position>,
}

impl crate::space::State for CornerProblemState {}

impl CornerProblemState {
    #[inline(always)]
    pub fn agents_positions(&self) -> &[Position] {
        &self.world_state.agents_positions
    }
}

impl std::fmt::Display for CornerProblemState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} corners: {{", self.world_state)?;
        for (n, c) in self.visited_corners.iter().enumerate() {
            if n != 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "}}")
    }
}

/// Visit the four corners of the grid, then bring every agent to an exit.
///
/// Any agent standing on a corner marks it as visited, including the starting
/// positions.
#[derive(Clone, Debug)]
pub struct CornerSearchProblem<W>
where
    W: World,
{
    base: ProblemBase<W>,
    corners: BTreeSet<Position>,
    initial_state: CornerProblemState,
}

impl<W> CornerSearchProblem<W>
where
    W: World,
{
    pub fn new(world: W) -> Self {
        let (base, world_state) = ProblemBase::new(world);
        // Degenerate grids have coinciding corners.
        let corners: BTreeSet<Position> = base.world().corners().into_iter().collect();
        let visited_corners = corners_under(&corners, &world_state.agents_positions);
        let initial_state = CornerProblemState {
            world_state,
            visited_corners,
        };
        Self {
            base,
            corners,
            initial_state,
        }
    }

    pub fn world(&self) -> &W {
        self.base.world()
    }
    pub fn into_world(self) -> W {
        self.base.into_world()
    }

    /// The distinct corners of the grid.
    pub fn corners(&self) -> &BTreeSet<Position> {
        &self.corners
    }
}

fn corners_under(corners: &BTreeSet<Position>, agents: &[Position]) -> BTreeSet<Position> {
    agents
        .iter()
        .filter(|p| corners.contains(p))
        .copied()
        .collect()
}

impl<W> SearchProblem for CornerSearchProblem<W>
where
    W: World,
{
    type State = CornerProblemState;
    type Action = JointAction;
    type Cost = StepCost;

    fn initial_state(&self) -> &CornerProblemState {
        &self.initial_state
    }

    fn is_goal_state(&self, state: &CornerProblemState) -> bool {
        let exits = self.world().exit_positions();
        state.visited_corners.is_superset(&self.corners)
            && state.agents_positions().iter().all(|p| exits.contains(p))
    }

    fn get_successors(
        &mut self,
        state: &CornerProblemState,
    ) -> Result<Vec<Successor<CornerProblemState, JointAction, StepCost>>, WorldError> {
        let transitions = self.base.transitions(&state.world_state)?;
        let successors = transitions
            .into_iter()
            .map(|t| {
                let mut visited_corners = state.visited_corners.clone();
                visited_corners.extend(corners_under(&self.corners, &t.state.agents_positions));
                let next = CornerProblemState {
                    world_state: t.state,
                    visited_corners,
                };
                Successor::new(next, t.action, step_cost())
            })
            .collect();
        Ok(keep_cheapest(successors))
    }

    /// Bounds both the trip through the furthest pending corner and the walk
    /// of the furthest agent to an exit.
    fn heuristic(&self, state: &CornerProblemState) -> StepCost {
        let exits = self.world().exit_positions();
        let agents = state.agents_positions();
        let pending: Vec<Position> = self
            .corners
            .difference(&state.visited_corners)
            .copied()
            .collect();
        to_cost(detour_bound(agents, &pending, exits).max(exit_bound(agents, exits)))
    }

    fn nodes_expanded(&self) -> usize {
        self.base.nodes_expanded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::world::GridWorld;

    fn problem(map: &str) -> CornerSearchProblem<GridWorld> {
        CornerSearchProblem::new(GridWorld::try_from(map).unwrap())
    }

    fn state(agents: &[Position], visited: &[Position]) -> CornerProblemState {
        CornerProblemState {
            world_state: WorldState {
                agents_positions: agents.to_vec(),
                gems_collected: vec![],
            },
            visited_corners: visited.iter().copied().collect(),
        }
    }

    #[test]
    fn starting_corners_count_as_visited() {
        let p = problem(indoc! {"
            0..1
            ....
            ...X
        "});
        assert_eq!(p.corners().len(), 4);
        assert_eq!(
            p.initial_state().visited_corners,
            BTreeSet::from([Position::new(0, 0), Position::new(0, 3)])
        );
    }

    #[test]
    fn goal_needs_all_corners_and_all_exits() {
        let p = problem(indoc! {"
            0.
            .X
        "});
        let all = p.corners().iter().copied().collect::<Vec<_>>();
        let exit = Position::new(1, 1);

        assert!(p.is_goal_state(&state(&[exit], &all)));
        assert!(!p.is_goal_state(&state(&[exit], &all[..3])));
        assert!(!p.is_goal_state(&state(&[Position::new(1, 0)], &all)));
    }

    #[test]
    fn visited_corners_only_grow() {
        let mut p = problem(indoc! {"
            0.
            .X
        "});
        let initial = p.initial_state().clone();
        for s in p.get_successors(&initial).unwrap() {
            assert!(s.state.visited_corners.is_superset(&initial.visited_corners));
            for a in s.state.agents_positions() {
                if p.corners().contains(a) {
                    assert!(s.state.visited_corners.contains(a));
                }
            }
        }
        assert_eq!(p.world().get_state(), initial.world_state);
    }

    #[test]
    fn heuristic_bounds_the_remaining_tour() {
        let p = problem(indoc! {"
            0.
            .X
        "});
        // From the start: reach (0,1) or (1,0), then the exit next to it.
        assert_eq!(p.heuristic(p.initial_state()), StepCost::new(2.0));

        let all = p.corners().iter().copied().collect::<Vec<_>>();
        let done = state(&[Position::new(1, 1)], &all);
        assert_eq!(p.heuristic(&done), StepCost::new(0.0));
        assert_eq!(p.heuristic(&done), p.heuristic(&done));
    }

    #[test]
    fn degenerate_grids_have_fewer_corners() {
        let p = problem("0..X");
        assert_eq!(p.corners().len(), 2);
    }
}
