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

/// A world snapshot plus where gems were picked up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GemProblemState {
    pub world_state: WorldState,
    /// Only grows along a path.
    pub gems_collected: BTreeSet<Position>,
}

impl crate::space::State for GemProblemState {}

impl GemProblemState {
    #[inline(always)]
    pub fn agents_positions(&self) -> &[Position] {
        &self.world_state.agents_positions
    }
}

impl std::fmt::Display for GemProblemState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.world_state)
    }
}

/// Collect every gem, then bring every agent to an exit.
#[derive(Clone, Debug)]
pub struct GemSearchProblem<W>
where
    W: World,
{
    base: ProblemBase<W>,
    initial_state: GemProblemState,
}

impl<W> GemSearchProblem<W>
where
    W: World,
{
    pub fn new(world: W) -> Self {
        let (base, world_state) = ProblemBase::new(world);
        let gems_collected = collected_gems(base.world().gem_positions(), &world_state).collect();
        let initial_state = GemProblemState {
            world_state,
            gems_collected,
        };
        Self {
            base,
            initial_state,
        }
    }

    pub fn world(&self) -> &W {
        self.base.world()
    }
    pub fn into_world(self) -> W {
        self.base.into_world()
    }
}

fn collected_gems<'a>(
    gems: &'a [Position],
    state: &'a WorldState,
) -> impl Iterator<Item = Position> + 'a {
    gems.iter()
        .zip(&state.gems_collected)
        .filter(|(_, collected)| **collected)
        .map(|(g, _)| *g)
}

impl<W> SearchProblem for GemSearchProblem<W>
where
    W: World,
{
    type State = GemProblemState;
    type Action = JointAction;
    type Cost = StepCost;

    fn initial_state(&self) -> &GemProblemState {
        &self.initial_state
    }

    fn is_goal_state(&self, state: &GemProblemState) -> bool {
        let world = self.world();
        let exits = world.exit_positions();
        state.gems_collected.len() == world.gem_count()
            && state.agents_positions().iter().all(|p| exits.contains(p))
    }

    fn get_successors(
        &mut self,
        state: &GemProblemState,
    ) -> Result<Vec<Successor<GemProblemState, JointAction, StepCost>>, WorldError> {
        let transitions = self.base.transitions(&state.world_state)?;
        let gems = self.world().gem_positions();
        let successors = transitions
            .into_iter()
            .map(|t| {
                let mut gems_collected = state.gems_collected.clone();
                gems_collected.extend(collected_gems(gems, &t.state));
                let next = GemProblemState {
                    world_state: t.state,
                    gems_collected,
                };
                Successor::new(next, t.action, step_cost())
            })
            .collect();
        Ok(keep_cheapest(successors))
    }

    /// Combines three lower bounds:
    /// - the trip through the furthest pending gem on to an exit,
    /// - the walk of the furthest agent to an exit,
    /// - one gem per agent and step at best.
    fn heuristic(&self, state: &GemProblemState) -> StepCost {
        let world = self.world();
        let exits = world.exit_positions();
        let agents = state.agents_positions();
        let pending: Vec<Position> = world
            .gem_positions()
            .iter()
            .filter(|g| !state.gems_collected.contains(g))
            .copied()
            .collect();
        let pickups = pending.len().div_ceil(agents.len().max(1));
        let steps = detour_bound(agents, &pending, exits)
            .max(exit_bound(agents, exits))
            .max(pickups);
        to_cost(steps)
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

    fn problem(map: &str) -> GemSearchProblem<GridWorld> {
        GemSearchProblem::new(GridWorld::try_from(map).unwrap())
    }

    #[test]
    fn collecting_is_tracked_per_path() {
        let mut p = problem(".G0..GX");
        let initial = p.initial_state().clone();
        assert!(initial.gems_collected.is_empty());

        let successors = p.get_successors(&initial).unwrap();
        let west = successors
            .iter()
            .find(|s| s.state.agents_positions() == [Position::new(0, 1)])
            .unwrap();
        assert_eq!(
            west.state.gems_collected,
            BTreeSet::from([Position::new(0, 1)])
        );

        let back = p.get_successors(&west.state).unwrap();
        assert!(
            back.iter()
                .all(|s| s.state.gems_collected.contains(&Position::new(0, 1)))
        );
        assert_eq!(p.nodes_expanded(), 2);
        assert_eq!(p.world().get_state(), initial.world_state);
    }

    #[test]
    fn goal_needs_every_gem() {
        let p = problem(".G0..GX");
        let at_exit = |gems: &[Position]| GemProblemState {
            world_state: WorldState {
                agents_positions: vec![Position::new(0, 6)],
                gems_collected: vec![true, true],
            },
            gems_collected: gems.iter().copied().collect(),
        };
        assert!(!p.is_goal_state(&at_exit(&[Position::new(0, 5)])));
        assert!(p.is_goal_state(&at_exit(&[
            Position::new(0, 1),
            Position::new(0, 5)
        ])));
        assert!(!p.is_goal_state(p.initial_state()));
    }

    #[test]
    fn heuristic_accounts_for_the_detour() {
        let p = problem(".G0..GX");
        // One step left for the gem, then five to the exit.
        assert_eq!(p.heuristic(p.initial_state()), StepCost::new(6.0));
    }

    #[test]
    fn heuristic_counts_pickups() {
        // Every gem is next to the agent and to an exit, but a lone agent picks
        // up at most one per step.
        let p = problem(indoc! {"
            XGX
            G0G
            XGX
        "});
        assert_eq!(p.heuristic(p.initial_state()), StepCost::new(4.0));
    }

    #[test]
    fn without_gems_it_is_the_exit_bound() {
        let p = problem("0..X");
        assert!(p.initial_state().gems_collected.is_empty());
        assert_eq!(p.heuristic(p.initial_state()), StepCost::new(3.0));
    }
}
