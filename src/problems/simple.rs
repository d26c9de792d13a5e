use crate::float_cost::StepCost;
use crate::problem::ProblemBase;
use crate::problem::SearchProblem;
use crate::problem::keep_cheapest;
use crate::problems::exit_bound;
use crate::problems::step_cost;
use crate::problems::to_cost;
use crate::space::Successor;
use crate::world::JointAction;
use crate::world::World;
use crate::world::WorldError;
use crate::world::WorldState;

/// Bring every agent to an exit.
///
/// The world's own snapshot is the search state: nothing but positions matter.
#[derive(Clone, Debug)]
pub struct SimpleSearchProblem<W>
where
    W: World,
{
    base: ProblemBase<W>,
    initial_state: WorldState,
}

impl<W> SimpleSearchProblem<W>
where
    W: World,
{
    pub fn new(world: W) -> Self {
        let (base, initial_state) = ProblemBase::new(world);
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

impl<W> SearchProblem for SimpleSearchProblem<W>
where
    W: World,
{
    type State = WorldState;
    type Action = JointAction;
    type Cost = StepCost;

    fn initial_state(&self) -> &WorldState {
        &self.initial_state
    }

    fn is_goal_state(&self, state: &WorldState) -> bool {
        let exits = self.world().exit_positions();
        state.agents_positions.iter().all(|p| exits.contains(p))
    }

    fn get_successors(
        &mut self,
        state: &WorldState,
    ) -> Result<Vec<Successor<WorldState, JointAction, StepCost>>, WorldError> {
        let successors = self
            .base
            .transitions(state)?
            .into_iter()
            .map(|t| Successor::new(t.state, t.action, step_cost()))
            .collect();
        Ok(keep_cheapest(successors))
    }

    /// Distance from the furthest agent to its closest exit.
    fn heuristic(&self, state: &WorldState) -> StepCost {
        to_cost(exit_bound(
            &state.agents_positions,
            self.world().exit_positions(),
        ))
    }

    fn nodes_expanded(&self) -> usize {
        self.base.nodes_expanded()
    }
}
