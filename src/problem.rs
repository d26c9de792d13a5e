use itertools::Itertools;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::State;
use crate::space::Successor;
use crate::world::JointAction;
use crate::world::World;
use crate::world::WorldError;
use crate::world::WorldGuard;
use crate::world::WorldState;

/// A problem that can be solved by the search algorithms.
///
/// Problems capture their initial state when constructed and then answer
/// goal tests, expand states and estimate remaining costs. They carry no
/// search progress; the algorithms own all their bookkeeping.
pub trait SearchProblem: std::fmt::Debug {
    type State: State;
    type Action: Action;
    type Cost: Cost;

    fn initial_state(&self) -> &Self::State;

    /// Whether `state` is a goal. Never touches the underlying world.
    fn is_goal_state(&self, state: &Self::State) -> bool;

    /// Expands a state.
    ///
    /// Counts one expansion per call. Worlds used to compute the successors
    /// are left as they were found.
    fn get_successors(
        &mut self,
        state: &Self::State,
    ) -> Result<Vec<Successor<Self::State, Self::Action, Self::Cost>>, WorldError>;

    /// Admissible estimate of the remaining cost to a goal.
    fn heuristic(&self, _state: &Self::State) -> Self::Cost {
        Self::Cost::zero()
    }

    /// Number of [`SearchProblem::get_successors`] calls so far.
    fn nodes_expanded(&self) -> usize;
}

impl<P> SearchProblem for &mut P
where
    P: SearchProblem,
{
    type State = P::State;
    type Action = P::Action;
    type Cost = P::Cost;

    fn initial_state(&self) -> &Self::State {
        (**self).initial_state()
    }
    fn is_goal_state(&self, state: &Self::State) -> bool {
        (**self).is_goal_state(state)
    }
    fn get_successors(
        &mut self,
        state: &Self::State,
    ) -> Result<Vec<Successor<Self::State, Self::Action, Self::Cost>>, WorldError> {
        (**self).get_successors(state)
    }
    fn heuristic(&self, state: &Self::State) -> Self::Cost {
        (**self).heuristic(state)
    }
    fn nodes_expanded(&self) -> usize {
        (**self).nodes_expanded()
    }
}

/// One simulator step out of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub action: JointAction,
    pub state: WorldState,
}

/// What every world-backed problem shares: the world itself and the
/// expansion counter.
#[derive(Clone, Debug)]
pub struct ProblemBase<W>
where
    W: World,
{
    world: W,
    nodes_expanded: usize,
}

impl<W> ProblemBase<W>
where
    W: World,
{
    /// Resets the world and snapshots its initial state.
    pub fn new(mut world: W) -> (Self, WorldState) {
        world.reset();
        let initial_state = world.get_state();
        let base = Self {
            world,
            nodes_expanded: 0,
        };
        (base, initial_state)
    }

    #[inline(always)]
    pub fn world(&self) -> &W {
        &self.world
    }
    pub fn into_world(self) -> W {
        self.world
    }
    #[inline(always)]
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Steps the world from `state` with every joint action available there.
    ///
    /// Counts one expansion. The world is set to `state` before each joint
    /// action, so transitions don't depend on enumeration order, and it's
    /// restored to whatever it held before the call on every exit path.
    /// Terminal states have no transitions.
    pub fn transitions(&mut self, state: &WorldState) -> Result<Vec<Transition>, WorldError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        self.nodes_expanded += 1;

        let mut world = WorldGuard::new(&mut self.world);
        world.set_state(state)?;
        if world.done() {
            return Ok(vec![]);
        }

        let mut transitions = vec![];
        for joint_action in world.available_actions().into_iter().multi_cartesian_product() {
            world.step(&joint_action)?;
            transitions.push(Transition {
                action: JointAction::from_vec(joint_action),
                state: world.get_state(),
            });
            world.set_state(state)?;
        }
        log::trace!("Expanded {state}: {} transitions", transitions.len());

        Ok(transitions)
    }
}

/// Collapses successors reaching the same state, keeping the cheapest.
///
/// The first successor wins ties, so the relative order is preserved.
pub fn keep_cheapest<St, A, C>(successors: Vec<Successor<St, A, C>>) -> Vec<Successor<St, A, C>>
where
    St: State,
    A: Action,
    C: Cost,
{
    let mut kept: Vec<Successor<St, A, C>> = Vec::with_capacity(successors.len());
    let mut index = FxHashMap::<St, usize>::default();
    for s in successors {
        match index.get(&s.state) {
            Some(&i) => {
                if s.cost < kept[i].cost {
                    kept[i] = s;
                }
            }
            None => {
                index.insert(s.state.clone(), kept.len());
                kept.push(s);
            }
        }
    }
    kept
}
