use std::fmt::Debug;
use std::hash::Hash;

use num_traits::SaturatingAdd;
use num_traits::Zero;

use crate::cost::Cost;

const MAX_ACTIONS_DISPLAYED: usize = 20;

/// A search-space node.
///
/// States are immutable values; successor generation derives new states
/// instead of mutating existing ones.
pub trait State: Clone + Debug + PartialEq + Eq + Hash {}

/// The label of an edge between two states.
pub trait Action: Clone + Debug + PartialEq + Eq {}

/// A state reached by applying `action`, and what it cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Successor<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub state: St,
    pub action: A,
    pub cost: C,
}

impl<St, A, C> Successor<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new(state: St, action: A, cost: C) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// An ordered sequence of actions from a start state to a goal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub start: St,
    pub end: St,
    pub cost: C,
    pub actions: Vec<A>,
}

impl<St, A, C> Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// An empty solution, for problems that start on a goal.
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            end: start.clone(),
            start,
            cost: C::zero(),
            actions: vec![],
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn n_steps(&self) -> usize {
        self.actions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        self.cost.valid() && (!self.actions.is_empty() || self.start == self.end)
    }

    /// Extends the solution backwards, reaching the current start from `prev`.
    ///
    /// Useful when naturally reconstructing solutions from the goal.
    #[inline(always)]
    pub fn prepend(&mut self, prev: St, action: A, c: C) {
        self.actions.push(action);
        self.start = prev;
        self.cost = self.cost.saturating_add(&c);
    }

    /// Puts actions collected with [`Solution::prepend`] in start-to-goal order.
    pub fn finish(&mut self) {
        self.actions.reverse();
    }
}

impl<St, A, C> std::fmt::Display for Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Solution({}, {} steps, {:?}:{:?}:{:?})",
            self.cost,
            self.n_steps(),
            self.start,
            self.actions
                .iter()
                .take(MAX_ACTIONS_DISPLAYED)
                .collect::<Vec<_>>(),
            self.end
        )
    }
}
