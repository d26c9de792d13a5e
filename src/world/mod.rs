//! The world simulator consumed by the search problems.
//!
//! A world owns a grid with agents, gems and exits. Search problems only talk to
//! it through the [`World`] trait: saving/restoring snapshots, listing the
//! available actions and stepping with one action per agent.

use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

pub mod grid_world;
pub mod guard;

pub use grid_world::GridWorld;
pub use grid_world::GridWorldParseError;
pub use guard::WorldGuard;

/// A cell of the grid as `(row, column)`.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({i},{j})")]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    #[inline(always)]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Distance when moving only along rows and columns.
    ///
    /// ```
    /// use world_search::world::Position;
    /// assert_eq!(Position::new(0, 0).manhattan(&Position::new(2, 3)), 5);
    /// assert_eq!(Position::new(4, 1).manhattan(&Position::new(1, 1)), 3);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn manhattan(&self, other: &Position) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }

    /// The distance to the closest of `targets`, if any.
    #[inline(always)]
    pub fn closest(&self, targets: &[Position]) -> Option<usize> {
        targets.iter().map(|t| self.manhattan(t)).min()
    }

    /// The neighbour reached by `action`, if it stays in the grid.
    pub fn apply(&self, action: Action, height: usize, width: usize) -> Option<Position> {
        #[rustfmt::skip]
        let (i, j) = match action {
            Action::North => (self.i.checked_sub(1)?, self.j),
            Action::South => (self.i + 1,             self.j),
            Action::West  => (self.i,                 self.j.checked_sub(1)?),
            Action::East  => (self.i,                 self.j + 1),
            Action::Stay  => (self.i,                 self.j),
        };
        (i < height && j < width).then_some(Position { i, j })
    }
}

/// What a single agent can do in one tick.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    #[display("↑")]
    North = 0, // i--
    #[display("↓")]
    South = 1, // i++
    #[display("→")]
    East = 2, // j++
    #[display("←")]
    West = 3, // j--
    #[display("·")]
    Stay = 4,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stay,
    ];
}

/// One action per agent, applied atomically in a single step.
pub type JointAction = SmallVec<[Action; 4]>;

impl crate::space::Action for JointAction {}

/// A full snapshot of a world's dynamic configuration.
///
/// Restoring a snapshot with [`World::set_state`] is exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorldState {
    /// Position of each agent, indexed by agent id.
    pub agents_positions: Vec<Position>,
    /// Whether each gem was collected, indexed like [`World::gem_positions`].
    pub gems_collected: Vec<bool>,
}

impl crate::space::State for WorldState {}

impl WorldState {
    #[inline(always)]
    pub fn n_gems_collected(&self) -> usize {
        self.gems_collected.iter().filter(|&&c| c).count()
    }
}

impl std::fmt::Display for WorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (a, p) in self.agents_positions.iter().enumerate() {
            if a != 0 {
                write!(f, " ")?;
            }
            write!(f, "{a}@{p}")?;
        }
        write!(
            f,
            "] gems: {}/{}",
            self.n_gems_collected(),
            self.gems_collected.len()
        )
    }
}

/// Structurally invalid requests to a [`World`].
///
/// These don't happen while respecting [`World::available_actions`] and
/// snapshots taken from the same world.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Expected {expected} agents, got {got}")]
    WrongAgentCount { expected: usize, got: usize },
    #[error("Expected {expected} gem flags, got {got}")]
    WrongGemCount { expected: usize, got: usize },
    #[error("Agent {agent} can't be at {position}: {reason}")]
    InvalidState {
        agent: usize,
        position: Position,
        reason: &'static str,
    },
    #[error("Agent {agent} at {position} can't take action {action:?}")]
    InvalidAction {
        agent: usize,
        position: Position,
        action: Action,
    },
}

/// A grid-world simulator.
///
/// Implementations are single mutable resources: only one search may drive a
/// given instance at a time.
pub trait World: std::fmt::Debug {
    /// Restores the canonical initial configuration.
    fn reset(&mut self);

    fn get_state(&self) -> WorldState;
    /// Restores a snapshot. `set_state(get_state())` never changes anything.
    fn set_state(&mut self, state: &WorldState) -> Result<(), WorldError>;

    /// The legal actions of each agent in the current configuration.
    fn available_actions(&self) -> Vec<Vec<Action>>;

    /// Advances one tick with one action per agent, returning the reward.
    fn step(&mut self, joint_action: &[Action]) -> Result<f64, WorldError>;

    /// Whether the world reached its own terminal condition.
    fn done(&self) -> bool;

    fn n_agents(&self) -> usize;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn exit_positions(&self) -> &[Position];
    fn gem_positions(&self) -> &[Position];

    fn agents_positions(&self) -> Vec<Position> {
        self.get_state().agents_positions
    }
    fn gem_count(&self) -> usize {
        self.gem_positions().len()
    }
    fn collected_gem_count(&self) -> usize {
        self.get_state().n_gems_collected()
    }

    /// The four corner cells as `[top-left, top-right, bottom-left, bottom-right]`.
    fn corners(&self) -> [Position; 4] {
        let (h, w) = (self.height(), self.width());
        debug_assert!(h > 0 && w > 0);
        [
            Position::new(0, 0),
            Position::new(0, w - 1),
            Position::new(h - 1, 0),
            Position::new(h - 1, w - 1),
        ]
    }
}
