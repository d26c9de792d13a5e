//! Implementation of search algorithms.
//!
//! These algorithms can solve any [`crate::problem::SearchProblem`]. They all
//! return `Ok(None)` when the frontier runs out without reaching a goal, which
//! is a regular outcome rather than an error.

use thiserror::Error;

use crate::data_structures::priority_queue::EmptyQueueError;
use crate::world::WorldError;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod frontier;
pub mod uninformed;

pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;

/// What can go wrong while searching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier was popped while empty.
    #[error("Popped an empty frontier: {0}")]
    EmptyQueue(#[from] EmptyQueueError),
    /// The simulator rejected a state or action while expanding.
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(#[from] WorldError),
}
