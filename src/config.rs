//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use derive_more::Display;

/// Which search problem to build over the map.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, ValueEnum)]
pub enum ProblemKind {
    /// Every agent reaches an exit.
    #[display("simple")]
    Simple,
    /// Visit the four corners, then exit.
    #[display("corners")]
    Corners,
    /// Collect every gem, then exit.
    #[display("gems")]
    Gems,
}

/// Which algorithm solves the problem.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, ValueEnum)]
pub enum AlgorithmKind {
    #[display("BFS")]
    Bfs,
    #[display("DFS")]
    Dfs,
    #[display("A*")]
    Astar,
    #[display("Dijkstra")]
    Dijkstra,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Astar,
        AlgorithmKind::Dijkstra,
    ];
}

/// Solves multi-agent grid worlds with classic state-space search.
#[derive(Parser, Debug)]
#[clap(long_version = crate::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct SearchConfig {
    /// Text map of the world.
    #[arg(env = "WORLD_MAP")]
    pub map: PathBuf,

    #[arg(short, long, env = "WORLD_PROBLEM", value_enum, default_value_t = ProblemKind::Simple)]
    pub problem: ProblemKind,

    #[arg(short, long, env = "WORLD_ALGORITHM", value_enum, default_value_t = AlgorithmKind::Astar)]
    pub algorithm: AlgorithmKind,

    /// Run every algorithm, ignoring `--algorithm`.
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub color: colorchoice_clap::Color,
}

impl SearchConfig {
    /// The algorithms to run, in order.
    pub fn algorithms(&self) -> Vec<AlgorithmKind> {
        if self.all {
            AlgorithmKind::ALL.to_vec()
        } else {
            vec![self.algorithm]
        }
    }
}
