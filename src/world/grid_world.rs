use derive_more::Display;
use thiserror::Error;

use crate::world::Action;
use crate::world::Position;
use crate::world::World;
use crate::world::WorldError;
use crate::world::WorldState;

const MAX_AGENTS: usize = 10;
const MAX_ROWS_DISPLAYED: usize = 40;

/// Reward for entering an uncollected gem.
pub const GEM_REWARD: f64 = 1.0;
/// Reward for an agent reaching an exit.
pub const EXIT_REWARD: f64 = 1.0;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Tile {
    #[display(".")]
    Floor,
    #[display("█")]
    Wall,
    #[display("X")]
    Exit,
    #[display("G")]
    Gem,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapToken {
    Tile(Tile),
    /// The start position of the agent with this id.
    Start(usize),
}

impl std::convert::TryFrom<char> for MapToken {
    type Error = char;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            '.' => Ok(MapToken::Tile(Tile::Floor)),
            '#' | '@' | '█' => Ok(MapToken::Tile(Tile::Wall)),
            'X' => Ok(MapToken::Tile(Tile::Exit)),
            'G' => Ok(MapToken::Tile(Tile::Gem)),
            '0'..='9' => Ok(MapToken::Start(ch as usize - '0' as usize)),
            ch => Err(ch),
        }
    }
}

#[derive(Debug, Error)]
pub enum GridWorldParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid character '{ch}' found at ({i},{j})")]
    InvalidCharacter { ch: char, i: usize, j: usize },
    #[error("Row {i} has {found} cells, expected {expected}")]
    RaggedRow {
        i: usize,
        expected: usize,
        found: usize,
    },
    #[error("Agent {agent} starts more than once")]
    DuplicateAgent { agent: usize },
    #[error("Agent {agent} is missing, agent ids must be contiguous from 0")]
    MissingAgent { agent: usize },
    #[error("The map has no agents")]
    NoAgents,
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

/// A reference grid-world simulator.
///
/// - Agents move one cell per tick or stay.
/// - An agent on an exit has left the map and can only stay.
/// - Conflicting moves (same target, moving into an agent that stays, swaps)
///   are blocked and the agents involved stay in place.
/// - Entering a gem collects it.
/// - The world is done once every agent is on an exit.
#[derive(Clone)]
pub struct GridWorld {
    tiles: Vec<Vec<Tile>>,
    starts: Vec<Position>,
    exits: Vec<Position>,
    gems: Vec<Position>,

    agents: Vec<Position>,
    collected: Vec<bool>,
}

impl GridWorld {
    #[inline(always)]
    pub fn tile(&self, p: &Position) -> Option<Tile> {
        self.tiles.get(p.i).and_then(|row| row.get(p.j)).copied()
    }

    #[inline(always)]
    fn walkable(&self, p: &Position) -> bool {
        matches!(self.tile(p), Some(t) if t != Tile::Wall)
    }

    #[inline(always)]
    fn is_exit(&self, p: &Position) -> bool {
        self.tile(p) == Some(Tile::Exit)
    }

    fn agent_actions(&self, position: &Position) -> Vec<Action> {
        if self.is_exit(position) {
            return vec![Action::Stay];
        }
        Action::ALL
            .into_iter()
            .filter(|&a| {
                position
                    .apply(a, self.height(), self.width())
                    .is_some_and(|target| self.walkable(&target))
            })
            .collect()
    }

    /// Where each agent ends up once conflicting moves are blocked.
    fn resolve_moves(&self, mut targets: Vec<Position>) -> Vec<Position> {
        let current = &self.agents;
        loop {
            let blocked: Vec<usize> = (0..targets.len())
                .filter(|&a| targets[a] != current[a])
                .filter(|&a| {
                    (0..targets.len()).any(|b| {
                        b != a
                            && (targets[b] == targets[a]
                                || (targets[a] == current[b] && targets[b] == current[a]))
                    })
                })
                .collect();
            if blocked.is_empty() {
                return targets;
            }
            for a in blocked {
                log::trace!("Agent {a} blocked moving {} -> {}", current[a], targets[a]);
                targets[a] = current[a];
            }
        }
    }
}

impl World for GridWorld {
    fn reset(&mut self) {
        self.agents = self.starts.clone();
        self.collected = vec![false; self.gems.len()];
    }

    fn get_state(&self) -> WorldState {
        WorldState {
            agents_positions: self.agents.clone(),
            gems_collected: self.collected.clone(),
        }
    }

    fn set_state(&mut self, state: &WorldState) -> Result<(), WorldError> {
        if state.agents_positions.len() != self.n_agents() {
            return Err(WorldError::WrongAgentCount {
                expected: self.n_agents(),
                got: state.agents_positions.len(),
            });
        }
        if state.gems_collected.len() != self.gems.len() {
            return Err(WorldError::WrongGemCount {
                expected: self.gems.len(),
                got: state.gems_collected.len(),
            });
        }
        for (agent, position) in state.agents_positions.iter().enumerate() {
            let reason = if self.tile(position).is_none() {
                "out of the grid"
            } else if !self.walkable(position) {
                "it's a wall"
            } else if state.agents_positions[..agent].contains(position) {
                "it's taken by another agent"
            } else {
                continue;
            };
            return Err(WorldError::InvalidState {
                agent,
                position: *position,
                reason,
            });
        }

        self.agents.clone_from(&state.agents_positions);
        self.collected.clone_from(&state.gems_collected);
        Ok(())
    }

    fn available_actions(&self) -> Vec<Vec<Action>> {
        self.agents.iter().map(|p| self.agent_actions(p)).collect()
    }

    fn step(&mut self, joint_action: &[Action]) -> Result<f64, WorldError> {
        if joint_action.len() != self.n_agents() {
            return Err(WorldError::WrongAgentCount {
                expected: self.n_agents(),
                got: joint_action.len(),
            });
        }

        let mut targets = Vec::with_capacity(self.agents.len());
        for (agent, (position, &action)) in self.agents.iter().zip(joint_action).enumerate() {
            let target = if self.is_exit(position) && action != Action::Stay {
                None
            } else {
                position
                    .apply(action, self.height(), self.width())
                    .filter(|t| self.walkable(t))
            };
            match target {
                Some(t) => targets.push(t),
                None => {
                    return Err(WorldError::InvalidAction {
                        agent,
                        position: *position,
                        action,
                    });
                }
            }
        }
        let targets = self.resolve_moves(targets);

        let mut reward = 0.0;
        for (agent, target) in targets.into_iter().enumerate() {
            if target == self.agents[agent] {
                continue;
            }
            if let Some(g) = self.gems.iter().position(|p| *p == target) {
                if !self.collected[g] {
                    self.collected[g] = true;
                    reward += GEM_REWARD;
                }
            }
            if self.is_exit(&target) {
                reward += EXIT_REWARD;
            }
            self.agents[agent] = target;
        }

        Ok(reward)
    }

    fn done(&self) -> bool {
        self.agents.iter().all(|p| self.is_exit(p))
    }

    fn n_agents(&self) -> usize {
        self.starts.len()
    }
    fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }
    fn height(&self) -> usize {
        self.tiles.len()
    }
    fn exit_positions(&self) -> &[Position] {
        &self.exits
    }
    fn gem_positions(&self) -> &[Position] {
        &self.gems
    }
}

impl std::convert::TryFrom<&str> for GridWorld {
    type Error = GridWorldParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(GridWorldParseError::EmptyInput);
        }

        let width = lines[0].chars().count();
        let mut tiles = Vec::with_capacity(lines.len());
        let mut starts: [Option<Position>; MAX_AGENTS] = [None; MAX_AGENTS];
        let mut exits = vec![];
        let mut gems = vec![];

        for (i, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            for (j, ch) in line.chars().enumerate() {
                let p = Position::new(i, j);
                let token = MapToken::try_from(ch)
                    .map_err(|ch| GridWorldParseError::InvalidCharacter { ch, i, j })?;
                row.push(match token {
                    MapToken::Start(agent) => {
                        if starts[agent].replace(p).is_some() {
                            return Err(GridWorldParseError::DuplicateAgent { agent });
                        }
                        Tile::Floor
                    }
                    MapToken::Tile(Tile::Exit) => {
                        exits.push(p);
                        Tile::Exit
                    }
                    MapToken::Tile(Tile::Gem) => {
                        gems.push(p);
                        Tile::Gem
                    }
                    MapToken::Tile(t) => t,
                });
            }
            if row.len() != width {
                return Err(GridWorldParseError::RaggedRow {
                    i,
                    expected: width,
                    found: row.len(),
                });
            }
            tiles.push(row);
        }

        let n_agents = starts.iter().rposition(Option::is_some).map_or(0, |a| a + 1);
        if n_agents == 0 {
            return Err(GridWorldParseError::NoAgents);
        }
        let starts = starts[..n_agents]
            .iter()
            .enumerate()
            .map(|(agent, p)| p.ok_or(GridWorldParseError::MissingAgent { agent }))
            .collect::<Result<Vec<_>, _>>()?;

        let mut world = GridWorld {
            tiles,
            agents: starts.clone(),
            collected: vec![false; gems.len()],
            starts,
            exits,
            gems,
        };
        world.reset();
        Ok(world)
    }
}

impl std::convert::TryFrom<&std::path::Path> for GridWorld {
    type Error = GridWorldParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| GridWorldParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        GridWorld::try_from(text.as_str())
    }
}

impl std::fmt::Display for GridWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "GridWorld({}x{}, {} agents, {}/{} gems):",
            self.height(),
            self.width(),
            self.n_agents(),
            self.collected.iter().filter(|&&c| c).count(),
            self.gems.len()
        )?;
        for (i, row) in self.tiles.iter().enumerate().take(MAX_ROWS_DISPLAYED) {
            for (j, tile) in row.iter().enumerate() {
                let p = Position::new(i, j);
                match self.agents.iter().position(|a| *a == p) {
                    Some(agent) => write!(f, "{agent}")?,
                    None => match self.gems.iter().position(|g| *g == p) {
                        Some(g) if self.collected[g] => write!(f, "{}", Tile::Floor)?,
                        _ => write!(f, "{tile}")?,
                    },
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for GridWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "GridWorld({}x{}, agents: {:?})",
            self.height(),
            self.width(),
            self.agents
        )
    }
}
