//! Runs configured searches and reports how they went.

use std::time::Duration;

use hrsw::Stopwatch;

use crate::algorithms::SearchError;
use crate::algorithms::astar;
use crate::algorithms::bfs;
use crate::algorithms::dfs;
use crate::algorithms::dijkstra;
use crate::config::AlgorithmKind;
use crate::config::ProblemKind;
use crate::float_cost::StepCost;
use crate::problem::SearchProblem;
use crate::problems::CornerSearchProblem;
use crate::problems::GemSearchProblem;
use crate::problems::SimpleSearchProblem;
use crate::world::JointAction;
use crate::world::World;

/// The result of one search run.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub problem: ProblemKind,
    pub algorithm: AlgorithmKind,
    /// `None` when no solution exists.
    pub actions: Option<Vec<JointAction>>,
    pub cost: Option<StepCost>,
    pub nodes_expanded: usize,
    pub elapsed: Duration,
}

impl Outcome {
    #[inline(always)]
    pub fn is_solved(&self) -> bool {
        self.actions.is_some()
    }

    pub fn n_steps(&self) -> Option<usize> {
        self.actions.as_ref().map(Vec::len)
    }
}

/// Solves `problem` over a fresh copy of `world`.
///
/// Each run gets its own problem, so expansion counts don't add up across
/// runs.
pub fn run<W>(
    world: &W,
    problem: ProblemKind,
    algorithm: AlgorithmKind,
) -> Result<Outcome, SearchError>
where
    W: World + Clone,
{
    log::info!("Solving {problem} with {algorithm}");
    let world = world.clone();
    let Run {
        actions,
        cost,
        nodes_expanded,
        elapsed,
    } = match problem {
        ProblemKind::Simple => solve(SimpleSearchProblem::new(world), algorithm),
        ProblemKind::Corners => solve(CornerSearchProblem::new(world), algorithm),
        ProblemKind::Gems => solve(GemSearchProblem::new(world), algorithm),
    }?;
    log::debug!("{problem} with {algorithm} took {elapsed:?}");
    Ok(Outcome {
        problem,
        algorithm,
        actions,
        cost,
        nodes_expanded,
        elapsed,
    })
}

/// What a search leaves behind, before knowing which problem it solved.
struct Run {
    actions: Option<Vec<JointAction>>,
    cost: Option<StepCost>,
    nodes_expanded: usize,
    elapsed: Duration,
}

fn solve<P>(mut problem: P, algorithm: AlgorithmKind) -> Result<Run, SearchError>
where
    P: SearchProblem<Action = JointAction, Cost = StepCost>,
{
    let mut stopwatch = Stopwatch::new_started();
    let solution = match algorithm {
        AlgorithmKind::Bfs => bfs(&mut problem)?,
        AlgorithmKind::Dfs => dfs(&mut problem)?,
        AlgorithmKind::Astar => astar(&mut problem)?,
        AlgorithmKind::Dijkstra => dijkstra(&mut problem)?,
    };
    stopwatch.stop();

    let (actions, cost) = match solution {
        Some(s) => (Some(s.actions), Some(s.cost)),
        None => (None, None),
    };
    Ok(Run {
        actions,
        cost,
        nodes_expanded: problem.nodes_expanded(),
        elapsed: stopwatch.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::world::GridWorld;

    #[test]
    fn every_algorithm_solves_the_corridor() {
        let world = GridWorld::try_from("0...X").unwrap();
        for algorithm in AlgorithmKind::ALL {
            let outcome = run(&world, ProblemKind::Simple, algorithm).unwrap();
            assert_eq!(outcome.algorithm, algorithm);
            assert_eq!(outcome.n_steps(), Some(4), "{algorithm}");
            assert_eq!(outcome.cost, Some(StepCost::new(4.0)), "{algorithm}");
            assert!(outcome.nodes_expanded <= 5, "{algorithm}");
        }
    }

    #[test]
    fn runs_are_independent() {
        let world = GridWorld::try_from("0...X").unwrap();
        let first = run(&world, ProblemKind::Simple, AlgorithmKind::Bfs).unwrap();
        let second = run(&world, ProblemKind::Simple, AlgorithmKind::Bfs).unwrap();
        assert_eq!(first.nodes_expanded, 5);
        assert_eq!(second.nodes_expanded, 5);
    }

    #[test]
    fn problems_are_dispatched() {
        let world = GridWorld::try_from(indoc! {"
            0.
            .X
        "})
        .unwrap();
        let simple = run(&world, ProblemKind::Simple, AlgorithmKind::Astar).unwrap();
        let corners = run(&world, ProblemKind::Corners, AlgorithmKind::Astar).unwrap();
        assert_eq!(simple.problem, ProblemKind::Simple);
        assert_eq!(simple.n_steps(), Some(2));
        assert_eq!(corners.problem, ProblemKind::Corners);
        assert_eq!(corners.n_steps(), Some(4));

        let gems = GridWorld::try_from(".G0..GX").unwrap();
        let outcome = run(&gems, ProblemKind::Gems, AlgorithmKind::Dijkstra).unwrap();
        assert_eq!(outcome.problem, ProblemKind::Gems);
        assert_eq!(outcome.n_steps(), Some(6));
    }

    #[test]
    fn unsolvable_maps_are_not_errors() {
        let world = GridWorld::try_from("0#X").unwrap();
        let outcome = run(&world, ProblemKind::Simple, AlgorithmKind::Dfs).unwrap();
        assert!(!outcome.is_solved());
        assert_eq!(outcome.cost, None);
        assert_eq!(outcome.nodes_expanded, 1);
    }
}
