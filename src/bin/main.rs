use anstream::eprintln;
use anstream::println;
use clap::Parser;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use thousands::Separable;
use tracing_subscriber::EnvFilter;

use world_search::config::SearchConfig;
use world_search::runner::Outcome;
use world_search::runner::run;
use world_search::world::GridWorld;
use world_search::world::GridWorldParseError;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const MAX_ACTIONS_PRINTED: usize = 40;

fn print_outcome(outcome: &Outcome) {
    let header = format!("{} / {}", outcome.problem, outcome.algorithm);
    match (&outcome.actions, outcome.cost) {
        (Some(actions), Some(cost)) => {
            println!(
                "{} {} steps, cost {}",
                header.bold().green(),
                actions.len().separate_with_commas().yellow(),
                cost.yellow()
            );
            let shown: Vec<String> = actions
                .iter()
                .take(MAX_ACTIONS_PRINTED)
                .map(|joint| joint.iter().map(ToString::to_string).collect())
                .collect();
            let ellipsis = if actions.len() > MAX_ACTIONS_PRINTED { " ..." } else { "" };
            println!("  Actions: {}{ellipsis}", shown.join(" "));
        }
        _ => println!("{} {}", header.bold().red(), "no solution".red()),
    }
    println!(
        "  Expanded {} nodes in {}",
        outcome.nodes_expanded.separate_with_commas().cyan(),
        human_duration(&outcome.elapsed)
    );
}

fn main() -> std::process::ExitCode {
    let args = SearchConfig::parse();
    args.color.write_global();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let world = match GridWorld::try_from(args.map.as_path()) {
        Ok(world) => world,
        Err(e @ GridWorldParseError::IOError { .. }) => {
            eprintln!("{} {e}", "error:".red().bold());
            return std::process::ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{} {:?}: {e}", "error:".red().bold(), args.map);
            return std::process::ExitCode::FAILURE;
        }
    };
    println!("{world}");

    for algorithm in args.algorithms() {
        match run(&world, args.problem, algorithm) {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => {
                eprintln!("{} {algorithm}: {e}", "error:".red().bold());
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    std::process::ExitCode::SUCCESS
}
