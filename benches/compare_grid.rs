use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use indoc::indoc;

use world_search::config::AlgorithmKind;
use world_search::config::ProblemKind;
use world_search::runner::run;
use world_search::world::GridWorld;
use world_search::world::World;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

const MAPS: [(&str, ProblemKind, &str); 4] = [
    (
        "open",
        ProblemKind::Simple,
        indoc! {"
            0.......
            ........
            ...##...
            ...##...
            .......X
        "},
    ),
    (
        "pair",
        ProblemKind::Simple,
        indoc! {"
            0..#....
            ...#..1.
            ........
            X..#...X
        "},
    ),
    (
        "corners",
        ProblemKind::Corners,
        indoc! {"
            0....
            .#.#.
            ....X
        "},
    ),
    (
        "gems",
        ProblemKind::Gems,
        indoc! {"
            G...#..
            ..0.#.G
            .......
            G.....X
        "},
    ),
];

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Search");

    for (name, problem, map) in MAPS {
        let world = GridWorld::try_from(map).unwrap();
        let instance_name = format!("{name}[{}x{}]", world.height(), world.width());

        for algorithm in AlgorithmKind::ALL {
            let mut stopwatch = Stopwatch::new_started();
            let outcome = run(&world, problem, algorithm).unwrap();
            stopwatch.stop();
            let elapsed = stopwatch.elapsed();
            println!(
                "{instance_name} {algorithm}: {:?} steps, {} expanded",
                outcome.n_steps(),
                outcome.nodes_expanded
            );
            if elapsed > MAX_INSTANCE_TIME {
                log::warn!(
                    "Skipping {instance_name} as it takes too long with {algorithm} ({})",
                    human_duration(&elapsed)
                );
                continue;
            }

            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), &instance_name),
                &world,
                |b, w| b.iter(|| run(w, problem, algorithm).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
