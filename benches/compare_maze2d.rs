use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze_search::algorithms::Strategy;
use maze_search::algorithms::search;
use maze_search::problems::maze_2d::Maze2DHeuristic;
use maze_search::problems::maze_2d::Maze2DProblem;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);
const NUM_INSTANCES: u64 = 3;

fn solve(problem: &Maze2DProblem, strategy: Strategy) -> usize {
    let outcome = search(problem, strategy, Maze2DHeuristic::Euclidean);
    outcome.expansion_count()
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze2D Search");

    for path in glob("data/mazes/*.txt")
        .unwrap()
        .filter_map(std::result::Result::ok)
    {
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        let layout = std::fs::read_to_string(&path).unwrap();
        let base_problem = Maze2DProblem::try_from(layout.as_str()).unwrap();
        let (x, y) = base_problem.space().dimensions();

        for i in 0..NUM_INSTANCES {
            let instance_name = format!("{name}[{x}x{y}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);

            let Some(problem) = base_problem.randomize(&mut rng) else {
                log::warn!("Failed to generate random problem {instance_name}");
                continue;
            };

            for strategy in Strategy::ALL {
                let mut stopwatch = Stopwatch::new_started();
                let expanded = solve(&problem, strategy);
                stopwatch.stop();
                let elapsed = stopwatch.elapsed();
                if elapsed > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {strategy} ({}, {expanded} expansions)",
                        human_duration(&elapsed)
                    );
                    continue;
                }

                group.bench_with_input(
                    BenchmarkId::new(strategy.name(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| solve(p, strategy)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
