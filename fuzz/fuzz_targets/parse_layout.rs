#![no_main]

use libfuzzer_sys::fuzz_target;

use maze_search::algorithms::Strategy;
use maze_search::algorithms::search;
use maze_search::problems::maze_2d::Maze2DHeuristic;
use maze_search::problems::maze_2d::Maze2DProblem;
use maze_search::space::Space;

fuzz_target!(|data: &[u8]| {
    let Ok(layout) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(problem) = Maze2DProblem::try_from(layout) else {
        return;
    };

    for strategy in Strategy::ALL {
        let outcome = search(&problem, strategy, Maze2DHeuristic::Euclidean);
        if let Some(node) = outcome.node {
            assert!(problem.space().valid_path(&node));
            assert_eq!(node.end(), &problem.goal());
        }
    }
});
