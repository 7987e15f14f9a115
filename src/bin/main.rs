use std::io::Write;
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use maze_search::algorithms::Strategy;
use maze_search::algorithms::search;
use maze_search::problems::maze_2d::ActionSet;
use maze_search::problems::maze_2d::Maze2DHeuristic;
use maze_search::problems::maze_2d::Maze2DProblem;
use maze_search::problems::maze_2d::TransitionCosts;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const BUNDLED_MAZE: &str = include_str!("../../data/mazes/map0.txt");

/// Solves mazes with A*, breadth-first, depth-first and uniform-cost search
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze layout files. Solves a bundled maze when none is given.
    #[arg()]
    pub problems: Vec<PathBuf>,

    #[arg(
        short,
        long,
        env = "MAZE_SEARCH_STRATEGIES",
        value_delimiter = ',',
        default_value = "A*,BFS,DFS,UCS"
    )]
    pub strategies: Vec<Strategy>,

    /// `all`, `orthogonal`, `diagonal` or a list of symbols like `N,S,NE`.
    #[arg(short, long, env = "MAZE_SEARCH_ACTIONS", default_value = "all")]
    pub actions: ActionSet,

    /// Heuristic used by A*.
    #[arg(long, env = "MAZE_SEARCH_HEURISTIC", default_value_t = Maze2DHeuristic::Euclidean)]
    pub heuristic: Maze2DHeuristic,

    #[arg(long, default_value_t = TransitionCosts::DEFAULT_ORTHOGONAL)]
    pub orthogonal_cost: f64,
    #[arg(long, default_value_t = TransitionCosts::DEFAULT_DIAGONAL)]
    pub diagonal_cost: f64,

    /// Draw each solution over the maze.
    #[arg(long)]
    pub draw: bool,
    /// Print search counters.
    #[arg(long)]
    pub stats: bool,

    /// Log more. Overrides `MAZE_SEARCH_LOG`.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("MAZE_SEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn invalid_input<E: std::fmt::Display>(context: &str, e: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{context}: {e}"))
}

fn solve(args: &Args, name: &str, problem: &Maze2DProblem) -> std::io::Result<()> {
    let (width, height) = problem.space().dimensions();
    println!("{} {} ({width}x{height})", "Maze".bold(), name.yellow());
    println!("{problem}");
    println!("Allowed actions: {}", problem.space().actions());
    if args.strategies.iter().any(Strategy::uses_heuristic) {
        println!("Heuristic: {}", args.heuristic);
    }

    for &strategy in &args.strategies {
        println!();
        println!("Performing {}", strategy.name().bold());

        let mut stopwatch = Stopwatch::new_started();
        let outcome = search(problem, strategy, args.heuristic);
        stopwatch.stop();

        println!("Search duration: {}", human_duration(&stopwatch.elapsed()));
        println!(
            "Expanded nodes: {} ({} raw pops)",
            outcome.expansion_count(),
            outcome.stats.popped
        );
        match &outcome.node {
            None => println!("{}", "No solution exists!".red()),
            Some(node) => {
                if strategy.detects_goal_on_generation() {
                    println!("Number of actions: {}", node.depth().green());
                } else {
                    println!("Cost of solution: {}", node.cost().green());
                }
                let cells: Vec<String> = node.states().iter().map(ToString::to_string).collect();
                let actions: Vec<String> = node.actions().iter().map(ToString::to_string).collect();
                println!("Cells ({}): {}", cells.len(), cells.join(" "));
                println!("Actions ({}): {}", actions.len(), actions.join(" "));
                if args.draw {
                    println!("{}", problem.render_path(node));
                }
            }
        }
        if args.stats {
            let mut out = std::io::stdout().lock();
            outcome.write_stats(&mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    args.color.write_global();
    init_logging(args.verbose);

    let costs = TransitionCosts::new(args.orthogonal_cost, args.diagonal_cost)
        .map_err(|e| invalid_input("Transition costs", e))?;

    let mut problems = vec![];
    if args.problems.is_empty() {
        let problem = Maze2DProblem::try_from(BUNDLED_MAZE)
            .map_err(|e| invalid_input("Bundled maze", e))?;
        problems.push(("map0".to_string(), problem));
    }
    for path in &args.problems {
        let layout = std::fs::read_to_string(path)?;
        let problem = Maze2DProblem::try_from(layout.as_str())
            .map_err(|e| invalid_input(&path.display().to_string(), e))?;
        problems.push((path.display().to_string(), problem));
    }

    println!("{}", "MAZE SEARCH".bold());
    for (name, problem) in problems {
        let problem = problem.with_actions(args.actions).with_costs(costs);
        println!();
        solve(&args, &name, &problem)?;
    }

    Ok(())
}
