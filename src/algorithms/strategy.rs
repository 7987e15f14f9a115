use derive_more::Display;

use crate::error::ConfigurationError;

/// How a best-first search ranks its frontier.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Accumulated cost plus heuristic estimate.
    #[display("A*")]
    AStar,
    /// Fewest actions first.
    #[display("BFS")]
    BreadthFirst,
    /// Most actions first.
    #[display("DFS")]
    DepthFirst,
    /// Accumulated cost.
    #[display("UCS")]
    UniformCost,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::AStar,
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::UniformCost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::AStar => "A*",
            Strategy::BreadthFirst => "Breadth-first",
            Strategy::DepthFirst => "Depth-first",
            Strategy::UniformCost => "Uniform-cost",
        }
    }

    /// Whether a goal may be accepted as soon as it's generated.
    ///
    /// Cost-ranked searches can only trust a goal once it's popped, a cheaper
    /// path to it may still be waiting in the frontier.
    #[inline(always)]
    pub fn detects_goal_on_generation(&self) -> bool {
        matches!(self, Strategy::BreadthFirst | Strategy::DepthFirst)
    }

    #[inline(always)]
    pub fn uses_heuristic(&self) -> bool {
        matches!(self, Strategy::AStar)
    }
}

impl std::str::FromStr for Strategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(Strategy::AStar),
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            "ucs" | "uniform-cost" => Ok(Strategy::UniformCost),
            _ => Err(ConfigurationError::UnknownStrategy(s.to_string())),
        }
    }
}
