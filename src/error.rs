use thiserror::Error;

/// Errors in how a search is set up, as opposed to problems with a maze.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Unknown search strategy '{0}'. Expected one of A*, BFS, DFS, UCS")]
    UnknownStrategy(String),
    #[error("Unknown heuristic '{0}'. Expected one of zero, manhattan, euclidean")]
    UnknownHeuristic(String),
    #[error("Invalid {kind} cost {value}. Costs must be finite and non-negative")]
    InvalidCost { kind: &'static str, value: f64 },
}
