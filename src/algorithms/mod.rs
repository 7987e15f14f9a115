//! Implementation of search algorithms.
//!
//! A single best-first search covers A*, breadth-first, depth-first and
//! uniform-cost search, picked with a `Strategy`.

pub mod best_first;
pub mod strategy;

pub use best_first::search;
pub use best_first::search_uninformed;
pub use best_first::BestFirstSearch;
pub use best_first::SearchOutcome;
pub use best_first::SearchStats;
pub use strategy::Strategy;
