use derive_more::Display;

use crate::error::ConfigurationError;
use crate::heuristic::Heuristic;
use crate::heuristic::ZeroHeuristic;
use crate::problems::maze_2d::Maze2DCost;
use crate::problems::maze_2d::Maze2DState;

#[inline(always)]
fn deltas(a: &Maze2DState, b: &Maze2DState) -> (f64, f64) {
    (a.row.abs_diff(b.row) as f64, a.col.abs_diff(b.col) as f64)
}

/// The distance of following straight lines.
///
/// NOTE: Overestimates once diagonal steps cost less than two orthogonal
/// ones, which is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic<Maze2DState, Maze2DCost> for Manhattan {
    #[inline(always)]
    fn estimate(&self, a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        let (dr, dc) = deltas(a, b);
        Maze2DCost::new(dr + dc)
    }
}

/// The straight-line distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Heuristic<Maze2DState, Maze2DCost> for Euclidean {
    #[inline(always)]
    fn estimate(&self, a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        let (dr, dc) = deltas(a, b);
        Maze2DCost::new(dr.hypot(dc))
    }
}

/// Heuristics for mazes that can be picked at runtime.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
pub enum Maze2DHeuristic {
    #[default]
    #[display("zero")]
    Zero,
    #[display("manhattan")]
    Manhattan,
    #[display("euclidean")]
    Euclidean,
}

impl Heuristic<Maze2DState, Maze2DCost> for Maze2DHeuristic {
    #[inline(always)]
    fn estimate(&self, a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        match self {
            Maze2DHeuristic::Zero => ZeroHeuristic.estimate(a, b),
            Maze2DHeuristic::Manhattan => Manhattan.estimate(a, b),
            Maze2DHeuristic::Euclidean => Euclidean.estimate(a, b),
        }
    }
}

impl std::str::FromStr for Maze2DHeuristic {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "none" => Ok(Maze2DHeuristic::Zero),
            "manhattan" => Ok(Maze2DHeuristic::Manhattan),
            "euclidean" => Ok(Maze2DHeuristic::Euclidean),
            _ => Err(ConfigurationError::UnknownHeuristic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Maze2DState::new(4, 0);
        let b = Maze2DState::new(0, 3);

        assert_eq!(Manhattan.estimate(&a, &b), Maze2DCost::new(7.0));
        assert_eq!(Manhattan.estimate(&b, &a), Maze2DCost::new(7.0));
        assert_eq!(Euclidean.estimate(&a, &b), Maze2DCost::new(5.0));
        assert_eq!(
            Heuristic::<Maze2DState, Maze2DCost>::estimate(&ZeroHeuristic, &a, &b),
            Maze2DCost::new(0.0)
        );
        assert_eq!(Euclidean.estimate(&a, &a), Maze2DCost::new(0.0));
    }

    #[test]
    fn manhattan_overestimates_diagonals() {
        // A single diagonal step costs 1.5 by default.
        let a = Maze2DState::new(1, 1);
        let b = Maze2DState::new(0, 0);
        assert!(Manhattan.estimate(&a, &b).get() > 1.5);
        assert!(Euclidean.estimate(&a, &b).get() <= 1.5);
    }

    #[test]
    fn selectable() {
        assert_eq!(
            "Euclidean".parse::<Maze2DHeuristic>().unwrap(),
            Maze2DHeuristic::Euclidean
        );
        assert!("chebyshev".parse::<Maze2DHeuristic>().is_err());

        let a = Maze2DState::new(0, 0);
        let b = Maze2DState::new(2, 2);
        assert_eq!(
            Maze2DHeuristic::Manhattan.estimate(&a, &b),
            Manhattan.estimate(&a, &b)
        );
        assert_eq!(Maze2DHeuristic::default().estimate(&a, &b).get(), 0.0);
    }
}
