use crate::space::Cost;
use crate::space::State;

/// An estimate of the remaining cost between two states.
///
/// Only A* looks at heuristics. Estimates must be non-negative, but they may
/// overestimate, in which case A* is no longer guaranteed to find optimal
/// paths.
///
/// Plain functions and closures are heuristics too:
///
/// ```
/// use maze_search::heuristic::Heuristic;
/// use maze_search::problems::maze_2d::Maze2DCost;
/// use maze_search::problems::maze_2d::Maze2DState;
///
/// let rows_apart = |a: &Maze2DState, b: &Maze2DState| {
///     Maze2DCost::new(a.row.abs_diff(b.row) as f64)
/// };
/// let h = rows_apart.estimate(&Maze2DState::new(0, 0), &Maze2DState::new(3, 9));
/// assert_eq!(h.get(), 3.0);
/// ```
pub trait Heuristic<St, C>
where
    St: State,
    C: Cost,
{
    fn estimate(&self, from: &St, to: &St) -> C;
}

impl<St, C, F> Heuristic<St, C> for F
where
    St: State,
    C: Cost,
    F: Fn(&St, &St) -> C,
{
    #[inline(always)]
    fn estimate(&self, from: &St, to: &St) -> C {
        self(from, to)
    }
}

/// Always 0. Turns A* into a uniform-cost search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<St, C> Heuristic<St, C> for ZeroHeuristic
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn estimate(&self, _from: &St, _to: &St) -> C {
        C::zero()
    }
}
