use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use smallvec::SmallVec;

pub use crate::cost::Cost;
use crate::search::SearchNode;

pub trait Action: Copy + Clone + Debug + Display + PartialEq + Eq {}
pub trait State: Copy + Clone + Debug + Display + PartialEq + Eq + Hash {}

/// Successors of a state, as `(action, next_state, transition_cost)`.
///
/// Grid-like spaces rarely have more than 8 successors, so these usually
/// stay on the stack.
pub type Successors<St, A, C> = SmallVec<[(A, St, C); 8]>;

pub trait Space<St, A, C>: Clone + Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    /// Applies an action, ignoring whether the resulting state is usable.
    ///
    /// Returns `None` when the resulting state can't even be represented.
    fn apply(&self, s: &St, a: &A) -> Option<St>;

    /// The cost of taking `a` from `s`.
    fn cost(&self, _s: &St, _a: &A) -> C {
        C::one()
    }

    /// Expands a State.
    ///
    /// Successors come in a fixed order so searches are reproducible.
    fn successors(&self, s: &St) -> Successors<St, A, C>;

    /// Verify is a State is valid and can be occupied.
    fn valid(&self, s: &St) -> bool;

    /// Replays the actions of a node from its first state.
    ///
    /// A node is valid when every step lands on a valid state, every step
    /// can be taken and the accumulated cost matches.
    fn valid_path(&self, node: &SearchNode<St, A, C>) -> bool {
        let states = node.states();
        let actions = node.actions();
        if states.len() != actions.len() + 1 || !self.valid(&states[0]) {
            return false;
        }

        let mut cost = C::zero();
        for (i, a) in actions.iter().enumerate() {
            match self.apply(&states[i], a) {
                Some(next) if next == states[i + 1] && self.valid(&next) => {}
                _ => return false,
            }
            let c = self.cost(&states[i], a);
            if !c.valid() {
                return false;
            }
            cost = cost.saturating_add(&c);
        }
        cost == node.cost()
    }
}
