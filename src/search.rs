use crate::space::Action;
use crate::space::Cost;
use crate::space::State;

const MAX_ACTIONS_DISPLAYED: usize = 20;

/// A path from the start together with the actions that produced it.
///
/// Nodes are never modified once built. Children copy their parent's path
/// and append one step, so siblings never observe each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    states: Vec<St>,
    actions: Vec<A>,
    cost: C,
}

impl<St, A, C> SearchNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
            actions: vec![],
            cost: C::zero(),
        }
    }

    /// Builds the node reached by taking one more step.
    #[must_use]
    pub fn child(&self, step: (A, St), c: C) -> Self {
        let (a, s) = step;

        let mut states = Vec::with_capacity(self.states.len() + 1);
        states.extend_from_slice(&self.states);
        states.push(s);

        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(a);

        debug_assert!(c >= C::zero(), "Transition costs must not be negative");
        Self {
            states,
            actions,
            cost: self.cost.saturating_add(&c),
        }
    }

    #[inline(always)]
    pub fn states(&self) -> &[St] {
        &self.states
    }
    #[inline(always)]
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
    #[inline(always)]
    pub fn cost(&self) -> C {
        self.cost
    }

    #[inline(always)]
    pub fn start(&self) -> &St {
        &self.states[0]
    }
    /// The last state of the path, the one this node stands for.
    #[inline(always)]
    pub fn end(&self) -> &St {
        &self.states[self.states.len() - 1]
    }

    /// Number of states in the path. Never 0.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }
    /// Number of actions taken.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.actions.len()
    }
    #[inline(always)]
    pub fn is_trivial(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<St, A, C> std::fmt::Display for SearchNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Path({}, {}:[", self.cost, self.start())?;
        for (i, a) in self.actions.iter().take(MAX_ACTIONS_DISPLAYED).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{a}")?;
        }
        if self.actions.len() > MAX_ACTIONS_DISPLAYED {
            write!(f, " ...")?;
        }
        write!(f, "]:{}|{})", self.end(), self.len())
    }
}
