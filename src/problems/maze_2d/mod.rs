//! A rectangular maze read from a character layout.
//!
//! ```text
//! 0000g
//! 0xx00
//! 00xx0
//! 00x00
//! i0000
//! ```
//!
//! `i` is the start, `g` the goal, `0` an open cell and `x` a blocked one.
//! Every row has the same length and there's exactly one start and goal.

use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

use crate::error::ConfigurationError;
use crate::float_cost::FloatCost;
use crate::problem::Problem;
use crate::search::SearchNode;
use crate::space::Space;
use crate::space::State;
use crate::space::Successors;

pub mod action;
pub mod heuristics;

pub use action::ActionKind;
pub use action::ActionSet;
pub use action::InvalidActionError;
pub use action::Maze2DAction;
pub use heuristics::Euclidean;
pub use heuristics::Manhattan;
pub use heuristics::Maze2DHeuristic;

const RANDOM_STATE_MAX_TRIES: usize = 10_000;

pub type Coord = usize;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Maze2DState {
    pub row: Coord,
    pub col: Coord,
}

impl Maze2DState {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Moves by an offset, as long as the result isn't negative.
    #[inline(always)]
    pub fn offset(&self, (dr, dc): (isize, isize)) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}
impl State for Maze2DState {}

pub type Maze2DCost = FloatCost<f64>;

/// Position-independent cost of each action class.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionCosts {
    orthogonal: Maze2DCost,
    diagonal: Maze2DCost,
}

impl TransitionCosts {
    pub const DEFAULT_ORTHOGONAL: f64 = 1.0;
    /// NOTE: With this diagonal cost Manhattan distance overestimates.
    pub const DEFAULT_DIAGONAL: f64 = 1.5;

    pub fn new(orthogonal: f64, diagonal: f64) -> Result<Self, ConfigurationError> {
        for (kind, value) in [("orthogonal", orthogonal), ("diagonal", diagonal)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidCost { kind, value });
            }
        }
        Ok(Self {
            orthogonal: Maze2DCost::new(orthogonal),
            diagonal: Maze2DCost::new(diagonal),
        })
    }

    #[inline(always)]
    pub fn of(&self, kind: ActionKind) -> Maze2DCost {
        match kind {
            ActionKind::Orthogonal => self.orthogonal,
            ActionKind::Diagonal => self.diagonal,
        }
    }
}

impl Default for TransitionCosts {
    fn default() -> Self {
        Self {
            orthogonal: Maze2DCost::new(Self::DEFAULT_ORTHOGONAL),
            diagonal: Maze2DCost::new(Self::DEFAULT_DIAGONAL),
        }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display("i")]
    Start,
    #[display("g")]
    Goal,
    #[display("0")]
    Open,
    #[display("x")]
    Blocked,
}

impl Maze2DCell {
    pub fn symbol(&self) -> char {
        match self {
            Maze2DCell::Start => 'i',
            Maze2DCell::Goal => 'g',
            Maze2DCell::Open => '0',
            Maze2DCell::Blocked => 'x',
        }
    }
}

#[derive(Debug, Error)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'i' => Ok(Maze2DCell::Start),
            'g' => Ok(Maze2DCell::Goal),
            '0' => Ok(Maze2DCell::Open),
            'x' => Ok(Maze2DCell::Blocked),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

/// A single thing wrong with a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutIssue {
    #[error("Empty layout")]
    EmptyLayout,
    #[error("No start found")]
    MissingStart,
    #[error("No goal found")]
    MissingGoal,
    #[error("Multiple starts, another one at {0}")]
    DuplicateStart(Maze2DState),
    #[error("Multiple goals, another one at {0}")]
    DuplicateGoal(Maze2DState),
    #[error("Invalid character '{ch}' at {at}")]
    InvalidCharacter { ch: char, at: Maze2DState },
    #[error("Inconsistent row length on row {row} ({found} != {expected})")]
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Endpoint {0} is out of bounds")]
    EndpointOutOfBounds(Maze2DState),
    #[error("Endpoint {0} is blocked")]
    EndpointBlocked(Maze2DState),
}

/// Everything wrong with a layout, found in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid maze layout: {}", join_issues(.issues))]
pub struct LayoutError {
    pub issues: Vec<LayoutIssue>,
}

fn join_issues(issues: &[LayoutIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl LayoutError {
    pub fn contains(&self, issue: &LayoutIssue) -> bool {
        self.issues.contains(issue)
    }
}

#[derive(Debug, Error)]
pub enum Maze2DProblemError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
}

#[derive(Clone)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
    width: usize,
    height: usize,
    actions: ActionSet,
    costs: TransitionCosts,
}

impl Maze2DSpace {
    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn actions(&self) -> ActionSet {
        self.actions
    }
    pub fn costs(&self) -> TransitionCosts {
        self.costs
    }

    #[inline(always)]
    pub fn in_bounds(&self, s: &Maze2DState) -> bool {
        s.row < self.height && s.col < self.width
    }

    #[inline(always)]
    pub fn at(&self, s: &Maze2DState) -> Option<Maze2DCell> {
        self.map.get(s.row)?.get(s.col).copied()
    }

    /// Start, goal and open cells can all be traversed.
    #[inline(always)]
    pub fn is_open(&self, s: &Maze2DState) -> bool {
        matches!(self.at(s), Some(cell) if cell != Maze2DCell::Blocked)
    }

    #[inline(always)]
    pub fn is_goal(&self, s: &Maze2DState) -> bool {
        self.at(s) == Some(Maze2DCell::Goal)
    }

    /// Cost of an action anywhere in this maze.
    ///
    /// Actions this maze doesn't allow cost +infinity.
    #[inline(always)]
    pub fn transition_cost(&self, a: Maze2DAction) -> Maze2DCost {
        if self.actions.contains(a) {
            self.costs.of(a.kind())
        } else {
            Maze2DCost::infinity()
        }
    }

    pub fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<Maze2DState> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let s = Maze2DState::new(
                r.random_range(0..self.height),
                r.random_range(0..self.width),
            );
            if self.is_open(&s) {
                return Some(s);
            }
        }

        None
    }
}

impl Space<Maze2DState, Maze2DAction, Maze2DCost> for Maze2DSpace {
    #[inline(always)]
    fn apply(&self, s: &Maze2DState, a: &Maze2DAction) -> Option<Maze2DState> {
        s.offset(a.offset())
    }

    #[inline(always)]
    fn cost(&self, _s: &Maze2DState, a: &Maze2DAction) -> Maze2DCost {
        self.transition_cost(*a)
    }

    /// Gets the open neighbours of a given position.
    fn successors(&self, s: &Maze2DState) -> Successors<Maze2DState, Maze2DAction, Maze2DCost> {
        let mut v = SmallVec::new();
        for a in self.actions.iter() {
            if let Some(next) = s.offset(a.offset()) {
                if self.is_open(&next) {
                    v.push((a, next, self.transition_cost(a)));
                }
            }
        }
        v
    }

    #[inline(always)]
    fn valid(&self, s: &Maze2DState) -> bool {
        self.is_open(s)
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.map {
            for cell in line {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D({}x{}, {:?})", self.width, self.height, self.actions)
    }
}

/// A validated maze together with its start and goal.
#[derive(Clone, Debug)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Maze2DState,
    goal: Maze2DState,
}

impl Maze2DProblem {
    /// Builds a maze from its rows, reporting every layout issue at once.
    pub fn new<I, S>(layout: I, actions: ActionSet) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut issues = vec![];
        let mut map = vec![];
        let mut width = None;
        let mut start = None;
        let mut goal = None;

        for (row, line) in layout.into_iter().enumerate() {
            let line = line.as_ref();
            let mut cells = Vec::with_capacity(line.len());

            for (col, ch) in line.chars().enumerate() {
                let at = Maze2DState::new(row, col);
                let cell = match Maze2DCell::try_from(ch) {
                    Ok(cell) => cell,
                    Err(Maze2DCellParseError::InvalidCharacter(ch)) => {
                        issues.push(LayoutIssue::InvalidCharacter { ch, at });
                        Maze2DCell::Blocked
                    }
                };
                match cell {
                    Maze2DCell::Start if start.is_some() => {
                        issues.push(LayoutIssue::DuplicateStart(at))
                    }
                    Maze2DCell::Start => start = Some(at),
                    Maze2DCell::Goal if goal.is_some() => {
                        issues.push(LayoutIssue::DuplicateGoal(at))
                    }
                    Maze2DCell::Goal => goal = Some(at),
                    _ => {}
                }
                cells.push(cell);
            }

            // The first row sets the width.
            let expected = *width.get_or_insert(cells.len());
            if cells.len() != expected {
                issues.push(LayoutIssue::InconsistentRowLength {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            map.push(cells);
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            issues.insert(0, LayoutIssue::EmptyLayout);
        }
        if start.is_none() {
            issues.push(LayoutIssue::MissingStart);
        }
        if goal.is_none() {
            issues.push(LayoutIssue::MissingGoal);
        }

        match (start, goal) {
            (Some(start), Some(goal)) if issues.is_empty() => Ok(Self {
                space: Maze2DSpace {
                    height: map.len(),
                    width,
                    map,
                    actions: ActionSet::empty(),
                    costs: TransitionCosts::default(),
                },
                start,
                goal,
            }
            .with_actions(actions)),
            _ => Err(LayoutError { issues }),
        }
    }

    /// Builds a maze allowing the actions named by `symbols`.
    pub fn from_symbols<I, S, J, T>(layout: I, symbols: J) -> Result<Self, Maze2DProblemError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let actions = ActionSet::from_symbols(symbols)?;
        Ok(Self::new(layout, actions)?)
    }

    #[must_use]
    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        if actions.is_empty() {
            let (width, height) = self.space.dimensions();
            log::warn!("Maze {width}x{height} allows no actions");
        }
        self.space.actions = actions;
        self
    }

    #[must_use]
    pub fn with_costs(mut self, costs: TransitionCosts) -> Self {
        self.space.costs = costs;
        self
    }

    /// Moves the start and goal.
    ///
    /// Both must be open cells. They may be the same cell.
    pub fn with_endpoints(
        &self,
        start: Maze2DState,
        goal: Maze2DState,
    ) -> Result<Self, LayoutError> {
        let mut issues = vec![];
        for s in [start, goal] {
            if !self.space.in_bounds(&s) {
                issues.push(LayoutIssue::EndpointOutOfBounds(s));
            } else if !self.space.is_open(&s) {
                issues.push(LayoutIssue::EndpointBlocked(s));
            }
        }
        if !issues.is_empty() {
            return Err(LayoutError { issues });
        }

        let mut space = self.space.clone();
        for old in [self.start, self.goal] {
            space.map[old.row][old.col] = Maze2DCell::Open;
        }
        space.map[start.row][start.col] = Maze2DCell::Start;
        space.map[goal.row][goal.col] = Maze2DCell::Goal;

        Ok(Self { space, start, goal })
    }

    /// Picks a random open start and goal, distinct when possible.
    pub fn randomize<R: rand::Rng>(&self, r: &mut R) -> Option<Maze2DProblem> {
        let start = self.space.random_state(r)?;
        let mut goal = self.space.random_state(r)?;
        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            if goal != start {
                break;
            }
            goal = self.space.random_state(r)?;
        }

        self.with_endpoints(start, goal).ok()
    }

    pub fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    pub fn start(&self) -> Maze2DState {
        self.start
    }
    pub fn goal(&self) -> Maze2DState {
        self.goal
    }

    /// Renders the maze with a path drawn over it as `*`.
    pub fn render_path(&self, node: &SearchNode<Maze2DState, Maze2DAction, Maze2DCost>) -> String {
        let mut rows: Vec<Vec<char>> = self
            .space
            .map
            .iter()
            .map(|line| line.iter().map(Maze2DCell::symbol).collect())
            .collect();
        for s in node.states() {
            if let Some(Maze2DCell::Open) = self.space.at(s) {
                rows[s.row][s.col] = '*';
            }
        }

        let mut out = String::with_capacity(rows.len() * (self.space.width + 1));
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = LayoutError;

    /// Parses a layout allowing every action.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Maze2DProblem::new(s.lines().map(str::trim), ActionSet::all())
    }
}

impl std::str::FromStr for Maze2DProblem {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze2DProblem::try_from(s)
    }
}

impl Problem<Maze2DSpace, Maze2DState, Maze2DAction, Maze2DCost> for Maze2DProblem {
    fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    fn start(&self) -> Maze2DState {
        self.start
    }
    fn goal(&self) -> Maze2DState {
        self.goal
    }
    #[inline(always)]
    fn is_goal(&self, s: &Maze2DState) -> bool {
        self.space.is_goal(s)
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.space)
    }
}
