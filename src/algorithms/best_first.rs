use std::cmp::Reverse;
use std::marker::PhantomData;

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::algorithms::strategy::Strategy;
use crate::data_structures::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::heuristic::ZeroHeuristic;
use crate::problem::Problem;
use crate::search::SearchNode;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// The primary key a strategy ranks nodes by. Lower goes first.
///
/// A single search only ever builds one kind of key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityKey<C: Cost> {
    /// A* (`g + h`) and uniform-cost (`g`).
    Cost(C),
    /// Breadth-first (`depth`) and depth-first (`-depth`).
    Steps(i64),
}

impl<C> PriorityKey<C>
where
    C: Cost,
{
    pub fn of<St, A, H>(
        strategy: Strategy,
        node: &SearchNode<St, A, C>,
        goal: &St,
        heuristic: &H,
    ) -> Self
    where
        St: State,
        A: Action,
        H: Heuristic<St, C>,
    {
        let depth = i64::try_from(node.depth()).unwrap_or(i64::MAX);
        match strategy {
            Strategy::AStar => {
                let h = heuristic.estimate(node.end(), goal);
                PriorityKey::Cost(node.cost().saturating_add(&h))
            }
            Strategy::BreadthFirst => PriorityKey::Steps(depth),
            Strategy::DepthFirst => PriorityKey::Steps(-depth),
            Strategy::UniformCost => PriorityKey::Cost(node.cost()),
        }
    }
}

/// The ranking tuple for the frontier.
///
/// We prefer lower keys, then longer paths, then whatever was pushed first.
///
/// ```
/// use maze_search::algorithms::best_first::PriorityKey;
/// use maze_search::algorithms::best_first::SearchRank;
/// use maze_search::float_cost::FloatCost;
///
/// let key = |c: f64| PriorityKey::Cost(FloatCost::new(c));
/// assert!(SearchRank::new(key(1.0), 1, 9) < SearchRank::new(key(2.0), 5, 0));
/// assert!(SearchRank::new(key(2.0), 5, 9) < SearchRank::new(key(2.0), 3, 0));
/// assert!(SearchRank::new(key(2.0), 5, 0) < SearchRank::new(key(2.0), 5, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchRank<C: Cost> {
    key: PriorityKey<C>,
    longer_first: Reverse<usize>,
    sequence: u64,
}

impl<C> SearchRank<C>
where
    C: Cost,
{
    pub fn new(key: PriorityKey<C>, path_len: usize, sequence: u64) -> Self {
        Self {
            key,
            longer_first: Reverse(path_len),
            sequence,
        }
    }
    pub fn key(&self) -> PriorityKey<C> {
        self.key
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct FrontierEntry<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub rank: SearchRank<C>,
    pub node: SearchNode<St, A, C>,
}

impl<St: State, A: Action, C: Cost> PartialEq for FrontierEntry<St, A, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<St: State, A: Action, C: Cost> Eq for FrontierEntry<St, A, C> {}

impl<St: State, A: Action, C: Cost> PartialOrd for FrontierEntry<St, A, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<St: State, A: Action, C: Cost> Ord for FrontierEntry<St, A, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Counters of a single search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose state was marked visited. Each state is expanded at most
    /// once.
    pub expanded: usize,
    /// Every node taken out of the frontier, including the ones discarded
    /// because their state had been expanded already.
    pub popped: usize,
    /// Child nodes built.
    pub generated: usize,
    /// Largest number of nodes held by the frontier at once.
    pub peak_frontier: usize,
}

/// The result of a search, either a path to the goal or `None`.
///
/// Not finding a path is not an error. It means every state reachable from
/// the start was expanded.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub strategy: Strategy,
    pub node: Option<SearchNode<St, A, C>>,
    pub stats: SearchStats,
}

impl<St, A, C> SearchOutcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn is_solved(&self) -> bool {
        self.node.is_some()
    }

    /// Number of expansions done before finishing.
    pub fn expansion_count(&self) -> usize {
        self.stats.expanded
    }

    pub fn cost(&self) -> Option<C> {
        self.node.as_ref().map(SearchNode::cost)
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "{} Stats:", self.strategy.name())?;
        writeln!(
            out,
            "  - Expanded:   {}",
            self.stats.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Popped:     {}",
            self.stats.popped.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Generated:  {}",
            self.stats.generated.separate_with_commas()
        )?;

        let s = size_of::<FrontierEntry<St, A, C>>();
        let l = self.stats.peak_frontier;
        writeln!(
            out,
            "  - |Frontier|^: {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )
    }
}

/// Best-first search over a `Problem` ranked by a `Strategy`.
///
/// States are expanded at most once, nodes reaching an expanded state again
/// are dropped when popped. There's no re-opening, so an inadmissible
/// heuristic may yield a sub-optimal path.
pub struct BestFirstSearch<'p, P, H, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<St, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    problem: &'p P,
    heuristic: H,
    strategy: Strategy,
    goal: St,

    /// Nodes waiting to be expanded. A state may be here many times through
    /// different paths.
    frontier: Frontier<FrontierEntry<St, A, C>>,
    /// The closed set.
    visited: FxHashSet<St>,

    next_sequence: u64,
    stats: SearchStats,

    _phantom_space: PhantomData<Sp>,
}

impl<'p, P, H, Sp, St, A, C> BestFirstSearch<'p, P, H, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<St, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    #[must_use]
    pub fn new(problem: &'p P, strategy: Strategy, heuristic: H) -> Self {
        let mut search = Self {
            problem,
            heuristic,
            strategy,
            goal: problem.goal(),

            frontier: Frontier::with_capacity(256),
            visited: FxHashSet::default(),

            next_sequence: 0,
            stats: SearchStats::default(),

            _phantom_space: PhantomData,
        };

        search.push(SearchNode::new_from_start(problem.start()));
        search
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[cfg(feature = "inspect")]
    pub fn frontier(&self) -> &Frontier<FrontierEntry<St, A, C>> {
        &self.frontier
    }
    #[cfg(feature = "inspect")]
    pub fn visited(&self) -> &FxHashSet<St> {
        &self.visited
    }

    #[inline(always)]
    pub fn is_visited(&self, s: &St) -> bool {
        self.visited.contains(s)
    }

    /// Expands nodes until the goal is found or the frontier runs out.
    ///
    /// Once a goal is found the frontier is dropped, so further calls
    /// return `None`.
    #[must_use]
    pub fn find_goal(&mut self) -> Option<SearchNode<St, A, C>> {
        let problem = self.problem;
        let early_goal = self.strategy.detects_goal_on_generation();

        while let Some(FrontierEntry { rank, node }) = self.frontier.pop() {
            self.stats.popped += 1;

            let state = *node.end();
            // Only the first, best ranked, node of each state is expanded.
            if !self.visited.insert(state) {
                continue;
            }
            self.stats.expanded += 1;
            trace!("Expanding {state} at {:?} (depth {})", rank.key(), node.depth());

            if problem.is_goal(&state) {
                self.frontier.clear();
                return Some(node);
            }

            for (a, s, c) in problem.space().successors(&state) {
                if self.visited.contains(&s) {
                    continue;
                }
                let child = node.child((a, s), c);
                self.stats.generated += 1;

                if early_goal && problem.is_goal(&s) {
                    self.frontier.clear();
                    return Some(child);
                }
                self.push(child);
            }
        }

        None
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> SearchOutcome<St, A, C> {
        debug!(
            "{} search from {} to {}",
            self.strategy.name(),
            self.problem.start(),
            self.goal
        );

        let node = self.find_goal();
        match &node {
            Some(n) => debug!("{} found {n}. {:?}", self.strategy, self.stats),
            None => debug!("{} exhausted the frontier. {:?}", self.strategy, self.stats),
        }

        SearchOutcome {
            strategy: self.strategy,
            node,
            stats: self.stats,
        }
    }

    #[inline(always)]
    fn push(&mut self, node: SearchNode<St, A, C>) {
        let key = PriorityKey::of(self.strategy, &node, &self.goal, &self.heuristic);
        let rank = SearchRank::new(key, node.len(), self.next_sequence);
        self.next_sequence += 1;

        self.frontier.push(FrontierEntry { rank, node });
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
    }
}

/// Searches a path from the problem's start to its goal.
///
/// `heuristic` is only consulted by `Strategy::AStar`.
pub fn search<P, H, Sp, St, A, C>(
    problem: &P,
    strategy: Strategy,
    heuristic: H,
) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<St, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    BestFirstSearch::new(problem, strategy, heuristic).run()
}

/// Like `search`, with A* falling back to a zero heuristic.
pub fn search_uninformed<P, Sp, St, A, C>(problem: &P, strategy: Strategy) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    search(problem, strategy, ZeroHeuristic)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problems::maze_2d::ActionSet;
    use crate::problems::maze_2d::Euclidean;
    use crate::problems::maze_2d::Manhattan;
    use crate::problems::maze_2d::Maze2DAction;
    use crate::problems::maze_2d::Maze2DCost;
    use crate::problems::maze_2d::Maze2DProblem;
    use crate::problems::maze_2d::Maze2DState;
    use crate::problems::maze_2d::TransitionCosts;

    const MAP0: &str = indoc! {"
        0000g
        0xx00
        00xx0
        00x00
        i0000
    "};

    const ENCLOSED: &str = indoc! {"
        i0x0
        00x0
        xxxg
    "};

    fn map0() -> Maze2DProblem {
        Maze2DProblem::try_from(MAP0).unwrap()
    }

    fn cost(c: f64) -> Maze2DCost {
        Maze2DCost::new(c)
    }

    #[test]
    fn rank_order() {
        let steps = |s: i64| PriorityKey::<Maze2DCost>::Steps(s);
        assert!(SearchRank::new(steps(-3), 4, 7) < SearchRank::new(steps(-2), 3, 0));
        assert!(SearchRank::new(steps(1), 2, 7) < SearchRank::new(steps(1), 1, 0));
        assert!(SearchRank::new(steps(1), 2, 0) < SearchRank::new(steps(1), 2, 1));
    }

    #[test]
    fn keys_per_strategy() {
        let p = map0();
        let node = SearchNode::new_from_start(Maze2DState::new(4, 0))
            .child((Maze2DAction::E, Maze2DState::new(4, 1)), cost(1.0))
            .child((Maze2DAction::NE, Maze2DState::new(3, 2)), cost(1.5));
        let goal = p.goal();

        assert_eq!(
            PriorityKey::of(Strategy::AStar, &node, &goal, &Manhattan),
            PriorityKey::Cost(cost(2.5 + 5.0))
        );
        assert_eq!(
            PriorityKey::of(Strategy::UniformCost, &node, &goal, &Manhattan),
            PriorityKey::Cost(cost(2.5))
        );
        assert_eq!(
            PriorityKey::of(Strategy::BreadthFirst, &node, &goal, &Manhattan),
            PriorityKey::Steps(2)
        );
        assert_eq!(
            PriorityKey::of(Strategy::DepthFirst, &node, &goal, &Manhattan),
            PriorityKey::Steps(-2)
        );
    }

    #[test]
    fn start_is_goal() {
        let p = map0();
        let s = Maze2DState::new(2, 1);
        let p = p.with_endpoints(s, s).unwrap();

        for strategy in Strategy::ALL {
            let outcome = search(&p, strategy, Euclidean);
            let node = outcome.node.unwrap();
            assert!(node.is_trivial(), "{strategy}: {node}");
            assert_eq!(node.states(), &[s]);
            assert_eq!(node.cost(), cost(0.0));
            assert_eq!(outcome.stats.expanded, 1);
            assert_eq!(outcome.stats.generated, 0);
        }
    }

    #[test]
    fn astar_uses_diagonals() {
        let p = map0();
        let outcome = search_uninformed(&p, Strategy::AStar);
        let node = outcome.node.unwrap();

        use Maze2DAction::*;
        assert_eq!(node.actions(), &[E, E, NE, NE, N, N]);
        assert_eq!(
            node.states(),
            &[
                Maze2DState::new(4, 0),
                Maze2DState::new(4, 1),
                Maze2DState::new(4, 2),
                Maze2DState::new(3, 3),
                Maze2DState::new(2, 4),
                Maze2DState::new(1, 4),
                Maze2DState::new(0, 4),
            ]
        );
        assert_eq!(node.cost(), cost(7.0));
        assert!(p.space().valid_path(&node));

        let euclidean = search(&p, Strategy::AStar, Euclidean);
        assert_eq!(euclidean.node.unwrap().cost(), cost(7.0));

        let ucs = search_uninformed(&p, Strategy::UniformCost);
        assert_eq!(ucs.cost(), Some(cost(7.0)));
    }

    #[test]
    fn bfs_orthogonal_takes_fewest_actions() {
        let p = map0().with_actions(ActionSet::orthogonal());
        let outcome = search_uninformed(&p, Strategy::BreadthFirst);
        let node = outcome.node.unwrap();

        assert_eq!(node.depth(), 8);
        assert_eq!(node.cost(), cost(8.0));
        assert!(node.actions().iter().all(|a| ActionSet::orthogonal().contains(*a)));
        assert!(p.space().valid_path(&node));

        let diagonal = search_uninformed(&map0(), Strategy::AStar).node.unwrap();
        assert_ne!(node.actions(), diagonal.actions());
        assert!(diagonal.cost() < node.cost());
    }

    #[test]
    fn bfs_with_diagonals() {
        let p = map0();
        let node = search_uninformed(&p, Strategy::BreadthFirst).node.unwrap();
        assert_eq!(node.depth(), 6);
        assert_eq!(node.end(), &p.goal());
        assert!(p.space().valid_path(&node));
    }

    #[test]
    fn dfs_finds_some_path() {
        let p = map0();
        let node = search_uninformed(&p, Strategy::DepthFirst).node.unwrap();
        assert_eq!(node.start(), &p.start());
        assert_eq!(node.end(), &p.goal());
        assert!(p.space().valid_path(&node));
    }

    #[test]
    fn enclosed_start() {
        let p = Maze2DProblem::try_from(ENCLOSED).unwrap();
        for strategy in Strategy::ALL {
            let outcome = search(&p, strategy, Manhattan);
            assert!(outcome.node.is_none(), "{strategy}");
            assert_eq!(outcome.expansion_count(), 4, "{strategy}");
            assert!(outcome.stats.popped >= outcome.stats.expanded);
        }
    }

    #[test]
    fn no_actions() {
        let p = map0().with_actions(ActionSet::empty());
        for strategy in Strategy::ALL {
            let outcome = search_uninformed(&p, strategy);
            assert!(!outcome.is_solved());
            assert_eq!(outcome.expansion_count(), 1);
        }
    }

    #[test]
    fn deterministic() {
        let p = map0();
        for strategy in Strategy::ALL {
            let a = search(&p, strategy, Manhattan);
            let b = search(&p, strategy, Manhattan);
            assert_eq!(a, b, "{strategy}");
        }
    }

    #[test]
    fn inadmissible_manhattan_still_terminates() {
        let p = map0();
        let outcome = search(&p, Strategy::AStar, Manhattan);
        let node = outcome.node.unwrap();
        assert!(p.space().valid_path(&node));
        assert!(node.cost() >= cost(7.0));
    }

    #[test]
    fn find_goal_only_once() {
        let p = map0();
        let mut s = BestFirstSearch::new(&p, Strategy::UniformCost, ZeroHeuristic);
        assert!(s.find_goal().is_some());
        assert!(s.is_visited(&p.goal()));
        assert!(s.find_goal().is_none());
    }

    #[test]
    fn cost_ranked_goal_accepted_when_popped() {
        // The SE step reaches the goal in one action but costs more than
        // going around.
        let costs = TransitionCosts::new(1.0, 3.0).unwrap();
        let p = Maze2DProblem::try_from("i0\n0g").unwrap().with_costs(costs);

        for strategy in [Strategy::UniformCost, Strategy::AStar] {
            let node = search_uninformed(&p, strategy).node.unwrap();
            assert_eq!(node.cost(), cost(2.0), "{strategy}: {node}");
            assert_eq!(node.depth(), 2, "{strategy}");
        }

        let bfs = search_uninformed(&p, Strategy::BreadthFirst).node.unwrap();
        assert_eq!(bfs.actions(), &[Maze2DAction::SE]);
        assert_eq!(bfs.cost(), cost(3.0));
    }

    #[test]
    fn step_ranked_goal_accepted_when_generated() {
        let p = Maze2DProblem::try_from("i0g")
            .unwrap()
            .with_actions(ActionSet::orthogonal());

        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
            let mut s = BestFirstSearch::new(&p, strategy, ZeroHeuristic);
            let node = s.find_goal().unwrap();
            assert_eq!(node.end(), &p.goal(), "{strategy}");
            assert_eq!(s.stats().expanded, 2, "{strategy}");
            assert!(!s.is_visited(&p.goal()), "{strategy}");
        }

        let mut s = BestFirstSearch::new(&p, Strategy::UniformCost, ZeroHeuristic);
        assert!(s.find_goal().is_some());
        assert_eq!(s.stats().expanded, 3);
        assert!(s.is_visited(&p.goal()));
    }

    #[test]
    fn stats_report() {
        let outcome = search_uninformed(&map0(), Strategy::UniformCost);
        let mut out = vec![];
        outcome.write_stats(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Uniform-cost Stats:"));
        assert!(out.contains(&format!("Expanded:   {}", outcome.stats.expanded)));
    }
}
