use super::*;

use std::time::{Duration, Instant};

pub fn solve(board: Board, config: SolverConfig) -> Result<Outcome, SolveError> {
    let mut solver = Solver::new(config);
    solver.set_board(board);
    solver.solve()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Wall-clock limit, polled once per expanded node.
    pub timeout: Duration,
    /// Upper bound on the number of nodes in the search tree.
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            timeout: Duration::from_secs(300),
            max_states: 1_000_000,
        }
    }
}

impl SolverConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Ready,
    Running,
    Solved,
    Exhausted,
    TimedOut,
    OutOfMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(SolveResult),
    /// Every reachable layout was explored without reaching the goal.
    Unsolved {
        states: usize,
        expanded: usize,
        elapsed: Duration,
    },
}

/// Runs one search at a time over a deal. The tree of a successful search
/// stays available until the next `solve` or `set_board`; any other outcome
/// releases it when `solve` returns.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    initial_board: Board,
    tree: Option<SearchTree>,
    goal: Option<NodeId>,
    state: SearchState,
    states: usize,
    expanded: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            initial_board: Board::new(MAX_RANKS),
            tree: None,
            goal: None,
            state: SearchState::Ready,
            states: 0,
            expanded: 0,
        }
    }

    pub fn set_board(&mut self, board: Board) {
        self.initial_board = board;
        self.reset();
    }

    pub fn get_board(&self) -> &Board {
        &self.initial_board
    }

    fn reset(&mut self) {
        self.tree = None;
        self.goal = None;
        self.state = SearchState::Ready;
        self.states = 0;
        self.expanded = 0;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Nodes created by the last search.
    pub fn states(&self) -> usize {
        self.states
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The moves from the deal to the goal found by the last search.
    pub fn solution(&self) -> Option<Vec<Action>> {
        let tree = self.tree.as_ref()?;
        self.goal.map(|goal| tree.extract_solution(goal))
    }

    pub fn solve(&mut self) -> Result<Outcome, SolveError> {
        self.reset();
        self.initial_board
            .validate()
            .map_err(SolveError::InvalidDeal)?;

        self.state = SearchState::Running;
        let timer = Instant::now();
        let result = match SearchTree::new(self.initial_board.clone(), self.config.strategy) {
            Ok(mut tree) => {
                let result = self.search(&mut tree, timer);
                self.states = tree.len();
                if matches!(result, Ok(Outcome::Solved(_))) {
                    self.tree = Some(tree);
                }
                result
            }
            Err(_) => Err(SolveError::AllocationFailure { states: 0 }),
        };

        self.state = match &result {
            Ok(Outcome::Solved(_)) => SearchState::Solved,
            Ok(Outcome::Unsolved { .. }) => SearchState::Exhausted,
            Err(SolveError::Timeout(_)) => SearchState::TimedOut,
            Err(SolveError::AllocationFailure { .. }) => SearchState::OutOfMemory,
            Err(SolveError::InvalidDeal(_)) => SearchState::Ready,
        };
        result
    }

    fn search(&mut self, tree: &mut SearchTree, timer: Instant) -> Result<Outcome, SolveError> {
        let mut frontier = Frontier::new(self.config.strategy);
        frontier
            .push(FrontierEntry::new(NodeId::ROOT, tree.get(NodeId::ROOT)))
            .map_err(|_| out_of_memory(tree))?;

        let mut possible_moves = PossibleMoves::new();
        let mut children: Vec<(Board, Action)> = Vec::new();

        while let Some(entry) = frontier.pop_front() {
            if timer.elapsed() >= self.config.timeout {
                return Err(SolveError::Timeout(self.config.timeout));
            }

            let id = entry.node;
            if tree.get(id).board.completed_foundations() >= TOTAL_FOUNDATIONS - 1
                && let Some(goal) = self.complete_solution(tree, id)?
            {
                self.goal = Some(goal);
                return Ok(Outcome::Solved(SolveResult {
                    strategy: self.config.strategy,
                    states: tree.len(),
                    expanded: self.expanded,
                    elapsed: timer.elapsed(),
                    actions: tree.extract_solution(goal),
                }));
            }

            self.expanded += 1;
            possible_moves.clear();
            compute_possible_moves(&tree.get(id).board, &mut possible_moves);

            children.clear();
            children
                .try_reserve(possible_moves.len())
                .map_err(|_| out_of_memory(tree))?;
            let board = &tree.get(id).board;
            children.extend(possible_moves.iter().map(|mov| mov.apply(board)));

            for (board, action) in children.drain(..) {
                if tree.repeats_ancestor(id, &board) {
                    continue;
                }
                let child = self.link(tree, id, board, action)?;
                frontier
                    .push(FrontierEntry::new(child, tree.get(child)))
                    .map_err(|_| out_of_memory(tree))?;
            }
        }

        Ok(Outcome::Unsolved {
            states: tree.len(),
            expanded: self.expanded,
            elapsed: timer.elapsed(),
        })
    }

    /// Plays cards to the foundations greedily from node `id`. The played
    /// moves are linked into the tree only when they finish the game.
    fn complete_solution(
        &self,
        tree: &mut SearchTree,
        id: NodeId,
    ) -> Result<Option<NodeId>, SolveError> {
        let mut board = tree.get(id).board.clone();
        let mut moves = PossibleMoves::new();
        while let Some(mov) = next_foundation_move(&board) {
            mov.play(&mut board);
            moves.push(mov);
        }
        if !board.is_solved() {
            return Ok(None);
        }

        let mut goal = id;
        for mov in moves {
            let (board, action) = mov.apply(&tree.get(goal).board);
            goal = self.link(tree, goal, board, action)?;
        }
        Ok(Some(goal))
    }

    fn link(
        &self,
        tree: &mut SearchTree,
        parent: NodeId,
        board: Board,
        action: Action,
    ) -> Result<NodeId, SolveError> {
        if tree.len() >= self.config.max_states {
            return Err(out_of_memory(tree));
        }
        tree.push_child(parent, board, action)
            .map_err(|_| out_of_memory(tree))
    }
}

fn out_of_memory(tree: &SearchTree) -> SolveError {
    SolveError::AllocationFailure { states: tree.len() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub strategy: Strategy,
    pub states: usize,
    pub expanded: usize,
    pub elapsed: Duration,
    pub actions: Vec<Action>,
}
