use crate::board::Board;
use crate::heuristic::Manhattan;
use crate::moves::Direction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

/// Configuration for the solver.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Give up after expanding this many arrangements (`None` = unbounded).
    pub max_expansions: Option<usize>,
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Arrangements taken from the frontier and expanded.
    pub expanded: usize,
    /// Child nodes pushed onto the frontier.
    pub generated: usize,
}

/// Why a search ended without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The frontier ran dry: the goal is unreachable from the start.
    NoSolution,
    /// The expansion budget was spent before the goal was found.
    LimitReached {
        /// The configured budget that was hit.
        limit: usize,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NoSolution => {
                write!(f, "the goal cannot be reached from the start arrangement")
            }
            SolveError::LimitReached { limit } => {
                write!(f, "gave up after expanding {} arrangements", limit)
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// An ordered move sequence from the start arrangement to the goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Every arrangement along the way, start and goal included.
    pub path: Vec<Board>,
    /// The blank slide taken between each consecutive pair in `path`.
    pub moves: Vec<Direction>,
    /// Work counters for the search that produced this solution.
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves in the solution.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// A search-tree node. Nodes live in an arena owned by one `solve` call and
/// point at their parent by index; the links are set once at construction
/// and never change, so walking them after the goal is found reconstructs
/// the path.
struct Node {
    board: Board,
    g: u32,
    h: u32,
    parent: Option<usize>,
    via: Option<Direction>,
}

impl Node {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Frontier entry, min-ordered by total estimate and then by insertion
/// order, so ties break deterministically toward the older node.
#[derive(PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* solver over blank slides, guided by [`Manhattan`].
///
/// Each [`Solver::solve`] call owns a fresh frontier, explored set, and
/// node arena, so repeated searches never interfere.
pub struct Solver {
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Search for a cheapest move sequence turning `start` into `goal`.
    ///
    /// Returns [`SolveError::NoSolution`] once every arrangement reachable
    /// from `start` has been expanded without meeting the goal, and
    /// [`SolveError::LimitReached`] if the configured expansion budget runs
    /// out first.
    pub fn solve(&self, start: &Board, goal: &Board) -> Result<Solution, SolveError> {
        let heuristic = Manhattan::new(goal);
        let mut arena = vec![Node {
            board: *start,
            g: 0,
            h: heuristic.estimate(start),
            parent: None,
            via: None,
        }];
        let mut frontier = BinaryHeap::new();
        let mut explored: HashSet<Board> = HashSet::new();
        let mut stats = SearchStats::default();
        let mut seq = 0u64;

        frontier.push(OpenEntry {
            f: arena[0].f(),
            seq,
            node: 0,
        });

        while let Some(entry) = frontier.pop() {
            let board = arena[entry.node].board;
            // The frontier may hold several entries for one arrangement,
            // re-added under different parents; only the first pop expands
            // it and the rest are discarded here.
            if explored.contains(&board) {
                continue;
            }
            explored.insert(board);

            if board == *goal {
                return Ok(reconstruct(&arena, entry.node, stats));
            }

            if let Some(limit) = self.config.max_expansions {
                if stats.expanded >= limit {
                    return Err(SolveError::LimitReached { limit });
                }
            }
            stats.expanded += 1;

            let g = arena[entry.node].g;
            for dir in board.legal_directions() {
                let child = board.apply(dir);
                if explored.contains(&child) {
                    continue;
                }
                let h = heuristic.estimate(&child);
                arena.push(Node {
                    board: child,
                    g: g + 1,
                    h,
                    parent: Some(entry.node),
                    via: Some(dir),
                });
                seq += 1;
                frontier.push(OpenEntry {
                    f: g + 1 + h,
                    seq,
                    node: arena.len() - 1,
                });
                stats.generated += 1;
            }
        }

        Err(SolveError::NoSolution)
    }
}

/// Walk parent links from the goal node back to the root and reverse the
/// order. A pure traversal of already-built structure; no search happens
/// here.
fn reconstruct(arena: &[Node], goal_index: usize, stats: SearchStats) -> Solution {
    let mut path = Vec::new();
    let mut moves = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        let node = &arena[index];
        path.push(node.board);
        if let Some(dir) = node.via {
            moves.push(dir);
        }
        cursor = node.parent;
    }
    path.reverse();
    moves.reverse();
    Solution {
        path,
        moves,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use std::collections::VecDeque;

    /// Brute-force shortest distance, used to cross-check optimality.
    fn bfs_distance(start: &Board, goal: &Board) -> Option<usize> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(*start);
        queue.push_back((*start, 0usize));
        while let Some((board, depth)) = queue.pop_front() {
            if board == *goal {
                return Some(depth);
            }
            for dir in board.legal_directions() {
                let child = board.apply(dir);
                if seen.insert(child) {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        None
    }

    #[test]
    fn test_already_solved() {
        let goal = Board::from_string("012345678").unwrap();
        let solution = Solver::new().solve(&goal, &goal).unwrap();
        assert_eq!(solution.move_count(), 0);
        assert_eq!(solution.path, vec![goal]);
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn test_single_slide() {
        let goal = Board::from_string("012345678").unwrap();
        let start = goal.apply(Direction::Right);
        let solution = Solver::new().solve(&start, &goal).unwrap();
        assert_eq!(solution.move_count(), 1);
        assert_eq!(solution.moves, vec![Direction::Left]);
    }

    #[test]
    fn test_reference_instance() {
        let start = Board::from_string("124356807").unwrap();
        let goal = Board::from_string("012345678").unwrap();
        let solution = Solver::new().solve(&start, &goal).unwrap();

        assert_eq!(solution.path.first(), Some(&start));
        assert_eq!(solution.path.last(), Some(&goal));
        assert_eq!(solution.path.len(), solution.move_count() + 1);

        // Each consecutive pair differs by exactly the recorded legal slide.
        for (i, dir) in solution.moves.iter().enumerate() {
            assert!(solution.path[i].can_slide(*dir));
            assert_eq!(solution.path[i].apply(*dir), solution.path[i + 1]);
        }

        let shortest = bfs_distance(&start, &goal).unwrap();
        assert_eq!(solution.move_count(), shortest);
    }

    #[test]
    fn test_optimal_on_scrambles() {
        let goal = Board::from_string("012345678").unwrap();
        let solver = Solver::new();
        for seed in [7, 11, 42, 1234] {
            let mut generator = Generator::with_seed(seed);
            let start = generator.scramble(&goal, 18);
            let solution = solver.solve(&start, &goal).unwrap();
            let shortest = bfs_distance(&start, &goal).unwrap();
            assert_eq!(
                solution.move_count(),
                shortest,
                "seed {seed} found a non-optimal path"
            );
        }
    }

    #[test]
    fn test_heuristic_admissible_on_scrambles() {
        let goal = Board::from_string("012345678").unwrap();
        let heuristic = Manhattan::new(&goal);
        let mut generator = Generator::with_seed(99);
        for moves in [4, 8, 12, 16] {
            let board = generator.scramble(&goal, moves);
            let shortest = bfs_distance(&board, &goal).unwrap();
            assert!(heuristic.estimate(&board) as usize <= shortest);
        }
    }

    #[test]
    fn test_same_count_when_run_twice() {
        let start = Board::from_string("124356807").unwrap();
        let goal = Board::from_string("012345678").unwrap();
        let solver = Solver::new();
        let first = solver.solve(&start, &goal).unwrap();
        let second = solver.solve(&start, &goal).unwrap();
        assert_eq!(first.move_count(), second.move_count());
        // Tie-breaking is deterministic, so the whole path repeats too.
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn test_unsolvable_reports_no_solution() {
        // Swapping two non-blank tiles flips the parity class, putting the
        // goal out of reach; the frontier must drain instead of spinning.
        let start = Board::from_string("021345678").unwrap();
        let goal = Board::from_string("012345678").unwrap();
        let result = Solver::new().solve(&start, &goal);
        assert_eq!(result.unwrap_err(), SolveError::NoSolution);
    }

    #[test]
    fn test_expansion_limit() {
        let start = Board::from_string("124356807").unwrap();
        let goal = Board::from_string("012345678").unwrap();
        let solver = Solver::with_config(SolverConfig {
            max_expansions: Some(3),
        });
        let result = solver.solve(&start, &goal);
        assert_eq!(result.unwrap_err(), SolveError::LimitReached { limit: 3 });
    }

    #[test]
    fn test_limit_does_not_block_trivial_solve() {
        let goal = Board::from_string("012345678").unwrap();
        let solver = Solver::with_config(SolverConfig {
            max_expansions: Some(0),
        });
        // The goal is found on selection, before any expansion is spent.
        let solution = solver.solve(&goal, &goal).unwrap();
        assert_eq!(solution.move_count(), 0);
    }
}
