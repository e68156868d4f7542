use super::{ClueSolver, Strategy};
use crate::{Board, Position};
use rand::prelude::*;

/// Configuration for generated solver test boards.
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub dim: u32,
    pub mine_density: f64,
    pub revealed_fraction: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            dim: 8,
            mine_density: 0.15,
            revealed_fraction: 0.3,
        }
    }
}

/// Generates mid-game boards with a known mine set, for validating solver
/// deductions against ground truth.
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn new(config: TestBoardConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A board with mines placed at the configured density and a fraction
    /// of the safe cells already revealed.
    pub fn generate(&mut self) -> Board {
        let dim = self.config.dim;
        let area = (dim * dim) as f64;
        let mine_count = (area * self.config.mine_density) as u32;
        let mut board = Board::with_rng(dim, mine_count, &mut self.rng)
            .unwrap_or_else(|e| panic!("invalid test board config: {e}"));

        let mut safe: Vec<Position> = board
            .iter_positions()
            .filter(|p| !board.mine_positions().contains(p))
            .collect();
        safe.shuffle(&mut self.rng);

        let to_reveal = (area * self.config.revealed_fraction) as usize;
        for pos in safe.into_iter().take(to_reveal) {
            board.reveal(pos).expect("safe cell is hidden");
        }

        board
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<Board> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Checks one strategy's deductions on one board against the ground-truth
/// mine set. Returns false (and prints the offending cell) on any
/// misclassification.
pub fn validate_strategy(strategy: Strategy, board: &Board) -> bool {
    let solver = match ClueSolver::from_board(board, false) {
        Ok(solver) => solver,
        Err(e) => {
            println!("clue collection failed: {e}");
            return false;
        }
    };
    let info = match solver.solve(strategy) {
        Ok(info) => info,
        Err(e) => {
            println!("{strategy:?} solving failed: {e}");
            return false;
        }
    };

    for pos in info.mines() {
        if !board.mine_positions().contains(pos) {
            println!("{strategy:?} marked safe cell {pos:?} as a mine");
            return false;
        }
    }
    for pos in info.safe() {
        if board.mine_positions().contains(pos) {
            println!("{strategy:?} marked mine {pos:?} as safe");
            return false;
        }
    }
    true
}
