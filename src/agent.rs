use crate::solver::{ClueSolver, Info, Strategy};
use crate::{Board, Cell, GameError, SolverError};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::prelude::*;

/// Knobs for one agent run.
#[derive(Debug, Clone, Copy)]
pub struct AgentOptions {
    pub strategy: Strategy,
    /// Fold the board-wide remaining-mine-count clue into every pass.
    pub use_global_clue: bool,
    /// Guess the most-constrained cell instead of a uniform random one.
    pub use_next_cell_heuristic: bool,
    /// Log each pass's deductions and the resulting board.
    pub verbose_trace: bool,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Improved,
            use_global_clue: false,
            use_next_cell_heuristic: false,
            verbose_trace: false,
        }
    }
}

/// Plays one board to completion: infer to a fixed point, guess when
/// stuck, repeat. Every pass either resolves at least one hidden cell or
/// hands over to a guess that resolves exactly one, so the loop is
/// bounded by the board area.
pub struct Agent {
    board: Board,
    options: AgentOptions,
    knowledge: Info,
    rng: StdRng,
}

impl Agent {
    /// Fresh random board.
    pub fn new(dim: u32, mine_count: u32, options: AgentOptions) -> Result<Self, GameError> {
        let mut rng = StdRng::from_entropy();
        let board = Board::with_rng(dim, mine_count, &mut rng)?;
        Ok(Self::assemble(board, options, rng))
    }

    /// Fresh board with seeded randomness, for reproducible runs.
    pub fn with_seed(
        dim: u32,
        mine_count: u32,
        options: AgentOptions,
        seed: u64,
    ) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::with_rng(dim, mine_count, &mut rng)?;
        Ok(Self::assemble(board, options, rng))
    }

    /// Prebuilt board and mine set.
    pub fn with_board(board: Board, options: AgentOptions) -> Self {
        Self::assemble(board, options, StdRng::from_entropy())
    }

    fn assemble(board: Board, options: AgentOptions, rng: StdRng) -> Self {
        Self {
            board,
            options,
            knowledge: Info::default(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs the board to completion and returns the final score: the
    /// fraction of mines correctly flagged.
    pub fn run(&mut self) -> Result<f64, SolverError> {
        while !self.board.is_complete() {
            if self.infer_pass()? {
                continue;
            }
            if self.board.is_complete() {
                break;
            }
            self.guess()?;
        }

        let score = self.board.score();
        debug!("board complete, score {score:.2}");
        Ok(score)
    }

    /// One inference pass: rebuild clues from the board, solve, merge the
    /// resulting facts into running knowledge, and apply them. Returns
    /// whether anything new was learned.
    fn infer_pass(&mut self) -> Result<bool, SolverError> {
        let solver = ClueSolver::from_board(&self.board, self.options.use_global_clue)?;
        let found = solver.solve(self.options.strategy)?;
        if found.is_empty() {
            debug!("pass over {} clues found nothing", solver.clue_count());
            return Ok(false);
        }

        self.knowledge.merge(&found)?;
        debug!(
            "pass over {} clues: {} mines, {} safe",
            solver.clue_count(),
            found.mines().len(),
            found.safe().len()
        );

        for pos in found.mines().iter().copied().sorted() {
            if let Err(e) = self.board.flag_as_mine(pos) {
                warn!("skipping flag: {e}");
            }
        }
        for pos in found.safe().iter().copied().sorted() {
            match self.board.reveal(pos) {
                // A deduced-safe cell blowing up means the deduction was
                // wrong, which only a logic defect can cause.
                Ok(Cell::Exploded) => return Err(SolverError::Contradiction(pos)),
                Ok(_) => {}
                Err(e) => warn!("skipping reveal: {e}"),
            }
        }

        if self.options.verbose_trace {
            info!("board after pass:\n{}", self.board);
        }
        Ok(true)
    }

    /// No deduction was available: reveal one hidden cell, recommended by
    /// the constraint-coverage heuristic when enabled, uniform random
    /// otherwise.
    fn guess(&mut self) -> Result<(), SolverError> {
        let recommended = if self.options.use_next_cell_heuristic {
            ClueSolver::from_board(&self.board, self.options.use_global_clue)?.suggest_guess()
        } else {
            None
        };

        let pos = match recommended {
            Some(pos) => pos,
            None => {
                let hidden = self.board.hidden_positions();
                hidden[self.rng.gen_range(0..hidden.len())]
            }
        };

        match self.board.reveal(pos) {
            Ok(Cell::Exploded) => debug!("guess {pos:?} hit a mine"),
            Ok(Cell::Revealed(n)) => debug!("guess {pos:?} revealed {n}"),
            Ok(_) => {}
            Err(e) => warn!("guess was a no-op: {e}"),
        }
        if self.options.verbose_trace {
            info!("board after guess at {pos:?}:\n{}", self.board);
        }
        Ok(())
    }
}
