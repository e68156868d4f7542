mod clue;
mod direct;
mod elimination;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clue::{Clue, Info};

use crate::{Board, Cell, Position, SolverError};
use std::collections::BTreeSet;

/// Which reasoning the solver applies when the cheap pass stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Per-clue counting only.
    Basic,
    /// Per-clue counting, escalating to linear-system elimination.
    #[default]
    Improved,
}

/// Owns the active clue set for one inference pass. Clues are rebuilt
/// from the board every pass and discarded afterwards; there is no
/// incremental constraint state to go stale.
#[derive(Debug)]
pub struct ClueSolver {
    clues: Vec<Clue>,
}

impl ClueSolver {
    /// Collects one clue per revealed numbered cell with hidden
    /// neighbors, plus the whole-board clue when the total mine count is
    /// to be used. Vacuous clues (no hidden cells) are dropped here.
    pub fn from_board(board: &Board, use_global_clue: bool) -> Result<Self, SolverError> {
        let mut clues = Vec::new();

        for pos in board.iter_positions() {
            let Ok(Cell::Revealed(number)) = board.cell(pos) else {
                continue;
            };

            let mut hidden = BTreeSet::new();
            let mut accounted = 0i32;
            for npos in board.neighbors(pos) {
                match board.cell(npos) {
                    Ok(Cell::Hidden) => {
                        hidden.insert(npos);
                    }
                    Ok(Cell::FlaggedMine | Cell::Exploded) => accounted += 1,
                    _ => {}
                }
            }
            if hidden.is_empty() {
                continue;
            }
            clues.push(Clue::new(number as i32 - accounted, hidden)?);
        }

        if use_global_clue {
            let hidden: BTreeSet<Position> = board.hidden_positions().into_iter().collect();
            if !hidden.is_empty() {
                clues.push(Clue::new(board.remaining_mine_budget() as i32, hidden)?);
            }
        }

        Ok(Self { clues })
    }

    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Runs the cheap per-clue pass, escalating to elimination only when
    /// it yields nothing and the strategy allows it.
    pub fn solve(&self, strategy: Strategy) -> Result<Info, SolverError> {
        let info = direct::solve(&self.clues)?;
        if !info.is_empty() || strategy == Strategy::Basic {
            return Ok(info);
        }
        elimination::solve(&self.clues)
    }

    /// The constraint-coverage guess recommendation; `None` when no clue
    /// constrains any cell.
    pub fn suggest_guess(&self) -> Option<Position> {
        elimination::suggest_guess(&self.clues)
    }
}
