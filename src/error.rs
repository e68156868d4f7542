use crate::Position;
use thiserror::Error;

/// Recoverable configuration and query errors. Callers report these and
/// continue; they never abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimension must be at least 1")]
    ZeroDimension,
    #[error("Too many mines ({mines}) for a {dim}x{dim} board")]
    TooManyMines { dim: u32, mines: u32 },
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cell at {0:?} is not hidden")]
    NotHidden(Position),
}

/// Fatal logical inconsistencies. A deduction that contradicts established
/// knowledge means the elimination logic or the board is broken; the run
/// must abort rather than continue with contradictory facts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Cell {0:?} deduced both mine and safe")]
    Contradiction(Position),
    #[error("Clue mine count {count} out of range for {cells} hidden cells")]
    ClueOutOfRange { count: i32, cells: usize },
    #[error("Constraint system is infeasible over binary variables")]
    Infeasible,
}
