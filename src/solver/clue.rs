use crate::{Position, SolverError};
use std::collections::{BTreeSet, HashSet};

/// One linear constraint over hidden cells: exactly `mines` of `cells`
/// contain a mine. Derived from a single revealed number (or the whole
/// board, for the global clue) and discarded after the pass that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    cells: BTreeSet<Position>,
    mines: u32,
}

impl Clue {
    /// Builds a clue, rejecting mine counts outside `[0, |cells|]`. An
    /// out-of-range count means the caller's bookkeeping is broken, so
    /// this is fatal rather than clamped.
    pub fn new(mines: i32, cells: BTreeSet<Position>) -> Result<Self, SolverError> {
        if mines < 0 || mines as usize > cells.len() {
            return Err(SolverError::ClueOutOfRange {
                count: mines,
                cells: cells.len(),
            });
        }
        Ok(Self {
            cells,
            mines: mines as u32,
        })
    }

    pub fn cells(&self) -> &BTreeSet<Position> {
        &self.cells
    }

    pub fn mines(&self) -> u32 {
        self.mines
    }
}

/// A batch of newly-deduced facts: cells now known to be mines and cells
/// now known to be safe. The two sides stay disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    mines: HashSet<Position>,
    safe: HashSet<Position>,
}

impl Info {
    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn safe(&self) -> &HashSet<Position> {
        &self.safe
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safe.is_empty()
    }

    pub fn mark_mine(&mut self, pos: Position) -> Result<(), SolverError> {
        if self.safe.contains(&pos) {
            return Err(SolverError::Contradiction(pos));
        }
        self.mines.insert(pos);
        Ok(())
    }

    pub fn mark_safe(&mut self, pos: Position) -> Result<(), SolverError> {
        if self.mines.contains(&pos) {
            return Err(SolverError::Contradiction(pos));
        }
        self.safe.insert(pos);
        Ok(())
    }

    /// Folds another batch of facts into this one. Any cell asserted mine
    /// on one side and safe on the other is a logic-level failure and
    /// must surface, never be resolved by picking a side.
    pub fn merge(&mut self, other: &Info) -> Result<(), SolverError> {
        for &pos in &other.mines {
            self.mark_mine(pos)?;
        }
        for &pos in &other.safe {
            self.mark_safe(pos)?;
        }
        Ok(())
    }
}
