use crate::{GameError, Position};
use itertools::Itertools;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// State of a single board cell. Transitions are monotonic: once a cell
/// leaves `Hidden` it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Hidden,
    FlaggedMine,
    Revealed(u8),
    Exploded,
}

/// A square Minesweeper board. The ground-truth mine set lives alongside
/// the visible cell states and is consulted only by [`Board::reveal`] and
/// [`Board::score`]; solvers see it exclusively through revealed clues.
#[derive(Debug, Clone)]
pub struct Board {
    cells: HashMap<Position, Cell>,
    mines: HashSet<Position>,
    dim: u32,
}

impl Board {
    /// Creates a `dim x dim` board with `mine_count` mines placed uniformly
    /// at random.
    pub fn new(dim: u32, mine_count: u32) -> Result<Self, GameError> {
        Self::with_rng(dim, mine_count, &mut rand::thread_rng())
    }

    /// Like [`Board::new`] but drawing mine positions from the given RNG,
    /// for reproducible trials.
    pub fn with_rng<R: Rng + ?Sized>(
        dim: u32,
        mine_count: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        Self::validate(dim, mine_count)?;

        let mut mines = HashSet::new();
        while (mines.len() as u32) < mine_count {
            let pos = Position::new(rng.gen_range(0..dim) as i32, rng.gen_range(0..dim) as i32);
            mines.insert(pos);
        }

        Ok(Self::assemble(dim, mines))
    }

    /// Creates a board around a prebuilt mine set.
    pub fn with_mines(dim: u32, mines: HashSet<Position>) -> Result<Self, GameError> {
        Self::validate(dim, mines.len() as u32)?;
        if let Some(&pos) = mines.iter().find(|p| !p.in_bounds(dim)) {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(Self::assemble(dim, mines))
    }

    pub(crate) fn validate(dim: u32, mine_count: u32) -> Result<(), GameError> {
        if dim == 0 {
            return Err(GameError::ZeroDimension);
        }
        if mine_count >= dim * dim {
            return Err(GameError::TooManyMines {
                dim,
                mines: mine_count,
            });
        }
        Ok(())
    }

    fn assemble(dim: u32, mines: HashSet<Position>) -> Self {
        let cells = (0..dim as i32)
            .flat_map(|y| (0..dim as i32).map(move |x| (Position::new(x, y), Cell::Hidden)))
            .collect();
        Self { cells, mines, dim }
    }

    pub fn dim(&self) -> u32 {
        self.dim
    }

    pub fn mine_count(&self) -> u32 {
        self.mines.len() as u32
    }

    pub fn cell(&self, pos: Position) -> Result<Cell, GameError> {
        self.cells
            .get(&pos)
            .copied()
            .ok_or(GameError::OutOfBounds(pos))
    }

    /// In-bounds neighbors of `pos`.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors().filter(|p| p.in_bounds(self.dim)).collect()
    }

    /// All positions in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let dim = self.dim as i32;
        (0..dim).flat_map(move |y| (0..dim).map(move |x| Position::new(x, y)))
    }

    pub fn hidden_positions(&self) -> Vec<Position> {
        self.iter_positions()
            .filter(|p| matches!(self.cells.get(p), Some(Cell::Hidden)))
            .collect()
    }

    /// Mines not yet accounted for by a flag or an explosion. Feeds the
    /// optional global clue.
    pub fn remaining_mine_budget(&self) -> u32 {
        let accounted = self
            .cells
            .values()
            .filter(|c| matches!(c, Cell::FlaggedMine | Cell::Exploded))
            .count() as u32;
        self.mine_count().saturating_sub(accounted)
    }

    fn adjacent_mines(&self, pos: Position) -> u8 {
        pos.neighbors()
            .filter(|p| p.in_bounds(self.dim) && self.mines.contains(p))
            .count() as u8
    }

    /// Reveals a hidden cell, returning its new state: `Exploded` if it was
    /// a mine, otherwise `Revealed(n)` with its adjacent-mine clue.
    ///
    /// Revealing is single-cell: a `0` clue does not cascade here, the
    /// inference loop propagates it on the next pass. Querying a
    /// non-hidden or out-of-bounds cell fails without mutating anything.
    pub fn reveal(&mut self, pos: Position) -> Result<Cell, GameError> {
        match self.cell(pos)? {
            Cell::Hidden => {}
            _ => return Err(GameError::NotHidden(pos)),
        }

        let state = if self.mines.contains(&pos) {
            Cell::Exploded
        } else {
            Cell::Revealed(self.adjacent_mines(pos))
        };
        self.cells.insert(pos, state);
        Ok(state)
    }

    /// Marks a hidden cell as a deduced mine without revealing it.
    pub fn flag_as_mine(&mut self, pos: Position) -> Result<(), GameError> {
        match self.cell(pos)? {
            Cell::Hidden => {
                self.cells.insert(pos, Cell::FlaggedMine);
                Ok(())
            }
            _ => Err(GameError::NotHidden(pos)),
        }
    }

    /// True once no hidden cell remains.
    pub fn is_complete(&self) -> bool {
        !self.cells.values().any(|c| matches!(c, Cell::Hidden))
    }

    /// Fraction of mines correctly flagged, in `[0, 1]`. A board with no
    /// mines scores 1: there was nothing to miss.
    pub fn score(&self) -> f64 {
        if self.mines.is_empty() {
            return 1.0;
        }
        let flagged = self
            .mines
            .iter()
            .filter(|p| matches!(self.cells.get(p), Some(Cell::FlaggedMine)))
            .count();
        flagged as f64 / self.mines.len() as f64
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn mine_positions(&self) -> &HashSet<Position> {
        &self.mines
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.dim as i32 {
            let row = (0..self.dim as i32)
                .map(|x| match self.cells[&Position::new(x, y)] {
                    Cell::Hidden => "□".to_string(),
                    Cell::FlaggedMine => "⚑".to_string(),
                    Cell::Revealed(0) => "·".to_string(),
                    Cell::Revealed(n) => n.to_string(),
                    Cell::Exploded => "*".to_string(),
                })
                .join(" ");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
