use super::clue::{Clue, Info};
use crate::{Position, SolverError};
use itertools::Itertools;
use ndarray::Array2;

/// The combined constraint system for one inference pass: one row per
/// clue, one column per referenced hidden cell, plus the augmented
/// column. All arithmetic is exact over `i64`; coefficients and
/// constants are small, and inexact arithmetic would corrupt the
/// equality tests the deductions depend on.
#[derive(Debug)]
pub(super) struct LinearSystem {
    /// `rows x (vars + 1)` augmented matrix.
    matrix: Array2<i64>,
    /// Column index -> board position, in first-occurrence order.
    variables: Vec<Position>,
}

impl LinearSystem {
    /// Builds the pruned system. Columns exist only for cells referenced
    /// by at least one clue, so the matrix is bounded by the clue
    /// frontier rather than the board area. Returns `None` when there is
    /// nothing to solve.
    pub(super) fn from_clues(clues: &[Clue]) -> Option<Self> {
        let variables: Vec<Position> = clues
            .iter()
            .flat_map(|c| c.cells().iter().copied())
            .unique()
            .collect();
        if clues.is_empty() || variables.is_empty() {
            return None;
        }

        let column: std::collections::HashMap<Position, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, i))
            .collect();

        let mut matrix = Array2::zeros((clues.len(), variables.len() + 1));
        for (row, clue) in clues.iter().enumerate() {
            for pos in clue.cells() {
                matrix[[row, column[pos]]] = 1;
            }
            matrix[[row, variables.len()]] = clue.mines() as i64;
        }

        Some(Self { matrix, variables })
    }

    /// Reduces to row-echelon form by integer cross-multiplication,
    /// eliminating above and below each pivot. Each touched row is
    /// divided by its gcd and sign-normalized so entries stay small and
    /// the 0/1 patterns the deduction step looks for survive.
    pub(super) fn reduce(&mut self) {
        let rows = self.matrix.nrows();
        let vars = self.variables.len();

        let mut pivot_row = 0;
        for col in 0..vars {
            if pivot_row == rows {
                break;
            }
            let Some(src) = (pivot_row..rows).find(|&r| self.matrix[[r, col]] != 0) else {
                continue;
            };
            if src != pivot_row {
                for j in 0..=vars {
                    self.matrix.swap([src, j], [pivot_row, j]);
                }
            }

            let pivot = self.matrix[[pivot_row, col]];
            for r in 0..rows {
                if r == pivot_row || self.matrix[[r, col]] == 0 {
                    continue;
                }
                let factor = self.matrix[[r, col]];
                for j in 0..=vars {
                    self.matrix[[r, j]] =
                        pivot * self.matrix[[r, j]] - factor * self.matrix[[pivot_row, j]];
                }
                self.normalize_row(r);
            }

            self.normalize_row(pivot_row);
            pivot_row += 1;
        }
    }

    fn normalize_row(&mut self, row: usize) {
        let vars = self.variables.len();
        let mut g = 0;
        for j in 0..=vars {
            g = gcd(g, self.matrix[[row, j]].abs());
        }
        if g > 1 {
            for j in 0..=vars {
                self.matrix[[row, j]] /= g;
            }
        }

        let lead = (0..vars)
            .map(|j| self.matrix[[row, j]])
            .find(|&v| v != 0)
            .unwrap_or(self.matrix[[row, vars]]);
        if lead < 0 {
            for j in 0..=vars {
                self.matrix[[row, j]] = -self.matrix[[row, j]];
            }
        }
    }

    /// Reads deductions off the reduced rows.
    ///
    /// A row with no variables left but a nonzero constant, or a
    /// unit-coefficient row whose constant cannot be met by binary
    /// variables, is an inconsistency and fatal. A row with a negative
    /// coefficient encodes a clue combination with no single-cell
    /// reading and is skipped. Otherwise the direct-solve cases apply:
    /// constant zero means every referenced cell is safe, and a constant
    /// equal to the coefficient sum is only reachable with every cell a
    /// mine (for unit coefficients that sum is the cell count, with
    /// larger coefficients folded in as `c - 1` extra contributions).
    pub(super) fn deduce(&self) -> Result<Info, SolverError> {
        let mut info = Info::default();
        let vars = self.variables.len();

        for row in self.matrix.rows() {
            let nonzero: Vec<(usize, i64)> = (0..vars)
                .filter_map(|j| (row[j] != 0).then(|| (j, row[j])))
                .collect();
            let constant = row[vars];

            if nonzero.is_empty() {
                if constant != 0 {
                    return Err(SolverError::Infeasible);
                }
                continue;
            }
            if nonzero.iter().any(|&(_, c)| c < 0) {
                continue;
            }

            let count = nonzero.len() as i64;
            let folded: i64 = nonzero.iter().map(|&(_, c)| c - 1).sum();
            let all_units = folded == 0;

            if constant == 0 {
                for &(j, _) in &nonzero {
                    info.mark_safe(self.variables[j])?;
                }
            } else if constant - folded == count {
                for &(j, _) in &nonzero {
                    info.mark_mine(self.variables[j])?;
                }
            } else if all_units && (constant < 0 || constant > count) {
                return Err(SolverError::Infeasible);
            }
        }

        Ok(info)
    }

    /// Ranks undetermined cells by how many reduced constraints still
    /// reference them and recommends the most-constrained one, ties
    /// broken by first occurrence in column order.
    pub(super) fn suggest(&self) -> Option<Position> {
        let vars = self.variables.len();
        let references = |j: usize| self.matrix.column(j).iter().filter(|&&v| v != 0).count();

        (0..vars)
            .map(|j| (j, references(j)))
            .filter(|&(_, n)| n > 0)
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(j, _)| self.variables[j])
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Full linear-system solving: build, reduce, deduce. The per-clue
/// deductions are folded in as well — the unreduced rows are part of the
/// system, and reduction can rotate them out of single-row-readable form
/// — so this strategy always finds at least what direct solving finds.
pub(super) fn solve(clues: &[Clue]) -> Result<Info, SolverError> {
    let mut info = super::direct::solve(clues)?;
    if let Some(mut system) = LinearSystem::from_clues(clues) {
        system.reduce();
        info.merge(&system.deduce()?)?;
    }
    Ok(info)
}

/// The next-cell heuristic over the reduced system. `None` when no clue
/// references any cell, in which case the caller falls back to an
/// unconstrained random guess.
pub(super) fn suggest_guess(clues: &[Clue]) -> Option<Position> {
    let mut system = LinearSystem::from_clues(clues)?;
    system.reduce();
    system.suggest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn clue(mines: i32, coords: &[(i32, i32)]) -> Clue {
        let cells: BTreeSet<Position> =
            coords.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Clue::new(mines, cells).unwrap()
    }

    #[test]
    fn test_overlapping_clues_resolve_the_difference_cell_safe() {
        // Exactly 1 of {a, b, c} and exactly 1 of {a, b}: direct solving
        // sees nothing, elimination isolates c = 0.
        let clues = [clue(1, &[(0, 0), (1, 0), (2, 0)]), clue(1, &[(0, 0), (1, 0)])];

        assert!(super::super::direct::solve(&clues).unwrap().is_empty());

        let info = solve(&clues).unwrap();
        assert!(info.safe().contains(&Position::new(2, 0)));
        assert!(!info.mines().contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_overlapping_clues_resolve_the_difference_cell_mine() {
        // Exactly 2 of {a, b, c} and exactly 1 of {a, b}: c = 1.
        let clues = [clue(2, &[(0, 0), (1, 0), (2, 0)]), clue(1, &[(0, 0), (1, 0)])];

        assert!(super::super::direct::solve(&clues).unwrap().is_empty());

        let info = solve(&clues).unwrap();
        assert!(info.mines().contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_subsumes_direct_deductions() {
        let clues = [
            clue(0, &[(0, 0), (1, 0)]),
            clue(2, &[(0, 1), (1, 1)]),
            clue(1, &[(1, 0), (0, 1), (2, 2)]),
        ];

        let direct = super::super::direct::solve(&clues).unwrap();
        let eliminated = solve(&clues).unwrap();

        for pos in direct.mines() {
            assert!(eliminated.mines().contains(pos));
        }
        for pos in direct.safe() {
            assert!(eliminated.safe().contains(pos));
        }
    }

    #[test]
    fn test_inconsistent_system_is_fatal() {
        let clues = [clue(0, &[(0, 0), (1, 0)]), clue(2, &[(0, 0), (1, 0)])];
        assert!(solve(&clues).is_err());
    }

    #[test]
    fn test_degenerate_row_is_fatal_after_reduction() {
        // The rows only conflict once combined: subtracting them leaves
        // an empty row with a nonzero constant.
        let clues = [
            clue(1, &[(0, 0), (1, 0), (2, 0)]),
            clue(1, &[(0, 0), (1, 0)]),
            clue(1, &[(2, 0)]),
        ];
        // Direct solving happily flags (2, 0) from the third clue.
        assert!(!super::super::direct::solve(&clues).unwrap().is_empty());
        // The combined system is unsatisfiable and must say so.
        assert!(solve(&clues).is_err());
    }

    #[test]
    fn test_underdetermined_system_yields_nothing() {
        let clues = [clue(1, &[(0, 0), (1, 0)]), clue(1, &[(1, 0), (2, 0)])];
        assert!(solve(&clues).unwrap().is_empty());
    }

    #[test]
    fn test_no_clues_no_deductions() {
        assert!(solve(&[]).unwrap().is_empty());
        assert_eq!(suggest_guess(&[]), None);
    }

    #[test]
    fn test_suggest_prefers_most_referenced_cell() {
        // Reduced system: x0 - x2 = 0 and x1 + x2 = 1, so (2, 0) is the
        // column the most remaining constraints touch.
        let clues = [clue(1, &[(0, 0), (1, 0)]), clue(1, &[(1, 0), (2, 0)])];
        assert_eq!(suggest_guess(&clues), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_suggest_tie_breaks_on_first_occurrence() {
        let clues = [clue(1, &[(3, 0), (1, 0), (2, 0)])];
        // BTreeSet ordering puts (1, 0) first among the equally-ranked.
        assert_eq!(suggest_guess(&clues), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_global_clue_folds_into_the_same_pass() {
        // Frontier clue: 1 of {a, b}. Global clue: 1 mine among {a, b, c}.
        // Subtracting them proves c safe; neither alone determines it.
        let clues = [
            clue(1, &[(0, 0), (1, 0)]),
            clue(1, &[(0, 0), (1, 0), (2, 2)]),
        ];

        let info = solve(&clues).unwrap();
        assert!(info.safe().contains(&Position::new(2, 2)));
    }
}
