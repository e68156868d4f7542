use super::clue::{Clue, Info};
use crate::SolverError;

/// Per-clue counting deductions: a clue whose remaining mine count equals
/// its cell count is all mines; a clue with no remaining mines is all
/// safe. Cheap, so it always runs before elimination.
pub(super) fn solve(clues: &[Clue]) -> Result<Info, SolverError> {
    let mut info = Info::default();

    for clue in clues {
        if clue.mines() == 0 {
            for &pos in clue.cells() {
                info.mark_safe(pos)?;
            }
        } else if clue.mines() as usize == clue.cells().len() {
            for &pos in clue.cells() {
                info.mark_mine(pos)?;
            }
        }
    }

    Ok(info)
}
