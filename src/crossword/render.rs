#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::search::Assignment;
use crate::crossword::grid::Grid;
use crate::crossword::words::{WordId, WordList};

/// Places each assigned word's characters at its slot's coordinates.
/// Cells no assigned slot covers stay `None`.
#[must_use]
pub fn letter_grid(
    grid: &Grid,
    words: &WordList,
    assignment: &Assignment<WordId>,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; grid.width()]; grid.height()];

    for (x, w) in assignment.iter() {
        for (k, (row, col)) in grid.slot(x).cells().enumerate() {
            letters[row][col] = Some(char::from(words.byte_at(w, k)));
        }
    }

    letters
}

/// Renders a fill as text: letters on open cells, `█` on blocked ones,
/// spaces on open cells no slot covers.
#[must_use]
pub fn render_assignment(grid: &Grid, words: &WordList, assignment: &Assignment<WordId>) -> String {
    let letters = letter_grid(grid, words, assignment);
    let mut out = String::new();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_open(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push('█');
            }
        }
        out.push('\n');
    }

    out
}
