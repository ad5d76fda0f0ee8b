//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Square};
use tracing::instrument;

/// The 8 lines of the board as row-major index triples.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

fn line_is(board: &Board, line: &[usize; 3], mark: Mark) -> bool {
    line.iter()
        .all(|&i| board.get(i) == Some(Square::Occupied(mark)))
}

/// Returns true if any line is made entirely of `mark`.
#[instrument(skip(board))]
pub fn winning_line_for(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|line| line_is(board, line, mark))
}

/// Returns true if a line passing through `index` is made entirely of `mark`.
///
/// Only lines through the last placed square can have been completed by it.
#[instrument(skip(board))]
pub fn completes_line(board: &Board, index: usize, mark: Mark) -> bool {
    LINES
        .iter()
        .filter(|line| line.contains(&index))
        .any(|line| line_is(board, line, mark))
}

/// Returns the mark that owns a completed line, if any.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|mark| winning_line_for(board, *mark))
}
