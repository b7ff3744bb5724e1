#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Parsers for the two puzzle input files.
//!
//! A structure file describes the grid, one row per line, with `_` marking
//! an open cell and any other character a blocked one. A word-list file
//! holds one candidate word per line; case and duplicates are normalized
//! away by [`WordList`].
//!
//! Rows of differing width are rejected outright — a ragged structure is a
//! malformed input, not a puzzle with implicit blocked padding.

use crate::crossword::grid::{Grid, MalformedGridError};
use crate::crossword::words::WordList;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors loading puzzle input files.
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Grid(#[from] MalformedGridError),
}

/// Parses structure text into a [`Grid`]. `_` is open, anything else
/// blocked.
///
/// # Errors
///
/// [`MalformedGridError`] on an empty or ragged structure.
pub fn parse_structure(text: &str) -> Result<Grid, MalformedGridError> {
    let rows = text
        .lines()
        .map(|line| line.chars().map(|c| c == '_').collect())
        .collect();
    Grid::new(rows)
}

/// Reads and parses a structure file.
///
/// # Errors
///
/// I/O failures and malformed structures, as [`PuzzleError`].
pub fn load_structure(path: &Path) -> Result<Grid, PuzzleError> {
    Ok(parse_structure(&fs::read_to_string(path)?)?)
}

/// Reads a word-list file, one word per line.
///
/// # Errors
///
/// I/O failures as [`PuzzleError`]. An empty word list is not an error;
/// it just makes every puzzle with slots unsolvable.
pub fn load_words(path: &Path) -> Result<WordList, PuzzleError> {
    Ok(WordList::new(fs::read_to_string(path)?.lines()))
}
