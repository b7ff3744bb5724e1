#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate provides a constraint-satisfaction solver for crossword-style
//! fill-in puzzles: given a grid of open and blocked cells plus a word list,
//! it assigns one word to every slot so that every slot length matches and
//! all crossing letters agree.
//!
//! The solving machinery is split from the puzzle domain. The [`csp`] module
//! knows nothing about grids or words; it operates on variables, candidate
//! sets and a binary compatibility predicate. The [`crossword`] module maps
//! the puzzle onto that core and adds the file adapters around it.

/// The `csp` module implements the generic constraint-solving core: the
/// problem abstraction, per-variable domain store, the AC-3 arc-consistency
/// engine and heuristic backtracking search.
pub mod csp;

/// The `crossword` module implements the crossword domain: grid and slot
/// geometry, interned word lists, structure/word-list parsing, text
/// rendering, and the solver tying the domain to the `csp` core.
pub mod crossword;
