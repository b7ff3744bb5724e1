#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod grid;
pub mod parse;
pub mod render;
pub mod solver;
pub mod words;
