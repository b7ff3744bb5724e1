#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod ac3;
pub mod domains;
pub mod problem;
pub mod search;
