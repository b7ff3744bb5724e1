#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The problem abstraction the solving core is generic over.
//!
//! A constraint problem is a set of densely numbered variables, a neighbor
//! relation, and a binary compatibility predicate between the values of two
//! neighboring variables. Both the AC-3 engine and the backtracking search
//! consume problems only through this trait, so neither knows what the
//! variables or values actually mean.

use std::fmt::Debug;
use std::hash::Hash;

/// A dense variable identifier, valid in `0..num_variables()`.
pub type VarId = usize;

/// A binary constraint-satisfaction problem.
///
/// The neighbor relation must be symmetric (`y` is a neighbor of `x` iff
/// `x` is a neighbor of `y`) and must not contain self-loops. `compatible`
/// is consulted only for neighboring pairs and must agree with itself under
/// argument swap: `compatible(x, vx, y, vy) == compatible(y, vy, x, vx)`.
pub trait Problem {
    /// The value type candidates are drawn from. `Ord` is required so that
    /// value ordering can break ties deterministically.
    type Value: Copy + Debug + Eq + Hash + Ord;

    /// The number of variables in the problem.
    fn num_variables(&self) -> usize;

    /// The variables sharing a constraint with `x`, excluding `x` itself.
    fn neighbors(&self, x: VarId) -> &[VarId];

    /// Whether assigning `vx` to `x` and `vy` to `y` satisfies the
    /// constraint between the two variables.
    fn compatible(&self, x: VarId, vx: Self::Value, y: VarId, vy: Self::Value) -> bool;

    /// Whether a complete assignment must give every variable a distinct
    /// value. Checked by the search, not by propagation.
    fn values_distinct(&self) -> bool {
        false
    }
}
