#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Heuristic backtracking search over propagated domains.
//!
//! Each recursive call is one search node. A node first checks the optional
//! deadline, then either:
//!
//! 1. finds no unassigned variable left, which means the assignment is
//!    complete — terminal success;
//! 2. picks the next variable by **minimum remaining values**, breaking ties
//!    by **maximum degree** and then by smallest variable id, orders that
//!    variable's candidates by **least constraining value** (ties broken by
//!    the value's own ordering, so runs are reproducible), and tries each in
//!    turn: tentatively assign, check consistency against the already
//!    assigned neighbors (and global value distinctness when the problem
//!    demands it), recurse, and undo the assignment before trying the next
//!    candidate;
//! 3. exhausts every candidate — terminal failure for this branch.
//!
//! Exhaustion is the normal "no solution down this branch" outcome, never an
//! error. Domains are pruned once by AC-3 before the search starts and are
//! neither re-pruned nor restored per branch; correctness rests on the
//! consistency check at each tentative assignment, not on domain state.

use crate::csp::domains::DomainStore;
use crate::csp::problem::{Problem, VarId};
use itertools::Itertools;
use log::trace;
use std::cmp::Reverse;
use std::time::Instant;

/// A partial mapping from variables to chosen values.
///
/// `assign`/`unassign` form a strict push/pop discipline: every frame of the
/// search undoes its own tentative assignment on every non-success exit
/// path, so sibling branches never observe each other's choices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment<V> {
    values: Vec<Option<V>>,
    assigned: usize,
}

impl<V: Copy + Eq> Assignment<V> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            values: vec![None; num_vars],
            assigned: 0,
        }
    }

    #[must_use]
    pub fn get(&self, x: VarId) -> Option<V> {
        self.values[x]
    }

    #[must_use]
    pub fn is_assigned(&self, x: VarId) -> bool {
        self.values[x].is_some()
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Whether every variable has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.values.len()
    }

    pub fn assign(&mut self, x: VarId, v: V) {
        debug_assert!(self.values[x].is_none(), "variable {x} already assigned");
        self.values[x] = Some(v);
        self.assigned += 1;
    }

    pub fn unassign(&mut self, x: VarId) {
        debug_assert!(self.values[x].is_some(), "variable {x} not assigned");
        self.values[x] = None;
        self.assigned -= 1;
    }

    /// The assigned `(variable, value)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, V)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(x, v)| v.map(|v| (x, v)))
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Tentative assignments that passed the consistency check.
    pub decisions: usize,
    /// Assignments undone after a branch came back exhausted.
    pub backtracks: usize,
}

/// The outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<V> {
    /// A complete, consistent assignment was found.
    Solved(Assignment<V>),
    /// Every branch was exhausted; the problem has no solution. This is a
    /// normal outcome, not an error.
    Exhausted,
    /// The deadline expired before the search finished.
    Aborted,
}

impl<V> SearchResult<V> {
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The assignment, if one was found.
    #[must_use]
    pub fn solution(self) -> Option<Assignment<V>> {
        match self {
            Self::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Outcome of a single search node, propagated up the recursion.
enum Step {
    Solved,
    Exhausted,
    Aborted,
}

/// Backtracking search over a problem and its (already propagated) domains.
#[derive(Debug)]
pub struct Backtracker<'a, P: Problem> {
    problem: &'a P,
    domains: &'a DomainStore<P::Value>,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a, P: Problem> Backtracker<'a, P> {
    #[must_use]
    pub fn new(problem: &'a P, domains: &'a DomainStore<P::Value>) -> Self {
        Self {
            problem,
            domains,
            deadline: None,
            stats: SearchStats::default(),
        }
    }

    /// Aborts the search once `deadline` passes, yielding
    /// [`SearchResult::Aborted`] instead of an answer.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs the search from an empty assignment.
    pub fn solve(&mut self) -> SearchResult<P::Value> {
        let mut assignment = Assignment::new(self.problem.num_variables());
        match self.backtrack(&mut assignment) {
            Step::Solved => SearchResult::Solved(assignment),
            Step::Exhausted => SearchResult::Exhausted,
            Step::Aborted => SearchResult::Aborted,
        }
    }

    fn backtrack(&mut self, assignment: &mut Assignment<P::Value>) -> Step {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Step::Aborted;
        }

        let Some(var) = self.select_unassigned(assignment) else {
            return Step::Solved;
        };

        for value in self.order_values(var, assignment) {
            if !self.consistent(assignment, var, value) {
                continue;
            }

            trace!("assign variable {var} := {value:?}");
            self.stats.decisions += 1;
            assignment.assign(var, value);

            match self.backtrack(assignment) {
                Step::Solved => return Step::Solved,
                Step::Aborted => {
                    assignment.unassign(var);
                    return Step::Aborted;
                }
                Step::Exhausted => {
                    assignment.unassign(var);
                    self.stats.backtracks += 1;
                }
            }
        }

        Step::Exhausted
    }

    /// Minimum remaining values, ties by maximum degree, ties by smallest
    /// variable id. `None` means the assignment is complete.
    fn select_unassigned(&self, assignment: &Assignment<P::Value>) -> Option<VarId> {
        (0..self.problem.num_variables())
            .filter(|&x| !assignment.is_assigned(x))
            .min_by_key(|&x| {
                (
                    self.domains.size(x),
                    Reverse(self.problem.neighbors(x).len()),
                    x,
                )
            })
    }

    /// The candidates for `x`, least constraining first. Ties sort by the
    /// value itself so repeated runs try candidates in the same order.
    fn order_values(&self, x: VarId, assignment: &Assignment<P::Value>) -> Vec<P::Value> {
        self.domains
            .sorted(x)
            .into_iter()
            .map(|v| (self.eliminated_by(x, v, assignment), v))
            .sorted()
            .map(|(_, v)| v)
            .collect()
    }

    /// How many candidate values assigning `v` to `x` would rule out across
    /// the unassigned neighbors of `x`.
    fn eliminated_by(&self, x: VarId, v: P::Value, assignment: &Assignment<P::Value>) -> usize {
        self.problem
            .neighbors(x)
            .iter()
            .filter(|&&y| !assignment.is_assigned(y))
            .map(|&y| {
                self.domains
                    .domain(y)
                    .iter()
                    .filter(|&&w| !self.problem.compatible(x, v, y, w))
                    .count()
            })
            .sum()
    }

    /// Whether tentatively assigning `v` to `x` keeps the assignment
    /// consistent: the value is unused elsewhere (when the problem requires
    /// distinct values) and agrees with every already-assigned neighbor.
    fn consistent(&self, assignment: &Assignment<P::Value>, x: VarId, v: P::Value) -> bool {
        if self.problem.values_distinct() && assignment.iter().any(|(_, w)| w == v) {
            return false;
        }

        self.problem.neighbors(x).iter().all(|&y| {
            assignment
                .get(y)
                .is_none_or(|w| self.problem.compatible(x, v, y, w))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    /// Graph coloring: neighbors must differ. Small enough to reason about
    /// and entirely unrelated to crosswords.
    struct Coloring {
        neighbors: Vec<Vec<VarId>>,
    }

    impl Coloring {
        fn triangle() -> Self {
            Self {
                neighbors: vec![vec![1, 2], vec![0, 2], vec![0, 1]],
            }
        }

        fn path() -> Self {
            Self {
                neighbors: vec![vec![1], vec![0, 2], vec![1]],
            }
        }
    }

    impl Problem for Coloring {
        type Value = u8;

        fn num_variables(&self) -> usize {
            self.neighbors.len()
        }

        fn neighbors(&self, x: VarId) -> &[VarId] {
            &self.neighbors[x]
        }

        fn compatible(&self, _x: VarId, vx: u8, _y: VarId, vy: u8) -> bool {
            vx != vy
        }
    }

    fn colors(num_vars: usize, palette: &[u8]) -> DomainStore<u8> {
        DomainStore::from_fn(num_vars, |_| {
            palette.iter().copied().collect::<FxHashSet<_>>()
        })
    }

    #[test]
    fn test_triangle_three_colors_is_solved() {
        let problem = Coloring::triangle();
        let domains = colors(3, &[0, 1, 2]);

        let result = Backtracker::new(&problem, &domains).solve();
        let assignment = result.solution().expect("triangle is 3-colorable");

        assert!(assignment.is_complete());
        for x in 0..3 {
            for &y in problem.neighbors(x) {
                assert_ne!(assignment.get(x), assignment.get(y));
            }
        }
    }

    #[test]
    fn test_triangle_two_colors_is_exhausted() {
        let problem = Coloring::triangle();
        let domains = colors(3, &[0, 1]);

        let mut search = Backtracker::new(&problem, &domains);
        assert_eq!(search.solve(), SearchResult::Exhausted);
        assert!(search.stats().backtracks > 0);
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let problem = Coloring::path();
        let domains = DomainStore::new(vec![
            [0u8, 1, 2].into_iter().collect(),
            [0u8, 1].into_iter().collect(),
            [0u8].into_iter().collect(),
        ]);

        let search = Backtracker::new(&problem, &domains);
        let assignment = Assignment::new(3);
        assert_eq!(search.select_unassigned(&assignment), Some(2));
    }

    #[test]
    fn test_degree_breaks_domain_size_ties() {
        let problem = Coloring::path();
        let domains = colors(3, &[0, 1]);

        // Equal domain sizes; the middle variable has two neighbors.
        let search = Backtracker::new(&problem, &domains);
        let assignment = Assignment::new(3);
        assert_eq!(search.select_unassigned(&assignment), Some(1));
    }

    #[test]
    fn test_lcv_tries_least_disruptive_value_first() {
        let problem = Coloring::path();
        // The middle variable shares color 1 with both ends, so picking 1
        // would eliminate two candidates; 0 eliminates none.
        let domains = DomainStore::new(vec![
            [1u8].into_iter().collect(),
            [0u8, 1].into_iter().collect(),
            [1u8].into_iter().collect(),
        ]);

        let search = Backtracker::new(&problem, &domains);
        let assignment = Assignment::new(3);
        assert_eq!(search.order_values(1, &assignment), vec![0, 1]);
    }

    #[test]
    fn test_distinct_values_rules_out_reuse() {
        struct Distinct;
        impl Problem for Distinct {
            type Value = u8;
            fn num_variables(&self) -> usize {
                2
            }
            fn neighbors(&self, _x: VarId) -> &[VarId] {
                &[]
            }
            fn compatible(&self, _x: VarId, _vx: u8, _y: VarId, _vy: u8) -> bool {
                true
            }
            fn values_distinct(&self) -> bool {
                true
            }
        }

        let problem = Distinct;
        let domains = colors(2, &[7]);
        let mut search = Backtracker::new(&problem, &domains);

        // Two disconnected variables but a single shared value: the global
        // distinctness rule makes the problem unsolvable.
        assert_eq!(search.solve(), SearchResult::Exhausted);
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let problem = Coloring::triangle();
        let domains = colors(3, &[0, 1, 2]);

        let mut search =
            Backtracker::new(&problem, &domains).with_deadline(Instant::now());
        assert_eq!(search.solve(), SearchResult::Aborted);
    }

    #[test]
    fn test_assignment_push_pop_discipline() {
        let mut assignment: Assignment<u8> = Assignment::new(2);
        assert!(assignment.is_empty());

        assignment.assign(1, 9);
        assert_eq!(assignment.get(1), Some(9));
        assert_eq!(assignment.len(), 1);
        assert!(!assignment.is_complete());

        assignment.unassign(1);
        assert_eq!(assignment.get(1), None);
        assert!(assignment.is_empty());
    }
}
