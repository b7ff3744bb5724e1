#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The crossword solver: maps the puzzle onto the generic CSP core.
//!
//! Slots are the variables, interned word ids the values, and the crossing
//! offsets recorded by the grid define the compatibility predicate. Solving
//! is the pipeline of the three core stages:
//!
//! 1. **Node consistency** — each slot's domain is seeded with exactly the
//!    words whose length matches the slot's length.
//! 2. **AC-3** — crossing constraints are propagated to a fixpoint. If a
//!    domain empties here the puzzle is unsolvable and the search never
//!    runs.
//! 3. **Backtracking search** — slots are assigned one at a time under
//!    MRV/degree/LCV ordering until the fill is complete or every branch is
//!    exhausted.
//!
//! Unsolvable puzzles are a normal outcome ([`Solution::NoSolution`]),
//! never an error; no partial fill is ever returned.

use crate::csp::ac3::enforce_arc_consistency;
use crate::csp::domains::DomainStore;
use crate::csp::problem::{Problem, VarId};
use crate::csp::search::{Assignment, Backtracker, SearchResult};
use crate::crossword::grid::Grid;
use crate::crossword::words::{WordId, WordList};
use log::debug;
use rustc_hash::FxHashSet;
use std::time::Instant;

/// The crossword puzzle viewed as a binary CSP.
#[derive(Debug, Clone, Copy)]
pub struct CrosswordProblem<'a> {
    grid: &'a Grid,
    words: &'a WordList,
}

impl<'a> CrosswordProblem<'a> {
    #[must_use]
    pub const fn new(grid: &'a Grid, words: &'a WordList) -> Self {
        Self { grid, words }
    }

    /// Node-consistent initial domains: every word whose length equals the
    /// slot's length. A slot with no length match legitimately starts
    /// empty; the puzzle is then unsolvable, which is not an error.
    #[must_use]
    pub fn initial_domains(&self) -> DomainStore<WordId> {
        DomainStore::from_fn(self.grid.num_slots(), |x| {
            self.words
                .of_length(self.grid.slot(x).length)
                .iter()
                .copied()
                .collect()
        })
    }
}

impl Problem for CrosswordProblem<'_> {
    type Value = WordId;

    fn num_variables(&self) -> usize {
        self.grid.num_slots()
    }

    fn neighbors(&self, x: VarId) -> &[VarId] {
        self.grid.neighbors(x)
    }

    fn compatible(&self, x: VarId, vx: WordId, y: VarId, vy: WordId) -> bool {
        self.grid
            .overlap(x, y)
            .is_none_or(|(i, j)| self.words.byte_at(vx, i) == self.words.byte_at(vy, j))
    }

    fn values_distinct(&self) -> bool {
        // A word may not be reused across two slots of the same fill.
        true
    }
}

/// The outcome of solving a puzzle. All-or-nothing: either a complete fill
/// or an explicit "no solution" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// A complete slot-to-word assignment.
    Filled(Assignment<WordId>),
    /// No assignment satisfies all constraints.
    NoSolution,
    /// The deadline expired mid-search.
    Aborted,
}

impl Solution {
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled(_))
    }

    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment<WordId>> {
        match self {
            Self::Filled(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Counters reported after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    pub slots: usize,
    /// Candidate count across all domains after node consistency.
    pub candidates_initial: usize,
    /// Candidate count across all domains after AC-3.
    pub candidates_after_propagation: usize,
    pub decisions: usize,
    pub backtracks: usize,
}

/// Solves one puzzle: seeds node-consistent domains at construction, then
/// runs AC-3 followed by backtracking search on [`CrosswordSolver::solve`].
#[derive(Debug)]
pub struct CrosswordSolver<'a> {
    problem: CrosswordProblem<'a>,
    domains: DomainStore<WordId>,
    deadline: Option<Instant>,
    stats: SolveStats,
}

impl<'a> CrosswordSolver<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid, words: &'a WordList) -> Self {
        let problem = CrosswordProblem::new(grid, words);
        let domains = problem.initial_domains();
        let stats = SolveStats {
            slots: grid.num_slots(),
            candidates_initial: domains.total_candidates(),
            ..SolveStats::default()
        };

        Self {
            problem,
            domains,
            deadline: None,
            stats,
        }
    }

    /// Aborts the search once `deadline` passes, yielding
    /// [`Solution::Aborted`].
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn solve(&mut self) -> Solution {
        if !enforce_arc_consistency(&self.problem, &mut self.domains, None) {
            debug!("propagation emptied a domain; puzzle is unsolvable");
            self.stats.candidates_after_propagation = self.domains.total_candidates();
            return Solution::NoSolution;
        }

        self.stats.candidates_after_propagation = self.domains.total_candidates();
        debug!(
            "propagation kept {} of {} candidates across {} slots",
            self.stats.candidates_after_propagation,
            self.stats.candidates_initial,
            self.stats.slots
        );

        let mut search = Backtracker::new(&self.problem, &self.domains);
        if let Some(deadline) = self.deadline {
            search = search.with_deadline(deadline);
        }

        let result = search.solve();
        self.stats.decisions = search.stats().decisions;
        self.stats.backtracks = search.stats().backtracks;

        match result {
            SearchResult::Solved(assignment) => Solution::Filled(assignment),
            SearchResult::Exhausted => Solution::NoSolution,
            SearchResult::Aborted => Solution::Aborted,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// The current domains: node-consistent after construction, fully
    /// arc-consistent after a successful [`CrosswordSolver::solve`].
    #[must_use]
    pub const fn domains(&self) -> &DomainStore<WordId> {
        &self.domains
    }
}

/// Independently re-checks a fill: complete, every word the right length,
/// every crossing agreeing, no word used twice.
#[must_use]
pub fn verify(grid: &Grid, words: &WordList, assignment: &Assignment<WordId>) -> bool {
    if assignment.len() != grid.num_slots() {
        return false;
    }

    let mut used = FxHashSet::default();
    for (x, w) in assignment.iter() {
        if words.get(w).len() != grid.slot(x).length {
            return false;
        }
        if !used.insert(w) {
            return false;
        }
        for &y in grid.neighbors(x) {
            if let (Some((i, j)), Some(wy)) = (grid.overlap(x, y), assignment.get(y))
                && words.byte_at(w, i) != words.byte_at(wy, j)
            {
                return false;
            }
        }
    }

    true
}
