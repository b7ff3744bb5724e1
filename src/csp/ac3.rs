#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The AC-3 arc-consistency engine.
//!
//! An arc is an ordered pair of neighboring variables `(x, y)`. The arc is
//! consistent when every value left in `x`'s domain has at least one
//! compatible partner in `y`'s domain. AC-3 maintains a worklist of arcs to
//! (re)check:
//!
//! 1. Pop an arc `(x, y)` and revise it: remove from `domain(x)` every value
//!    with no compatible partner in `domain(y)`.
//! 2. If `domain(x)` becomes empty, the problem is unsatisfiable; report
//!    failure immediately.
//! 3. If the revision removed anything, re-enqueue `(z, x)` for every
//!    neighbor `z` of `x` other than `y`, since `z`'s domain may now be
//!    prunable against the shrunk `domain(x)`.
//! 4. Repeat until the worklist drains, then report success.
//!
//! Each revision strictly shrinks a finite domain, so the worklist is
//! bounded and the loop terminates. The fixpoint reached is independent of
//! the order arcs are processed in.
//!
//! The engine operates purely over variables, domains and the problem's
//! compatibility predicate; it has no knowledge of what the values mean.

use crate::csp::domains::DomainStore;
use crate::csp::problem::{Problem, VarId};
use log::trace;
use std::collections::VecDeque;

/// Every ordered neighbor pair of the problem, both orderings included.
#[must_use]
pub fn initial_arcs<P: Problem>(problem: &P) -> Vec<(VarId, VarId)> {
    (0..problem.num_variables())
        .flat_map(|x| problem.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// Enforces arc consistency over `domains`.
///
/// When `arcs` is `None` the worklist starts with every neighbor pair in
/// both orderings; otherwise only the supplied arcs (plus whatever their
/// revisions re-enqueue) are checked.
///
/// Returns `false` as soon as some domain is emptied, meaning the problem
/// has no solution. Returns `true` once every queued arc is consistent.
/// An unsatisfiable outcome is a normal result, not an error.
pub fn enforce_arc_consistency<P: Problem>(
    problem: &P,
    domains: &mut DomainStore<P::Value>,
    arcs: Option<Vec<(VarId, VarId)>>,
) -> bool {
    let mut queue: VecDeque<(VarId, VarId)> =
        arcs.unwrap_or_else(|| initial_arcs(problem)).into();

    while let Some((x, y)) = queue.pop_front() {
        if !domains.revise(x, y, |vx, vy| problem.compatible(x, vx, y, vy)) {
            continue;
        }

        trace!(
            "revised variable {x} against {y}: {} candidates remain",
            domains.size(x)
        );

        if domains.is_empty(x) {
            return false;
        }

        for &z in problem.neighbors(x) {
            if z != y {
                queue.push_back((z, x));
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    /// A chain `v0 - v1 - ... - vn` where each edge requires the lower-id
    /// variable's value to be strictly less than the higher-id one's.
    struct AscendingChain {
        neighbors: Vec<Vec<VarId>>,
    }

    impl AscendingChain {
        fn new(len: usize) -> Self {
            let neighbors = (0..len)
                .map(|x| {
                    let mut adjacent = Vec::new();
                    if x > 0 {
                        adjacent.push(x - 1);
                    }
                    if x + 1 < len {
                        adjacent.push(x + 1);
                    }
                    adjacent
                })
                .collect();
            Self { neighbors }
        }
    }

    impl Problem for AscendingChain {
        type Value = u8;

        fn num_variables(&self) -> usize {
            self.neighbors.len()
        }

        fn neighbors(&self, x: VarId) -> &[VarId] {
            &self.neighbors[x]
        }

        fn compatible(&self, x: VarId, vx: u8, y: VarId, vy: u8) -> bool {
            if x < y { vx < vy } else { vy < vx }
        }
    }

    fn full_domains(num_vars: usize, values: &[u8]) -> DomainStore<u8> {
        DomainStore::from_fn(num_vars, |_| values.iter().copied().collect::<FxHashSet<_>>())
    }

    #[test]
    fn test_initial_arcs_cover_both_orderings() {
        let problem = AscendingChain::new(3);
        let arcs = initial_arcs(&problem);

        assert!(arcs.contains(&(0, 1)));
        assert!(arcs.contains(&(1, 0)));
        assert!(arcs.contains(&(1, 2)));
        assert!(arcs.contains(&(2, 1)));
        assert_eq!(arcs.len(), 4);
    }

    #[test]
    fn test_prunes_to_supported_values() {
        let problem = AscendingChain::new(3);
        let mut domains = full_domains(3, &[1, 2, 3]);

        assert!(enforce_arc_consistency(&problem, &mut domains, None));

        // The chain forces v0 < v1 < v2, so only one value fits each end.
        assert_eq!(domains.sorted(0), vec![1]);
        assert_eq!(domains.sorted(1), vec![2]);
        assert_eq!(domains.sorted(2), vec![3]);
    }

    #[test]
    fn test_monotonic_shrinkage() {
        let problem = AscendingChain::new(3);
        let mut domains = full_domains(3, &[1, 2, 3, 4]);
        let before = domains.clone();

        assert!(enforce_arc_consistency(&problem, &mut domains, None));

        for x in 0..3 {
            assert!(domains.domain(x).is_subset(before.domain(x)));
        }
    }

    #[test]
    fn test_wipeout_reports_failure() {
        // Two variables, one value each, and the edge demands v0 < v1.
        let problem = AscendingChain::new(2);
        let mut domains = DomainStore::new(vec![
            std::iter::once(5).collect(),
            std::iter::once(1).collect(),
        ]);

        assert!(!enforce_arc_consistency(&problem, &mut domains, None));
    }

    #[test]
    fn test_explicit_arc_list_limits_the_initial_checks() {
        let problem = AscendingChain::new(2);
        let mut domains = full_domains(2, &[1, 2]);

        // Only (0, 1) is queued: v0 loses 2 (nothing in v1 is above it).
        // The reverse arc (1, 0) was never queued and 0 has no other
        // neighbors to re-enqueue it, so v1 keeps both values.
        assert!(enforce_arc_consistency(
            &problem,
            &mut domains,
            Some(vec![(0, 1)])
        ));

        assert_eq!(domains.sorted(0), vec![1]);
        assert_eq!(domains.sorted(1), vec![1, 2]);
    }

    #[test]
    fn test_fixpoint_satisfies_arc_consistency_postcondition() {
        let problem = AscendingChain::new(4);
        let mut domains = full_domains(4, &[1, 2, 3, 4, 5, 6]);

        assert!(enforce_arc_consistency(&problem, &mut domains, None));

        for (x, y) in initial_arcs(&problem) {
            for &vx in domains.domain(x) {
                assert!(
                    domains
                        .domain(y)
                        .iter()
                        .any(|&vy| problem.compatible(x, vx, y, vy)),
                    "value {vx} of variable {x} has no support in {y}"
                );
            }
        }
    }
}
