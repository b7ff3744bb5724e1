#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::problem::VarId;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// The candidate sets still considered possible for each variable.
///
/// Domains only ever shrink: node consistency filters them once at
/// construction, and AC-3 prunes them further. The search reads but never
/// mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainStore<V: Eq + Hash> {
    domains: Vec<FxHashSet<V>>,
}

impl<V: Copy + Eq + Hash + Ord> DomainStore<V> {
    #[must_use]
    pub fn new(domains: Vec<FxHashSet<V>>) -> Self {
        Self { domains }
    }

    /// Builds a store by seeding each variable's domain in turn.
    pub fn from_fn(num_vars: usize, f: impl FnMut(VarId) -> FxHashSet<V>) -> Self {
        Self {
            domains: (0..num_vars).map(f).collect(),
        }
    }

    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn domain(&self, x: VarId) -> &FxHashSet<V> {
        &self.domains[x]
    }

    #[must_use]
    pub fn size(&self, x: VarId) -> usize {
        self.domains[x].len()
    }

    #[must_use]
    pub fn is_empty(&self, x: VarId) -> bool {
        self.domains[x].is_empty()
    }

    #[must_use]
    pub fn contains(&self, x: VarId, v: V) -> bool {
        self.domains[x].contains(&v)
    }

    /// The candidates for `x` in ascending `Ord` order. Hash-set iteration
    /// order never leaks into solver behavior; every ordered walk goes
    /// through this.
    #[must_use]
    pub fn sorted(&self, x: VarId) -> Vec<V> {
        self.domains[x].iter().copied().sorted().collect()
    }

    /// Total candidate count across all variables.
    #[must_use]
    pub fn total_candidates(&self) -> usize {
        self.domains.iter().map(FxHashSet::len).sum()
    }

    /// Removes from `x`'s domain every value with no compatible partner in
    /// `y`'s domain. Returns whether anything was removed.
    pub fn revise<F>(&mut self, x: VarId, y: VarId, mut compatible: F) -> bool
    where
        F: FnMut(V, V) -> bool,
    {
        let before = self.domains[x].len();
        let dx = std::mem::take(&mut self.domains[x]);
        let kept: FxHashSet<V> = {
            let dy = &self.domains[y];
            dx.into_iter()
                .filter(|&vx| dy.iter().any(|&vy| compatible(vx, vy)))
                .collect()
        };
        let revised = kept.len() != before;
        self.domains[x] = kept;
        revised
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(domains: Vec<Vec<u32>>) -> DomainStore<u32> {
        DomainStore::new(domains.into_iter().map(|d| d.into_iter().collect()).collect())
    }

    #[test]
    fn test_revise_removes_unsupported_values() {
        let mut domains = store(vec![vec![1, 2, 3], vec![2]]);

        // Keep values of x strictly below some value of y.
        let revised = domains.revise(0, 1, |vx, vy| vx < vy);

        assert!(revised);
        assert_eq!(domains.sorted(0), vec![1]);
        assert_eq!(domains.sorted(1), vec![2]);
    }

    #[test]
    fn test_revise_reports_no_change() {
        let mut domains = store(vec![vec![1, 2], vec![5]]);

        let revised = domains.revise(0, 1, |vx, vy| vx < vy);

        assert!(!revised);
        assert_eq!(domains.sorted(0), vec![1, 2]);
    }

    #[test]
    fn test_revise_can_empty_a_domain() {
        let mut domains = store(vec![vec![5, 6], vec![1]]);

        let revised = domains.revise(0, 1, |vx, vy| vx < vy);

        assert!(revised);
        assert!(domains.is_empty(0));
    }

    #[test]
    fn test_sorted_is_ascending() {
        let domains = store(vec![vec![3, 1, 2]]);
        assert_eq!(domains.sorted(0), vec![1, 2, 3]);
    }

    #[test]
    fn test_total_candidates() {
        let domains = store(vec![vec![1, 2], vec![7], vec![]]);
        assert_eq!(domains.total_candidates(), 3);
    }
}
