//! Merge-map well-formedness.
//!
//! A merge map binds each reconciled name once. A duplicate means an
//! earlier stage emitted two phis for one variable, and later passes would
//! silently pick whichever they saw last.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tern_ir::visitor::walk_merge;
use tern_ir::{Function, IrArena, Name, PhiRange, VisitResult, Visitor};

/// A malformed merge map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeProblem {
    /// `name` is bound by entries `first` and `second` of `merge`.
    DuplicateName {
        name: Name,
        first: usize,
        second: usize,
        merge: PhiRange,
    },
}

/// Check every merge map of `function`.
///
/// Loop merge maps are checked once, at the backedge. Structural faults in
/// the body (unrecognized or dangling nodes) are returned as errors.
pub fn check_merges(function: &Function, arena: &IrArena) -> VisitResult<Vec<MergeProblem>> {
    let mut checker = MergeChecker::default();
    checker.visit_fn(function, arena)?;

    tracing::debug!(
        function = function.name.raw(),
        maps = checker.maps_checked,
        problems = checker.problems.len(),
        "merge maps checked"
    );
    Ok(checker.problems)
}

#[derive(Default)]
struct MergeChecker {
    problems: Vec<MergeProblem>,
    maps_checked: usize,
}

impl MergeChecker {
    fn check(&mut self, merge: PhiRange, arena: &IrArena) -> VisitResult<()> {
        self.maps_checked += 1;

        let mut first_seen: FxHashMap<Name, usize> = FxHashMap::default();
        for (position, phi) in arena.merge(merge)?.iter().enumerate() {
            match first_seen.entry(phi.name) {
                Entry::Occupied(entry) => {
                    tracing::debug!(?merge, name = phi.name.raw(), "duplicate merge entry");
                    self.problems.push(MergeProblem::DuplicateName {
                        name: phi.name,
                        first: *entry.get(),
                        second: position,
                        merge,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(position);
                }
            }
        }
        Ok(())
    }
}

impl<'ir> Visitor<'ir> for MergeChecker {
    type Output = ();

    // `If` joins and loop backedges both arrive here; loop entry does not.
    fn visit_merge(&mut self, merge: PhiRange, arena: &'ir IrArena) -> VisitResult<()> {
        self.check(merge, arena)?;
        walk_merge(self, merge, arena)
    }
}
