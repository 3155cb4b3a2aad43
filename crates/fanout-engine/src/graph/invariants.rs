//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Graph, Module, ModuleId};

impl Graph {
    pub(super) fn ensure_present(&self, id: ModuleId) -> &Module {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .unwrap_or_else(|| {
                panic!(
                    "Graph: module {} is not in the arena \
                     (checked out by a pass worker or never allocated)",
                    id.index()
                )
            })
    }

    pub(super) fn ensure_present_mut(&mut self, id: ModuleId) -> &mut Module {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .unwrap_or_else(|| {
                panic!(
                    "Graph: module {} is not in the arena \
                     (checked out by a pass worker or never allocated)",
                    id.index()
                )
            })
    }
}

pub(super) fn already_checked_out(id: ModuleId) -> ! {
    panic!(
        "Graph: module {} checked out twice (a pass may only visit a module once)",
        id.index()
    )
}

pub(super) fn ensure_vacant(vacant: bool, id: ModuleId) {
    assert!(
        vacant,
        "Graph: restoring module {} into an occupied slot",
        id.index()
    );
}
