//! Link order invariants.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::fmt::Debug;

pub(super) fn missing_memo_entry<A: Debug>(artifact: &A) -> ! {
    panic!(
        "order_deps: {artifact:?} has no transitive entry \
         (dependencies must be walked before their dependents)"
    )
}
