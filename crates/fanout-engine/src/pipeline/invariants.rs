//! Pipeline invariant violations. These are bugs in a pass, not in the
//! declarations being processed.

#![cfg_attr(coverage_nightly, coverage(off))]

pub(super) fn fanned_out_twice(module: &str, pass: &str) -> ! {
    panic!("create_variations: module `{module}` fanned out twice in pass `{pass}`")
}

pub(super) fn empty_fan_out(module: &str, pass: &str) -> ! {
    panic!("create_variations: empty name list for module `{module}` in pass `{pass}`")
}

pub(super) fn registry_without_pass(list: &str) -> ! {
    panic!("Pipeline: registry `{list}` declared before any pass")
}

pub(super) fn sealed_append(list: &str, name: &str) -> ! {
    panic!("Registries: append of `{name}` to sealed list `{list}`")
}

pub(super) fn undeclared_registry(list: &str) -> ! {
    panic!("Registries: list `{list}` was never declared by a pass")
}

pub(super) fn visited_without_kind(module: &str, pass: &str) -> ! {
    panic!("Pipeline: module `{module}` has variants but no type in pass `{pass}`")
}
