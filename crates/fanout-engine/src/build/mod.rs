//! Staged build facade.
//!
//! Stages: load → mutate → resolve. Each stage owns the graph and passes
//! it on. Diagnostics accumulate on the modules; use `is_valid()` on the
//! resolved build to check if any stage produced errors.

mod dump;
mod printer;
mod stages;

#[cfg(test)]
mod test_utils;

pub use printer::{BuildPrinter, PrintMode};
pub use stages::{Build, BuildBuilder, BuildLoaded, BuildMutated, BuildResolved};
