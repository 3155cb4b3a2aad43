pub mod check;
pub mod deps;
pub mod link_order;
pub mod loader;
pub mod registry;
pub mod run_common;
pub mod variants;

#[cfg(test)]
mod commands_tests;
#[cfg(test)]
mod loader_tests;
