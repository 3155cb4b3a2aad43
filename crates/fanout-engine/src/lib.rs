//! fanout engine: variant fan-out pipeline and static link order resolver.
//!
//! # Example
//!
//! ```
//! use fanout_engine::Build;
//!
//! let blueprint = r#"{
//!     "modules": [
//!         { "name": "libbase", "type": "cc_library_static" },
//!         { "name": "app", "type": "cc_binary", "static_libs": ["libbase"] }
//!     ]
//! }"#;
//!
//! let build = Build::try_from(blueprint).expect("valid blueprint json");
//! eprintln!("{}", build.diagnostics().render());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod aspects;
pub mod build;
pub mod diagnostics;
pub mod graph;
pub mod mutators;
pub mod pipeline;
pub mod resolve;

pub use build::{
    Build, BuildBuilder, BuildLoaded, BuildMutated, BuildPrinter, BuildResolved, PrintMode,
};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, ErrorClass, Severity};
pub use resolve::{LinkOrder, VariantOutput, order_deps};

/// Errors that stop a build before or after the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Blueprint(#[from] fanout_core::Error),

    #[error("build failed with {} errors", .0.error_count())]
    BuildFailed(Diagnostics),
}

pub type Result<T> = std::result::Result<T, Error>;
