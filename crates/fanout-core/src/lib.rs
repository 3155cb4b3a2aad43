#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for fanout.
//!
//! Two layers:
//! - **Declaration layer**: 1:1 mapping to the JSON blueprint handed over by
//!   the upstream declaration loader (`Blueprint`, `ModuleDecl`, `Properties`)
//! - **Variation layer**: the axis/value model shared by every fan-out pass
//!   (`Variation`, `DependencyTag`, `Arch`, `SanitizerKind`)

pub mod colors;
pub mod config;
pub mod decl;
pub mod tag;
pub mod variation;


pub use colors::Colors;
pub use config::{Arch, BuildConfig, Multilib};
pub use decl::{
    Blueprint, ImageProperties, LtoProperties, ModuleDecl, ModuleKind, Properties,
    RejectedDecl, SanitizeProperties, SanitizerKind, TargetProperties, VndkProperties,
};
pub use tag::{DepKind, DependencyTag};
pub use variation::{Variation, axis};

/// Errors raised while reading a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid blueprint: {0}")]
    InvalidBlueprint(#[from] serde_json::Error),
}

/// Parse blueprint JSON into declarations plus the optional config section.
///
/// Only malformed JSON or a bad `config` section fail the whole blueprint.
/// A module entry that cannot be read lands in [`Blueprint::rejected`].
pub fn parse_blueprint(json: &str) -> Result<Blueprint, Error> {
    let raw: decl::RawBlueprint = serde_json::from_str(json)?;
    let mut blueprint = Blueprint {
        config: raw.config,
        ..Blueprint::default()
    };

    for (index, entry) in raw.modules.iter().enumerate() {
        match ModuleDecl::from_value(index, entry) {
            Ok(decl) => blueprint.modules.push(decl),
            Err(mut rejected) => {
                rejected.position = blueprint.modules.len();
                blueprint.rejected.push(rejected);
            }
        }
    }
    Ok(blueprint)
}
