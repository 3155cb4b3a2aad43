//! Shared logic for every command: load, build, report.

use std::path::PathBuf;

use fanout_core::Arch;
use fanout_engine::{Build, BuildBuilder};
use tracing::info;

use super::loader::load_blueprint;

pub struct BuildArgs {
    pub blueprint: PathBuf,
    pub jobs: Option<usize>,
    pub arches: Vec<Arch>,
    pub json: bool,
    pub color: bool,
}

/// Load the blueprint and run every stage. Flags override the blueprint's
/// own `config` section.
pub fn build(args: &BuildArgs) -> Result<Build, String> {
    let text = load_blueprint(&args.blueprint)?;
    let mut builder = BuildBuilder::from_json(&text)
        .map_err(|e| format!("{}: {}", args.blueprint.display(), e))?;

    if let Some(jobs) = args.jobs {
        builder = builder.with_jobs(jobs);
    }
    if !args.arches.is_empty() {
        builder = builder.with_target_arches(args.arches.clone());
    }

    let config = builder.config();
    info!(
        blueprint = %args.blueprint.display(),
        jobs = config.jobs,
        arches = ?config.target_arches,
        "building"
    );
    Ok(builder.load().mutate().resolve())
}

/// Like [`build`], exiting on load failures. Diagnostics go to stderr; a
/// build with failed modules is still returned so healthy modules render.
pub fn build_or_exit(args: &BuildArgs) -> Build {
    let build = build(args).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let diagnostics = build.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(args.color));
    }
    build
}

/// Call once output is written: exits with 1 when any module failed.
pub fn exit_if_failed(build: &Build) {
    if !build.is_valid() {
        std::process::exit(1);
    }
}

pub fn to_json<T: serde::Serialize>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value).expect("JSON serialization never fails");
    out.push('\n');
    out
}
