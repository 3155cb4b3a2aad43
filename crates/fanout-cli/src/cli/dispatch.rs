//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror the command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the fields each command uses
//! - `Into<*Args>` impls bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use fanout_core::Arch;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::deps::DepsArgs;
use crate::commands::link_order::LinkOrderArgs;
use crate::commands::registry::RegistryArgs;
use crate::commands::run_common::BuildArgs;
use crate::commands::variants::VariantsArgs;

/// Flags shared by every command.
pub struct BuildParams {
    pub blueprint: PathBuf,
    pub jobs: Option<usize>,
    pub arches: Vec<Arch>,
    pub json: bool,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let arches = m
            .get_many::<String>("arch")
            .into_iter()
            .flatten()
            .filter_map(|name| Arch::parse(name))
            .collect();

        Self {
            blueprint: m
                .get_one::<PathBuf>("blueprint")
                .cloned()
                .unwrap_or_default(),
            jobs: m.get_one::<usize>("jobs").copied(),
            arches,
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            blueprint: p.blueprint,
            jobs: p.jobs,
            arches: p.arches,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub build: BuildParams,
    pub strict: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            build: p.build.into(),
            strict: p.strict,
        }
    }
}

pub struct VariantsParams {
    pub build: BuildParams,
    pub module: Option<String>,
}

impl VariantsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            module: m.get_one::<String>("module").cloned(),
        }
    }
}

impl From<VariantsParams> for VariantsArgs {
    fn from(p: VariantsParams) -> Self {
        Self {
            build: p.build.into(),
            module: p.module,
        }
    }
}

pub struct DepsParams {
    pub build: BuildParams,
    pub module: Option<String>,
}

impl DepsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            module: m.get_one::<String>("module").cloned(),
        }
    }
}

impl From<DepsParams> for DepsArgs {
    fn from(p: DepsParams) -> Self {
        Self {
            build: p.build.into(),
            module: p.module,
        }
    }
}

pub struct LinkOrderParams {
    pub build: BuildParams,
    pub module: String,
}

impl LinkOrderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            module: m.get_one::<String>("module").cloned().unwrap_or_default(),
        }
    }
}

impl From<LinkOrderParams> for LinkOrderArgs {
    fn from(p: LinkOrderParams) -> Self {
        Self {
            build: p.build.into(),
            module: p.module,
        }
    }
}

pub struct RegistryParams {
    pub build: BuildParams,
    pub name: Option<String>,
}

impl RegistryParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            name: m.get_one::<String>("name").cloned(),
        }
    }
}

impl From<RegistryParams> for RegistryArgs {
    fn from(p: RegistryParams) -> Self {
        Self {
            build: p.build.into(),
            name: p.name,
        }
    }
}

/// `-v` count of a subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
