//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Blueprint file (positional, "-" for stdin).
pub fn blueprint_arg() -> Arg {
    Arg::new("blueprint")
        .value_name("BLUEPRINT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Blueprint JSON file (use \"-\" for stdin)")
}

/// Restrict output to one module (-m/--module).
pub fn module_arg() -> Arg {
    Arg::new("module")
        .short('m')
        .long("module")
        .value_name("NAME")
        .help("Only show this module")
}

/// Registry list to print (positional).
pub fn registry_name_arg() -> Arg {
    Arg::new("name")
        .value_name("NAME")
        .help("Registry list to print (all sealed lists by default)")
}

/// Worker count for parallel passes (-j/--jobs).
pub fn jobs_arg() -> Arg {
    Arg::new("jobs")
        .short('j')
        .long("jobs")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Worker threads for parallel passes (overrides the blueprint config)")
}

/// Target arch (--arch, repeatable).
pub fn arch_arg() -> Arg {
    Arg::new("arch")
        .long("arch")
        .value_name("ARCH")
        .action(ArgAction::Append)
        .value_parser(["arm", "arm64", "x86", "x86_64", "riscv64"])
        .help("Target architecture, primary first (repeatable)")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug, -vvv for trace)")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}
