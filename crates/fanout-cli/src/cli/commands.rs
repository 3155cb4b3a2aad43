//! Command builders for the CLI.
//!
//! Every command takes a blueprint plus the shared build flags
//! (`--jobs`, `--arch`, `--json`, `--color`, `-v`).

use clap::Command;

use super::args::*;

fn with_build_args(cmd: Command) -> Command {
    cmd.arg(blueprint_arg())
        .arg(jobs_arg())
        .arg(arch_arg())
        .arg(json_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("fanout")
        .about("Fan out a module graph into build variants and order their link lines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(variants_command())
        .subcommand(deps_command())
        .subcommand(link_order_command())
        .subcommand(registry_command())
}

/// Run the pipeline and report diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Run the pipeline and report diagnostics")
        .after_help(
            r#"EXAMPLES:
  fanout check Blueprint.json
  fanout check Blueprint.json --arch x86_64 --jobs 8
  fanout check - --strict < Blueprint.json"#,
        )
        .arg(strict_arg());

    with_build_args(cmd)
}

/// List modules and their variants.
pub fn variants_command() -> Command {
    let cmd = Command::new("variants")
        .about("List modules and their variants")
        .after_help(
            r#"EXAMPLES:
  fanout variants Blueprint.json
  fanout variants Blueprint.json -m libbase --json"#,
        )
        .arg(module_arg());

    with_build_args(cmd)
}

/// Show resolved dependencies per variant.
pub fn deps_command() -> Command {
    let cmd = Command::new("deps")
        .about("Show resolved dependency artifacts per variant")
        .after_help(
            r#"EXAMPLES:
  fanout deps Blueprint.json
  fanout deps Blueprint.json --module app"#,
        )
        .arg(module_arg());

    with_build_args(cmd)
}

/// Show ordered static link lines of one module.
pub fn link_order_command() -> Command {
    let cmd = Command::new("link-order")
        .about("Show the ordered link line of every variant of a module")
        .after_help(
            r#"EXAMPLES:
  fanout link-order Blueprint.json --module app
  fanout link-order Blueprint.json -m libfoo --json"#,
        )
        .arg(module_arg().required(true));

    with_build_args(cmd)
}

/// Print registry lists.
pub fn registry_command() -> Command {
    let cmd = Command::new("registry")
        .about("Print the name registries filled by the pipeline")
        .after_help(
            r#"EXAMPLES:
  fanout registry Blueprint.json
  fanout registry Blueprint.json vndk_core_libraries"#,
        );

    with_build_args(cmd).arg(registry_name_arg())
}
