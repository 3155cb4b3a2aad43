use fanout_engine::{Build, PrintMode, VariantOutput};

use super::run_common::{BuildArgs, build_or_exit, exit_if_failed, to_json};

pub struct DepsArgs {
    pub build: BuildArgs,
    pub module: Option<String>,
}

pub fn run(args: DepsArgs) {
    let build = build_or_exit(&args.build);
    print!("{}", render(&build, args.module.as_deref(), args.build.json));
    exit_if_failed(&build);
}

pub fn render(build: &Build, module: Option<&str>, json: bool) -> String {
    if !json {
        return build.printer().mode(PrintMode::Deps).module(module).dump();
    }

    let outputs: Vec<&VariantOutput> = build
        .outputs()
        .iter()
        .filter(|o| module.is_none_or(|name| name == o.module))
        .collect();
    to_json(&outputs)
}
