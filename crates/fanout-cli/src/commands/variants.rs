use fanout_engine::{Build, PrintMode};
use serde::Serialize;

use super::run_common::{BuildArgs, build_or_exit, exit_if_failed, to_json};

pub struct VariantsArgs {
    pub build: BuildArgs,
    pub module: Option<String>,
}

#[derive(Serialize)]
struct ModuleEntry<'b> {
    name: &'b str,
    kind: &'static str,
    failed: bool,
    variants: Vec<VariantEntry>,
}

#[derive(Serialize)]
struct VariantEntry {
    name: String,
    hidden: bool,
}

pub fn run(args: VariantsArgs) {
    let build = build_or_exit(&args.build);
    print!("{}", render(&build, args.module.as_deref(), args.build.json));
    exit_if_failed(&build);
}

pub fn render(build: &Build, module: Option<&str>, json: bool) -> String {
    if !json {
        return build
            .printer()
            .mode(PrintMode::Variants)
            .module(module)
            .dump();
    }

    let entries: Vec<ModuleEntry<'_>> = build
        .graph()
        .modules()
        .filter(|m| module.is_none_or(|name| name == m.name()))
        .map(|m| ModuleEntry {
            name: m.name(),
            kind: m.kind_name(),
            failed: m.is_failed(),
            variants: m
                .variants()
                .iter()
                .map(|v| VariantEntry {
                    name: v.name(),
                    hidden: v.is_hidden(),
                })
                .collect(),
        })
        .collect();
    to_json(&entries)
}
