use fanout_engine::{Build, LinkOrder, PrintMode};
use serde::Serialize;

use super::run_common::{BuildArgs, build_or_exit, exit_if_failed, to_json};

pub struct LinkOrderArgs {
    pub build: BuildArgs,
    pub module: String,
}

#[derive(Serialize)]
struct Entry<'b> {
    variant: &'b str,
    link_order: Option<&'b LinkOrder>,
    whole_static: &'b [String],
}

pub fn run(args: LinkOrderArgs) {
    let build = build_or_exit(&args.build);
    match render(&build, &args.module, args.build.json) {
        Ok(out) => print!("{}", out),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
    exit_if_failed(&build);
}

pub fn render(build: &Build, module: &str, json: bool) -> Result<String, String> {
    if build.graph().module_by_name(module).is_none() {
        return Err(format!("no module named `{module}`"));
    }

    if !json {
        return Ok(build
            .printer()
            .mode(PrintMode::LinkOrder)
            .module(Some(module))
            .dump());
    }

    let entries: Vec<Entry<'_>> = build
        .outputs_for(module)
        .map(|o| Entry {
            variant: &o.variant,
            link_order: o.link_order.as_ref(),
            whole_static: &o.whole_static,
        })
        .collect();
    Ok(to_json(&entries))
}
