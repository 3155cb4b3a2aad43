use fanout_engine::Build;
use serde::Serialize;

use super::run_common::{BuildArgs, build, to_json};

pub struct CheckArgs {
    pub build: BuildArgs,
    pub strict: bool,
}

#[derive(Serialize)]
struct Summary {
    valid: bool,
    modules: usize,
    variants: usize,
    errors: usize,
    warnings: usize,
}

pub fn run(args: CheckArgs) {
    let build = build(&args.build).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let diagnostics = build.diagnostics();
    let valid = is_valid(&build, args.strict);

    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(args.build.color));
    }
    if args.build.json {
        print!("{}", render_json(&build, valid));
    }

    if !valid {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

pub fn is_valid(build: &Build, strict: bool) -> bool {
    if strict {
        build.is_valid() && !build.diagnostics().has_warnings()
    } else {
        build.is_valid()
    }
}

pub fn render_json(build: &Build, valid: bool) -> String {
    let diagnostics = build.diagnostics();
    let graph = build.graph();
    to_json(&Summary {
        valid,
        modules: graph.len(),
        variants: graph.modules().map(|m| m.variants().len()).sum(),
        errors: diagnostics.error_count(),
        warnings: diagnostics.warning_count(),
    })
}
