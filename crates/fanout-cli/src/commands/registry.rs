use fanout_engine::{Build, PrintMode};

use super::run_common::{BuildArgs, build_or_exit, exit_if_failed, to_json};

pub struct RegistryArgs {
    pub build: BuildArgs,
    pub name: Option<String>,
}

pub fn run(args: RegistryArgs) {
    let build = build_or_exit(&args.build);
    match render(&build, args.name.as_deref(), args.build.json) {
        Ok(out) => print!("{}", out),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
    exit_if_failed(&build);
}

pub fn render(build: &Build, name: Option<&str>, json: bool) -> Result<String, String> {
    let lists = build.registries().snapshot();
    if let Some(name) = name
        && !lists.contains_key(name)
    {
        let known: Vec<&str> = lists.keys().map(String::as_str).collect();
        return Err(format!(
            "unknown registry `{name}` (known: {})",
            known.join(", ")
        ));
    }

    if !json {
        return Ok(build
            .printer()
            .mode(PrintMode::Registries)
            .registry(name)
            .dump());
    }

    match name {
        Some(name) => Ok(to_json(&lists[name])),
        None => Ok(to_json(&lists)),
    }
}
