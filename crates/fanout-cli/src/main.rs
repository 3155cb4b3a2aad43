mod cli;
mod commands;
mod logging;

use cli::{
    CheckParams, DepsParams, LinkOrderParams, RegistryParams, VariantsParams, build_cli,
    verbosity,
};

fn main() {
    let matches = build_cli().get_matches();

    if let Some((_, m)) = matches.subcommand() {
        logging::init(verbosity(m));
    }

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("variants", m)) => {
            let params = VariantsParams::from_matches(m);
            commands::variants::run(params.into());
        }
        Some(("deps", m)) => {
            let params = DepsParams::from_matches(m);
            commands::deps::run(params.into());
        }
        Some(("link-order", m)) => {
            let params = LinkOrderParams::from_matches(m);
            commands::link_order::run(params.into());
        }
        Some(("registry", m)) => {
            let params = RegistryParams::from_matches(m);
            commands::registry::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
