//! Log subscriber for the CLI.
//!
//! `FANOUT_LOG` takes an `EnvFilter` directive and wins over `-v`. Without
//! it, the level is `warn`, raised to `info` by `-v` and `debug` by `-vv`
//! (`trace` from `-vvv`). Logs go to stderr so they never mix with command
//! output.

use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "FANOUT_LOG";

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
