//! Process-wide log setup.
//!
//! Library code only talks to the `tracing` facade; the subscriber is
//! installed once here, at process start. Logs go to stderr so stdout stays
//! reserved for the JSON result.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
///
/// Dependencies stay at `warn`; the validator crates log at `info`, `debug`
/// (`-v`) or `trace` (`-vv` and above).
#[must_use]
pub fn default_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,scene_validator={level},scene_validator_cli={level}")
}

/// Install the global subscriber. `RUST_LOG`, when set, overrides `verbose`.
///
/// Calling it twice is harmless: the second subscriber is ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
