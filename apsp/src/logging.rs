//! Tracing subscriber setup for the CLI. The library itself only emits events.
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stderr subscriber. `RUST_LOG`, then `APSP_LOG`, override the level chosen
/// from the flags: `log_level` if given, else `debug` when verbose, else `warn`.
pub fn init_tracing(verbose: bool, log_level: Option<&str>, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("APSP_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr).with_ansi(false))
            .try_init()?;
    }
    Ok(())
}

/// A bare level applies to this crate only; anything with `=` or `,` is passed through.
fn directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') { level.to_string() } else { format!("apsp={level}") }
}
