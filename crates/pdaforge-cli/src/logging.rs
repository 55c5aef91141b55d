//! tracing setup. Logs go to stderr so stdout stays machine-readable.
//!
//! `RUST_LOG` wins over `--log-level` when set. `PDAFORGE_LOG_FORMAT=json`
//! switches to one JSON object per event.

use tracing_subscriber::EnvFilter;

use crate::output;

pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match EnvFilter::try_new(directive) {
        Ok(f) => f,
        Err(e) => {
            output::eprintln_line(&format!("ignoring log filter {directive:?}: {e}"));
            EnvFilter::new("warn")
        }
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let json = std::env::var("PDAFORGE_LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}
