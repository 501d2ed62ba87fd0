//! Diagnostic logging setup.
//!
//! Status lines for the operator go to stdout with `println!`; everything
//! routed through `tracing` goes to stderr, filtered by `RUST_LOG`.

use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber (default level `info`)
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
