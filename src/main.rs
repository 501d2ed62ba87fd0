use clap::Parser;
use std::io;
use std::process::ExitCode;

mod batch;
mod config;
mod error;
mod logging;
mod render;

use config::{Args, RunConfig};

fn main() -> ExitCode {
    if let Err(e) = logging::init_subscriber() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = RunConfig::from(Args::parse());
    tracing::debug!(?config, "Configuration loaded");

    // The rendering stack must work before any file is touched
    if let Err(e) = render::check_capabilities() {
        eprintln!("❌ {}", e);
        eprintln!("   The SVG renderer or JPEG encoder is not usable in this build.");
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    match batch::driver::run(&config, stdin.lock(), io::stdout()) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "Run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
