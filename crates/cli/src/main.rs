//! faasr CLI
//!
//! Validates FaaSr workflow files before deployment and resolves which action
//! instances must complete before a given action runs.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod errors;
mod tracing;

use crate::tracing::{TracingConfig, init_tracing};

fn main() {
    // NOTE: Using eprintln! in panic hook is intentional - tracing infrastructure
    // may be corrupted during a panic, so we use the most reliable output method.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    if let Err(error) = run() {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

fn run() -> miette::Result<()> {
    let cli = cli::parse();

    init_tracing(TracingConfig {
        format: cli.tracing_format(),
        level: cli.level.into(),
        filter: cli.log_filter.clone(),
    })?;

    let command = cli.into_command()?;
    let output = commands::execute(command)?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
