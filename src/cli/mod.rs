//! cli
//!
//! Command-line interface layer for gassc.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Initialize logging
//! - Hand off to the [`crate::engine`]
//! - Show help when the single-source usage rule is broken
//!
//! # Architecture
//!
//! The CLI layer is thin. Flags are copied once into an explicit
//! [`RawOptions`](crate::core::request::RawOptions) value; nothing below this
//! layer reads process-wide flag state.

pub mod args;
pub mod completion;

pub use args::{Cli, Shell};

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::GrassCompiler;
use crate::engine;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "GASSC_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.debug);

    if let Some(shell) = cli.completions {
        return completion::completion(shell, &mut io::stdout().lock());
    }

    let raw = cli.raw_options();
    engine::run(&raw, &GrassCompiler, &mut io::stdout().lock()).map_err(|err| {
        if err.is_usage() {
            show_help(&mut io::stderr().lock());
        }
        err
    })?;
    Ok(())
}

/// Write the full help text.
pub fn show_help(out: &mut dyn Write) {
    let mut cmd = Cli::command();
    // Help is best-effort; the usage error is still reported.
    let _ = writeln!(out, "{}", cmd.render_help());
}

/// Initialize the logging/tracing system.
///
/// Logs go to stderr; stdout carries CSS.
fn init_tracing(debug: bool) {
    let default_directive = if debug { "gassc=debug" } else { "gassc=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}
