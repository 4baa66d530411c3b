//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! Outputs:
//! - `--output-file` / `-O`: File to write, `-` for stdout
//! - `--output-style` / `-S`: nested, expanded, compact or compressed
//! - `--no-source-map` / `-M`: Do not produce a source map
//!
//! Settings:
//! - `--include-path` / `-I`: Extra import search directory (repeatable)
//! - `--sass-syntax` / `-A`: Parse the indented Sass syntax
//! - `--precision` / `-P`: Floating point precision
//! - `--release`: Same as `-M -S compressed`
//!
//! General:
//! - `--help` / `-h` / `--usage`, `--version` / `-V`, `--debug`, `--completions <shell>`

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::core::request::RawOptions;
use crate::core::types::STDOUT_SENTINEL;

/// Version string: package version plus build flavor.
#[cfg(not(debug_assertions))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (release)");
#[cfg(debug_assertions)]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (development)");

/// gassc - compile a Sass or SCSS file to CSS
#[derive(Parser, Debug)]
#[command(name = "gassc")]
#[command(version = VERSION, about, long_about = None)]
#[command(disable_help_flag = true)]
#[command(override_usage = "gassc [options] <source.scss>")]
#[command(after_help = "\
EXAMPLES:
    # Compile to stdout with an inline source map
    gassc site.scss

    # Write site.css and site.css.map
    gassc -O site.css site.scss

    # Minified output, no source map
    gassc --release -O site.min.css site.scss")]
pub struct Cli {
    /// Source style sheet (exactly one)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<PathBuf>,

    /// Specify file to write, use "-" for stdout
    #[arg(
        short = 'O',
        long,
        value_name = "FILE",
        default_value = STDOUT_SENTINEL,
        help_heading = "Outputs"
    )]
    pub output_file: String,

    /// nested, expanded, compact or compressed [default: nested]
    ///
    /// The grass engine renders nested and compact as expanded.
    #[arg(short = 'S', long, value_name = "STYLE", help_heading = "Outputs")]
    pub output_style: Option<String>,

    /// Do not include source-map output
    #[arg(short = 'M', long, help_heading = "Outputs")]
    pub no_source_map: bool,

    /// Add one (or more) include paths
    #[arg(short = 'I', long = "include-path", value_name = "DIR", help_heading = "Settings")]
    pub include_paths: Vec<PathBuf>,

    /// Use sass instead of scss syntax
    #[arg(short = 'A', long, help_heading = "Settings")]
    pub sass_syntax: bool,

    /// Floating point precision [default: 10]
    ///
    /// Accepted for compatibility; the grass engine always uses 10 digits.
    #[arg(short = 'P', long, value_name = "DIGITS", help_heading = "Settings")]
    pub precision: Option<u32>,

    /// Same as: -M -S compressed
    #[arg(long, help_heading = "Settings")]
    pub release: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Print help
    #[arg(short = 'h', long, visible_alias = "usage", action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Flag values as a plain options struct.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            sources: self.sources.clone(),
            output_file: Some(PathBuf::from(&self.output_file)),
            output_style: self.output_style.clone(),
            no_source_map: self.no_source_map,
            include_paths: self.include_paths.clone(),
            sass_syntax: self.sass_syntax,
            precision: self.precision,
            release: self.release,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
