//! core::request
//!
//! Option resolution: raw CLI input into a [`CompileRequest`].
//!
//! # Rules
//!
//! - Exactly one positional source path is accepted
//! - The source is read before anything else is built, so an unreadable
//!   source never reaches the engine
//! - Include paths keep user order, with the source's own directory last
//! - Flags are the only input; no defaults come from files or the environment
//! - `--release` forces `compressed` and disables source maps, overriding
//!   every other style or map flag
//! - An empty `--output-file` means stdout, same as `-`
//!
//! # Example
//!
//! ```no_run
//! use gassc::core::request::{resolve, RawOptions};
//! use std::path::PathBuf;
//!
//! let raw = RawOptions {
//!     sources: vec![PathBuf::from("styles/site.scss")],
//!     release: true,
//!     ..Default::default()
//! };
//! let resolved = resolve(&raw).unwrap();
//! assert!(!resolved.request.source_map.enabled());
//! ```

use std::fs;
use std::path::PathBuf;

use super::paths::source_dir;
use super::source_map::SourceMapPolicy;
use super::types::{OutputFile, OutputStyle, SyntaxMode, DEFAULT_PRECISION};
use crate::error::GasscError;

/// Flag values as parsed from the command line.
///
/// Optional fields are `None` when the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    /// Positional arguments; exactly one is valid.
    pub sources: Vec<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub output_style: Option<String>,
    pub no_source_map: bool,
    pub include_paths: Vec<PathBuf>,
    pub sass_syntax: bool,
    pub precision: Option<u32>,
    pub release: bool,
}

/// Everything the engine needs for one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub source_path: PathBuf,
    pub source_text: String,
    /// Searched in order; duplicates are kept.
    pub include_paths: Vec<PathBuf>,
    pub syntax: SyntaxMode,
    pub precision: u32,
    pub output_style: OutputStyle,
    pub source_map: SourceMapPolicy,
}

/// A resolved invocation: the compile request and where its CSS goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub request: CompileRequest,
    pub output: OutputFile,
}

/// Resolve raw options into a compile request.
///
/// # Errors
///
/// - [`GasscError::Usage`] unless exactly one source was given
/// - [`GasscError::ReadSource`] if the source cannot be read
/// - [`GasscError::Construction`] if the output style is not recognized
pub fn resolve(raw: &RawOptions) -> Result<Resolved, GasscError> {
    let source_path = match raw.sources.as_slice() {
        [single] => single.clone(),
        other => return Err(GasscError::Usage(other.len())),
    };

    let source_text = fs::read_to_string(&source_path).map_err(|e| GasscError::ReadSource {
        path: source_path.clone(),
        source: e,
    })?;

    let output = raw
        .output_file
        .as_deref()
        .map(OutputFile::from_arg)
        .unwrap_or_default();

    let output_style = resolve_style(raw)?;

    let precision = raw.precision.unwrap_or(DEFAULT_PRECISION);

    let include_paths = raw
        .include_paths
        .iter()
        .cloned()
        .chain(std::iter::once(source_dir(&source_path)))
        .collect();

    let source_map = SourceMapPolicy::resolve(raw.release, raw.no_source_map, &output);

    let request = CompileRequest {
        source_path,
        source_text,
        include_paths,
        syntax: SyntaxMode::from_flag(raw.sass_syntax),
        precision,
        output_style,
        source_map,
    };

    tracing::debug!(
        source = %request.source_path.display(),
        output = %output,
        style = %request.output_style,
        precision = request.precision,
        syntax = ?request.syntax,
        include_paths = ?request.include_paths,
        source_map = ?request.source_map.destination,
        "resolved compile request"
    );

    Ok(Resolved { request, output })
}

fn resolve_style(raw: &RawOptions) -> Result<OutputStyle, GasscError> {
    if raw.release {
        return Ok(OutputStyle::Compressed);
    }
    match &raw.output_style {
        Some(name) => name
            .parse::<OutputStyle>()
            .map_err(|e| GasscError::Construction(e.to_string())),
        None => Ok(OutputStyle::default()),
    }
}
