//! compiler
//!
//! Seam to the external style-sheet compiler.
//!
//! # Architecture
//!
//! gassc never parses style sheets itself. Compilation happens behind two
//! traits mirroring the two phases every backend goes through:
//!
//! - [`Compiler::construct`] validates an [`CompilerOptions`] record and
//!   yields a configured [`Transpiler`]; failures here are configuration
//!   mistakes
//! - [`Transpiler::execute`] compiles source text; failures here are
//!   defects in the style sheet
//!
//! The two failure kinds stay distinct in [`CompilerError`] so callers can
//! report them differently.
//!
//! # Implementations
//!
//! - [`GrassCompiler`]: pure Rust compiler backed by the `grass` crate
//! - [`MockCompiler`]: in-memory compiler that records calls, for tests
//!
//! # Example
//!
//! ```
//! use gassc::compiler::{Compiler, CompilerOptions, GrassCompiler};
//!
//! let transpiler = GrassCompiler.construct(&CompilerOptions::default()).unwrap();
//! let output = transpiler.execute("a { b { color: red; } }").unwrap();
//! assert!(output.css.contains("a b"));
//! assert!(output.source_map_content.is_none());
//! ```

pub mod grass;
pub mod mock;
pub mod source_map;

pub use self::grass::GrassCompiler;
pub use self::mock::MockCompiler;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::request::CompileRequest;
use crate::core::source_map::{MapDestination, SourceMapPolicy};
use crate::core::types::{OutputStyle, SyntaxMode, DEFAULT_PRECISION};

/// Errors reported by a compiler backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompilerError {
    /// The backend rejected its configuration.
    #[error("{0}")]
    Construction(String),

    /// The backend rejected the source text.
    #[error("{0}")]
    Compilation(String),
}

/// Source-map settings in the shape compiler backends consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMapOptions {
    /// Sidecar file the map is destined for.
    pub filename: Option<PathBuf>,
    /// Embed the source text in the map.
    pub contents: bool,
    /// Do not append a `sourceMappingURL` comment.
    pub omit_url: bool,
    /// Embed the whole map in the CSS.
    pub embedded: bool,
}

impl SourceMapOptions {
    pub fn enabled(&self) -> bool {
        self.embedded || self.filename.is_some()
    }
}

impl From<&SourceMapPolicy> for SourceMapOptions {
    fn from(policy: &SourceMapPolicy) -> Self {
        match &policy.destination {
            MapDestination::None => SourceMapOptions::default(),
            MapDestination::Inline => SourceMapOptions {
                filename: None,
                contents: policy.include_sources,
                omit_url: policy.omit_url,
                embedded: true,
            },
            MapDestination::Sidecar(path) => SourceMapOptions {
                filename: Some(path.clone()),
                contents: policy.include_sources,
                omit_url: policy.omit_url,
                embedded: false,
            },
        }
    }
}

/// Configuration record handed to [`Compiler::construct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Path of the source, recorded in generated source maps.
    pub input_path: Option<PathBuf>,
    pub include_paths: Vec<PathBuf>,
    pub precision: u32,
    pub syntax: SyntaxMode,
    pub output_style: OutputStyle,
    pub source_map: SourceMapOptions,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            input_path: None,
            include_paths: Vec::new(),
            precision: DEFAULT_PRECISION,
            syntax: SyntaxMode::default(),
            output_style: OutputStyle::default(),
            source_map: SourceMapOptions::default(),
        }
    }
}

impl From<&CompileRequest> for CompilerOptions {
    fn from(request: &CompileRequest) -> Self {
        Self {
            input_path: Some(request.source_path.clone()),
            include_paths: request.include_paths.clone(),
            precision: request.precision,
            syntax: request.syntax,
            output_style: request.output_style,
            source_map: SourceMapOptions::from(&request.source_map),
        }
    }
}

/// What a backend returns for one successful compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    pub css: String,
    /// Set only for sidecar maps.
    pub source_map_filename: Option<PathBuf>,
    /// Set only for sidecar maps.
    pub source_map_content: Option<String>,
}

/// A compiler backend.
pub trait Compiler {
    /// Build a transpiler for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::Construction`] if the options are unusable.
    fn construct(&self, options: &CompilerOptions) -> Result<Box<dyn Transpiler>, CompilerError>;
}

/// A configured compiler, ready to compile source text.
pub trait Transpiler {
    /// Compile one style sheet.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::Compilation`] with the backend's own
    /// diagnostic if the source is malformed.
    fn execute(&self, source: &str) -> Result<CompilerOutput, CompilerError>;
}
