//! error
//!
//! Terminal error taxonomy for a single gassc invocation.
//!
//! # Categories
//!
//! - Usage: wrong positional argument count
//! - I/O: source unreadable, CSS output unwritable, sidecar map unwritable
//! - Construction: the engine rejected its configuration
//! - Compilation: the engine rejected the source text
//!
//! Every variant is terminal. The process boundary maps all of them to
//! exit code 1; the variants exist so callers (and tests) can tell a
//! usage or I/O mistake apart from a defect in the style sheet.
//!
//! # Example
//!
//! ```
//! use gassc::error::GasscError;
//! use std::path::PathBuf;
//!
//! let err = GasscError::WriteSourceMap {
//!     path: PathBuf::from("out.css.map"),
//!     source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
//! };
//! assert!(err.to_string().contains("out.css.map"));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum GasscError {
    /// Wrong number of positional arguments.
    #[error("expected exactly one source file, found {0}")]
    Usage(usize),

    /// The source style sheet could not be read.
    #[error("failed to read source file '{path}': {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The engine could not be configured.
    #[error("error constructing transpiler: {0}")]
    Construction(String),

    /// The engine failed to compile the source text.
    #[error("error transpiling: {0}")]
    Compilation(String),

    /// The CSS could not be written to standard output.
    #[error("failed to write to stdout: {0}")]
    WriteStdout(std::io::Error),

    /// The CSS output file could not be written.
    #[error("error writing output-file '{path}': {source}")]
    WriteCss {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The sidecar source map could not be written.
    #[error("error writing sourcemap file '{path}': {source}")]
    WriteSourceMap {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GasscError {
    /// Check if this error was caused by invalid invocation syntax.
    pub fn is_usage(&self) -> bool {
        matches!(self, GasscError::Usage(_))
    }
}
