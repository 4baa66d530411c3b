//! core::types
//!
//! Strong types for compile options.
//!
//! # Types
//!
//! - [`SyntaxMode`] - Which input grammar the source uses
//! - [`OutputStyle`] - How the compiled CSS is formatted
//! - [`OutputFile`] - Where compiled CSS goes: stdout or a named file
//!
//! # Examples
//!
//! ```
//! use gassc::core::types::{OutputFile, OutputStyle};
//!
//! assert_eq!("Compressed".parse::<OutputStyle>().unwrap(), OutputStyle::Compressed);
//! assert!("pretty".parse::<OutputStyle>().is_err());
//!
//! assert_eq!(OutputFile::from_arg("-"), OutputFile::Stdout);
//! assert_eq!(OutputFile::from_arg(""), OutputFile::Stdout);
//! assert!(!OutputFile::from_arg("out.css").is_stdout());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Argument value that routes CSS to standard output.
pub const STDOUT_SENTINEL: &str = "-";

/// Floating point precision used when none is configured.
pub const DEFAULT_PRECISION: u32 = 10;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid output style '{0}', must be one of: nested, expanded, compact, compressed")]
    InvalidOutputStyle(String),
}

/// Input grammar of the source style sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SyntaxMode {
    /// Brace-delimited SCSS syntax.
    #[default]
    Scss,
    /// Indentation-based Sass syntax.
    Sass,
}

impl SyntaxMode {
    /// Select the syntax from the `--sass-syntax` flag.
    pub fn from_flag(sass_syntax: bool) -> Self {
        if sass_syntax {
            SyntaxMode::Sass
        } else {
            SyntaxMode::Scss
        }
    }
}

/// Formatting of the compiled CSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputStyle {
    #[default]
    Nested,
    Expanded,
    Compact,
    Compressed,
}

impl OutputStyle {
    /// All styles, in the order they are listed in help text.
    pub const ALL: [OutputStyle; 4] = [
        OutputStyle::Nested,
        OutputStyle::Expanded,
        OutputStyle::Compact,
        OutputStyle::Compressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Nested => "nested",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }
}

impl FromStr for OutputStyle {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OutputStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TypeError::InvalidOutputStyle(s.to_string()))
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for compiled CSS.
///
/// The `-` sentinel and the empty string both mean standard output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum OutputFile {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputFile {
    /// Normalize an `--output-file` argument.
    pub fn from_arg(arg: impl AsRef<Path>) -> Self {
        let path = arg.as_ref();
        if path.as_os_str().is_empty() || path.as_os_str() == STDOUT_SENTINEL {
            OutputFile::Stdout
        } else {
            OutputFile::File(path.to_path_buf())
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputFile::Stdout)
    }

    /// The named file, or `None` for stdout.
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputFile::Stdout => None,
            OutputFile::File(path) => Some(path),
        }
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFile::Stdout => f.write_str(STDOUT_SENTINEL),
            OutputFile::File(path) => write!(f, "{}", path.display()),
        }
    }
}
