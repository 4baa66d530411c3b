//! core::source_map
//!
//! Source-map emission policy.
//!
//! # Decision Table
//!
//! | release | no-source-map | output file | destination                |
//! |---------|---------------|-------------|----------------------------|
//! | true    | any           | any         | none                       |
//! | any     | true          | any         | none                       |
//! | false   | false         | `-`         | inline, embedded in CSS    |
//! | false   | false         | `out.css`   | sidecar at `out.css.map`   |
//!
//! A sidecar path is meaningless when CSS is streamed to stdout, so the map
//! must travel in-band there.
//!
//! # Example
//!
//! ```
//! use gassc::core::source_map::{MapDestination, SourceMapPolicy};
//! use gassc::core::types::OutputFile;
//! use std::path::PathBuf;
//!
//! let out = OutputFile::from_arg("site.css");
//! let policy = SourceMapPolicy::resolve(false, false, &out);
//! assert_eq!(
//!     policy.destination,
//!     MapDestination::Sidecar(PathBuf::from("site.css.map"))
//! );
//!
//! let release = SourceMapPolicy::resolve(true, false, &out);
//! assert!(!release.enabled());
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::types::OutputFile;

/// Suffix appended to the output file name to form the sidecar path.
pub const SIDECAR_SUFFIX: &str = ".map";

/// Where a generated source map ends up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MapDestination {
    /// No source map is generated.
    #[default]
    None,
    /// The map is embedded in the CSS as a data URL comment.
    Inline,
    /// The map is written to a separate file.
    Sidecar(PathBuf),
}

/// Resolved source-map settings for one compile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceMapPolicy {
    pub destination: MapDestination,
    /// Embed the original source text in the map.
    pub include_sources: bool,
    /// Do not append a `sourceMappingURL` reference comment to the CSS.
    pub omit_url: bool,
}

impl SourceMapPolicy {
    /// The policy that produces no source map.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Derive the policy from release mode, `--no-source-map` and the output
    /// destination.
    pub fn resolve(release: bool, no_source_map: bool, output: &OutputFile) -> Self {
        if release || no_source_map {
            return Self::disabled();
        }

        let destination = match output.path() {
            None => MapDestination::Inline,
            Some(path) => MapDestination::Sidecar(sidecar_path(path)),
        };

        Self {
            destination,
            include_sources: true,
            omit_url: true,
        }
    }

    pub fn enabled(&self) -> bool {
        self.destination != MapDestination::None
    }

    pub fn is_inline(&self) -> bool {
        self.destination == MapDestination::Inline
    }

    /// The sidecar file path, if this policy writes one.
    pub fn sidecar_path(&self) -> Option<&Path> {
        match &self.destination {
            MapDestination::Sidecar(path) => Some(path),
            _ => None,
        }
    }
}

/// Append `.map` to the full output file name.
///
/// `site.css` becomes `site.css.map`, never `site.map`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}
