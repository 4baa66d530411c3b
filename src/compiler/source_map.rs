//! compiler::source_map
//!
//! Version 3 source-map documents and the comments that reference them.
//!
//! The grass backend exposes no span data, so documents carry file-level
//! attribution only: `sources` (and optionally `sourcesContent`) are filled
//! in, `mappings` is empty.
//!
//! `sources` entries resolve against the map's location, so a sidecar map
//! records the source relative to the directory it is written to.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

/// Prefix of an inline `sourceMappingURL` data URL.
pub const DATA_URL_PREFIX: &str = "data:application/json;charset=utf-8;base64,";

/// A source-map document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDocument {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMapDocument {
    /// Start a document for one source file.
    ///
    /// `css_file` is the generated file the map describes; only its file name
    /// is recorded.
    pub fn new(source: Option<&Path>, css_file: Option<&Path>) -> Self {
        let source = source
            .map(path_to_url)
            .unwrap_or_else(|| "stdin".to_string());
        let file = css_file
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned());

        Self {
            version: 3,
            file,
            sources: vec![source],
            sources_content: None,
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    /// Embed the source text.
    pub fn with_contents(mut self, text: &str) -> Self {
        self.sources_content = Some(vec![text.to_string()]);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode the document as a base64 `data:` URL.
    pub fn to_data_url(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(json)))
    }
}

/// Append a `sourceMappingURL` comment on its own line.
pub fn append_reference(css: &mut String, url: &str) {
    if !css.is_empty() && !css.ends_with('\n') {
        css.push('\n');
    }
    css.push_str("/*# sourceMappingURL=");
    css.push_str(url);
    css.push_str(" */\n");
}

/// `path` as reached from the directory `base`.
///
/// Relative inputs are taken against the working directory. If the two share
/// no root (different drives), or the working directory is unavailable, the
/// path is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let (Ok(abs_path), Ok(abs_base)) = (absolute(path), absolute(base)) else {
        return path.to_path_buf();
    };

    let path_parts: Vec<Component<'_>> = abs_path.components().collect();
    let base_parts: Vec<Component<'_>> = abs_base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Absolute, lexically normalized form of `path`.
fn absolute(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Source-map URLs always use forward slashes.
fn path_to_url(path: &Path) -> String {
    let url = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        url.into_owned()
    } else {
        url.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
