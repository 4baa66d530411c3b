//! engine::router
//!
//! Delivers compiled CSS and the optional sidecar map.
//!
//! # Behavior
//!
//! - stdout: CSS is written verbatim, nothing else is written
//! - file: CSS is written first; the sidecar follows only if that succeeded
//! - files are created or truncated with mode `0o660` on Unix
//!
//! Writes are not atomic. A failed write may leave a truncated file behind;
//! the invocation still fails.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use super::compile::{CompileResult, SidecarMap};
use crate::core::types::OutputFile;
use crate::error::GasscError;

/// Permission bits for files gassc creates.
pub const OUTPUT_FILE_MODE: u32 = 0o660;

/// Where one compile's artifacts go. Consumed by [`OutputTarget::deliver`].
#[derive(Debug)]
pub struct OutputTarget {
    css_destination: OutputFile,
    css: String,
    source_map: Option<SidecarMap>,
}

impl OutputTarget {
    pub fn new(css_destination: OutputFile, result: CompileResult) -> Self {
        Self {
            css_destination,
            css: result.css,
            source_map: result.source_map,
        }
    }

    /// Sidecar path, if one will be written.
    pub fn map_destination(&self) -> Option<&Path> {
        if self.css_destination.is_stdout() {
            return None;
        }
        self.source_map.as_ref().map(|m| m.path.as_path())
    }

    /// Write everything to its destination.
    ///
    /// # Errors
    ///
    /// - [`GasscError::WriteStdout`] if stdout is unwritable
    /// - [`GasscError::WriteCss`] if the CSS file cannot be written
    /// - [`GasscError::WriteSourceMap`] if the sidecar cannot be written,
    ///   even though the CSS file already was
    pub fn deliver(self, stdout: &mut dyn Write) -> Result<(), GasscError> {
        let path = match self.css_destination {
            OutputFile::Stdout => {
                if self.source_map.is_some() {
                    tracing::warn!("sidecar source map ignored for stdout output");
                }
                stdout
                    .write_all(self.css.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(GasscError::WriteStdout)?;
                return Ok(());
            }
            OutputFile::File(path) => path,
        };

        write_file(&path, self.css.as_bytes())
            .map_err(|e| GasscError::WriteCss {
                path: path.clone(),
                source: e,
            })?;
        tracing::debug!(path = %path.display(), bytes = self.css.len(), "wrote css");

        if let Some(map) = self.source_map {
            write_file(&map.path, map.content.as_bytes()).map_err(|e| {
                GasscError::WriteSourceMap {
                    path: map.path.clone(),
                    source: e,
                }
            })?;
            tracing::debug!(path = %map.path.display(), "wrote source map");
        }

        Ok(())
    }
}

/// Create or truncate `path` and write `contents`.
fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(OUTPUT_FILE_MODE);

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn result(css: &str, map: Option<(&Path, &str)>) -> CompileResult {
        CompileResult {
            css: css.to_string(),
            source_map: map.map(|(path, content)| SidecarMap {
                path: path.to_path_buf(),
                content: content.to_string(),
            }),
        }
    }

    #[test]
    fn stdout_gets_css_verbatim() {
        let mut stdout = Vec::new();
        OutputTarget::new(OutputFile::Stdout, result("a{b:c}", None))
            .deliver(&mut stdout)
            .unwrap();
        assert_eq!(stdout, b"a{b:c}");
    }

    #[test]
    fn stdout_never_writes_sidecar() {
        let temp = TempDir::new().expect("create temp dir");
        let map = temp.path().join("stray.map");
        let target = OutputTarget::new(OutputFile::Stdout, result("x", Some((&map, "{}"))));
        assert!(target.map_destination().is_none());

        let mut stdout = Vec::new();
        target.deliver(&mut stdout).unwrap();
        assert_eq!(stdout, b"x");
        assert!(!map.exists());
    }

    #[test]
    fn file_gets_css_and_sidecar() {
        let temp = TempDir::new().expect("create temp dir");
        let css = temp.path().join("out.css");
        let map = temp.path().join("out.css.map");

        let target = OutputTarget::new(
            OutputFile::File(css.clone()),
            result("a{}", Some((&map, "{\"version\":3}"))),
        );
        assert_eq!(target.map_destination(), Some(map.as_path()));

        let mut stdout = Vec::new();
        target.deliver(&mut stdout).unwrap();
        assert!(stdout.is_empty());
        assert_eq!(fs::read_to_string(&css).unwrap(), "a{}");
        assert_eq!(fs::read_to_string(&map).unwrap(), "{\"version\":3}");
    }

    #[test]
    fn existing_file_is_truncated() {
        let temp = TempDir::new().expect("create temp dir");
        let css = temp.path().join("out.css");
        fs::write(&css, "a much longer previous stylesheet").unwrap();

        OutputTarget::new(OutputFile::File(css.clone()), result("a{}", None))
            .deliver(&mut Vec::new())
            .unwrap();
        assert_eq!(fs::read_to_string(&css).unwrap(), "a{}");
    }

    #[test]
    fn css_write_failure_names_css_path() {
        let temp = TempDir::new().expect("create temp dir");
        let css = temp.path().join("missing-dir/out.css");

        let err = OutputTarget::new(OutputFile::File(css.clone()), result("a{}", None))
            .deliver(&mut Vec::new())
            .unwrap_err();
        match err {
            GasscError::WriteCss { path, .. } => assert_eq!(path, css),
            other => panic!("expected WriteCss, got {other:?}"),
        }
    }

    #[test]
    fn sidecar_failure_is_distinct_and_keeps_css() {
        let temp = TempDir::new().expect("create temp dir");
        let css = temp.path().join("out.css");
        let map = temp.path().join("missing-dir/out.css.map");

        let err = OutputTarget::new(OutputFile::File(css.clone()), result("a{}", Some((&map, "{}"))))
            .deliver(&mut Vec::new())
            .unwrap_err();
        match &err {
            GasscError::WriteSourceMap { path, .. } => assert_eq!(path, &map),
            other => panic!("expected WriteSourceMap, got {other:?}"),
        }
        assert!(err.to_string().contains("out.css.map"));
        assert_eq!(fs::read_to_string(&css).unwrap(), "a{}");
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_not_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("create temp dir");
        let css = temp.path().join("out.css");
        OutputTarget::new(OutputFile::File(css.clone()), result("a{}", None))
            .deliver(&mut Vec::new())
            .unwrap();

        let mode = fs::metadata(&css).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o007, 0);
        assert_eq!(mode & 0o600, 0o600);
    }

    #[test]
    fn file_without_map_has_no_map_destination() {
        let target = OutputTarget::new(
            OutputFile::File(PathBuf::from("o.css")),
            result("", None),
        );
        assert!(target.map_destination().is_none());
    }
}
