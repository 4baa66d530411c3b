//! engine
//!
//! Drives one invocation: Resolve -> Compile -> Route.
//!
//! # Lifecycle
//!
//! ```text
//! RawOptions
//!     -> resolve      (read source, build CompileRequest + SourceMapPolicy)
//!     -> compile      (construct compiler once, execute once)
//!     -> deliver      (stdout, or CSS file then sidecar map)
//! ```
//!
//! Each stage fails fast. Nothing after a failed stage runs, so an
//! unreadable source never reaches the compiler and a failed CSS write never
//! produces a sidecar.
//!
//! # Example
//!
//! ```no_run
//! use gassc::compiler::GrassCompiler;
//! use gassc::core::request::RawOptions;
//! use std::path::PathBuf;
//!
//! let raw = RawOptions {
//!     sources: vec![PathBuf::from("site.scss")],
//!     output_file: Some(PathBuf::from("site.css")),
//!     ..Default::default()
//! };
//! gassc::engine::run(&raw, &GrassCompiler, &mut std::io::stdout())?;
//! # Ok::<(), gassc::error::GasscError>(())
//! ```

pub mod compile;
pub mod router;

pub use compile::{compile, CompileResult, SidecarMap};
pub use router::OutputTarget;

use std::io::Write;

use crate::compiler::Compiler;
use crate::core::request::{resolve, RawOptions};
use crate::error::GasscError;

/// Run one compile-and-write sequence.
pub fn run(
    raw: &RawOptions,
    compiler: &dyn Compiler,
    stdout: &mut dyn Write,
) -> Result<(), GasscError> {
    let resolved = resolve(raw)?;
    let result = compile(compiler, &resolved.request)?;
    OutputTarget::new(resolved.output, result).deliver(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::mock::{FailOn, MockCompiler};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        source: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().expect("create temp dir");
            let source = dir.path().join("site.scss");
            fs::write(&source, "a { b { c: d; } }").unwrap();
            Self { dir, source }
        }

        fn out(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }
    }

    #[test]
    fn stdout_run_writes_css_only_to_stdout() {
        let fx = Fixture::new();
        let raw = RawOptions {
            sources: vec![fx.source.clone()],
            ..Default::default()
        };
        let mock = MockCompiler::new().with_css("a b{c:d}");
        let mut stdout = Vec::new();

        run(&raw, &mock, &mut stdout).unwrap();
        assert_eq!(stdout, b"a b{c:d}");
    }

    #[test]
    fn file_run_writes_css_and_sidecar() {
        let fx = Fixture::new();
        let css = fx.out("out.css");
        let raw = RawOptions {
            sources: vec![fx.source.clone()],
            output_file: Some(css.clone()),
            ..Default::default()
        };
        let mock = MockCompiler::new().with_css("css").with_map_content("map");
        let mut stdout = Vec::new();

        run(&raw, &mock, &mut stdout).unwrap();
        assert!(stdout.is_empty());
        assert_eq!(fs::read_to_string(&css).unwrap(), "css");
        assert_eq!(fs::read_to_string(fx.out("out.css.map")).unwrap(), "map");
    }

    #[test]
    fn release_run_writes_no_sidecar() {
        let fx = Fixture::new();
        let css = fx.out("out.css");
        let raw = RawOptions {
            sources: vec![fx.source.clone()],
            output_file: Some(css.clone()),
            release: true,
            ..Default::default()
        };
        let mock = MockCompiler::new().with_map_content("map");

        run(&raw, &mock, &mut Vec::new()).unwrap();
        assert!(css.exists());
        assert!(!fx.out("out.css.map").exists());
    }

    #[test]
    fn unreadable_source_never_reaches_compiler() {
        let fx = Fixture::new();
        let raw = RawOptions {
            sources: vec![fx.out("missing.scss")],
            ..Default::default()
        };
        let mock = MockCompiler::new();

        let err = run(&raw, &mock, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GasscError::ReadSource { .. }));
        assert!(!mock.was_invoked());
    }

    #[test]
    fn wrong_source_count_is_usage_and_skips_compiler() {
        let fx = Fixture::new();
        let mock = MockCompiler::new();
        for sources in [vec![], vec![fx.source.clone(), fx.source.clone()]] {
            let raw = RawOptions {
                sources,
                ..Default::default()
            };
            let err = run(&raw, &mock, &mut Vec::new()).unwrap_err();
            assert!(err.is_usage());
        }
        assert!(!mock.was_invoked());
    }

    #[test]
    fn compile_failure_writes_nothing() {
        let fx = Fixture::new();
        let css = fx.out("out.css");
        let raw = RawOptions {
            sources: vec![fx.source.clone()],
            output_file: Some(css.clone()),
            ..Default::default()
        };
        let mock = MockCompiler::failing(FailOn::Execute("broken".into()));

        let err = run(&raw, &mock, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GasscError::Compilation(_)));
        assert!(!css.exists());
    }
}
