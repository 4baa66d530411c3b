//! engine::compile
//!
//! Compile orchestration: one construct, one execute, typed failures.
//!
//! # Invariants
//!
//! - The compiler is constructed and executed exactly once; nothing is
//!   retried, since compilation is deterministic
//! - Construction failures stay distinct from compilation failures
//! - A [`CompileResult`] carries a sidecar map only when the request's policy
//!   asked for one, and then always as a path/content pair

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::compiler::{Compiler, CompilerError, CompilerOptions};
use crate::core::request::CompileRequest;
use crate::error::GasscError;

/// A sidecar source map ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarMap {
    pub path: PathBuf,
    pub content: String,
}

/// Output of a successful compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub css: String,
    pub source_map: Option<SidecarMap>,
}

impl CompileResult {
    pub fn source_map_path(&self) -> Option<&Path> {
        self.source_map.as_ref().map(|m| m.path.as_path())
    }

    pub fn source_map_content(&self) -> Option<&str> {
        self.source_map.as_ref().map(|m| m.content.as_str())
    }
}

/// Compile a request with the given backend.
///
/// # Errors
///
/// - [`GasscError::Construction`] if the backend rejects its options
/// - [`GasscError::Compilation`] if the backend rejects the source, carrying
///   the backend's own diagnostic
pub fn compile(compiler: &dyn Compiler, request: &CompileRequest) -> Result<CompileResult, GasscError> {
    let options = CompilerOptions::from(request);
    tracing::debug!(?options, "constructing compiler");

    let transpiler = compiler.construct(&options).map_err(into_gassc_error)?;

    let started = Instant::now();
    let output = transpiler
        .execute(&request.source_text)
        .map_err(into_gassc_error)?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        css_bytes = output.css.len(),
        "compiled"
    );

    let source_map = match (
        request.source_map.sidecar_path(),
        output.source_map_content,
    ) {
        (Some(policy_path), Some(content)) => Some(SidecarMap {
            path: output
                .source_map_filename
                .unwrap_or_else(|| policy_path.to_path_buf()),
            content,
        }),
        (Some(policy_path), None) => {
            tracing::debug!(path = %policy_path.display(), "compiler produced no source map");
            None
        }
        (None, _) => None,
    };

    Ok(CompileResult {
        css: output.css,
        source_map,
    })
}

fn into_gassc_error(err: CompilerError) -> GasscError {
    match err {
        CompilerError::Construction(message) => GasscError::Construction(message),
        CompilerError::Compilation(message) => GasscError::Compilation(message),
    }
}
