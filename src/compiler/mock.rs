//! compiler::mock
//!
//! Mock compiler for deterministic testing.
//!
//! # Design
//!
//! The mock records every call it receives and returns canned output, so
//! tests can assert both what the pipeline asked for and whether the
//! compiler was reached at all. Failure scenarios are configured up front.
//!
//! # Example
//!
//! ```
//! use gassc::compiler::mock::{MockCall, MockCompiler};
//! use gassc::compiler::{Compiler, CompilerOptions};
//!
//! let compiler = MockCompiler::new();
//! let transpiler = compiler.construct(&CompilerOptions::default()).unwrap();
//! let output = transpiler.execute("a{}").unwrap();
//!
//! assert_eq!(output.css, "a{}");
//! assert_eq!(compiler.calls().len(), 2);
//! assert!(matches!(compiler.calls()[1], MockCall::Execute(_)));
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use super::{Compiler, CompilerError, CompilerOptions, CompilerOutput, Transpiler};

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Construct(CompilerOptions),
    Execute(String),
}

/// Which phase should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    Construct(String),
    Execute(String),
}

/// Mock compiler for testing.
///
/// Clones share their call log, so a transpiler built from the mock keeps
/// recording into the same place.
#[derive(Debug, Clone, Default)]
pub struct MockCompiler {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    calls: Vec<MockCall>,
    fail_on: Option<FailOn>,
    /// Fixed CSS to return; the source text is echoed when unset.
    css: Option<String>,
    /// Map content returned when options request a sidecar.
    map_content: Option<String>,
}

impl MockCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the given phase with the given message.
    pub fn failing(fail_on: FailOn) -> Self {
        let mock = Self::new();
        mock.lock().fail_on = Some(fail_on);
        mock
    }

    /// Return this CSS instead of echoing the source.
    pub fn with_css(self, css: impl Into<String>) -> Self {
        self.lock().css = Some(css.into());
        self
    }

    /// Return this content whenever a sidecar map is requested.
    pub fn with_map_content(self, content: impl Into<String>) -> Self {
        self.lock().map_content = Some(content.into());
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Whether any call reached the mock.
    pub fn was_invoked(&self) -> bool {
        !self.lock().calls.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Compiler for MockCompiler {
    fn construct(&self, options: &CompilerOptions) -> Result<Box<dyn Transpiler>, CompilerError> {
        let mut inner = self.lock();
        inner.calls.push(MockCall::Construct(options.clone()));
        if let Some(FailOn::Construct(message)) = &inner.fail_on {
            return Err(CompilerError::Construction(message.clone()));
        }
        drop(inner);

        Ok(Box::new(MockTranspiler {
            mock: self.clone(),
            options: options.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockTranspiler {
    mock: MockCompiler,
    options: CompilerOptions,
}

impl Transpiler for MockTranspiler {
    fn execute(&self, source: &str) -> Result<CompilerOutput, CompilerError> {
        let mut inner = self.mock.lock();
        inner.calls.push(MockCall::Execute(source.to_string()));
        if let Some(FailOn::Execute(message)) = &inner.fail_on {
            return Err(CompilerError::Compilation(message.clone()));
        }

        let css = inner.css.clone().unwrap_or_else(|| source.to_string());
        let map = &self.options.source_map;
        if map.embedded || map.filename.is_none() {
            return Ok(CompilerOutput {
                css,
                ..Default::default()
            });
        }

        Ok(CompilerOutput {
            css,
            source_map_filename: map.filename.clone(),
            source_map_content: Some(
                inner
                    .map_content
                    .clone()
                    .unwrap_or_else(|| "{\"version\":3}".to_string()),
            ),
        })
    }
}
