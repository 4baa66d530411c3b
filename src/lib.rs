//! gassc - compile a Sass or SCSS file to CSS
//!
//! gassc is a single-binary driver around a style-sheet compiler. It owns
//! option resolution, the source-map policy, and output routing; parsing
//! and compiling the style sheet is delegated to a compiler backend.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Drives Resolve -> Compile -> Route for one invocation
//! - [`core`] - Option types, request resolution, map policy
//! - [`compiler`] - Compiler backend traits and the grass implementation
//! - [`error`] - Terminal error taxonomy
//!
//! # Invariants
//!
//! 1. Exactly one source is compiled per invocation
//! 2. An unreadable source never reaches the compiler
//! 3. Release mode always yields compressed, mapless output
//! 4. A sidecar map is written only next to a CSS file, never for stdout

pub mod cli;
pub mod compiler;
pub mod core;
pub mod engine;
pub mod error;
