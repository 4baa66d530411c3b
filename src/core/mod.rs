//! core
//!
//! Core option types and resolution for gassc.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SyntaxMode, OutputStyle, OutputFile
//! - [`paths`] - Path helpers
//! - [`source_map`] - Source-map emission policy
//! - [`request`] - Option resolver producing a CompileRequest
//!
//! # Design Principles
//!
//! - Resolution is deterministic: the same input yields the same request
//! - Nothing is read from the environment besides the source itself
//! - Policy decisions are pure functions of their inputs

pub mod paths;
pub mod request;
pub mod source_map;
pub mod types;
