// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST, CST, and foundation types for the wireframe compiler.
//!
//! This crate holds everything the later pipeline stages share:
//!
//! - `foundation` — source spans and the source map
//! - `error` — unified diagnostics and the diagnostic formatter
//! - `cst` — the concrete syntax tree emitted by the parser
//! - `ast` — the typed abstract syntax tree
//! - `builder` — the pure CST → AST transform

pub mod ast;
pub mod builder;
pub mod cst;
pub mod error;
pub mod foundation;

pub use ast::{Cell, Component, Define, Layout, Node, PropBlock, Project, Screen, Value};
pub use builder::build;
pub use error::{has_errors, Diagnostic, DiagnosticFormatter, ErrorKind, Severity};
pub use foundation::{SourceFile, SourceMap, Span};
