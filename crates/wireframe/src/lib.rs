//! Wireframe description language compiler.
//!
//! Turns wireframe source text into a versioned intermediate representation
//! and, from there, into a positioned render tree:
//!
//! ```text
//! source ── lex ── parse ── build ── normalize ──▶ IR ── layout ──▶ render tree
//! ```
//!
//! The whole pipeline is synchronous and reentrant; compiling independent
//! documents from separate threads needs no locking. Rendering the tree to
//! pixels or markup is out of scope: external renderers bind to the
//! serialized IR and render-tree contracts.
//!
//! # Example
//!
//! ```
//! use wireframe::{compile_and_layout, Viewport};
//!
//! let source = r#"
//!     project "Demo" {
//!         screen Main {
//!             layout stack {
//!                 component Heading text: "Hello"
//!                 component Button label: "Go" variant: primary
//!             }
//!         }
//!     }
//! "#;
//! let (compilation, tree) = compile_and_layout("demo.wire", source, Viewport::new(800.0, 600.0))
//!     .expect("compiles");
//! assert_eq!(compilation.ir.project.screens.len(), 1);
//! assert_eq!(tree.screens[0].root.width, 800.0);
//! ```

pub mod compile;

pub use compile::{compile_and_layout, compile_source, Compilation};

pub use wireframe_ast::{
    has_errors, Diagnostic, DiagnosticFormatter, ErrorKind, Severity, SourceMap, Span,
};
pub use wireframe_ir::{
    ComponentSpec, IrDocument, IrNode, LayoutSpec, Size, Style, ThemeConfig, Viewport, IR_VERSION,
};
pub use wireframe_layout::{layout, RenderNode, RenderTree};
