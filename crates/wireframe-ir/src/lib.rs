//! Normalizer and intermediate representation.
//!
//! Turns a typed AST into the versioned IR consumed by the layout engine and
//! external tooling. Normalization runs five passes in order:
//!
//! 1. [`theme`] — merge project theme entries over engine defaults
//! 2. [`expand`] — detect definition cycles, then inline macro references
//! 3. [`catalog`] — validate against the component/layout catalog and
//!    convert property bags into closed typed variants
//! 4. id assignment — stable `{type}-{subtype}-{ordinal}` identifiers
//! 5. [`structure`] — tree-shape rules (screen uniqueness, child arity,
//!    cell placement)
//!
//! The entry point is [`normalize`].

pub mod catalog;
pub mod document;
pub mod expand;
pub mod pipeline;
pub mod structure;
pub mod theme;

pub use document::{
    Align, ButtonVariant, ChartKind, ChildRef, ComponentSpec, ConfigValue, Density, Direction,
    IrDocument, IrNode, IrProject, IrScreen, Justify, LayoutSpec, NodeId, ProjectConfig,
    RadiusToken, Size, Slot, SpacingToken, StrokeWeight, Style, ThemeConfig, Viewport, IR_VERSION,
};
pub use pipeline::{normalize, Normalized};
