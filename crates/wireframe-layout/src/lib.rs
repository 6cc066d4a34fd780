//! Layout engine for normalized wireframe documents.
//!
//! Consumes the IR and a viewport, produces a [`RenderTree`] of positioned
//! boxes keyed to IR node ids. Pure and total: no I/O, no shared state, a
//! fresh tree per call, so `layout(ir, viewport)` is safely memoizable
//! keyed on its inputs.

pub mod engine;
pub mod geometry;
pub mod intrinsic;

pub use engine::layout;
pub use geometry::{RenderNode, RenderScreen, RenderTree, Viewport};
