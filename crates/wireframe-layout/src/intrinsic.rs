//! Intrinsic component sizes.
//!
//! Fixed lookup table used when a node resolves to `Content` on an axis.
//! Values are wireframe conventions, not typography: a heading is one 40px
//! line, a table is a 40px header plus 36px rows, and so on.

use wireframe_ir::ComponentSpec;

/// Content width used when a component has no natural width of its own
/// and is measured on the horizontal axis.
pub const DEFAULT_CONTENT_WIDTH: f32 = 120.0;

/// Intrinsic height in pixels.
pub fn intrinsic_height(spec: &ComponentSpec) -> f32 {
    match spec {
        ComponentSpec::Heading { .. } => 40.0,
        ComponentSpec::Text { .. } => 32.0,
        ComponentSpec::Paragraph { .. } => 72.0,
        ComponentSpec::Label { .. } => 32.0,
        ComponentSpec::Link { .. } => 32.0,
        ComponentSpec::Button { .. } => 36.0,
        ComponentSpec::IconButton { .. } => 36.0,
        ComponentSpec::Input { .. } => 40.0,
        ComponentSpec::TextArea { .. } => 96.0,
        ComponentSpec::Select { .. } => 40.0,
        ComponentSpec::Checkbox { .. } => 24.0,
        ComponentSpec::Radio { .. } => 24.0,
        ComponentSpec::Switch { .. } => 24.0,
        ComponentSpec::Slider { .. } => 32.0,
        ComponentSpec::SearchBar { .. } => 40.0,
        ComponentSpec::Image { .. } => 160.0,
        ComponentSpec::Avatar { .. } => 40.0,
        ComponentSpec::Icon { .. } => 24.0,
        ComponentSpec::Badge { .. } => 24.0,
        ComponentSpec::Tag { .. } => 24.0,
        ComponentSpec::Divider {} => 1.0,
        ComponentSpec::Spacer { size } => size.unwrap_or(16.0),
        ComponentSpec::Table { rows, .. } => 40.0 + 36.0 * *rows as f32,
        ComponentSpec::List { items } => 48.0 * *items as f32,
        ComponentSpec::Tabs { .. } => 40.0,
        ComponentSpec::Breadcrumbs { .. } => 28.0,
        ComponentSpec::Progress { .. } => 8.0,
        ComponentSpec::Chart { .. } => 200.0,
    }
}

/// Intrinsic width in pixels, for the few components with a natural width.
pub fn intrinsic_width(spec: &ComponentSpec) -> Option<f32> {
    match spec {
        ComponentSpec::IconButton { .. } => Some(36.0),
        ComponentSpec::Avatar { .. } => Some(40.0),
        ComponentSpec::Icon { .. } => Some(24.0),
        ComponentSpec::Spacer { size } => Some(size.unwrap_or(16.0)),
        _ => None,
    }
}
