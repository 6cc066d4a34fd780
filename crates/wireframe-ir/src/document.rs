//! The intermediate representation.
//!
//! The IR is the normalized, validated form of a wireframe document: every
//! default resolved, every macro expanded, every property bag converted into
//! a closed typed variant. It is immutable once emitted and is the single
//! source of truth for the layout engine and for external renderers and
//! tooling, which bind to its serialized form directly.
//!
//! The serialized shape is versioned via [`IR_VERSION`]; changes to these
//! types are contract changes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wireframe_ast::foundation::Span;

/// Version tag written into every serialized IR document.
pub const IR_VERSION: &str = "1";

/// Stable node identifier: `{type}-{subtype}-{ordinal}`.
pub type NodeId = String;

/// A complete normalized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrDocument {
    pub ir_version: String,
    pub project: IrProject,
}

/// The normalized project: resolved config, screens, and the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrProject {
    pub id: String,
    pub name: String,
    pub config: ProjectConfig,
    pub screens: Vec<IrScreen>,
    /// All nodes in the document, keyed by id. Every child reference in a
    /// container resolves to a key in this map.
    pub nodes: IndexMap<NodeId, IrNode>,
}

/// Project-level configuration: theme plus pass-through colors and mocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub theme: ThemeConfig,
    pub colors: IndexMap<String, ConfigValue>,
    pub mocks: IndexMap<String, ConfigValue>,
}

/// A colors/mocks entry value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Number(f64),
}

/// Resolved theme: project overrides merged over engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub density: Density,
    pub spacing: SpacingToken,
    pub radius: RadiusToken,
    pub stroke: StrokeWeight,
    pub font: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            density: Density::Normal,
            spacing: SpacingToken::Md,
            radius: RadiusToken::Md,
            stroke: StrokeWeight::Normal,
            font: "base".to_string(),
        }
    }
}

/// Theme density setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    Normal,
    Comfortable,
}

/// Named spacing token, resolved to pixels via a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingToken {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl SpacingToken {
    /// Pixel value of this token.
    pub fn px(self) -> f32 {
        match self {
            SpacingToken::Xs => 4.0,
            SpacingToken::Sm => 8.0,
            SpacingToken::Md => 16.0,
            SpacingToken::Lg => 24.0,
            SpacingToken::Xl => 32.0,
        }
    }

    /// Parse a spacing keyword (`xs`..`xl`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "xs" => Some(SpacingToken::Xs),
            "sm" => Some(SpacingToken::Sm),
            "md" => Some(SpacingToken::Md),
            "lg" => Some(SpacingToken::Lg),
            "xl" => Some(SpacingToken::Xl),
            _ => None,
        }
    }
}

/// Corner radius token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusToken {
    None,
    Sm,
    Md,
    Lg,
}

impl RadiusToken {
    /// Pixel value of this token.
    pub fn px(self) -> f32 {
        match self {
            RadiusToken::None => 0.0,
            RadiusToken::Sm => 4.0,
            RadiusToken::Md => 8.0,
            RadiusToken::Lg => 16.0,
        }
    }

    /// Parse a radius keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(RadiusToken::None),
            "sm" => Some(RadiusToken::Sm),
            "md" => Some(RadiusToken::Md),
            "lg" => Some(RadiusToken::Lg),
            _ => None,
        }
    }
}

/// Stroke weight token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWeight {
    Hairline,
    Normal,
    Bold,
}

impl StrokeWeight {
    /// Parse a stroke keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "hairline" => Some(StrokeWeight::Hairline),
            "normal" => Some(StrokeWeight::Normal),
            "bold" => Some(StrokeWeight::Bold),
            _ => None,
        }
    }
}

/// A screen and its root container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrScreen {
    pub id: String,
    pub name: String,
    /// Optional per-screen viewport override. The source grammar cannot
    /// express one today; the field is part of the versioned contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub root: NodeId,
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One normalized node: a container or a component leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IrNode {
    Container {
        id: NodeId,
        layout: LayoutSpec,
        #[serde(default, skip_serializing_if = "Style::is_default")]
        style: Style,
        children: Vec<ChildRef>,
        #[serde(
            rename = "sourceSpan",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        source_span: Option<Span>,
    },
    Component {
        id: NodeId,
        component: ComponentSpec,
        #[serde(default, skip_serializing_if = "Style::is_default")]
        style: Style,
        #[serde(
            rename = "sourceSpan",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        source_span: Option<Span>,
    },
}

impl IrNode {
    /// This node's stable id.
    pub fn id(&self) -> &str {
        match self {
            IrNode::Container { id, .. } => id,
            IrNode::Component { id, .. } => id,
        }
    }

    /// This node's sizing style.
    pub fn style(&self) -> &Style {
        match self {
            IrNode::Container { style, .. } => style,
            IrNode::Component { style, .. } => style,
        }
    }

    /// Child references, empty for component leaves.
    pub fn children(&self) -> &[ChildRef] {
        match self {
            IrNode::Container { children, .. } => children,
            IrNode::Component { .. } => &[],
        }
    }
}

/// A container's reference to a child node, with its slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRef {
    pub slot: Slot,
    pub node: NodeId,
}

/// The named relationship by which a container references a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Ordinary child of a stack, card, panel, or cell
    Child,
    /// Sidebar child of a split
    Left,
    /// Main child of a split
    Right,
    /// Cell of a grid
    Cell,
}

/// Per-node sizing overrides.
///
/// `None` means "container decides": content-sized on the main axis,
/// full-width/height on a stack's cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Size>,
}

impl Style {
    /// True when no override is set (used to omit the field when serialized).
    pub fn is_default(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Sizing policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum Size {
    /// Use the pixel value verbatim
    Fixed(f32),
    /// Consume remaining space on the parent's main axis
    Fill,
    /// Use the node's intrinsic size
    Content,
    /// Percentage of the parent's resolved dimension
    Percent(f32),
}

/// Layout algorithm and resolved parameters of a container.
///
/// Property bags from the source become these closed variants at
/// normalization; a misspelled or unknown parameter is a compile error,
/// never a silently ignored key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutSpec {
    Stack {
        direction: Direction,
        gap: f32,
        padding: f32,
        align: Align,
        justify: Justify,
    },
    Grid {
        columns: u32,
        gap: f32,
        padding: f32,
        #[serde(rename = "rowHeight", default, skip_serializing_if = "Option::is_none")]
        row_height: Option<f32>,
    },
    Split {
        sidebar: f32,
        gap: f32,
        padding: f32,
    },
    Panel {
        padding: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    Card {
        padding: f32,
        gap: f32,
        /// Visual metadata only; never affects geometry
        radius: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    /// A grid cell. Structural (produced by `cell { ... }`), not part of
    /// the user-facing layout catalog.
    Cell { span: u32, gap: f32 },
}

impl LayoutSpec {
    /// The subtype slug used in node ids (`stack`, `grid`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            LayoutSpec::Stack { .. } => "stack",
            LayoutSpec::Grid { .. } => "grid",
            LayoutSpec::Split { .. } => "split",
            LayoutSpec::Panel { .. } => "panel",
            LayoutSpec::Card { .. } => "card",
            LayoutSpec::Cell { .. } => "cell",
        }
    }
}

/// Stack main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

/// Cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

/// Main-axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Start,
    Center,
    End,
    Between,
}

/// Button emphasis variant (visual metadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Ghost,
    Danger,
}

/// Chart flavor (visual metadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
}

/// A built-in component leaf with its typed, validated properties.
///
/// One variant per catalog entry. Renderers map the serialized
/// `componentType` tag plus geometry to drawing primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "componentType")]
pub enum ComponentSpec {
    Heading { text: String, level: u8 },
    Text { text: String },
    Paragraph { text: String },
    Label { text: String },
    Link { text: String },
    Button { label: String, variant: ButtonVariant },
    IconButton { icon: String },
    Input { placeholder: String },
    TextArea { placeholder: String, rows: u32 },
    Select { placeholder: String },
    Checkbox { label: String, checked: bool },
    Radio { label: String, checked: bool },
    Switch { label: String, on: bool },
    Slider { min: f64, max: f64, value: f64 },
    SearchBar { placeholder: String },
    Image { src: String },
    Avatar { name: String },
    Icon { name: String },
    Badge { text: String },
    Tag { text: String },
    Divider {},
    Spacer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f32>,
    },
    Table { columns: Vec<String>, rows: u32 },
    List { items: u32 },
    Tabs { tabs: Vec<String> },
    Breadcrumbs { path: Vec<String> },
    Progress { value: f64 },
    Chart { chart: ChartKind },
}

impl ComponentSpec {
    /// The catalog name of this component kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentSpec::Heading { .. } => "Heading",
            ComponentSpec::Text { .. } => "Text",
            ComponentSpec::Paragraph { .. } => "Paragraph",
            ComponentSpec::Label { .. } => "Label",
            ComponentSpec::Link { .. } => "Link",
            ComponentSpec::Button { .. } => "Button",
            ComponentSpec::IconButton { .. } => "IconButton",
            ComponentSpec::Input { .. } => "Input",
            ComponentSpec::TextArea { .. } => "TextArea",
            ComponentSpec::Select { .. } => "Select",
            ComponentSpec::Checkbox { .. } => "Checkbox",
            ComponentSpec::Radio { .. } => "Radio",
            ComponentSpec::Switch { .. } => "Switch",
            ComponentSpec::Slider { .. } => "Slider",
            ComponentSpec::SearchBar { .. } => "SearchBar",
            ComponentSpec::Image { .. } => "Image",
            ComponentSpec::Avatar { .. } => "Avatar",
            ComponentSpec::Icon { .. } => "Icon",
            ComponentSpec::Badge { .. } => "Badge",
            ComponentSpec::Tag { .. } => "Tag",
            ComponentSpec::Divider {} => "Divider",
            ComponentSpec::Spacer { .. } => "Spacer",
            ComponentSpec::Table { .. } => "Table",
            ComponentSpec::List { .. } => "List",
            ComponentSpec::Tabs { .. } => "Tabs",
            ComponentSpec::Breadcrumbs { .. } => "Breadcrumbs",
            ComponentSpec::Progress { .. } => "Progress",
            ComponentSpec::Chart { .. } => "Chart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_token_table() {
        assert_eq!(SpacingToken::Xs.px(), 4.0);
        assert_eq!(SpacingToken::Sm.px(), 8.0);
        assert_eq!(SpacingToken::Md.px(), 16.0);
        assert_eq!(SpacingToken::Lg.px(), 24.0);
        assert_eq!(SpacingToken::Xl.px(), 32.0);
    }

    #[test]
    fn test_theme_defaults() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.density, Density::Normal);
        assert_eq!(theme.spacing, SpacingToken::Md);
        assert_eq!(theme.radius, RadiusToken::Md);
        assert_eq!(theme.stroke, StrokeWeight::Normal);
        assert_eq!(theme.font, "base");
    }

    #[test]
    fn test_node_serialization_is_tagged() {
        let node = IrNode::Component {
            id: "component-heading-0".to_string(),
            component: ComponentSpec::Heading {
                text: "Hi".to_string(),
                level: 1,
            },
            style: Style::default(),
            source_span: None,
        };

        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["kind"], "component");
        assert_eq!(json["component"]["componentType"], "Heading");
        assert_eq!(json["component"]["text"], "Hi");
        // Default style is omitted from the wire form
        assert!(json.get("style").is_none());
    }

    #[test]
    fn test_layout_spec_serialization() {
        let spec = LayoutSpec::Split {
            sidebar: 260.0,
            gap: 16.0,
            padding: 0.0,
        };
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["type"], "split");
        assert_eq!(json["sidebar"], 260.0);
    }

    #[test]
    fn test_size_serialization() {
        let json = serde_json::to_value(Size::Percent(50.0)).expect("serialize");
        assert_eq!(json["mode"], "percent");
        assert_eq!(json["value"], 50.0);

        let json = serde_json::to_value(Size::Fill).expect("serialize");
        assert_eq!(json["mode"], "fill");
    }

    #[test]
    fn test_document_round_trip() {
        let doc = IrDocument {
            ir_version: IR_VERSION.to_string(),
            project: IrProject {
                id: "project-t".to_string(),
                name: "T".to_string(),
                config: ProjectConfig::default(),
                screens: vec![IrScreen {
                    id: "screen-main-0".to_string(),
                    name: "Main".to_string(),
                    viewport: None,
                    root: "layout-stack-0".to_string(),
                }],
                nodes: IndexMap::new(),
            },
        };

        let json = serde_json::to_string(&doc).expect("serialize");
        assert!(json.contains("\"irVersion\":\"1\""));
        let back: IrDocument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, doc);
    }
}
