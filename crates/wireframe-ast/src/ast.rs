//! Typed abstract syntax tree.
//!
//! Produced from the CST by [`crate::builder::build`]. Values are coerced,
//! property maps are ordered, and project items are grouped by kind. No
//! validation has happened yet: structurally valid but semantically wrong
//! trees (unknown components, bad property values, macro cycles) pass
//! through unchanged for the normalizer to report.

use crate::foundation::Span;
use indexmap::IndexMap;

/// A coerced property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String literal content
    Text(String),
    /// Numeric literal
    Number(f64),
    /// Bare identifier used as an enum keyword (e.g. `vertical`, `fill`)
    Keyword(String),
}

impl Value {
    /// The number, if this value is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string content, if this value is a text literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The keyword, if this value is a bare identifier.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Value::Keyword(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable description of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "string",
            Value::Number(_) => "number",
            Value::Keyword(_) => "keyword",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Keyword(k) => write!(f, "{}", k),
        }
    }
}

/// Ordered property map with the span of its enclosing construct.
pub type Props = IndexMap<String, Value>;

/// A `theme`/`colors`/`mocks` block with declaration-ordered entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PropBlock {
    pub entries: Props,
    pub span: Span,
}

/// The whole project declaration.
///
/// Duplicate theme/colors/mocks blocks are preserved as separate entries so
/// the normalizer can report them; a valid project has at most one of each.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub themes: Vec<PropBlock>,
    pub colors: Vec<PropBlock>,
    pub mocks: Vec<PropBlock>,
    pub defines: Vec<Define>,
    pub screens: Vec<Screen>,
    pub span: Span,
}

/// A reusable component definition (`define component Name { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub name: String,
    pub body: Node,
    pub span: Span,
}

/// A screen with its single root layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub name: String,
    pub root: Layout,
    pub span: Span,
}

/// One node in a container body.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Layout(Layout),
    Cell(Cell),
    Component(Component),
}

impl Node {
    /// The span of this node, whichever variant it is.
    pub fn span(&self) -> Span {
        match self {
            Node::Layout(l) => l.span,
            Node::Cell(c) => c.span,
            Node::Component(c) => c.span,
        }
    }
}

/// A container with a layout algorithm (`layout stack(...) { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub layout_type: String,
    pub params: Props,
    pub children: Vec<Node>,
    pub span: Span,
}

/// A grid cell (`cell span: 4 { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub props: Props,
    pub children: Vec<Node>,
    pub span: Span,
}

/// A component leaf or macro reference (`component Heading text: "Hi"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub component_type: String,
    pub props: Props,
    pub span: Span,
}
