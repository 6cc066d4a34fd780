//! The component and layout catalog.
//!
//! Converts the open property bags of the AST into the closed typed variants
//! of the IR. Every property key is consumed exactly once; keys left over
//! after conversion are unknown-property errors, so a misspelled key can
//! never be silently ignored.

use wireframe_ast::ast::{Cell, Component, Layout, Props, Value};
use wireframe_ast::foundation::Span;
use wireframe_ast::{Diagnostic, ErrorKind};

use crate::document::{
    Align, ButtonVariant, ChartKind, ComponentSpec, Direction, Justify, LayoutSpec, Size, Style,
    ThemeConfig,
};

/// Catalog component names, in display order.
pub const COMPONENT_KINDS: &[&str] = &[
    "Heading",
    "Text",
    "Paragraph",
    "Label",
    "Link",
    "Button",
    "IconButton",
    "Input",
    "TextArea",
    "Select",
    "Checkbox",
    "Radio",
    "Switch",
    "Slider",
    "SearchBar",
    "Image",
    "Avatar",
    "Icon",
    "Badge",
    "Tag",
    "Divider",
    "Spacer",
    "Table",
    "List",
    "Tabs",
    "Breadcrumbs",
    "Progress",
    "Chart",
];

/// Catalog layout names (user-facing; `cell` is structural).
pub const LAYOUT_KINDS: &[&str] = &["stack", "grid", "split", "panel", "card"];

/// True if `name` is a built-in component kind.
pub fn is_builtin_component(name: &str) -> bool {
    COMPONENT_KINDS.contains(&name)
}

/// Property bag reader.
///
/// Takes a copy of a node's props and removes keys as they are read; on
/// [`PropBag::finish`] any keys still present are reported as unknown.
struct PropBag<'a> {
    props: Props,
    span: Span,
    owner: String,
    diags: &'a mut Vec<Diagnostic>,
}

impl<'a> PropBag<'a> {
    fn new(props: &Props, span: Span, owner: impl Into<String>, diags: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            props: props.clone(),
            span,
            owner: owner.into(),
            diags,
        }
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        self.props.shift_remove(key)
    }

    fn invalid(&mut self, key: &str, expected: &str, found: &Value) {
        self.diags.push(Diagnostic::error(
            ErrorKind::InvalidPropertyValue,
            Some(self.span),
            format!(
                "{}: '{}' must be {}, found {}",
                self.owner, key, expected, found
            ),
        ));
    }

    /// Text value; string literals, keywords, and numbers all coerce.
    fn text(&mut self, key: &str, default: &str) -> String {
        match self.take(key) {
            Some(Value::Text(s)) => s,
            Some(Value::Keyword(k)) => k,
            Some(Value::Number(n)) => format_number(n),
            None => default.to_string(),
        }
    }

    /// Text value required by the catalog entry.
    fn required_text(&mut self, key: &str) -> String {
        match self.take(key) {
            Some(Value::Text(s)) => s,
            Some(Value::Keyword(k)) => k,
            Some(Value::Number(n)) => format_number(n),
            None => {
                self.diags.push(Diagnostic::error(
                    ErrorKind::MissingProperty,
                    Some(self.span),
                    format!("{} requires '{}'", self.owner, key),
                ));
                String::new()
            }
        }
    }

    fn number(&mut self, key: &str, default: f64) -> f64 {
        match self.take(key) {
            Some(Value::Number(n)) => n,
            Some(other) => {
                self.invalid(key, "a number", &other);
                default
            }
            None => default,
        }
    }

    fn required_number(&mut self, key: &str, fallback: f64) -> f64 {
        match self.take(key) {
            Some(Value::Number(n)) => n,
            Some(other) => {
                self.invalid(key, "a number", &other);
                fallback
            }
            None => {
                self.diags.push(Diagnostic::error(
                    ErrorKind::MissingProperty,
                    Some(self.span),
                    format!("{} requires '{}'", self.owner, key),
                ));
                fallback
            }
        }
    }

    /// Non-negative integer with a lower bound.
    fn count(&mut self, key: &str, min: u32, default: u32) -> u32 {
        match self.take(key) {
            Some(Value::Number(n)) if n >= min as f64 && n.fract() == 0.0 => n as u32,
            Some(other) => {
                self.invalid(key, &format!("an integer >= {}", min), &other);
                default
            }
            None => default,
        }
    }

    fn bool(&mut self, key: &str, default: bool) -> bool {
        match self.take(key) {
            Some(Value::Keyword(k)) if k == "true" => true,
            Some(Value::Keyword(k)) if k == "false" => false,
            Some(other) => {
                self.invalid(key, "'true' or 'false'", &other);
                default
            }
            None => default,
        }
    }

    /// Keyword restricted to an enumerated set, mapped through `parse`.
    fn keyword<T>(
        &mut self,
        key: &str,
        accepted: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> T {
        match self.take(key) {
            Some(Value::Keyword(k)) => match parse(&k) {
                Some(value) => value,
                None => {
                    self.invalid(key, accepted, &Value::Keyword(k));
                    default
                }
            },
            Some(other) => {
                self.invalid(key, accepted, &other);
                default
            }
            None => default,
        }
    }

    /// Comma-separated list from a string literal (`columns: "Name, Age"`).
    fn list(&mut self, key: &str) -> Option<Vec<String>> {
        match self.take(key) {
            Some(Value::Text(s)) => Some(
                s.split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect(),
            ),
            Some(other) => {
                self.invalid(key, "a comma-separated string", &other);
                Some(Vec::new())
            }
            None => None,
        }
    }

    fn required_list(&mut self, key: &str) -> Vec<String> {
        match self.list(key) {
            Some(list) => list,
            None => {
                self.diags.push(Diagnostic::error(
                    ErrorKind::MissingProperty,
                    Some(self.span),
                    format!("{} requires '{}'", self.owner, key),
                ));
                Vec::new()
            }
        }
    }

    /// A gap/padding value: a pixel number or a spacing token keyword.
    fn spacing(&mut self, key: &str, theme: &ThemeConfig, default: f32) -> f32 {
        match self.take(key) {
            Some(Value::Number(n)) => n as f32,
            Some(Value::Keyword(k)) => match crate::document::SpacingToken::from_keyword(&k) {
                Some(token) => token.px(),
                None => {
                    self.invalid(key, "a number or spacing token (xs..xl)", &Value::Keyword(k));
                    theme.spacing.px()
                }
            },
            Some(other) => {
                self.invalid(key, "a number or spacing token (xs..xl)", &other);
                default
            }
            None => default,
        }
    }

    /// A width/height sizing value.
    fn size(&mut self, key: &str) -> Option<Size> {
        match self.take(key)? {
            Value::Number(n) => Some(Size::Fixed(n as f32)),
            Value::Keyword(k) if k == "fill" => Some(Size::Fill),
            Value::Keyword(k) if k == "content" => Some(Size::Content),
            Value::Text(s) if s.ends_with('%') => match s[..s.len() - 1].trim().parse::<f32>() {
                Ok(pct) => Some(Size::Percent(pct)),
                Err(_) => {
                    self.invalid(key, "a size", &Value::Text(s));
                    None
                }
            },
            other => {
                self.invalid(key, "a number, 'fill', 'content', or \"N%\"", &other);
                None
            }
        }
    }

    /// Report every unread key as an unknown property.
    fn finish(self) {
        for key in self.props.keys() {
            self.diags.push(Diagnostic::error(
                ErrorKind::UnknownProperty,
                Some(self.span),
                format!("unknown property '{}' on {}", key, self.owner),
            ));
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Sizing overrides shared by every component and layout.
fn take_style(bag: &mut PropBag<'_>) -> Style {
    Style {
        width: bag.size("width"),
        height: bag.size("height"),
    }
}

/// Convert a component against the catalog.
///
/// Returns `None` (after recording an error) for an unknown component type;
/// property errors are recorded but still yield a spec so sibling errors in
/// the same subtree are found in one pass.
pub fn convert_component(
    component: &Component,
    diags: &mut Vec<Diagnostic>,
) -> Option<(ComponentSpec, Style)> {
    let kind = component.component_type.as_str();
    if !is_builtin_component(kind) {
        diags.push(Diagnostic::error(
            ErrorKind::UnknownComponent,
            Some(component.span),
            format!("unknown component '{}'", kind),
        ));
        return None;
    }

    let mut bag = PropBag::new(
        &component.props,
        component.span,
        format!("component '{}'", kind),
        diags,
    );
    let style = take_style(&mut bag);

    let spec = match kind {
        "Heading" => ComponentSpec::Heading {
            text: bag.required_text("text"),
            level: bag.count("level", 1, 1).min(6) as u8,
        },
        "Text" => ComponentSpec::Text {
            text: bag.required_text("text"),
        },
        "Paragraph" => ComponentSpec::Paragraph {
            text: bag.text("text", ""),
        },
        "Label" => ComponentSpec::Label {
            text: bag.required_text("text"),
        },
        "Link" => ComponentSpec::Link {
            text: bag.required_text("text"),
        },
        "Button" => ComponentSpec::Button {
            label: bag.required_text("label"),
            variant: bag.keyword(
                "variant",
                "'primary', 'secondary', 'ghost', or 'danger'",
                ButtonVariant::Primary,
                |k| match k {
                    "primary" => Some(ButtonVariant::Primary),
                    "secondary" => Some(ButtonVariant::Secondary),
                    "ghost" => Some(ButtonVariant::Ghost),
                    "danger" => Some(ButtonVariant::Danger),
                    _ => None,
                },
            ),
        },
        "IconButton" => ComponentSpec::IconButton {
            icon: bag.required_text("icon"),
        },
        "Input" => ComponentSpec::Input {
            placeholder: bag.text("placeholder", ""),
        },
        "TextArea" => ComponentSpec::TextArea {
            placeholder: bag.text("placeholder", ""),
            rows: bag.count("rows", 1, 3),
        },
        "Select" => ComponentSpec::Select {
            placeholder: bag.text("placeholder", ""),
        },
        "Checkbox" => ComponentSpec::Checkbox {
            label: bag.text("label", ""),
            checked: bag.bool("checked", false),
        },
        "Radio" => ComponentSpec::Radio {
            label: bag.text("label", ""),
            checked: bag.bool("checked", false),
        },
        "Switch" => ComponentSpec::Switch {
            label: bag.text("label", ""),
            on: bag.bool("on", false),
        },
        "Slider" => {
            let min = bag.number("min", 0.0);
            let max = bag.number("max", 100.0);
            ComponentSpec::Slider {
                min,
                max,
                value: bag.number("value", min),
            }
        }
        "SearchBar" => ComponentSpec::SearchBar {
            placeholder: bag.text("placeholder", "Search"),
        },
        "Image" => ComponentSpec::Image {
            src: bag.text("src", ""),
        },
        "Avatar" => ComponentSpec::Avatar {
            name: bag.text("name", ""),
        },
        "Icon" => ComponentSpec::Icon {
            name: bag.required_text("name"),
        },
        "Badge" => ComponentSpec::Badge {
            text: bag.required_text("text"),
        },
        "Tag" => ComponentSpec::Tag {
            text: bag.required_text("text"),
        },
        "Divider" => ComponentSpec::Divider {},
        "Spacer" => ComponentSpec::Spacer {
            size: bag.take("size").and_then(|v| match v {
                Value::Number(n) => Some(n as f32),
                other => {
                    bag.invalid("size", "a number", &other);
                    None
                }
            }),
        },
        "Table" => ComponentSpec::Table {
            columns: bag.required_list("columns"),
            rows: bag.count("rows", 0, 3),
        },
        "List" => ComponentSpec::List {
            items: bag.count("items", 0, 3),
        },
        "Tabs" => ComponentSpec::Tabs {
            tabs: bag.required_list("tabs"),
        },
        "Breadcrumbs" => ComponentSpec::Breadcrumbs {
            path: bag.required_list("path"),
        },
        "Progress" => ComponentSpec::Progress {
            value: bag.number("value", 0.0),
        },
        "Chart" => ComponentSpec::Chart {
            chart: bag.keyword(
                "chart",
                "'bar', 'line', 'pie', or 'area'",
                ChartKind::Bar,
                |k| match k {
                    "bar" => Some(ChartKind::Bar),
                    "line" => Some(ChartKind::Line),
                    "pie" => Some(ChartKind::Pie),
                    "area" => Some(ChartKind::Area),
                    _ => None,
                },
            ),
        },
        _ => unreachable!("checked against the catalog above"),
    };

    bag.finish();
    Some((spec, style))
}

/// Convert a layout container against the catalog.
pub fn convert_layout(
    layout: &Layout,
    theme: &ThemeConfig,
    diags: &mut Vec<Diagnostic>,
) -> Option<(LayoutSpec, Style)> {
    let kind = layout.layout_type.as_str();
    if !LAYOUT_KINDS.contains(&kind) {
        diags.push(Diagnostic::error(
            ErrorKind::UnknownLayout,
            Some(layout.span),
            format!("unknown layout '{}'", kind),
        ));
        return None;
    }

    let default_gap = theme.spacing.px();
    let mut bag = PropBag::new(
        &layout.params,
        layout.span,
        format!("layout '{}'", kind),
        diags,
    );
    let style = take_style(&mut bag);

    let spec = match kind {
        "stack" => LayoutSpec::Stack {
            direction: bag.keyword(
                "direction",
                "'vertical' or 'horizontal'",
                Direction::Vertical,
                |k| match k {
                    "vertical" => Some(Direction::Vertical),
                    "horizontal" => Some(Direction::Horizontal),
                    _ => None,
                },
            ),
            gap: bag.spacing("gap", theme, default_gap),
            padding: bag.spacing("padding", theme, default_gap),
            align: bag.keyword(
                "align",
                "'start', 'center', 'end', or 'stretch'",
                Align::Stretch,
                |k| match k {
                    "start" => Some(Align::Start),
                    "center" => Some(Align::Center),
                    "end" => Some(Align::End),
                    "stretch" => Some(Align::Stretch),
                    _ => None,
                },
            ),
            justify: bag.keyword(
                "justify",
                "'start', 'center', 'end', or 'between'",
                Justify::Start,
                |k| match k {
                    "start" => Some(Justify::Start),
                    "center" => Some(Justify::Center),
                    "end" => Some(Justify::End),
                    "between" => Some(Justify::Between),
                    _ => None,
                },
            ),
        },
        "grid" => {
            let columns = match bag.take("columns") {
                Some(Value::Number(n)) if n >= 1.0 && n.fract() == 0.0 => n as u32,
                Some(other) => {
                    bag.invalid("columns", "an integer >= 1", &other);
                    1
                }
                None => {
                    bag.diags.push(Diagnostic::error(
                        ErrorKind::MissingProperty,
                        Some(layout.span),
                        "layout 'grid' requires 'columns'",
                    ));
                    1
                }
            };
            LayoutSpec::Grid {
                columns,
                gap: bag.spacing("gap", theme, default_gap),
                padding: bag.spacing("padding", theme, default_gap),
                row_height: bag.take("rowHeight").and_then(|v| match v {
                    Value::Number(n) => Some(n as f32),
                    other => {
                        bag.invalid("rowHeight", "a number", &other);
                        None
                    }
                }),
            }
        }
        "split" => LayoutSpec::Split {
            sidebar: bag.required_number("sidebar", 0.0) as f32,
            gap: bag.spacing("gap", theme, default_gap),
            padding: bag.spacing("padding", theme, 0.0),
        },
        "panel" => LayoutSpec::Panel {
            padding: bag.spacing("padding", theme, default_gap),
            background: bag.take("background").and_then(|v| match v {
                Value::Text(s) => Some(s),
                Value::Keyword(k) => Some(k),
                other => {
                    bag.invalid("background", "a color name or string", &other);
                    None
                }
            }),
        },
        "card" => LayoutSpec::Card {
            padding: bag.spacing("padding", theme, default_gap),
            gap: bag.spacing("gap", theme, default_gap),
            radius: match bag.take("radius") {
                Some(Value::Number(n)) => n as f32,
                Some(Value::Keyword(k)) => match crate::document::RadiusToken::from_keyword(&k) {
                    Some(token) => token.px(),
                    None => {
                        bag.invalid("radius", "a number or radius token", &Value::Keyword(k));
                        theme.radius.px()
                    }
                },
                Some(other) => {
                    bag.invalid("radius", "a number or radius token", &other);
                    theme.radius.px()
                }
                None => theme.radius.px(),
            },
            background: bag.take("background").and_then(|v| match v {
                Value::Text(s) => Some(s),
                Value::Keyword(k) => Some(k),
                other => {
                    bag.invalid("background", "a color name or string", &other);
                    None
                }
            }),
        },
        _ => unreachable!("checked against the catalog above"),
    };

    bag.finish();
    Some((spec, style))
}

/// Convert a grid cell. `columns` is the enclosing grid's column count,
/// used for the span range check.
pub fn convert_cell(
    cell: &Cell,
    columns: u32,
    theme: &ThemeConfig,
    diags: &mut Vec<Diagnostic>,
) -> (LayoutSpec, Style) {
    let mut bag = PropBag::new(&cell.props, cell.span, "cell", diags);
    let style = take_style(&mut bag);

    let span = match bag.take("span") {
        Some(Value::Number(n)) if n >= 1.0 && n.fract() == 0.0 && n <= columns as f64 => n as u32,
        Some(other) => {
            bag.invalid("span", &format!("an integer in 1..={}", columns), &other);
            1
        }
        None => 1,
    };
    let gap = bag.spacing("gap", theme, theme.spacing.px());

    bag.finish();
    (LayoutSpec::Cell { span, gap }, style)
}
