//! CST → AST transform.
//!
//! A pure, total, deterministic structural pass:
//!
//! - token-level values become typed [`Value`]s
//! - property lists become declaration-ordered maps (a repeated key keeps
//!   its first position and takes the last value, like a plain map insert)
//! - the flat project item list is grouped into themes, colors, mocks,
//!   defines, and screens
//!
//! No validation happens here; semantically invalid trees pass through for
//! the normalizer to report.

use crate::ast::{Cell, Component, Define, Layout, Node, PropBlock, Project, Props, Screen, Value};
use crate::cst::{
    RawBlock, RawCell, RawComponent, RawDefine, RawDocument, RawItem, RawLayout, RawNode,
    RawProperty, RawScreen, RawValue,
};

/// Build the typed AST from a parsed document.
pub fn build(doc: RawDocument) -> Project {
    let raw = doc.project;

    let mut themes = Vec::new();
    let mut colors = Vec::new();
    let mut mocks = Vec::new();
    let mut defines = Vec::new();
    let mut screens = Vec::new();

    for item in raw.items {
        match item {
            RawItem::Theme(block) => themes.push(build_block(block)),
            RawItem::Colors(block) => colors.push(build_block(block)),
            RawItem::Mocks(block) => mocks.push(build_block(block)),
            RawItem::Define(define) => defines.push(build_define(define)),
            RawItem::Screen(screen) => screens.push(build_screen(screen)),
        }
    }

    Project {
        name: raw.name.to_string(),
        themes,
        colors,
        mocks,
        defines,
        screens,
        span: raw.span,
    }
}

fn build_block(block: RawBlock) -> PropBlock {
    PropBlock {
        entries: build_props(block.entries),
        span: block.span,
    }
}

fn build_define(define: RawDefine) -> Define {
    Define {
        name: define.name.to_string(),
        body: build_node(define.body),
        span: define.span,
    }
}

fn build_screen(screen: RawScreen) -> Screen {
    Screen {
        name: screen.name.to_string(),
        root: build_layout(screen.root),
        span: screen.span,
    }
}

fn build_node(node: RawNode) -> Node {
    match node {
        RawNode::Layout(layout) => Node::Layout(build_layout(layout)),
        RawNode::Cell(cell) => Node::Cell(build_cell(cell)),
        RawNode::Component(component) => Node::Component(build_component(component)),
    }
}

fn build_layout(layout: RawLayout) -> Layout {
    Layout {
        layout_type: layout.layout_type.to_string(),
        params: build_props(layout.params),
        children: layout.children.into_iter().map(build_node).collect(),
        span: layout.span,
    }
}

fn build_cell(cell: RawCell) -> Cell {
    Cell {
        props: build_props(cell.props),
        children: cell.children.into_iter().map(build_node).collect(),
        span: cell.span,
    }
}

fn build_component(component: RawComponent) -> Component {
    Component {
        component_type: component.component_type.to_string(),
        props: build_props(component.props),
        span: component.span,
    }
}

fn build_props(props: Vec<RawProperty>) -> Props {
    let mut map = Props::new();
    for prop in props {
        map.insert(prop.key.to_string(), build_value(prop.value));
    }
    map
}

fn build_value(value: RawValue) -> Value {
    match value {
        RawValue::Str(s) => Value::Text(s.to_string()),
        RawValue::Num(n) => Value::Number(n),
        RawValue::Ident(k) => Value::Keyword(k.to_string()),
    }
}
