//! Concrete syntax tree emitted by the parser.
//!
//! Raw nodes stay close to the token stream: property values are still
//! token-level (`Rc<str>` payloads, no coercion), project items are an
//! ordered list rather than grouped fields, and every node carries the span
//! it was parsed from. The `builder` module turns this into the typed AST.

use crate::foundation::Span;
use std::rc::Rc;

/// A parsed source file: exactly one project.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub project: RawProject,
}

/// `project "Name" { item* }`
#[derive(Debug, Clone, PartialEq)]
pub struct RawProject {
    pub name: Rc<str>,
    pub items: Vec<RawItem>,
    pub span: Span,
}

/// One project-level item, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    Theme(RawBlock),
    Colors(RawBlock),
    Mocks(RawBlock),
    Define(RawDefine),
    Screen(RawScreen),
}

/// A brace-delimited block of properties (`theme { ... }` etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub entries: Vec<RawProperty>,
    pub span: Span,
}

/// `define component Name { node }`
#[derive(Debug, Clone, PartialEq)]
pub struct RawDefine {
    pub name: Rc<str>,
    pub body: RawNode,
    pub span: Span,
}

/// `screen Name { layout ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct RawScreen {
    pub name: Rc<str>,
    pub root: RawLayout,
    pub span: Span,
}

/// A child position in a container body.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Layout(RawLayout),
    Cell(RawCell),
    Component(RawComponent),
}

/// `layout type(params)? { children }`
#[derive(Debug, Clone, PartialEq)]
pub struct RawLayout {
    pub layout_type: Rc<str>,
    pub params: Vec<RawProperty>,
    pub children: Vec<RawNode>,
    pub span: Span,
}

/// `cell prop* { children }`
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    pub props: Vec<RawProperty>,
    pub children: Vec<RawNode>,
    pub span: Span,
}

/// `component Type prop*`
#[derive(Debug, Clone, PartialEq)]
pub struct RawComponent {
    pub component_type: Rc<str>,
    pub props: Vec<RawProperty>,
    pub span: Span,
}

/// `key: value`
#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    pub key: Rc<str>,
    pub value: RawValue,
    pub span: Span,
}

/// Token-level property value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// String literal (quotes already stripped by the lexer)
    Str(Rc<str>),
    /// Numeric literal
    Num(f64),
    /// Bare identifier, treated as an enum keyword
    Ident(Rc<str>),
}
