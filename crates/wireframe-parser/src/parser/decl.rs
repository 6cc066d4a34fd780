//! Grammar rules (keyword-dispatched).
//!
//! Each project-level item is parsed by its own function; on failure inside
//! an item the error is recorded and the stream synchronizes to the next
//! item-starting keyword so the rest of the document is still checked.

use super::{ParseError, TokenStream};
use std::rc::Rc;
use wireframe_ast::cst::{
    RawBlock, RawCell, RawComponent, RawDefine, RawDocument, RawItem, RawLayout, RawNode,
    RawProject, RawProperty, RawScreen, RawValue,
};
use wireframe_lexer::Token;

/// Parse a whole document: one project declaration.
pub fn parse_document(stream: &mut TokenStream) -> Result<RawDocument, Vec<ParseError>> {
    let mut errors = Vec::new();

    let project = parse_project(stream, &mut errors);

    if errors.is_empty() && !stream.at_end() {
        errors.push(ParseError::unexpected_token(
            stream.peek(),
            "after project declaration",
            stream.current_span(),
        ));
    }

    match (project, errors.is_empty()) {
        (Some(project), true) => Ok(RawDocument { project }),
        _ => {
            if errors.is_empty() {
                // Unreachable in practice: a missing project always records
                // an error above.
                errors.push(ParseError::invalid_syntax(
                    "empty document",
                    stream.current_span(),
                ));
            }
            Err(errors)
        }
    }
}

/// Parse `project STRING { item* }`, collecting item errors.
fn parse_project(stream: &mut TokenStream, errors: &mut Vec<ParseError>) -> Option<RawProject> {
    let start = stream.current_pos();

    if let Err(e) = stream.expect(Token::Project) {
        errors.push(e);
        return None;
    }

    let name = match parse_string(stream, "as project name") {
        Ok(name) => name,
        Err(e) => {
            errors.push(e);
            return None;
        }
    };

    if let Err(e) = stream.expect(Token::LBrace) {
        errors.push(e);
        return None;
    }

    let mut items = Vec::new();

    loop {
        let next = stream.peek().cloned();
        match next {
            None => {
                errors.push(ParseError::unexpected_token(
                    None,
                    "in project body (missing '}')",
                    stream.current_span(),
                ));
                break;
            }
            Some(Token::RBrace) => {
                stream.advance();
                break;
            }
            Some(Token::Theme) | Some(Token::Tokens) => match parse_prop_block(stream) {
                Ok(block) => items.push(RawItem::Theme(block)),
                Err(e) => {
                    errors.push(e);
                    stream.synchronize();
                }
            },
            Some(Token::Colors) => match parse_prop_block(stream) {
                Ok(block) => items.push(RawItem::Colors(block)),
                Err(e) => {
                    errors.push(e);
                    stream.synchronize();
                }
            },
            Some(Token::Mocks) => match parse_prop_block(stream) {
                Ok(block) => items.push(RawItem::Mocks(block)),
                Err(e) => {
                    errors.push(e);
                    stream.synchronize();
                }
            },
            Some(Token::Define) => match parse_define(stream) {
                Ok(define) => items.push(RawItem::Define(define)),
                Err(e) => {
                    errors.push(e);
                    stream.synchronize();
                }
            },
            Some(Token::Screen) => match parse_screen(stream) {
                Ok(screen) => items.push(RawItem::Screen(screen)),
                Err(e) => {
                    errors.push(e);
                    stream.synchronize();
                }
            },
            Some(_) => {
                errors.push(ParseError::unexpected_token(
                    stream.peek(),
                    "in project body",
                    stream.current_span(),
                ));
                stream.advance();
                stream.synchronize();
            }
        }
    }

    Some(RawProject {
        name,
        items,
        span: stream.span_from(start),
    })
}

/// Parse `('theme'|'tokens'|'colors'|'mocks') { property* }`.
///
/// The caller has already dispatched on the keyword; this consumes it.
fn parse_prop_block(stream: &mut TokenStream) -> Result<RawBlock, ParseError> {
    let start = stream.current_pos();
    stream.advance(); // block keyword
    stream.expect(Token::LBrace)?;

    let mut entries = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::RBrace) => {
                stream.advance();
                break;
            }
            Some(Token::Ident(_)) => entries.push(parse_property(stream)?),
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in property block (expected 'key: value' or '}')",
                    stream.current_span(),
                ));
            }
        }
    }

    Ok(RawBlock {
        entries,
        span: stream.span_from(start),
    })
}

/// Parse `define component NAME { node }`.
///
/// The body holds exactly one root node (a layout or a component).
fn parse_define(stream: &mut TokenStream) -> Result<RawDefine, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Define)?;
    stream.expect(Token::Component)?;

    let name = parse_name(stream, "as definition name")?;

    stream.expect(Token::LBrace)?;

    let body = match stream.peek() {
        Some(Token::Layout) => RawNode::Layout(parse_layout(stream)?),
        Some(Token::Component) => RawNode::Component(parse_component(stream)?),
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in definition body (expected a layout or component)",
            stream.current_span(),
            ));
        }
    };

    stream.expect(Token::RBrace)?;

    Ok(RawDefine {
        name,
        body,
        span: stream.span_from(start),
    })
}

/// Parse `screen NAME { layout }`.
fn parse_screen(stream: &mut TokenStream) -> Result<RawScreen, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Screen)?;

    let name = parse_name(stream, "as screen name")?;

    stream.expect(Token::LBrace)?;

    if !matches!(stream.peek(), Some(Token::Layout)) {
        return Err(ParseError::invalid_syntax(
            "screen body must be a single root layout",
            stream.current_span(),
        ));
    }
    let root = parse_layout(stream)?;

    stream.expect(Token::RBrace)?;

    Ok(RawScreen {
        name,
        root,
        span: stream.span_from(start),
    })
}

/// Parse `layout IDENT paramList? { (component|layout|cell)* }`.
fn parse_layout(stream: &mut TokenStream) -> Result<RawLayout, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Layout)?;

    let layout_type = parse_ident(stream, "as layout type")?;

    let mut params = Vec::new();
    if matches!(stream.peek(), Some(Token::LParen)) {
        stream.advance();
        params.push(parse_property(stream)?);
        while matches!(stream.peek(), Some(Token::Comma)) {
            stream.advance();
            params.push(parse_property(stream)?);
        }
        stream.expect(Token::RParen)?;
    }

    stream.expect(Token::LBrace)?;

    let mut children = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::RBrace) => {
                stream.advance();
                break;
            }
            Some(Token::Component) => children.push(RawNode::Component(parse_component(stream)?)),
            Some(Token::Layout) => children.push(RawNode::Layout(parse_layout(stream)?)),
            Some(Token::Cell) => children.push(RawNode::Cell(parse_cell(stream)?)),
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in layout body (expected component, layout, cell, or '}')",
                    stream.current_span(),
                ));
            }
        }
    }

    Ok(RawLayout {
        layout_type,
        params,
        children,
        span: stream.span_from(start),
    })
}

/// Parse `cell property* { (component|layout)* }`.
fn parse_cell(stream: &mut TokenStream) -> Result<RawCell, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Cell)?;

    let mut props = Vec::new();
    while at_property(stream) {
        props.push(parse_property(stream)?);
    }

    stream.expect(Token::LBrace)?;

    let mut children = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::RBrace) => {
                stream.advance();
                break;
            }
            Some(Token::Component) => children.push(RawNode::Component(parse_component(stream)?)),
            Some(Token::Layout) => children.push(RawNode::Layout(parse_layout(stream)?)),
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in cell body (cells hold components and layouts)",
                    stream.current_span(),
                ));
            }
        }
    }

    Ok(RawCell {
        props,
        children,
        span: stream.span_from(start),
    })
}

/// Parse `component IDENT property*`.
///
/// Components have no braces; properties run until the next token is not
/// an `IDENT ':'` pair.
fn parse_component(stream: &mut TokenStream) -> Result<RawComponent, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Component)?;

    let component_type = parse_ident(stream, "as component type")?;

    let mut props = Vec::new();
    while at_property(stream) {
        props.push(parse_property(stream)?);
    }

    Ok(RawComponent {
        component_type,
        props,
        span: stream.span_from(start),
    })
}

/// Parse `IDENT ':' (STRING|NUMBER|IDENT)`.
fn parse_property(stream: &mut TokenStream) -> Result<RawProperty, ParseError> {
    let start = stream.current_pos();

    let key = parse_ident(stream, "as property key")?;
    stream.expect(Token::Colon)?;

    let value = match stream.peek() {
        Some(Token::String(s)) => {
            let value = RawValue::Str(s.clone());
            stream.advance();
            value
        }
        Some(Token::Number(n)) => {
            let value = RawValue::Num(*n);
            stream.advance();
            value
        }
        Some(Token::Ident(k)) => {
            let value = RawValue::Ident(k.clone());
            stream.advance();
            value
        }
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "as property value (expected string, number, or identifier)",
                stream.current_span(),
            ));
        }
    };

    Ok(RawProperty {
        key,
        value,
        span: stream.span_from(start),
    })
}

/// True if the stream is positioned at an `IDENT ':'` property.
///
/// One token of extra lookahead; this is the only place the grammar is
/// not LL(1).
fn at_property(stream: &TokenStream) -> bool {
    matches!(stream.peek(), Some(Token::Ident(_))) && matches!(stream.peek_nth(1), Some(Token::Colon))
}

/// Parse an identifier, cloning its name.
fn parse_ident(stream: &mut TokenStream, context: &str) -> Result<Rc<str>, ParseError> {
    match stream.peek() {
        Some(Token::Ident(name)) => {
            let name = name.clone();
            stream.advance();
            Ok(name)
        }
        other => Err(ParseError::unexpected_token(
            other,
            context,
            stream.current_span(),
        )),
    }
}

/// Parse a string literal.
fn parse_string(stream: &mut TokenStream, context: &str) -> Result<Rc<str>, ParseError> {
    match stream.peek() {
        Some(Token::String(s)) => {
            let s = s.clone();
            stream.advance();
            Ok(s)
        }
        other => Err(ParseError::unexpected_token(
            other,
            context,
            stream.current_span(),
        )),
    }
}

/// Parse a name that may be written as an identifier or a string literal.
fn parse_name(stream: &mut TokenStream, context: &str) -> Result<Rc<str>, ParseError> {
    match stream.peek() {
        Some(Token::Ident(name)) => {
            let name = name.clone();
            stream.advance();
            Ok(name)
        }
        Some(Token::String(name)) => {
            let name = name.clone();
            stream.advance();
            Ok(name)
        }
        other => Err(ParseError::unexpected_token(
            other,
            context,
            stream.current_span(),
        )),
    }
}
