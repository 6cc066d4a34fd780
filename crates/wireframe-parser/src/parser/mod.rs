//! Recursive descent parser over the wireframe token stream.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead and span tracking
//! - `error`: ParseError and recovery mechanisms
//! - `decl`: grammar rules (keyword-dispatched)
//!
//! ## Grammar
//!
//! ```text
//! document  := project
//! project   := 'project' STRING '{' item* '}'
//! item      := themeDecl | colorsDecl | mocksDecl | defineDecl | screen
//! themeDecl := ('theme'|'tokens') '{' property* '}'
//! defineDecl:= 'define' 'component' (STRING|IDENT) '{' node '}'
//! screen    := 'screen' (IDENT|STRING) '{' layout '}'
//! layout    := 'layout' IDENT paramList? '{' (component|layout|cell)* '}'
//! paramList := '(' property (',' property)* ')'
//! cell      := 'cell' property* '{' (component|layout)* '}'
//! component := 'component' IDENT property*
//! property  := IDENT ':' (STRING|NUMBER|IDENT)
//! ```
//!
//! Keyword-prefixed rules keep this LL(1) except for component properties,
//! which need one extra token of lookahead (`IDENT ':'`).
//!
//! On a structural mismatch inside a project item the parser records the
//! error and synchronizes to the next item-starting keyword, so one broken
//! screen does not hide errors in another.

mod decl;
mod error;
mod stream;

pub use error::{ParseError, ParseErrorKind};
pub use stream::TokenStream;

use std::ops::Range;
use wireframe_ast::cst::RawDocument;
use wireframe_lexer::Token;

/// Parse a token stream into a document.
///
/// # Parameters
/// - `tokens`: tokens with their byte ranges, as produced by
///   [`wireframe_lexer::tokenize`]
/// - `file_id`: file identifier for span tracking
///
/// # Returns
/// The parsed document, or every parse error found in one pass.
pub fn parse_document(
    tokens: &[(Token, Range<usize>)],
    file_id: u16,
) -> Result<RawDocument, Vec<ParseError>> {
    let mut stream = TokenStream::new(tokens, file_id);
    decl::parse_document(&mut stream)
}
