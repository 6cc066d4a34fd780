// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for the wireframe description
//! language.
//!
//! The parser is reentrant: all state lives in the [`parser::TokenStream`]
//! value constructed per call, so independent documents can be parsed
//! concurrently with no locking.

pub mod parser;

pub use parser::{parse_document, ParseError, ParseErrorKind};

// Re-export lexer
pub use wireframe_lexer::{tokenize, LexError, Token};
