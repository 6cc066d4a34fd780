// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the wireframe description language.
//!
//! Tokenization is built on logos.
//!
//! # Design
//!
//! - `Token` — all token types (keywords, punctuation, literals, identifiers)
//! - Whitespace and `//` line comments are stripped during lexing (not tokens)
//! - Keywords are reserved: logos matches them before the generic `Ident` rule
//! - Token strings defined once in `TOKEN_STRINGS` table (single source of truth for Display)
//!
//! # Examples
//!
//! ```
//! # use wireframe_lexer::*;
//! let source = r#"project "Demo" { screen Main { layout stack { } } }"#;
//! let tokens = tokenize(source).unwrap();
//! assert!(matches!(tokens[0].0, Token::Project));
//! ```

use logos::Logos;
use std::ops::Range;
use std::rc::Rc;

/// Wireframe source token.
///
/// Token strings for keywords and punctuation are defined once in the
/// `TOKEN_STRINGS` table and indexed by discriminant for Display.
///
/// # Layout
///
/// Uses `#[repr(u16)]` to guarantee discriminant values are stable and
/// can be safely used to index into `TOKEN_STRINGS`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[repr(u16)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // line comments
pub enum Token {
    // === Keywords ===
    /// Keyword `project`
    #[token("project")]
    Project,
    /// Keyword `screen`
    #[token("screen")]
    Screen,
    /// Keyword `layout`
    #[token("layout")]
    Layout,
    /// Keyword `component`
    #[token("component")]
    Component,
    /// Keyword `cell`
    #[token("cell")]
    Cell,
    /// Keyword `theme`
    #[token("theme")]
    Theme,
    /// Keyword `tokens` (accepted alias of `theme`)
    #[token("tokens")]
    Tokens,
    /// Keyword `colors`
    #[token("colors")]
    Colors,
    /// Keyword `mocks`
    #[token("mocks")]
    Mocks,
    /// Keyword `define`
    #[token("define")]
    Define,

    // === Punctuation ===
    /// Delimiter `{`
    #[token("{")]
    LBrace,
    /// Delimiter `}`
    #[token("}")]
    RBrace,
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Punctuation `:`
    #[token(":")]
    Colon,
    /// Punctuation `,`
    #[token(",")]
    Comma,

    // === Literals ===
    /// Numeric literal, integer or decimal (e.g. 12, 0.5, 260)
    ///
    /// Lexed as f64; the language has a single numeric type.
    /// The regex guarantees a valid format, so parse can only fail on
    /// extreme magnitudes, which logos reports as a generic error token.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// String literal (e.g. "Dashboard", "Sign in")
    ///
    /// Quotes are stripped and escapes resolved during lexing.
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        let content = &s[1..s.len() - 1];
        unescape_string(content).map(|s| Rc::from(s.as_str()))
    })]
    String(Rc<str>),

    /// Identifier (e.g. stack, Heading, direction, vertical)
    ///
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),
}

/// Unescape a string literal content.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some(_) => return None, // Unsupported escape sequence
                None => return None,    // Trailing backslash
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Token string lookup table.
///
/// Maps discriminant indices to their string representation.
/// This is the single source of truth for token display strings,
/// indexed by the enum discriminant order.
///
/// NOTE: The `#[token("...")]` attributes above must match these strings.
const TOKEN_STRINGS: &[&str] = &[
    "project", "screen", "layout", "component", "cell", "theme", "tokens", "colors", "mocks",
    "define", // keywords
    "{", "}", "(", ")", ":", ",", // punctuation
];

impl Token {
    /// Get the index into TOKEN_STRINGS for simple tokens.
    ///
    /// # Safety
    ///
    /// Safe due to `#[repr(u16)]` on Token enum ensuring stable discriminants.
    fn token_string_index(&self) -> usize {
        // Safe: Token has #[repr(u16)] so discriminant values are stable
        let discriminant = unsafe { *(self as *const Token as *const u16) };
        discriminant as usize
    }

    /// True for keyword tokens that can start a project-level item.
    pub fn starts_item(&self) -> bool {
        matches!(
            self,
            Token::Theme | Token::Tokens | Token::Colors | Token::Mocks | Token::Define | Token::Screen
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Literals with data (not in TOKEN_STRINGS table)
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Ident(id) => write!(f, "{}", id),

            // Simple tokens (keywords, punctuation)
            _ => {
                let idx = self.token_string_index();
                let s = TOKEN_STRINGS
                    .get(idx)
                    .expect("BUG: token discriminant out of bounds for TOKEN_STRINGS");
                write!(f, "{}", s)
            }
        }
    }
}

/// Lexing failure: an unrecognized character in the source.
///
/// Lexing aborts on the first bad character; a partial token list is not
/// useful to any caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected character '{character}' at byte {offset}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub offset: usize,
    /// The character that could not start any token
    pub character: char,
}

impl LexError {
    /// Byte range of the offending character, for span construction.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.character.len_utf8()
    }
}

/// Tokenize a source string into (token, byte range) pairs.
///
/// Whitespace and `//` comments are discarded. Fails fast on the first
/// unrecognized character.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let character = source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError {
                    offset: span.start,
                    character,
                });
            }
        }
    }

    Ok(tokens)
}
