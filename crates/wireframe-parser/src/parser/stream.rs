//! Token stream wrapper for the hand-written parser.

use std::ops::Range;
use wireframe_ast::foundation::Span;
use wireframe_lexer::Token;

/// Token stream with lookahead and position tracking.
///
/// Provides methods for consuming tokens, lookahead, and span tracking.
/// Each token is paired with its byte range from the source, enabling
/// accurate error message locations.
///
/// All parser state lives here; a stream is constructed fresh per parse
/// call, keeping the parser reentrant.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
    file_id: u16,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream from tokens with their byte ranges.
    pub fn new(tokens: &'src [(Token, Range<usize>)], file_id: u16) -> Self {
        Self {
            tokens,
            pos: 0,
            file_id,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token variant.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Expect a specific token and advance if it matches.
    ///
    /// Returns an error if the token doesn't match.
    pub fn expect(&mut self, expected: Token) -> Result<Span, super::ParseError> {
        if self.check(&expected) {
            let start = self.pos;
            self.advance();
            Ok(self.span_from(start))
        } else {
            Err(super::ParseError::expected_token(
                expected,
                self.peek().cloned(),
                self.current_span(),
            ))
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Create a span from a starting position to the last consumed token.
    ///
    /// Uses actual byte offsets from the source for accurate locations.
    /// Out-of-range positions degrade to a zero-length span at the end of
    /// input rather than panicking.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = self
            .tokens
            .get(start)
            .map(|(_, span)| span.start)
            .unwrap_or_else(|| self.end_offset());

        let end_byte = if self.pos > start {
            self.tokens
                .get(self.pos - 1)
                .map(|(_, span)| span.end)
                .unwrap_or(start_byte)
        } else {
            start_byte
        };

        Span::new(self.file_id, start_byte as u32, end_byte as u32, 0)
    }

    /// Get a span for the current token (or a zero-length span at EOF).
    pub fn current_span(&self) -> Span {
        if let Some((_, span)) = self.tokens.get(self.pos) {
            Span::new(self.file_id, span.start as u32, span.end as u32, 0)
        } else {
            let end = self.end_offset();
            Span::new(self.file_id, end as u32, end as u32, 0)
        }
    }

    /// Synchronize to the next project-item keyword for error recovery.
    ///
    /// Skips tokens until we find a keyword that can start a project item,
    /// or EOF.
    pub fn synchronize(&mut self) {
        while !self.at_end() {
            match self.peek() {
                Some(tok) if tok.starts_item() => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Get the file_id for this token stream.
    pub fn file_id(&self) -> u16 {
        self.file_id
    }

    fn end_offset(&self) -> usize {
        self.tokens.last().map(|(_, span)| span.end).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireframe_lexer::tokenize;

    fn stream_of(source: &str) -> Vec<(Token, Range<usize>)> {
        tokenize(source).expect("lex failed")
    }

    #[test]
    fn test_peek_and_advance() {
        let tokens = stream_of("layout stack");
        let mut stream = TokenStream::new(&tokens, 0);

        assert_eq!(stream.peek(), Some(&Token::Layout));
        assert!(matches!(stream.peek_nth(1), Some(Token::Ident(_))));
        assert_eq!(stream.advance(), Some(&Token::Layout));
        assert!(!stream.at_end());
        stream.advance();
        assert!(stream.at_end());
        assert_eq!(stream.advance(), None);
    }

    #[test]
    fn test_expect_success_and_failure() {
        let tokens = stream_of("{ }");
        let mut stream = TokenStream::new(&tokens, 0);

        assert!(stream.expect(Token::LBrace).is_ok());
        let err = stream.expect(Token::Colon).unwrap_err();
        assert!(err.message.contains("expected"));
    }

    #[test]
    fn test_span_from_uses_byte_offsets() {
        let tokens = stream_of("screen Main");
        let mut stream = TokenStream::new(&tokens, 3);

        let start = stream.current_pos();
        stream.advance();
        stream.advance();
        let span = stream.span_from(start);
        assert_eq!(span.file_id, 3);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 11);
    }

    #[test]
    fn test_current_span_at_eof() {
        let tokens = stream_of("cell");
        let mut stream = TokenStream::new(&tokens, 0);
        stream.advance();
        let span = stream.current_span();
        assert_eq!(span.start, span.end);
        assert_eq!(span.start, 4);
    }

    #[test]
    fn test_synchronize_skips_to_item_keyword() {
        let tokens = stream_of(": , component Foo screen Main");
        let mut stream = TokenStream::new(&tokens, 0);
        stream.synchronize();
        assert_eq!(stream.peek(), Some(&Token::Screen));
    }
}
