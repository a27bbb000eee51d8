use crate::{
    error::{Expected, Highlight, ParseError},
    interpreter::lexer::{
        TokenStream,
        token::{Token, TokenKind},
    },
};

use super::core::ParseResult;

/// A forward-only cursor over a [`TokenStream`].
///
/// All lookahead goes through [`peek`](Self::peek) and
/// [`peek_ahead`](Self::peek_ahead), so the parser never does index
/// arithmetic itself.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    stream:   &'a TokenStream,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor positioned at the first token.
    #[must_use]
    pub const fn new(stream: &'a TokenStream) -> Self {
        Self { stream,
               position: 0 }
    }

    /// Returns `true` once every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.stream.len()
    }

    /// Returns the kind of the current token.
    #[must_use]
    pub fn peek(&self) -> Option<TokenKind> {
        self.peek_ahead(0)
    }

    /// Returns the kind of the token `offset` positions after the current one.
    #[must_use]
    pub fn peek_ahead(&self, offset: usize) -> Option<TokenKind> {
        self.stream.get(self.position + offset).map(|token| token.kind)
    }

    /// Returns the current token without consuming it.
    #[must_use]
    pub fn current(&self) -> Option<&'a Token> {
        self.stream.get(self.position)
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.stream.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Consumes the current token if it has the given kind.
    pub fn match_if(&mut self, kind: TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.position += 1;
            return true;
        }
        false
    }

    /// Consumes the current token if its kind is one of `kinds`.
    ///
    /// # Returns
    /// The consumed token, or `None` if nothing matched.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        let token = self.current()?;
        if kinds.contains(&token.kind) {
            self.position += 1;
            return Some(token);
        }
        None
    }

    /// Consumes the current token, which must have the given kind.
    ///
    /// # Errors
    /// - `ParseError::UnexpectedToken` if the current token has another kind.
    /// - `ParseError::UnexpectedEndOfInput` if no tokens are left.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<&'a Token> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            },
            _ => Err(self.error(Expected::Token(kind))),
        }
    }

    /// Returns the source text of a token.
    #[must_use]
    pub fn text(&self, token: &Token) -> &'a str {
        self.stream.text(token)
    }

    /// Returns the 1-based line of a token.
    #[must_use]
    pub fn line_of(&self, token: &Token) -> usize {
        self.stream.line(token)
    }

    /// Returns the 1-based column of a token.
    #[must_use]
    pub fn column_of(&self, token: &Token) -> usize {
        self.stream.column(token)
    }

    /// Returns the line of the current token, or of the last line once the
    /// input is exhausted.
    #[must_use]
    pub fn line(&self) -> usize {
        self.current().map_or_else(|| self.stream.last_line(), |token| self.line_of(token))
    }

    /// Returns the line of the most recently consumed token.
    #[must_use]
    pub fn previous_line(&self) -> Option<usize> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.stream.get(index))
            .map(|token| self.line_of(token))
    }

    /// Builds an error for the current token.
    ///
    /// If the current token sits on a later line than the previous one, the
    /// error highlights backward: the missing piece belongs at the end of the
    /// previous line.
    #[must_use]
    pub fn error(&self, expected: Expected) -> ParseError {
        let Some(token) = self.current() else {
            return ParseError::UnexpectedEndOfInput { expected,
                                                      line: self.stream.last_line() };
        };

        let highlight = match self.previous_line() {
            Some(previous) if previous < self.line_of(token) => Highlight::Backward,
            _ => Highlight::Current,
        };
        self.error_at(token, expected, highlight)
    }

    /// Builds an error for the token after the current one, for constructs
    /// that are only rejected by what follows them.
    #[must_use]
    pub fn error_forward(&self, expected: Expected) -> ParseError {
        match self.stream.get(self.position + 1) {
            Some(token) => self.error_at(token, expected, Highlight::Forward),
            None => ParseError::UnexpectedEndOfInput { expected,
                                                       line: self.stream.last_line() },
        }
    }

    fn error_at(&self, token: &Token, expected: Expected, highlight: Highlight) -> ParseError {
        ParseError::UnexpectedToken { expected,
                                      found: token.kind,
                                      text: self.text(token).to_string(),
                                      line: self.line_of(token),
                                      column: self.column_of(token),
                                      highlight }
    }
}
