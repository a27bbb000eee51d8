/// Reserved phrase trie.
///
/// Holds the table of reserved words and multi-word phrases and the 27-way
/// trie built from it once per process.
pub mod keywords;
/// Line scanner.
///
/// Splits source lines into categorized lexemes with `logos`. Keywords are
/// not recognized here; every word is simply alphabetic.
pub mod scanner;
/// Token kinds and token records.
pub mod token;
/// Lexeme to token resolution.
///
/// Resolves alphabetic lexemes against the keyword trie, including the
/// backtracking needed for multi-word phrases, and maps symbols to kinds.
pub mod tokenizer;

use log::{debug, trace};

use crate::error::LexError;
use keywords::KEYWORDS;
use scanner::Lexeme;
use token::Token;

/// The tokens of a program together with the text they refer to.
///
/// Tokens only store lexeme indices, so the stream keeps the lines and
/// lexemes alive for the parser to read token text and positions.
#[derive(Debug, Clone)]
pub struct TokenStream {
    lines:   Vec<String>,
    lexemes: Vec<Lexeme>,
    tokens:  Vec<Token>,
}

impl TokenStream {
    /// Returns all tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the token at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the program contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the source text of a token.
    ///
    /// Multi-word keywords return the full phrase as written, including the
    /// whitespace between the words. String tokens exclude their quotes and
    /// keep escape sequences unprocessed.
    #[must_use]
    pub fn text(&self, token: &Token) -> &str {
        let first = &self.lexemes[token.lexeme_start];
        let last = &self.lexemes[token.lexeme_end];
        &self.lines[first.line - 1][first.start_column..last.end_column]
    }

    /// Returns the 1-based line of a token.
    #[must_use]
    pub fn line(&self, token: &Token) -> usize {
        self.lexemes[token.lexeme_start].line
    }

    /// Returns the 1-based column where a token starts.
    #[must_use]
    pub fn column(&self, token: &Token) -> usize {
        self.lexemes[token.lexeme_start].start_column + 1
    }

    /// Returns the number of the last source line.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.lines.len().max(1)
    }
}

/// Converts source lines into a token stream.
///
/// Runs the scanner and then resolves the lexemes against the reserved
/// phrase trie.
///
/// # Parameters
/// - `lines`: The source, already split into lines.
///
/// # Returns
/// The token stream of the whole source.
///
/// # Errors
/// Returns the first `LexError` the scanner reports.
///
/// # Example
/// ```
/// use skimskript::interpreter::lexer::{token::TokenKind, tokenize};
///
/// let stream = tokenize(&["if x is at most 10 then {"]).unwrap();
/// let kinds: Vec<_> = stream.tokens().iter().map(|token| token.kind).collect();
/// assert_eq!(kinds,
///            vec![TokenKind::If,
///                 TokenKind::Identifier,
///                 TokenKind::LessEqual,
///                 TokenKind::Integer,
///                 TokenKind::Then,
///                 TokenKind::LeftBrace]);
/// assert_eq!(stream.text(&stream.tokens()[2]), "is at most");
/// ```
pub fn tokenize<S>(lines: &[S]) -> Result<TokenStream, LexError>
    where S: AsRef<str> {
    let lexemes = scanner::scan(lines)?;
    let tokens = tokenizer::resolve(lines, &lexemes, &KEYWORDS);
    debug!("Scanned {} lexeme(s) into {} token(s)", lexemes.len(), tokens.len());

    let stream = TokenStream { lines: lines.iter().map(|line| line.as_ref().to_string()).collect(),
                               lexemes,
                               tokens };
    for token in stream.tokens() {
        trace!("{}:{} {:?} '{}'",
               stream.line(token),
               stream.column(token),
               token.kind,
               stream.text(token));
    }

    Ok(stream)
}
