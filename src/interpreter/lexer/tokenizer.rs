use super::{
    keywords::KeywordTrie,
    scanner::{Lexeme, LexemeCategory},
    token::{Token, TokenKind},
};

/// Turns lexemes into tokens.
///
/// Alphabetic lexemes go through the keyword trie. The longest reserved
/// phrase starting at the current lexeme wins; words read past that phrase
/// while looking for a longer one are handed back and tokenized again.
/// Lexemes that start no phrase become identifiers.
///
/// # Parameters
/// - `lines`: The source lines the lexemes point into.
/// - `lexemes`: The scanner output.
/// - `keywords`: The reserved phrase trie.
///
/// # Returns
/// The tokens in source order.
pub fn resolve<S>(lines: &[S], lexemes: &[Lexeme], keywords: &KeywordTrie) -> Vec<Token>
    where S: AsRef<str> {
    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut index = 0;

    while index < lexemes.len() {
        let lexeme = &lexemes[index];
        let (kind, end) = match lexeme.category {
            LexemeCategory::Alphabetic => match_phrase(lines, lexemes, index, keywords),
            LexemeCategory::Numeric => (TokenKind::Integer, index),
            LexemeCategory::Decimal => (TokenKind::Float, index),
            LexemeCategory::Textual => (TokenKind::String, index),
            LexemeCategory::Operator => (operator_kind(lexeme_text(lines, lexeme)), index),
            LexemeCategory::Delimiter => (delimiter_kind(lexeme_text(lines, lexeme)), index),
        };

        tokens.push(Token { kind,
                            lexeme_start: index,
                            lexeme_end: end });
        index = end + 1;
    }

    tokens
}

/// Finds the longest reserved phrase starting at `start`.
///
/// Returns the token kind and the index of the last lexeme it covers.
fn match_phrase<S>(lines: &[S],
                   lexemes: &[Lexeme],
                   start: usize,
                   keywords: &KeywordTrie)
                   -> (TokenKind, usize)
    where S: AsRef<str> {
    let mut best = None;
    let mut node = keywords.root();
    let mut index = start;

    loop {
        let Some(next) = keywords.walk(node, lexeme_text(lines, &lexemes[index])) else {
            break;
        };
        if let Some(kind) = keywords.kind(next) {
            best = Some((kind, index));
        }

        let continues = lexemes.get(index + 1).is_some_and(|following| {
                                                  following.category == LexemeCategory::Alphabetic
                                                  && following.line == lexemes[index].line
                                              });
        match keywords.space(next) {
            Some(space) if continues => {
                node = space;
                index += 1;
            },
            _ => break,
        }
    }

    best.unwrap_or((TokenKind::Identifier, start))
}

/// Returns the source text a lexeme covers.
pub fn lexeme_text<'a, S>(lines: &'a [S], lexeme: &Lexeme) -> &'a str
    where S: AsRef<str> {
    &lines[lexeme.line - 1].as_ref()[lexeme.start_column..lexeme.end_column]
}

fn operator_kind(symbol: &str) -> TokenKind {
    match symbol {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Multiply,
        "/" => TokenKind::Divide,
        "%" => TokenKind::Modulo,
        "^" => TokenKind::Power,
        "=" => TokenKind::Assign,
        "==" => TokenKind::Equal,
        "!=" => TokenKind::NotEqual,
        ">" => TokenKind::Greater,
        ">=" => TokenKind::GreaterEqual,
        "<" => TokenKind::Less,
        "<=" => TokenKind::LessEqual,
        "&&" => TokenKind::And,
        _ => TokenKind::Or,
    }
}

fn delimiter_kind(symbol: &str) -> TokenKind {
    match symbol {
        "(" => TokenKind::LeftParen,
        ")" => TokenKind::RightParen,
        "{" => TokenKind::LeftBrace,
        "}" => TokenKind::RightBrace,
        _ => TokenKind::Comma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::{keywords::KEYWORDS, scanner::scan};

    fn kinds(line: &str) -> Vec<TokenKind> {
        let lines = [line];
        let lexemes = scan(&lines).unwrap();
        resolve(&lines, &lexemes, &KEYWORDS).iter().map(|token| token.kind).collect()
    }

    #[test]
    fn resolves_multi_word_comparisons() {
        use TokenKind::*;
        assert_eq!(kinds("x is at least 3"), vec![Identifier, GreaterEqual, Integer]);
        assert_eq!(kinds("x is greater than or equal to y"), vec![Identifier, GreaterEqual, Identifier]);
        assert_eq!(kinds("x is not y"), vec![Identifier, NotEqual, Identifier]);
    }

    #[test]
    fn backtracks_to_longest_complete_phrase() {
        use TokenKind::*;
        // `or` is read while looking for `or equal to` and then handed back.
        assert_eq!(kinds("a is greater than b or c"),
                   vec![Identifier, Greater, Identifier, Or, Identifier]);
        assert_eq!(kinds("a is greater than or b"), vec![Identifier, Greater, Or, Identifier]);
        // `at` has no kind of its own, so only `is` survives.
        assert_eq!(kinds("a is at b"), vec![Identifier, Equal, Identifier, Identifier]);
    }

    #[test]
    fn else_if_is_one_token() {
        use TokenKind::*;
        assert_eq!(kinds("} else if x {"), vec![RightBrace, ElseIf, Identifier, LeftBrace]);
        assert_eq!(kinds("} otherwise {"), vec![RightBrace, Else, LeftBrace]);
        assert_eq!(kinds("else iffy"), vec![Else, Identifier]);
    }

    #[test]
    fn phrases_do_not_span_lines() {
        let lines = ["if x { } else", "if y { }"];
        let lexemes = scan(&lines).unwrap();
        let tokens = resolve(&lines, &lexemes, &KEYWORDS);
        assert_eq!(tokens[4].kind, TokenKind::Else);
        assert_eq!(tokens[5].kind, TokenKind::If);
    }

    #[test]
    fn token_records_lexeme_range() {
        let lines = ["x is less than 2"];
        let lexemes = scan(&lines).unwrap();
        let tokens = resolve(&lines, &lexemes, &KEYWORDS);
        assert_eq!(tokens[1],
                   Token { kind:         TokenKind::Less,
                           lexeme_start: 1,
                           lexeme_end:   3, });
        assert_eq!(tokens[2].lexeme_start, 4);
    }

    #[test]
    fn symbols_map_to_kinds() {
        use TokenKind::*;
        assert_eq!(kinds("a && b || c != d"), vec![Identifier, And, Identifier, Or, Identifier, NotEqual, Identifier]);
        assert_eq!(kinds("f(1, 2.5, \"s\")"),
                   vec![Identifier, LeftParen, Integer, Comma, Float, Comma, String, RightParen]);
        assert_eq!(kinds("x plus y mod 2"), vec![Identifier, Plus, Identifier, Modulo, Integer]);
    }
}
