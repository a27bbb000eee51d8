use logos::Logos;

use crate::error::LexError;

/// The coarse category of a lexeme, assigned before keyword resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeCategory {
    /// Letters, digits and underscores, starting with a letter or underscore.
    Alphabetic,
    /// Digits only.
    Numeric,
    /// Digits with exactly one interior decimal point.
    Decimal,
    /// The inside of a double-quoted string.
    Textual,
    /// One known operator symbol.
    Operator,
    /// One of `( ) { } ,`.
    Delimiter,
}

/// A categorized span of one source line.
///
/// Columns are 0-based byte offsets into the line, `end_column` exclusive.
/// Textual lexemes exclude their quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    /// The lexeme's category.
    pub category:     LexemeCategory,
    /// 1-based source line.
    pub line:         usize,
    /// Offset of the first byte.
    pub start_column: usize,
    /// Offset one past the last byte.
    pub end_column:   usize,
}

/// Raw matches produced by logos for a single line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r]+")]
enum RawLexeme {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Alphabetic,
    #[regex(r"[0-9]+")]
    Numeric,
    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,
    #[regex(r#""([^"\\]|\\.)*""#)]
    Textual,
    /// Matches when the closing quote is missing, since a closed literal is
    /// always one byte longer.
    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedTextual,
    #[regex(r"[+\-*/%\^=!<>&|]+")]
    OperatorRun,
    #[regex(r"[(){},]")]
    Delimiter,
    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,
}

/// Operator symbols, longest first so runs split greedily.
const OPERATORS: [&str; 15] =
    ["==", "!=", ">=", "<=", "&&", "||", "+", "-", "*", "/", "%", "^", "=", ">", "<"];

/// Scans source lines into lexemes.
///
/// Each line is swept left to right on its own, so no lexeme spans a line
/// break. Whitespace, comments and unrecognized characters (including `.`
/// and `;`) produce no lexeme.
///
/// # Parameters
/// - `lines`: The source, already split into lines.
///
/// # Returns
/// The lexemes of all lines in source order.
///
/// # Errors
/// - `LexError::UnterminatedString` if a quote is not closed on its line.
/// - `LexError::UnknownOperator` if an operator run contains symbols that
///   form no known operator.
///
/// # Example
/// ```
/// use skimskript::interpreter::lexer::scanner::{LexemeCategory, scan};
///
/// let lexemes = scan(&["declare x as 5."]).unwrap();
/// let categories: Vec<_> = lexemes.iter().map(|lexeme| lexeme.category).collect();
/// assert_eq!(categories,
///            vec![LexemeCategory::Alphabetic,
///                 LexemeCategory::Alphabetic,
///                 LexemeCategory::Alphabetic,
///                 LexemeCategory::Numeric]);
/// ```
pub fn scan<S>(lines: &[S]) -> Result<Vec<Lexeme>, LexError>
    where S: AsRef<str> {
    let mut lexemes = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        scan_line(line.as_ref(), index + 1, &mut lexemes)?;
    }
    Ok(lexemes)
}

fn scan_line(text: &str, line: usize, lexemes: &mut Vec<Lexeme>) -> Result<(), LexError> {
    let mut lexer = RawLexeme::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let Ok(raw) = result else {
            continue;
        };

        let category = match raw {
            RawLexeme::Alphabetic => LexemeCategory::Alphabetic,
            RawLexeme::Numeric => LexemeCategory::Numeric,
            RawLexeme::Decimal => LexemeCategory::Decimal,
            RawLexeme::Delimiter => LexemeCategory::Delimiter,
            RawLexeme::Comment => break,
            RawLexeme::Textual => {
                lexemes.push(Lexeme { category:     LexemeCategory::Textual,
                                      line,
                                      start_column: span.start + 1,
                                      end_column:   span.end - 1, });
                continue;
            },
            RawLexeme::UnterminatedTextual => {
                return Err(LexError::UnterminatedString { line,
                                                          column: span.start + 1,
                                                          text: text.to_string() });
            },
            RawLexeme::OperatorRun => {
                split_operators(text, line, span.start, span.end, lexemes)?;
                continue;
            },
        };

        lexemes.push(Lexeme { category,
                              line,
                              start_column: span.start,
                              end_column: span.end });
    }

    Ok(())
}

/// Divides a run of operator symbols into the longest known operators.
fn split_operators(text: &str,
                   line: usize,
                   start: usize,
                   end: usize,
                   lexemes: &mut Vec<Lexeme>)
                   -> Result<(), LexError> {
    let mut position = start;

    while position < end {
        let rest = &text[position..end];
        let Some(operator) = OPERATORS.iter().find(|operator| rest.starts_with(**operator)) else {
            return Err(LexError::UnknownOperator { operator: rest.to_string(),
                                                   line,
                                                   column: position + 1,
                                                   text: text.to_string() });
        };

        lexemes.push(Lexeme { category:     LexemeCategory::Operator,
                              line,
                              start_column: position,
                              end_column:   position + operator.len(), });
        position += operator.len();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(lines: &[&str]) -> Vec<LexemeCategory> {
        scan(lines).unwrap().iter().map(|lexeme| lexeme.category).collect()
    }

    fn texts<'a>(line: &'a str) -> Vec<&'a str> {
        scan(&[line]).unwrap()
                     .iter()
                     .map(|lexeme| &line[lexeme.start_column..lexeme.end_column])
                     .collect()
    }

    #[test]
    fn classifies_each_category() {
        use LexemeCategory::*;
        assert_eq!(categories(&[r#"x1 42 3.5 "hi" >= ( } ,"#]),
                   vec![Alphabetic, Numeric, Decimal, Textual, Operator, Delimiter, Delimiter, Delimiter]);
    }

    #[test]
    fn trailing_point_is_not_a_decimal() {
        assert_eq!(categories(&["5."]), vec![LexemeCategory::Numeric]);
        assert_eq!(texts("1.2.3"), vec!["1.2", "3"]);
    }

    #[test]
    fn leading_digits_split_from_letters() {
        assert_eq!(texts("9lives"), vec!["9", "lives"]);
    }

    #[test]
    fn string_span_excludes_quotes() {
        assert_eq!(texts(r#"print("a \"b\" c")"#), vec!["print", "(", r#"a \"b\" c"#, ")"]);
        assert_eq!(texts(r#""""#), vec![""]);
    }

    #[test]
    fn comment_discards_rest_of_line() {
        assert_eq!(texts(r#"x = 1 # "not a string"#), vec!["x", "=", "1"]);
        assert_eq!(scan(&["# only a comment", "y"]).unwrap().len(), 1);
    }

    #[test]
    fn operator_runs_split_greedily() {
        assert_eq!(texts("x=-5"), vec!["x", "=", "-", "5"]);
        assert_eq!(texts("a>==b"), vec!["a", ">=", "=", "b"]);
        assert_eq!(texts("a&&b||c"), vec!["a", "&&", "b", "||", "c"]);
    }

    #[test]
    fn unknown_operator_is_an_error() {
        let error = scan(&["x = !y"]).unwrap_err();
        assert_eq!(error,
                   LexError::UnknownOperator { operator: "!".to_string(),
                                               line:     1,
                                               column:   5,
                                               text:     "x = !y".to_string(), });
    }

    #[test]
    fn unterminated_string_reports_line_and_text() {
        let error = scan(&["print(1)", r#"print("oops)"#]).unwrap_err();
        assert_eq!(error,
                   LexError::UnterminatedString { line:   2,
                                                  column: 7,
                                                  text:   r#"print("oops)"#.to_string(), });
    }

    #[test]
    fn unrecognized_characters_are_skipped() {
        assert_eq!(texts("set x to 1; @ $"), vec!["set", "x", "to", "1"]);
    }

    #[test]
    fn lines_are_numbered_from_one() {
        let lexemes = scan(&["a", "", "b"]).unwrap();
        assert_eq!(lexemes[0].line, 1);
        assert_eq!(lexemes[1].line, 3);
    }

    #[test]
    fn rescanning_joined_lexemes_keeps_categories() {
        let source = [r#"if x is at least 2.5 { print("a\"b", y*-3) }"#, "repeat 3 times {}"];
        let lexemes = scan(&source).unwrap();
        let joined = lexemes.iter()
                            .map(|lexeme| {
                                let text = &source[lexeme.line - 1][lexeme.start_column..lexeme.end_column];
                                if lexeme.category == LexemeCategory::Textual {
                                    format!("\"{text}\"")
                                } else {
                                    text.to_string()
                                }
                            })
                            .collect::<Vec<_>>()
                            .join(" ");

        let original: Vec<_> = lexemes.iter().map(|lexeme| lexeme.category).collect();
        assert_eq!(categories(&[joined.as_str()]), original);
    }
}
