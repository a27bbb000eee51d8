use crate::{
    ast::{Block, ElseBranch, IfChain, Statement},
    error::Expected,
    interpreter::{
        lexer::token::TokenKind,
        parser::{
            core::{ParseResult, parse_expression},
            cursor::TokenCursor,
            statement::parse_statement,
            utils::parse_identifier,
        },
    },
};

/// Parses a braced block of statements.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if a brace is missing or a statement is malformed.
/// Function definitions inside the block are rejected by
/// [`parse_statement`].
pub fn parse_block(cursor: &mut TokenCursor) -> ParseResult<Block> {
    let open = cursor.expect(TokenKind::LeftBrace)?;
    let line = cursor.line_of(open);
    let mut statements = Vec::new();

    while !cursor.match_if(TokenKind::RightBrace) {
        if cursor.is_at_end() {
            return Err(cursor.error(Expected::Token(TokenKind::RightBrace)));
        }
        statements.push(parse_statement(cursor)?);
    }

    Ok(Block { statements, line })
}

/// Parses an `if` chain with any number of `else if` links and an optional
/// `else`.
///
/// Syntax:
/// ```text
///     if <condition> [then] { ... }
///     else if <condition> [then] { ... }
///     else { ... }
/// ```
/// `otherwise` and `otherwise if` are accepted as synonyms. Each `else if`
/// becomes a nested [`IfChain`].
///
/// # Parameters
/// - `cursor`: Token cursor positioned after the `if` or `else if` keyword.
/// - `line`: Line number of that keyword.
pub fn parse_if(cursor: &mut TokenCursor, line: usize) -> ParseResult<IfChain> {
    let condition = parse_expression(cursor)?;
    cursor.match_if(TokenKind::Then);
    let body = parse_block(cursor)?;

    let otherwise = match cursor.peek() {
        Some(TokenKind::ElseIf) => {
            let line = cursor.line();
            cursor.advance();
            Some(Box::new(ElseBranch::ElseIf(parse_if(cursor, line)?)))
        },
        Some(TokenKind::Else) => {
            cursor.advance();
            // `else` and `if` on separate lines still chain.
            if cursor.peek() == Some(TokenKind::If) {
                let line = cursor.line();
                cursor.advance();
                Some(Box::new(ElseBranch::ElseIf(parse_if(cursor, line)?)))
            } else {
                Some(Box::new(ElseBranch::Else(parse_block(cursor)?)))
            }
        },
        _ => None,
    };

    Ok(IfChain { condition,
                 body,
                 otherwise,
                 line })
}

/// Parses `while <condition> { ... }` after the `while` keyword.
pub fn parse_while(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let condition = parse_expression(cursor)?;
    let body = parse_block(cursor)?;
    Ok(Statement::While { condition, body, line })
}

/// Parses `repeat <count> times { ... }` after the `repeat` keyword.
pub fn parse_repeat(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let count = parse_expression(cursor)?;
    cursor.expect(TokenKind::Times)?;
    let body = parse_block(cursor)?;
    Ok(Statement::Repeat { count, body, line })
}

/// Parses a `try`/`catch` statement after the `try` keyword.
///
/// Syntax:
/// ```text
///     try { ... } catch { ... }
///     try { ... } catch message { ... }
///     try { ... } catch (string message) { ... }
/// ```
/// The optional variable receives the error message and is always a string.
pub fn parse_try(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let try_block = parse_block(cursor)?;
    cursor.expect(TokenKind::Catch)?;

    let catch_variable = match cursor.peek() {
        Some(TokenKind::LeftParen) => {
            cursor.advance();
            if cursor.peek() != Some(TokenKind::Identifier) {
                cursor.expect(TokenKind::StringType)?;
            }
            let name = parse_identifier(cursor)?;
            cursor.expect(TokenKind::RightParen)?;
            Some(name)
        },
        Some(TokenKind::Identifier) => Some(parse_identifier(cursor)?),
        _ => None,
    };

    let catch_block = parse_block(cursor)?;
    Ok(Statement::TryCatch { try_block,
                             catch_variable,
                             catch_block,
                             line })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::{
        ast::Expr,
        error::{Highlight, ParseError},
        interpreter::lexer::tokenize,
    };

    fn parse(source: &str) -> ParseResult<Statement> {
        let lines: Vec<&str> = source.lines().collect();
        let stream = tokenize(&lines).unwrap();
        parse_statement(&mut TokenCursor::new(&stream))
    }

    #[test]
    fn else_if_chain_is_linked() {
        let statement = parse(indoc! {r#"
            if x is 1 then {
                print("one")
            } else if x is 2 {
                print("two")
            } otherwise if x is 3 {
                print("three")
            } else {
                print("many")
            }
        "#}).unwrap();

        let Statement::If(first) = statement else {
            panic!("expected if statement");
        };
        let Some(ElseBranch::ElseIf(second)) = first.otherwise.as_deref() else {
            panic!("expected else if");
        };
        assert_eq!(second.line, 3);
        let Some(ElseBranch::ElseIf(third)) = second.otherwise.as_deref() else {
            panic!("expected otherwise if");
        };
        let Some(ElseBranch::Else(last)) = third.otherwise.as_deref() else {
            panic!("expected else");
        };
        assert_eq!(last.statements.len(), 1);
    }

    #[test]
    fn else_and_if_on_separate_lines_still_chain() {
        let statement = parse(indoc! {"
            if a { }
            else
            if b { }
        "}).unwrap();
        let Statement::If(chain) = statement else {
            panic!("expected if statement");
        };
        assert!(matches!(chain.otherwise.as_deref(), Some(ElseBranch::ElseIf(_))));
    }

    #[test]
    fn repeat_requires_times() {
        let error = parse("repeat 3 { }").unwrap_err();
        assert_eq!(error,
                   ParseError::UnexpectedToken { expected:  Expected::Token(TokenKind::Times),
                                                 found:     TokenKind::LeftBrace,
                                                 text:      "{".to_string(),
                                                 line:      1,
                                                 column:    10,
                                                 highlight: Highlight::Current, });
    }

    #[test]
    fn repeat_count_is_an_expression() {
        let Statement::Repeat { count, .. } = parse("repeat n - 1 times { }").unwrap() else {
            panic!("expected repeat");
        };
        assert!(matches!(count, Expr::Math { .. }));
    }

    #[test]
    fn catch_variable_forms() {
        for source in ["try { } catch message { }", "try { } catch (message) { }", "try { } catch (text message) { }"] {
            let Statement::TryCatch { catch_variable, .. } = parse(source).unwrap() else {
                panic!("expected try/catch");
            };
            assert_eq!(catch_variable.as_deref(), Some("message"));
        }

        let Statement::TryCatch { catch_variable, .. } = parse("try { } catch { }").unwrap() else {
            panic!("expected try/catch");
        };
        assert_eq!(catch_variable, None);
    }

    #[test]
    fn unclosed_block_reports_missing_brace() {
        let error = parse("while true {\n print(1)").unwrap_err();
        assert_eq!(error,
                   ParseError::UnexpectedEndOfInput { expected: Expected::Token(TokenKind::RightBrace),
                                                      line:     2, });
    }
}
