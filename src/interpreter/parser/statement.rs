use crate::{
    ast::{Expr, Statement},
    error::{Expected, ParseError},
    interpreter::{
        lexer::token::TokenKind,
        parser::{
            block::{parse_if, parse_repeat, parse_try, parse_while},
            core::{ParseResult, parse_expression},
            cursor::TokenCursor,
            function::{peek_function_name, starts_function_definition},
            unary::starts_expression,
            utils::{parse_data_type, parse_function_call, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The first token decides the statement kind:
/// - `declare` or a data type: a variable declaration.
/// - `set`, or a name followed by `=`: an assignment.
/// - `run`, or a name followed by `(`: a call.
/// - `return`, `if`, `while`, `repeat`, `assert` or `try`.
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// - `ParseError::NestedFunctionDefinition` for a function signature, since
///   statements only appear where definitions are not allowed.
/// - `ParseError::UnexpectedToken` if no statement starts at the cursor.
pub fn parse_statement(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    if starts_function_definition(cursor) {
        let Some(token) = cursor.current() else {
            return Err(cursor.error(Expected::Statement));
        };
        return Err(ParseError::NestedFunctionDefinition { name:   peek_function_name(cursor).unwrap_or_default()
                                                                                             .to_string(),
                                                          line:   cursor.line_of(token),
                                                          column: cursor.column_of(token), });
    }

    let line = cursor.line();
    let Some(kind) = cursor.peek() else {
        return Err(cursor.error(Expected::Statement));
    };

    match kind {
        TokenKind::Declare => {
            cursor.advance();
            parse_variable_declaration(cursor, line)
        },
        kind if kind.is_data_type() => parse_variable_declaration(cursor, line),
        TokenKind::Set => {
            cursor.advance();
            parse_assignment(cursor, line, &[TokenKind::To, TokenKind::Assign])
        },
        TokenKind::Identifier => match cursor.peek_ahead(1) {
            Some(TokenKind::Assign) => parse_assignment(cursor, line, &[TokenKind::Assign]),
            Some(TokenKind::LeftParen) => Ok(Statement::FunctionCall(parse_function_call(cursor)?)),
            _ => Err(cursor.error_forward(Expected::Token(TokenKind::Assign))),
        },
        TokenKind::Run => Ok(Statement::FunctionCall(parse_function_call(cursor)?)),
        TokenKind::Return => {
            cursor.advance();
            parse_return(cursor, line)
        },
        TokenKind::If => {
            cursor.advance();
            Ok(Statement::If(parse_if(cursor, line)?))
        },
        TokenKind::While => {
            cursor.advance();
            parse_while(cursor, line)
        },
        TokenKind::Repeat => {
            cursor.advance();
            parse_repeat(cursor, line)
        },
        TokenKind::Assert => {
            cursor.advance();
            let condition = parse_expression(cursor)?;
            Ok(Statement::Assertion { condition, line })
        },
        TokenKind::Try => {
            cursor.advance();
            parse_try(cursor, line)
        },
        _ => Err(cursor.error(Expected::Statement)),
    }
}

/// Parses a variable declaration after an optional `declare` keyword.
///
/// Syntax:
/// ```text
///     declare [data_type] name [("as" | "=") expression]
///     data_type name [("as" | "=") expression]
/// ```
/// A typed declaration without initializer receives the type's default
/// value. An untyped declaration must have an initializer.
fn parse_variable_declaration(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let data_type = match cursor.peek() {
        Some(kind) if kind.is_data_type() => Some(parse_data_type(cursor)?),
        _ => None,
    };
    let name = parse_identifier(cursor)?;

    let initializer = if cursor.match_any(&[TokenKind::As, TokenKind::Assign]).is_some() {
        Some(parse_expression(cursor)?)
    } else {
        None
    };

    let value = match (initializer, data_type) {
        (Some(value), _) => value,
        (None, Some(data_type)) => Expr::Literal { value: data_type.default_literal(),
                                                   line },
        (None, None) => return Err(cursor.error(Expected::TypeOrInitializer)),
    };

    Ok(Statement::VariableDeclaration { name,
                                        data_type,
                                        value,
                                        line })
}

/// Parses `name (to | =) expression`, with the accepted separators passed
/// in by the caller.
fn parse_assignment(cursor: &mut TokenCursor,
                    line: usize,
                    separators: &[TokenKind])
                    -> ParseResult<Statement> {
    let name = parse_identifier(cursor)?;
    if cursor.match_any(separators).is_none() {
        return Err(cursor.error(Expected::Token(separators[0])));
    }
    let value = parse_expression(cursor)?;

    Ok(Statement::Assignment { name, value, line })
}

/// Parses the optional value of a `return` statement.
///
/// A value is only read if it starts on the same line as `return`, so a bare
/// `return` at the end of a line never swallows the next statement.
fn parse_return(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let has_value = cursor.current()
                          .is_some_and(|token| cursor.line_of(token) == line && starts_expression(token.kind));
    let value = if has_value {
        Some(parse_expression(cursor)?)
    } else {
        None
    };

    Ok(Statement::Return { value, line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{FunctionCall, LiteralValue},
        error::Highlight,
        interpreter::{lexer::tokenize, value::core::DataType},
    };

    fn parse_all(lines: &[&str]) -> ParseResult<Vec<Statement>> {
        let stream = tokenize(lines).unwrap();
        let mut cursor = TokenCursor::new(&stream);
        let mut statements = Vec::new();
        while !cursor.is_at_end() {
            statements.push(parse_statement(&mut cursor)?);
        }
        Ok(statements)
    }

    fn parse(source: &str) -> ParseResult<Statement> {
        parse_all(&[source]).map(|mut statements| statements.remove(0))
    }

    fn int(value: i32) -> Expr {
        Expr::Literal { value: LiteralValue::Int(value),
                        line:  1, }
    }

    #[test]
    fn declaration_forms() {
        let expected = Statement::VariableDeclaration { name:      "x".to_string(),
                                                        data_type: Some(DataType::Int),
                                                        value:     int(5),
                                                        line:      1, };
        assert_eq!(parse("declare int x as 5").unwrap(), expected);
        assert_eq!(parse("declare integer x = 5").unwrap(), expected);
        assert_eq!(parse("int x = 5").unwrap(), expected);
        assert_eq!(parse("int x as 5.").unwrap(), expected);
    }

    #[test]
    fn typed_declaration_without_initializer_gets_default() {
        assert_eq!(parse("declare text name").unwrap(),
                   Statement::VariableDeclaration { name:      "name".to_string(),
                                                    data_type: Some(DataType::String),
                                                    value:     Expr::Literal { value: LiteralValue::from(""),
                                                                               line:  1, },
                                                    line:      1, });
    }

    #[test]
    fn untyped_declaration_needs_initializer() {
        assert_eq!(parse("declare x as 5").unwrap(),
                   Statement::VariableDeclaration { name:      "x".to_string(),
                                                    data_type: None,
                                                    value:     int(5),
                                                    line:      1, });
        assert!(matches!(parse("declare x").unwrap_err(),
                         ParseError::UnexpectedEndOfInput { expected: Expected::TypeOrInitializer, .. }));
    }

    #[test]
    fn list_declarations_are_unsupported() {
        assert_eq!(parse("declare list xs").unwrap_err(),
                   ParseError::UnsupportedDataType { name:   "list".to_string(),
                                                     line:   1,
                                                     column: 9, });
    }

    #[test]
    fn assignment_forms() {
        let expected = Statement::Assignment { name:  "x".to_string(),
                                               value: int(2),
                                               line:  1, };
        assert_eq!(parse("set x to 2").unwrap(), expected);
        assert_eq!(parse("set x = 2").unwrap(), expected);
        assert_eq!(parse("x = 2").unwrap(), expected);
    }

    #[test]
    fn call_statements() {
        let expected = Statement::FunctionCall(FunctionCall { name:      "greet".to_string(),
                                                              arguments: vec![int(1), int(2)],
                                                              line:      1, });
        assert_eq!(parse("greet(1, 2)").unwrap(), expected);
        assert_eq!(parse("run greet(1 2)").unwrap(), expected);
        assert_eq!(parse("call greet(1, 2);").unwrap(), expected);
    }

    #[test]
    fn bare_identifier_is_rejected_forward() {
        let error = parse("x 5").unwrap_err();
        assert_eq!(error,
                   ParseError::UnexpectedToken { expected:  Expected::Token(TokenKind::Assign),
                                                 found:     TokenKind::Integer,
                                                 text:      "5".to_string(),
                                                 line:      1,
                                                 column:    3,
                                                 highlight: Highlight::Forward, });
    }

    #[test]
    fn return_value_must_start_on_same_line() {
        let statements = parse_all(&["return", "x = 1"]).unwrap();
        assert_eq!(statements[0],
                   Statement::Return { value: None,
                                       line:  1, });
        assert_eq!(statements.len(), 2);

        assert_eq!(parse("give 3").unwrap(),
                   Statement::Return { value: Some(int(3)),
                                       line:  1, });
    }

    #[test]
    fn nested_function_definition_is_rejected() {
        assert_eq!(parse("define int twice(int x) { }").unwrap_err(),
                   ParseError::NestedFunctionDefinition { name:   "twice".to_string(),
                                                          line:   1,
                                                          column: 1, });
    }

    #[test]
    fn unknown_statement_start() {
        assert!(matches!(parse("+ 1").unwrap_err(),
                         ParseError::UnexpectedToken { expected: Expected::Statement,
                                                       found: TokenKind::Plus,
                                                       .. }));
    }
}
