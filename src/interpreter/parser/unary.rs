use crate::{
    ast::{Expr, LiteralValue, MathOperator},
    error::{Expected, ParseError},
    interpreter::{
        lexer::token::TokenKind,
        parser::{
            binary::math,
            core::{ParseResult, parse_expression},
            cursor::TokenCursor,
            utils::{parse_function_call, unescape},
        },
    },
};

/// Parses unary minus.
///
/// `-x` is desugared into `-1 * x`, so the evaluator never sees a unary
/// node. Minus signs nest: `--x` is `-1 * (-1 * x)`. The one exception is
/// `-2147483648`, which becomes a single literal because its magnitude does
/// not fit in an `i32`.
///
/// The rule is: `unary := "-" unary | factor`
///
/// # Parameters
/// - `cursor`: Token cursor.
///
/// # Returns
/// The parsed expression.
pub fn parse_unary(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    if let Some(token) = cursor.match_any(&[TokenKind::Minus]) {
        let line = cursor.line_of(token);
        if let Some(literal) = parse_min_integer(cursor) {
            return Ok(literal);
        }
        let operand = parse_unary(cursor)?;
        let negative_one = Expr::Literal { value: LiteralValue::Int(-1),
                                           line };
        return Ok(math(negative_one, MathOperator::Multiply, operand, line));
    }

    parse_factor(cursor)
}

/// Consumes an integer token right after a minus sign when only its
/// negation is representable, which holds for `i32::MIN` alone.
fn parse_min_integer(cursor: &mut TokenCursor) -> Option<Expr> {
    let token = cursor.current().filter(|token| token.kind == TokenKind::Integer)?;
    let magnitude = cursor.text(token).parse::<i64>().ok()?;
    if i32::try_from(magnitude).is_ok() {
        return None;
    }
    let value = i32::try_from(-magnitude).ok()?;

    let line = cursor.line_of(token);
    cursor.advance();
    Some(Expr::Literal { value: LiteralValue::Int(value),
                         line })
}

/// Parses the operands of the expression grammar.
///
/// The rule is:
/// ```text
/// factor := INT | FLOAT | STRING | "true" | "false" | IDENT
///         | ["run"] IDENT "(" args ")" | "(" expression ")"
/// ```
///
/// # Errors
/// - `ParseError::InvalidLiteral` for integer literals outside the `i32`
///   range.
/// - `ParseError::UnexpectedToken` if the token cannot start an operand.
pub fn parse_factor(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let Some(token) = cursor.current() else {
        return Err(cursor.error(Expected::Expression));
    };
    let line = cursor.line_of(token);
    let text = cursor.text(token);

    let value = match token.kind {
        TokenKind::Integer => {
            let value = text.parse::<i32>()
                            .map_err(|_| ParseError::InvalidLiteral { text:   text.to_string(),
                                                                      line,
                                                                      column: cursor.column_of(token), })?;
            LiteralValue::Int(value)
        },
        TokenKind::Float => {
            let value = text.parse::<f32>()
                            .map_err(|_| ParseError::InvalidLiteral { text:   text.to_string(),
                                                                      line,
                                                                      column: cursor.column_of(token), })?;
            LiteralValue::Float(value)
        },
        TokenKind::String => LiteralValue::String(unescape(text)),
        TokenKind::True => LiteralValue::Bool(true),
        TokenKind::False => LiteralValue::Bool(false),
        TokenKind::Run => return Ok(Expr::FunctionCall(parse_function_call(cursor)?)),
        TokenKind::Identifier if cursor.peek_ahead(1) == Some(TokenKind::LeftParen) => {
            return Ok(Expr::FunctionCall(parse_function_call(cursor)?));
        },
        TokenKind::Identifier => {
            cursor.advance();
            return Ok(Expr::Identifier { name: text.to_string(),
                                         line });
        },
        TokenKind::LeftParen => {
            cursor.advance();
            let expr = parse_expression(cursor)?;
            cursor.expect(TokenKind::RightParen)?;
            return Ok(expr);
        },
        _ => return Err(cursor.error(Expected::Expression)),
    };

    cursor.advance();
    Ok(Expr::Literal { value, line })
}

/// Returns `true` if a token of this kind can begin an expression.
#[must_use]
pub const fn starts_expression(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::Integer
             | TokenKind::Float
             | TokenKind::String
             | TokenKind::True
             | TokenKind::False
             | TokenKind::Identifier
             | TokenKind::Run
             | TokenKind::LeftParen
             | TokenKind::Minus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::FunctionCall,
        error::Highlight,
        interpreter::lexer::tokenize,
    };

    fn parse(source: &str) -> ParseResult<Expr> {
        let stream = tokenize(&[source]).unwrap();
        parse_expression(&mut TokenCursor::new(&stream))
    }

    #[test]
    fn parses_literals() {
        assert_eq!(parse("42").unwrap(),
                   Expr::Literal { value: LiteralValue::Int(42),
                                   line:  1, });
        assert_eq!(parse("2.5").unwrap(),
                   Expr::Literal { value: LiteralValue::Float(2.5),
                                   line:  1, });
        assert_eq!(parse("TRUE").unwrap(),
                   Expr::Literal { value: LiteralValue::Bool(true),
                                   line:  1, });
        assert_eq!(parse(r#""say \"hi\"""#).unwrap(),
                   Expr::Literal { value: LiteralValue::from(r#"say "hi""#),
                                   line:  1, });
    }

    #[test]
    fn integer_out_of_range_is_rejected() {
        assert_eq!(parse("2147483648").unwrap_err(),
                   ParseError::InvalidLiteral { text:   "2147483648".to_string(),
                                                line:   1,
                                                column: 1, });
        assert!(parse("2147483647").is_ok());
    }

    #[test]
    fn most_negative_integer_is_a_single_literal() {
        assert_eq!(parse("-2147483648").unwrap(),
                   Expr::Literal { value: LiteralValue::Int(i32::MIN),
                                   line:  1, });
        assert!(matches!(parse("-2147483649").unwrap_err(),
                         ParseError::InvalidLiteral { column: 2, .. }));
        assert!(matches!(parse("-5").unwrap(),
                         Expr::Math { operator: MathOperator::Multiply,
                                      .. }));
    }

    #[test]
    fn calls_with_and_without_run() {
        let expected = Expr::FunctionCall(FunctionCall { name:      "f".to_string(),
                                                         arguments: vec![Expr::Identifier { name: "x".to_string(),
                                                                                            line: 1, }],
                                                         line:      1, });
        assert_eq!(parse("f(x)").unwrap(), expected);
        assert_eq!(parse("run f(x)").unwrap(), expected);
    }

    #[test]
    fn parentheses_override_precedence() {
        let Expr::Math { operator, .. } = parse("(1 + 2) * 3").unwrap() else {
            panic!("expected math expression");
        };
        assert_eq!(operator, MathOperator::Multiply);
    }

    #[test]
    fn missing_operand_is_reported() {
        let error = parse("1 + )").unwrap_err();
        assert_eq!(error,
                   ParseError::UnexpectedToken { expected:  Expected::Expression,
                                                 found:     TokenKind::RightParen,
                                                 text:      ")".to_string(),
                                                 line:      1,
                                                 column:    5,
                                                 highlight: Highlight::Current, });
    }

    #[test]
    fn unclosed_parenthesis_reports_end_of_input() {
        assert!(matches!(parse("(1 + 2").unwrap_err(),
                         ParseError::UnexpectedEndOfInput { expected: Expected::Token(TokenKind::RightParen),
                                                            .. }));
    }
}
