use crate::{
    ast::{ComparisonOperator, Expr, LogicOperator, MathOperator},
    interpreter::{
        lexer::token::TokenKind,
        parser::{core::ParseResult, cursor::TokenCursor, unary::parse_unary},
    },
};

/// Parses `and`, `or` and `xor` expressions.
///
/// All three share the lowest precedence level and associate to the left.
///
/// The rule is: `logical := comparison (("and" | "or" | "xor") comparison)*`
///
/// # Parameters
/// - `cursor`: Token cursor.
///
/// # Returns
/// An `Expr::Logic` tree, or the operand itself if no operator follows.
pub fn parse_logical(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_comparison(cursor)?;

    while let Some(token) = cursor.match_any(&[TokenKind::And, TokenKind::Or, TokenKind::Xor]) {
        let operator = match token.kind {
            TokenKind::And => LogicOperator::And,
            TokenKind::Or => LogicOperator::Or,
            _ => LogicOperator::Xor,
        };
        let right = parse_comparison(cursor)?;
        left = Expr::Logic { left: Box::new(left),
                             operator,
                             right: Box::new(right),
                             line: cursor.line_of(token) };
    }

    Ok(left)
}

/// Parses comparison expressions.
///
/// Handles `==`, `!=`, `>`, `>=`, `<`, `<=` and their word forms such as
/// `is at least`. Comparisons associate to the left.
///
/// The rule is: `comparison := additive (comp_op additive)*`
pub fn parse_comparison(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_additive(cursor)?;

    while let Some(token) = cursor.match_any(&[TokenKind::Equal,
                                               TokenKind::NotEqual,
                                               TokenKind::Greater,
                                               TokenKind::GreaterEqual,
                                               TokenKind::Less,
                                               TokenKind::LessEqual])
    {
        let operator = match token.kind {
            TokenKind::Equal => ComparisonOperator::Equal,
            TokenKind::NotEqual => ComparisonOperator::NotEqual,
            TokenKind::Greater => ComparisonOperator::Greater,
            TokenKind::GreaterEqual => ComparisonOperator::GreaterEqual,
            TokenKind::Less => ComparisonOperator::Less,
            _ => ComparisonOperator::LessEqual,
        };
        let right = parse_additive(cursor)?;
        left = Expr::Comparison { left: Box::new(left),
                                  operator,
                                  right: Box::new(right),
                                  line: cursor.line_of(token) };
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(cursor)?;

    while let Some(token) = cursor.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
        let operator = if token.kind == TokenKind::Plus {
            MathOperator::Add
        } else {
            MathOperator::Subtract
        };
        let right = parse_multiplicative(cursor)?;
        left = math(left, operator, right, cursor.line_of(token));
    }

    Ok(left)
}

/// Parses multiplication, division and remainder expressions.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
pub fn parse_multiplicative(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_exponent(cursor)?;

    while let Some(token) = cursor.match_any(&[TokenKind::Multiply, TokenKind::Divide, TokenKind::Modulo]) {
        let operator = match token.kind {
            TokenKind::Multiply => MathOperator::Multiply,
            TokenKind::Divide => MathOperator::Divide,
            _ => MathOperator::Modulo,
        };
        let right = parse_exponent(cursor)?;
        left = math(left, operator, right, cursor.line_of(token));
    }

    Ok(left)
}

/// Parses exponentiation.
///
/// `^` is right-associative, so `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
///
/// The rule is: `exponent := unary ("^" exponent)?`
pub fn parse_exponent(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let base = parse_unary(cursor)?;

    if let Some(token) = cursor.match_any(&[TokenKind::Power]) {
        let exponent = parse_exponent(cursor)?;
        return Ok(math(base, MathOperator::Power, exponent, cursor.line_of(token)));
    }

    Ok(base)
}

pub(in crate::interpreter::parser) fn math(left: Expr, operator: MathOperator, right: Expr, line: usize) -> Expr {
    Expr::Math { left: Box::new(left),
                 operator,
                 right: Box::new(right),
                 line }
}
