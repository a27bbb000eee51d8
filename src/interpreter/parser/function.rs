use log::trace;

use crate::{
    ast::{FunctionDef, Parameter},
    error::Expected,
    interpreter::{
        lexer::token::TokenKind,
        parser::{
            block::parse_block,
            core::ParseResult,
            cursor::TokenCursor,
            utils::{parse_data_type, parse_identifier},
        },
    },
};

/// Decides by lookahead whether a function signature starts at the cursor.
///
/// `define`, `function` and `void` always start one. A data type starts one
/// only when it is followed by `function`, or by a name and `(`; otherwise
/// it starts a variable declaration such as `int x = 1`.
#[must_use]
pub fn starts_function_definition(cursor: &TokenCursor) -> bool {
    match cursor.peek() {
        Some(TokenKind::Define | TokenKind::Function | TokenKind::VoidType) => true,
        Some(kind) if kind.is_data_type() => match cursor.peek_ahead(1) {
            Some(TokenKind::Function) => true,
            Some(TokenKind::Identifier) => cursor.peek_ahead(2) == Some(TokenKind::LeftParen),
            _ => false,
        },
        _ => false,
    }
}

/// Returns the name of the function whose signature starts at the cursor,
/// for error reporting, without consuming anything.
#[must_use]
pub fn peek_function_name<'a>(cursor: &TokenCursor<'a>) -> Option<&'a str> {
    let mut lookahead = cursor.clone();
    while let Some(token) = lookahead.advance() {
        if token.kind == TokenKind::Identifier {
            return Some(lookahead.text(token));
        }
    }
    None
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     ["define"] [data_type | "void"] ["function"] name "(" params ")" block
/// ```
/// At least one of the leading markers must be present. A missing return
/// type, or `void`, makes the function return nothing.
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the signature.
///
/// # Returns
/// The parsed definition.
///
/// # Errors
/// Returns a `ParseError` for malformed signatures, parameters or bodies.
pub fn parse_function_definition(cursor: &mut TokenCursor) -> ParseResult<FunctionDef> {
    let line = cursor.line();
    let has_define = cursor.match_if(TokenKind::Define);

    let (return_type, has_type) = match cursor.peek() {
        Some(TokenKind::VoidType) => {
            cursor.advance();
            (None, true)
        },
        Some(kind) if kind.is_data_type() => (Some(parse_data_type(cursor)?), true),
        _ => (None, false),
    };

    let has_function = cursor.match_if(TokenKind::Function);
    if !(has_define || has_type || has_function) {
        return Err(cursor.error(Expected::Token(TokenKind::Function)));
    }

    let name = parse_identifier(cursor)?;
    cursor.expect(TokenKind::LeftParen)?;
    let parameters = parse_parameters(cursor)?;
    let body = parse_block(cursor)?;

    trace!("Parsed function '{name}' with {} parameter(s)", parameters.len());
    Ok(FunctionDef { name,
                     parameters,
                     return_type,
                     body,
                     line })
}

/// Parses parameters up to and including the closing parenthesis.
///
/// Grammar: `params := [param ([","] param)*]`, `param := ["ref"] data_type IDENT`
fn parse_parameters(cursor: &mut TokenCursor) -> ParseResult<Vec<Parameter>> {
    let mut parameters = Vec::new();

    while !cursor.match_if(TokenKind::RightParen) {
        let by_reference = cursor.match_if(TokenKind::Reference);
        let data_type = parse_data_type(cursor)?;
        let name = parse_identifier(cursor)?;
        parameters.push(Parameter { name,
                                    data_type,
                                    by_reference });
        cursor.match_if(TokenKind::Comma);
    }

    Ok(parameters)
}
