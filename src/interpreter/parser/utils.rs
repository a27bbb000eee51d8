use crate::{
    ast::{Expr, FunctionCall},
    error::{Expected, ParseError},
    interpreter::{
        lexer::token::TokenKind,
        parser::{
            core::{ParseResult, parse_expression},
            cursor::TokenCursor,
        },
        value::core::DataType,
    },
};

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier(cursor: &mut TokenCursor) -> ParseResult<String> {
    let token = cursor.expect(TokenKind::Identifier)?;
    Ok(cursor.text(token).to_string())
}

/// Parses a data type keyword.
///
/// # Errors
/// - `ParseError::UnsupportedDataType` for `list`.
/// - `ParseError::UnexpectedToken` if the token is not a data type.
pub(in crate::interpreter::parser) fn parse_data_type(cursor: &mut TokenCursor) -> ParseResult<DataType> {
    let Some(token) = cursor.current() else {
        return Err(cursor.error(Expected::DataType));
    };

    let data_type = match token.kind {
        TokenKind::IntType => DataType::Int,
        TokenKind::FloatType => DataType::Float,
        TokenKind::BoolType => DataType::Bool,
        TokenKind::StringType => DataType::String,
        TokenKind::ListType => {
            return Err(ParseError::UnsupportedDataType { name:   cursor.text(token).to_string(),
                                                         line:   cursor.line_of(token),
                                                         column: cursor.column_of(token), });
        },
        _ => return Err(cursor.error(Expected::DataType)),
    };

    cursor.advance();
    Ok(data_type)
}

/// Parses a function call of the form `["run"] name(arg1, arg2, ...)`.
///
/// Commas between arguments are optional, so `print("a" "b")` passes two
/// arguments.
///
/// Grammar: `call := ["run"] IDENT "(" [expression ([","] expression)*] ")"`
///
/// # Errors
/// Returns a `ParseError` if the name, either parenthesis or an argument is
/// malformed.
pub(in crate::interpreter::parser) fn parse_function_call(cursor: &mut TokenCursor)
                                                          -> ParseResult<FunctionCall> {
    cursor.match_if(TokenKind::Run);
    let token = cursor.expect(TokenKind::Identifier)?;
    let name = cursor.text(token).to_string();
    let line = cursor.line_of(token);

    cursor.expect(TokenKind::LeftParen)?;
    let arguments = parse_arguments(cursor)?;

    Ok(FunctionCall { name,
                      arguments,
                      line })
}

/// Parses call arguments up to and including the closing parenthesis.
fn parse_arguments(cursor: &mut TokenCursor) -> ParseResult<Vec<Expr>> {
    let mut arguments = Vec::new();

    while !cursor.match_if(TokenKind::RightParen) {
        if cursor.is_at_end() {
            return Err(cursor.error(Expected::Token(TokenKind::RightParen)));
        }
        arguments.push(parse_expression(cursor)?);
        cursor.match_if(TokenKind::Comma);
    }

    Ok(arguments)
}

/// Processes the escape sequences of a string literal.
///
/// `\"`, `\\`, `\n` and `\t` are recognized. Any other backslash is kept
/// as written.
///
/// # Example
/// ```
/// use skimskript::interpreter::parser::utils::unescape;
///
/// assert_eq!(unescape(r#"a \"quoted\" word"#), r#"a "quoted" word"#);
/// assert_eq!(unescape(r"tab\there"), "tab\there");
/// assert_eq!(unescape(r"C:\path"), r"C:\path");
/// ```
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            },
            None => result.push('\\'),
        }
    }

    result
}
