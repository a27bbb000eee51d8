use log::debug;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::TokenStream,
        parser::{
            binary::parse_logical,
            cursor::TokenCursor,
            function::{parse_function_definition, starts_function_definition},
            statement::parse_statement,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Function definitions may only appear at the top level. They are
/// collected into `Program::functions`; everything else becomes a top-level
/// statement.
///
/// Grammar: `program := (function_def | statement)*`
///
/// # Parameters
/// - `stream`: The tokens of the program.
///
/// # Returns
/// The program's syntax tree.
///
/// # Errors
/// Returns the first `ParseError` encountered. Parsing never recovers.
///
/// # Example
/// ```
/// use skimskript::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let stream = tokenize(&["define int square(int x) {", "  return x * x", "}", "print(square(3))"]).unwrap();
/// let program = parse_program(&stream).unwrap();
/// assert_eq!(program.functions.len(), 1);
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse_program(stream: &TokenStream) -> ParseResult<Program> {
    let mut cursor = TokenCursor::new(stream);
    let mut program = Program::default();

    while !cursor.is_at_end() {
        if starts_function_definition(&cursor) {
            program.functions.push(parse_function_definition(&mut cursor)?);
        } else {
            program.statements.push(parse_statement(&mut cursor)?);
        }
    }

    debug!("Parsed {} statement(s) and {} function(s)",
           program.statements.len(),
           program.functions.len());
    Ok(program)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, the logical operators, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := logical`
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    parse_logical(cursor)
}
