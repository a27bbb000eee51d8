/// Core parsing entry points.
///
/// Defines the `ParseResult` alias, the program-level loop that separates
/// function definitions from top-level statements, and the expression entry
/// point.
pub mod core;

/// Token cursor.
///
/// Wraps the token stream with peek, lookahead, match and expect operations
/// and builds positioned parse errors.
pub mod cursor;

/// Binary operator parsing.
///
/// Implements the precedence levels from logical operators down to
/// exponentiation.
pub mod binary;

/// Unary minus, literals, identifiers, calls and parenthesized expressions.
pub mod unary;

/// Block parsing.
///
/// Parses braced statement sequences and the control structures built on
/// them: `if` chains, loops and `try`/`catch`.
pub mod block;

/// Statement parsing.
///
/// Dispatches on the first token of a statement: declarations, assignments,
/// calls, returns and assertions.
pub mod statement;

/// Function definition parsing.
///
/// Recognizes function signatures by lookahead and parses parameters and
/// bodies.
pub mod function;

/// Shared helpers for identifiers, data types, argument lists and string
/// literals.
pub mod utils;
