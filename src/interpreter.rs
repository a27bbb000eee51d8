/// The analyzer module checks a parsed program before it runs.
///
/// It resolves every call and variable use against the declarations visible
/// at that point and checks arity, reference arguments and return
/// statements, so most mistakes surface before any output is produced.
///
/// # Responsibilities
/// - Rejects duplicate and built-in-shadowing function definitions.
/// - Reports unknown identifiers and functions with their line.
/// - Checks calls against the callee's signature.
pub mod analyzer;
/// The evaluator module executes the syntax tree.
///
/// The evaluator walks statements and expressions, coerces values between
/// the four kinds, manages variable slots and call frames, and signals early
/// returns through block-exit values rather than errors.
///
/// # Responsibilities
/// - Evaluates expressions with short-circuiting logic operators.
/// - Runs control flow, assertions and try/catch.
/// - Calls user functions and the `print`, `read` and `clear` built-ins.
pub mod evaluator;
/// The lexer module turns source lines into tokens.
///
/// Lines are first split into coarse lexemes, then multi-word keyword
/// phrases such as `is greater than` are matched with a trie and collapsed
/// into single tokens.
///
/// # Responsibilities
/// - Categorizes characters into words, numbers, strings, operators and
///   delimiters.
/// - Resolves reserved phrases case-insensitively.
/// - Reports unterminated strings and unknown operators.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive-descent parser over a token cursor. One unexpected token
/// aborts the parse with an error naming what was expected.
///
/// # Responsibilities
/// - Parses statements, blocks, function definitions and expressions.
/// - Separates function signatures from declarations by lookahead.
/// - Desugars unary minus.
pub mod parser;
/// The terminal module abstracts the console the built-ins use.
pub mod terminal;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the four value kinds and the coercion rules between
/// them, including the string-length fallback for unparseable numbers.
///
/// # Responsibilities
/// - Defines the `Value` and `DataType` enums.
/// - Implements the cast table and the operand precedence order.
pub mod value;
