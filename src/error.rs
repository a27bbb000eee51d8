/// Lexical errors.
///
/// Raised by the scanner while splitting source lines into lexemes. A lexical
/// error aborts the whole run before any token reaches the parser.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning tokens into the
/// syntax tree. Each error records what the parser expected, what it found
/// and where, so a renderer can underline the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while the tree is executed,
/// such as division by zero, failed assertions or mismatched arguments.
pub mod runtime_error;
/// Semantic errors.
///
/// Raised by the analyzer between parsing and execution for problems that
/// are visible without running the program: unknown names, wrong arity and
/// misplaced return values.
pub mod semantic_error;

use thiserror::Error;

pub use lex_error::LexError;
pub use parse_error::{Expected, Highlight, ParseError};
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;

/// Exit code for a bad command line.
pub const USAGE_EXIT_CODE: i32 = 64;
/// Exit code for any error caused by the program being run.
pub const SOURCE_CODE_ERROR_EXIT_CODE: i32 = 65;
/// Exit code for a source file that cannot be read.
pub const SOURCE_FILE_EXIT_CODE: i32 = 66;
/// Exit code reserved for violated interpreter invariants.
pub const INTERPRETER_BUG_EXIT_CODE: i32 = 70;

/// Any error produced while lexing, parsing, analyzing or running a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the process exit code that reports this error.
    ///
    /// Every family maps to the source-code-error code except runtime errors
    /// that signal a broken interpreter invariant.
    ///
    /// ## Example
    /// ```
    /// use skimskript::error::{Error, RuntimeError, SOURCE_CODE_ERROR_EXIT_CODE};
    ///
    /// let error = Error::from(RuntimeError::IntegerDivisionByZero { line: 3 });
    /// assert_eq!(error.exit_code(), SOURCE_CODE_ERROR_EXIT_CODE);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Runtime(error) if error.is_interpreter_bug() => INTERPRETER_BUG_EXIT_CODE,
            _ => SOURCE_CODE_ERROR_EXIT_CODE,
        }
    }

    /// Returns the 1-based source line the error points at.
    ///
    /// ## Example
    /// ```
    /// use skimskript::parse_source;
    ///
    /// let error = parse_source(&["declare int x as 1", "print(y)"]).unwrap_err();
    /// assert_eq!(error.line(), 2);
    /// ```
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(error) => error.line(),
            Self::Parse(error) => error.line(),
            Self::Semantic(error) => error.line(),
            Self::Runtime(error) => error.line(),
        }
    }
}
