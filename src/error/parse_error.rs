use std::fmt;

use thiserror::Error;

use crate::interpreter::lexer::token::TokenKind;

/// Describes what the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// One specific token kind.
    Token(TokenKind),
    /// Any token that can start an expression.
    Expression,
    /// Any token that can start a statement.
    Statement,
    /// A data type keyword such as `int` or `string`.
    DataType,
    /// A data type or an initializer after a declared name.
    TypeOrInitializer,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => write!(f, "{kind}"),
            Self::Expression => write!(f, "an expression"),
            Self::Statement => write!(f, "a statement"),
            Self::DataType => write!(f, "a data type"),
            Self::TypeOrInitializer => write!(f, "a data type or an initializer"),
        }
    }
}

/// Tells a renderer which token to underline relative to the cursor.
///
/// `Backward` points at the token before the cursor (something is missing
/// after it), `Current` at the offending token itself and `Forward` at the
/// token that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Backward,
    Current,
    Forward,
}

/// Represents all errors that can occur while parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    #[error("Error on line {line}, column {column}: Expected {expected}, found '{text}'.")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected:  Expected,
        /// Kind of the token actually found.
        found:     TokenKind,
        /// Source text of the token actually found.
        text:      String,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the offending token starts.
        column:    usize,
        /// Which token a renderer should highlight.
        highlight: Highlight,
    },
    /// Ran out of tokens while a construct was still open.
    #[error("Error on line {line}: Expected {expected}, but the input ended.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: Expected,
        /// The last source line of the input.
        line:     usize,
    },
    /// A type keyword that exists in the language but is not implemented.
    #[error("Error on line {line}, column {column}: Data type '{name}' is not supported.")]
    UnsupportedDataType {
        /// The type keyword as written.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column of the keyword.
        column: usize,
    },
    /// A function signature appeared inside a block.
    #[error("Error on line {line}, column {column}: Function '{name}' must be defined at the top level.")]
    NestedFunctionDefinition {
        /// Name of the nested function.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column of the signature.
        column: usize,
    },
    /// A numeric literal that does not fit its value type.
    #[error("Error on line {line}, column {column}: Literal '{text}' is out of range.")]
    InvalidLiteral {
        /// The literal as written.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column of the literal.
        column: usize,
    },
}

impl ParseError {
    /// Returns the 1-based line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::UnsupportedDataType { line, .. }
            | Self::NestedFunctionDefinition { line, .. }
            | Self::InvalidLiteral { line, .. } => *line,
        }
    }
}
