use thiserror::Error;

/// Represents all errors that can occur while scanning source lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string literal has no closing quote on its line.
    #[error("Error on line {line}: Unterminated string literal in `{text}`.")]
    UnterminatedString {
        /// The source line where the error occurred.
        line:   usize,
        /// Column of the opening quote.
        column: usize,
        /// The complete text of the offending line.
        text:   String,
    },
    /// An operator run starts with symbols that form no known operator.
    #[error("Error on line {line}: Unknown operator '{operator}'.")]
    UnknownOperator {
        /// The unrecognized symbols.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
        /// Column where the unknown symbols start.
        column:   usize,
        /// The complete text of the offending line.
        text:     String,
    },
}

impl LexError {
    /// Returns the 1-based line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line, .. } | Self::UnknownOperator { line, .. } => *line,
        }
    }
}
