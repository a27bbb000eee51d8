use thiserror::Error;

use crate::interpreter::value::core::DataType;

/// Represents all errors that can occur during execution.
///
/// Every variant carries the source line that raised it. Variants in the
/// interpreter-bug family (see [`RuntimeError::is_interpreter_bug`]) report
/// states that valid programs should never reach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use an undeclared variable.
    #[error("Error on line {line}: Unknown identifier '{name}'.")]
    UnknownIdentifier {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name twice in the same block.
    #[error("Error on line {line}: Variable '{name}' is already declared in this block.")]
    VariableAlreadyDeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer division or remainder with a zero divisor.
    #[error("Error on line {line}: Integer division by zero.")]
    IntegerDivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Float division or remainder with a zero divisor.
    #[error("Error on line {line}: Float division by zero.")]
    FloatDivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A reference parameter received something other than a variable.
    #[error("Error on line {line}: Parameter '{parameter}' of '{name}' is passed by reference and needs a variable.")]
    ReferenceArgumentNotIdentifier {
        /// The name of the function.
        name:      String,
        /// The reference parameter.
        parameter: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A reference parameter and its variable disagree on the data type.
    #[error("Error on line {line}: Parameter '{parameter}' of '{name}' is {expected} but the variable passed by reference is {found}.")]
    ReferenceTypeMismatch {
        /// The name of the function.
        name:      String,
        /// The reference parameter.
        parameter: String,
        /// Declared type of the parameter.
        expected:  DataType,
        /// Declared type of the referenced variable.
        found:     DataType,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An `assert` condition evaluated to false.
    #[error("Error on line {line}: Assertion failed: {}.", describe_assertion(.left, .operator.as_deref(), .right.as_deref()))]
    AssertionFailed {
        /// The evaluated left operand, or the whole condition.
        left:     String,
        /// The comparison or logic operator, when the condition had one.
        operator: Option<String>,
        /// The evaluated right operand, when it was evaluated.
        right:    Option<String>,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A math operator that strings do not support.
    #[error("Error on line {line}: Operator '{operator}' cannot be applied to strings.")]
    UnsupportedStringOperation {
        /// The operator symbol.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function with a return type finished without returning a value.
    #[error("Error on line {line}: Function '{name}' finished without returning a value.")]
    MissingReturnValue {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function without a return type returned a value.
    #[error("Error on line {line}: Function '{name}' returns nothing but a value was returned.")]
    ReturnValueInVoidFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call that produced no value was used inside an expression.
    #[error("Error on line {line}: Function '{name}' returns nothing and cannot be used as a value.")]
    VoidValueUsed {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The top-level return value cannot become a process exit code.
    #[error("Error on line {line}: Value '{value}' cannot be used as an exit code.")]
    InvalidExitCode {
        /// The returned value.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Nested user-defined calls went deeper than the interpreter allows.
    #[error("Error on line {line}: Calling '{name}' exceeds the maximum call depth of {depth}.")]
    RecursionLimit {
        /// The function that could not be entered.
        name:  String,
        /// The maximum number of nested calls.
        depth: usize,
        /// The source line of the call.
        line:  usize,
    },
    /// Reading from or writing to the console failed.
    #[error("Error on line {line}: Console failure: {message}.")]
    Terminal {
        /// The underlying I/O error message.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An operator reached a type combination valid syntax never produces.
    #[error("Error on line {line}: Invalid operation: {details}.")]
    InvalidOperation {
        /// Details describing the operation.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns `true` for errors that indicate a broken interpreter invariant
    /// rather than a mistake in the running program.
    ///
    /// Such errors are never caught by `try`/`catch`.
    #[must_use]
    pub const fn is_interpreter_bug(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }

    /// Returns the 1-based line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownIdentifier { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::VariableAlreadyDeclared { line, .. }
            | Self::IntegerDivisionByZero { line }
            | Self::FloatDivisionByZero { line }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::ReferenceArgumentNotIdentifier { line, .. }
            | Self::ReferenceTypeMismatch { line, .. }
            | Self::AssertionFailed { line, .. }
            | Self::UnsupportedStringOperation { line, .. }
            | Self::MissingReturnValue { line, .. }
            | Self::ReturnValueInVoidFunction { line, .. }
            | Self::VoidValueUsed { line, .. }
            | Self::InvalidExitCode { line, .. }
            | Self::RecursionLimit { line, .. }
            | Self::Terminal { line, .. }
            | Self::InvalidOperation { line, .. } => *line,
        }
    }
}

fn describe_assertion(left: &str, operator: Option<&str>, right: Option<&str>) -> String {
    match (operator, right) {
        (Some(operator), Some(right)) => format!("{left} {operator} {right}"),
        (Some(operator), None) => format!("{left} {operator} (not evaluated)"),
        (None, _) => format!("{left} is false"),
    }
}
