use thiserror::Error;

/// Represents all problems the analyzer detects before execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Two user functions share a name.
    #[error("Error on line {line}: Function '{name}' is already defined.")]
    DuplicateFunction {
        /// The name of the function.
        name: String,
        /// Line of the second definition.
        line: usize,
    },
    /// A user function reuses the name of a built-in.
    #[error("Error on line {line}: Cannot redefine built-in function '{name}'.")]
    BuiltinRedefinition {
        /// The name of the function.
        name: String,
        /// Line of the definition.
        line: usize,
    },
    /// A call names no known function.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// Line of the call.
        line: usize,
    },
    /// A variable is used where no declaration is visible.
    #[error("Error on line {line}: Unknown identifier '{name}'.")]
    UnknownIdentifier {
        /// The name of the variable.
        name: String,
        /// Line of the use.
        line: usize,
    },
    /// A non-variadic function received the wrong number of arguments.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// Line of the call.
        line:     usize,
    },
    /// A reference parameter received something other than a variable.
    #[error("Error on line {line}: Parameter '{parameter}' of '{name}' is passed by reference and needs a variable.")]
    ReferenceArgumentNotIdentifier {
        /// The name of the function.
        name:      String,
        /// The reference parameter.
        parameter: String,
        /// Line of the call.
        line:      usize,
    },
    /// `return <value>` inside a function without a return type.
    #[error("Error on line {line}: Function '{name}' returns nothing but a value is returned.")]
    ReturnValueInVoidFunction {
        /// The name of the function.
        name: String,
        /// Line of the return statement.
        line: usize,
    },
    /// A bare `return` inside a function with a return type.
    #[error("Error on line {line}: Function '{name}' must return a value.")]
    MissingReturnValue {
        /// The name of the function.
        name: String,
        /// Line of the return statement.
        line: usize,
    },
    /// The same name is declared twice in one block.
    #[error("Error on line {line}: Variable '{name}' is already declared in this block.")]
    VariableAlreadyDeclared {
        /// The name of the variable.
        name: String,
        /// Line of the second declaration.
        line: usize,
    },
    /// A function that returns nothing is used as a value.
    #[error("Error on line {line}: Function '{name}' returns nothing and cannot be used as a value.")]
    VoidCallInExpression {
        /// The name of the function.
        name: String,
        /// Line of the call.
        line: usize,
    },
}

impl SemanticError {
    /// Returns the 1-based line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::DuplicateFunction { line, .. }
            | Self::BuiltinRedefinition { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::UnknownIdentifier { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::ReferenceArgumentNotIdentifier { line, .. }
            | Self::ReturnValueInVoidFunction { line, .. }
            | Self::MissingReturnValue { line, .. }
            | Self::VariableAlreadyDeclared { line, .. }
            | Self::VoidCallInExpression { line, .. } => *line,
        }
    }
}
