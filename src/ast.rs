use std::fmt;

use crate::interpreter::value::core::DataType;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. Declarations without an initializer also carry one, holding the
/// default value of the declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 32-bit signed integer literal.
    Int(i32),
    /// A 32-bit floating-point literal.
    Float(f32),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal with escape sequences already processed.
    String(String),
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for LiteralValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A call to a user-defined or built-in function.
///
/// Calls appear both as statements (`run greet("Bob")`) and inside
/// expressions (`square(3) + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Name of the function being called.
    pub name:      String,
    /// Arguments in call order.
    pub arguments: Vec<Expr>,
    /// Line number in the source code.
    pub line:      usize,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Unary minus has no node of its own; the parser desugars `-x` into
/// `-1 * x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Arithmetic (`+ - * / % ^`).
    Math {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: MathOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Comparison (`== != > >= < <=` and their word forms).
    Comparison {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: ComparisonOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Boolean logic (`and or xor`).
    Logic {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: LogicOperator,
        /// Right operand, skipped when the left operand decides the result.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A function call used as a value.
    FunctionCall(FunctionCall),
}

/// A braced sequence of statements that opens a new block scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line of the opening brace.
    pub line:       usize,
}

/// One link of an `if` / `else if` / `else` chain.
///
/// Each `else if` is a nested `IfChain`, so the chain forms a singly linked
/// list ending in an optional `else` block.
#[derive(Debug, Clone, PartialEq)]
pub struct IfChain {
    /// The condition, coerced to `bool` when evaluated.
    pub condition: Expr,
    /// Block executed when the condition holds.
    pub body:      Block,
    /// What runs when the condition does not hold.
    pub otherwise: Option<Box<ElseBranch>>,
    /// Line number in the source code.
    pub line:      usize,
}

/// The continuation of an [`IfChain`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// `else if <condition> { ... }`
    ElseIf(IfChain),
    /// `else { ... }`
    Else(Block),
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Creates a variable in the current block.
    VariableDeclaration {
        /// The name of the variable.
        name:      String,
        /// The declared type; every later assignment is coerced to it.
        /// `None` if the declaration names no type, in which case the
        /// variable takes the kind of its initial value.
        data_type: Option<DataType>,
        /// The initial value of the variable.
        value:     Expr,
        /// Line number in the source code.
        line:      usize,
    },
    /// Writes a new value through an existing variable.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A function call whose result, if any, is discarded.
    FunctionCall(FunctionCall),
    /// Leaves the current function, or the program at the top level.
    Return {
        /// The returned value, if any.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An `if` chain.
    If(IfChain),
    /// `while <condition> { ... }`
    While {
        /// Re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// `repeat <count> times { ... }`
    Repeat {
        /// Re-evaluated before every iteration.
        count: Expr,
        /// The loop body.
        body:  Block,
        /// Line number in the source code.
        line:  usize,
    },
    /// `assert <condition>`
    Assertion {
        /// The asserted condition.
        condition: Expr,
        /// Line number in the source code.
        line:      usize,
    },
    /// `try { ... } catch message { ... }`
    TryCatch {
        /// Block whose errors are caught.
        try_block:      Block,
        /// Variable that receives the error message, if named.
        catch_variable: Option<String>,
        /// Block executed after an error.
        catch_block:    Block,
        /// Line number in the source code.
        line:           usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::VariableDeclaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::FunctionCall(FunctionCall { line, .. })
            | Self::Return { line, .. }
            | Self::If(IfChain { line, .. })
            | Self::While { line, .. }
            | Self::Repeat { line, .. }
            | Self::Assertion { line, .. }
            | Self::TryCatch { line, .. } => *line,
        }
    }
}

/// A declared function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name:         String,
    /// The declared type.
    pub data_type:    DataType,
    /// `true` if marked `ref`: the argument must be a variable and the
    /// parameter shares its slot.
    pub by_reference: bool,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// The parameters in declaration order.
    pub parameters:  Vec<Parameter>,
    /// The declared return type, `None` for void functions.
    pub return_type: Option<DataType>,
    /// The function body.
    pub body:        Block,
    /// Line number in the source code.
    pub line:        usize,
}

/// The root of the tree: top-level statements plus function definitions.
///
/// Functions are collected separately, so a function may be called from
/// statements that appear before its definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// User-defined functions in source order.
    pub functions:  Vec<FunctionDef>,
}

/// Represents an arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MathOperator {
    /// Addition (`+`, `plus`)
    Add,
    /// Subtraction (`-`, `minus`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`, `mod`)
    Modulo,
    /// Exponentiation (`^`)
    Power,
}

/// Represents a comparison operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal to (`==`, `is`)
    Equal,
    /// Not equal to (`!=`, `is not`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
}

/// Represents a logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicOperator {
    /// Logical and (`and`, `&&`)
    And,
    /// Logical or (`or`, `||`)
    Or,
    /// Logical exclusive or (`xor`)
    Xor,
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
        };
        write!(f, "{operator}")
    }
}
