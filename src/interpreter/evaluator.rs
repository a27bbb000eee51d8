/// Binary operator evaluation logic.
///
/// Handles arithmetic on the four value kinds, comparisons and the
/// short-circuiting logic operators.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, expression dispatch, the block-exit signal
/// and the program entry point.
pub mod core;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument binding,
/// pass-by-reference and return value checks.
pub mod function;

/// Variable storage.
///
/// A slot arena addressed by handles, plus the block levels of the global
/// frame and of every active call.
pub mod scope;

/// Statement execution.
///
/// Declarations, assignments, conditionals, loops, assertions and try/catch.
pub mod statement;
