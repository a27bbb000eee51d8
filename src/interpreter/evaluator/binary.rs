/// Comparison operators.
///
/// Ordinal comparisons for numbers and strings; equality only for booleans.
pub mod comparison;

/// Arithmetic dispatch.
///
/// Resolves both operands to a common kind and routes to the handler for
/// that kind.
pub mod core;

/// The `and`, `or` and `xor` operators, with short-circuiting.
pub mod logic;

/// Arithmetic on integers, floats and booleans.
pub mod scalar;

/// String concatenation and removal.
pub mod string;
