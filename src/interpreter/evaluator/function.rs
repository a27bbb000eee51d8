/// The `clear` function implementation.
///
/// Clears the console.
pub mod clear;
/// Function call evaluation and the built-in function table.
pub mod core;
/// The `print` function implementation.
///
/// Writes each argument on its own line.
pub mod print;
/// The `read` function implementation.
///
/// Shows an optional prompt and reads one line of input.
pub mod read;

use std::io;

use crate::error::RuntimeError;

/// Wraps a console failure into a runtime error for `line`.
pub(crate) fn terminal_error(error: &io::Error, line: usize) -> RuntimeError {
    RuntimeError::Terminal { message: error.to_string(),
                             line }
}
