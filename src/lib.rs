//! # skimskript
//!
//! skimskript is an interpreter for SkimSkript, a small imperative scripting
//! language that reads close to English. Keywords may span several words
//! (`is greater than or equal to`), and values coerce freely between
//! integers, floats, booleans and strings.
//!
//! The pipeline is lexer, parser, analyzer and evaluator:
//!
//! ```
//! use skimskript::{interpreter::terminal::BufferTerminal, run_source};
//!
//! let source = "declare int x as 4\nif x is at least 3 then { print(\"big\") }";
//! let mut terminal = BufferTerminal::new();
//!
//! assert_eq!(run_source(source, &mut terminal), Ok(0));
//! assert_eq!(terminal.output(), "big\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        analyzer::analyze, evaluator::core::Context, lexer::tokenize,
        parser::core::parse_program, terminal::Terminal,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and the function
/// definitions that represent a program as a tree. The tree is built by the
/// parser, checked by the analyzer and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
pub mod ast;
/// Provides unified error types for every phase.
///
/// Each phase has its own error enum with structured fields: line, column,
/// offending text, expected and found tokens. The crate-level `Error` wraps
/// them and maps each to a process exit code.
///
/// # Responsibilities
/// - Defines error enums for the lexer, parser, analyzer and evaluator.
/// - Separates program mistakes from interpreter bugs.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, analysis and evaluation, the
/// value representation and the console abstraction.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and source loading.
///
/// # Responsibilities
/// - Convert between `usize`, `i32` and `f32` without panicking.
/// - Load `.skim` files as lines.
pub mod util;

/// Lexes, parses and analyzes source lines.
///
/// # Errors
/// The first lexical, syntax or semantic error.
///
/// # Examples
/// ```
/// use skimskript::{error::Error, parse_source};
///
/// let program = parse_source(&["declare int x as 1", "print(x)"]).unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let error = parse_source(&["print(y)"]).unwrap_err();
/// assert!(matches!(error, Error::Semantic(_)));
/// ```
pub fn parse_source<S>(lines: &[S]) -> Result<Program, Error>
    where S: AsRef<str>
{
    let stream = tokenize(lines)?;
    let program = parse_program(&stream)?;
    analyze(&program)?;
    Ok(program)
}

/// Runs an analyzed program against a console.
///
/// # Returns
/// The exit code the program asked for: `0` unless a top-level `return`
/// supplied one.
///
/// # Errors
/// The first runtime error that no `try` block caught.
pub fn run_program(program: &Program, terminal: &mut dyn Terminal) -> Result<i32, Error> {
    let code = Context::new(program, terminal).run(program)?;
    debug!("Program finished with exit code {code}");
    Ok(code)
}

/// Parses and runs a whole program given as one string.
///
/// # Errors
/// Returns an error if any phase fails.
///
/// # Examples
/// ```
/// use skimskript::{error::Error, interpreter::terminal::BufferTerminal, run_source};
///
/// let mut terminal = BufferTerminal::new();
/// assert_eq!(run_source("return 3 + 4", &mut terminal), Ok(7));
///
/// // Division by zero is a runtime error.
/// let result = run_source("print(1 / 0)", &mut terminal);
/// assert!(matches!(result, Err(Error::Runtime(_))));
/// ```
pub fn run_source(source: &str, terminal: &mut dyn Terminal) -> Result<i32, Error> {
    let lines: Vec<&str> = source.lines().collect();
    let program = parse_source(&lines)?;
    run_program(&program, terminal)
}
