use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{Block, Expr, FunctionDef, Program, Statement},
    error::RuntimeError,
    interpreter::{evaluator::scope::Scopes, terminal::Terminal, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement or block finished.
///
/// Returns travel upward as this signal, not as errors. Control structures
/// stop as soon as they see [`BlockExit::Returned`] and hand it to their
/// caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockExit {
    /// Every statement ran.
    Completed,
    /// A `return` was executed, with its value if it had one.
    Returned(Option<Value>),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the variable slots, the user
/// defined functions of the running program and the console the built-ins
/// write to.
///
/// ## Usage
///
/// A `Context` is created for one [`Program`] and consumed by
/// [`run`](Self::run). The program must outlive the context, since the
/// function table borrows its definitions.
pub struct Context<'p, 't> {
    /// Every variable visible to the running program.
    pub scopes:    Scopes,
    /// User-defined functions by name.
    pub functions: HashMap<&'p str, &'p FunctionDef>,
    /// Console used by `print`, `read` and `clear`.
    pub terminal:  &'t mut dyn Terminal,
}

impl<'p, 't> Context<'p, 't> {
    /// Creates a context for `program` with an empty global scope.
    ///
    /// When two functions share a name the later definition wins here; the
    /// analyzer rejects such programs before they reach the evaluator.
    #[must_use]
    pub fn new(program: &'p Program, terminal: &'t mut dyn Terminal) -> Self {
        let functions = program.functions
                               .iter()
                               .map(|function| (function.name.as_str(), function))
                               .collect();

        Self { scopes: Scopes::new(),
               functions,
               terminal }
    }

    /// Runs the top-level statements of a program.
    ///
    /// # Returns
    /// The process exit code: `0` when execution falls off the end or hits a
    /// bare `return`, otherwise the top-level return value coerced to `int`.
    ///
    /// # Errors
    /// The first runtime error that no `try` block caught.
    ///
    /// # Example
    /// ```
    /// use skimskript::interpreter::{
    ///     evaluator::core::Context, lexer::tokenize, parser::core::parse_program,
    ///     terminal::BufferTerminal,
    /// };
    ///
    /// let stream = tokenize(&["declare int x as 6", "return x * 7"]).unwrap();
    /// let program = parse_program(&stream).unwrap();
    /// let mut terminal = BufferTerminal::new();
    ///
    /// let code = Context::new(&program, &mut terminal).run(&program).unwrap();
    /// assert_eq!(code, 42);
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<i32> {
        debug!("Executing {} top-level statement(s)", program.statements.len());

        match self.exec_statements(&program.statements)? {
            BlockExit::Returned(Some(value)) => Ok(value.as_int()),
            BlockExit::Returned(None) | BlockExit::Completed => Ok(0),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. A call to a
    /// function that returns nothing is an error here, since every
    /// expression must produce a value.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, line } => self.eval_identifier(name, *line),
            Expr::Math { left,
                         operator,
                         right,
                         line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_math(*operator, left, right, *line)
            },
            Expr::Comparison { left,
                               operator,
                               right,
                               line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_comparison(*operator, &left, &right, *line)
            },
            Expr::Logic { left,
                          operator,
                          right,
                          .. } => self.eval_logic(left, *operator, right)
                                      .map(|outcome| Value::Bool(outcome.result)),
            Expr::FunctionCall(call) => {
                self.eval_call(call)?
                    .ok_or_else(|| RuntimeError::VoidValueUsed { name: call.name.clone(),
                                                                 line: call.line, })
            },
        }
    }

    /// Looks up a variable and returns a copy of its value.
    pub(crate) fn eval_identifier(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.scopes
            .lookup(name)
            .and_then(|slot| self.scopes.value(slot))
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                             line })
    }

    /// Runs a block in its own scope level.
    ///
    /// The level is closed again whether the block completes, returns or
    /// fails, so variables declared inside never leak.
    pub fn exec_block(&mut self, block: &Block) -> EvalResult<BlockExit> {
        self.scopes.enter_block();
        let result = self.exec_statements(&block.statements);
        self.scopes.exit_block();
        result
    }

    /// Runs statements in the current scope level until one returns.
    pub fn exec_statements(&mut self, statements: &[Statement]) -> EvalResult<BlockExit> {
        for statement in statements {
            trace!("Executing line {}", statement.line_number());
            if let BlockExit::Returned(value) = self.exec_statement(statement)? {
                return Ok(BlockExit::Returned(value));
            }
        }
        Ok(BlockExit::Completed)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::interpreter::{
        lexer::tokenize, parser::core::parse_program, terminal::BufferTerminal,
    };

    fn run(source: &str) -> (EvalResult<i32>, String) {
        let lines: Vec<&str> = source.lines().collect();
        let program = parse_program(&tokenize(&lines).unwrap()).unwrap();
        let mut terminal = BufferTerminal::new();
        let result = Context::new(&program, &mut terminal).run(&program);
        (result, terminal.output().to_string())
    }

    #[test]
    fn falls_off_the_end_with_zero() {
        assert_eq!(run("declare int x as 3").0, Ok(0));
        assert_eq!(run("return").0, Ok(0));
    }

    #[test]
    fn top_level_return_becomes_exit_code() {
        assert_eq!(run("return 2.9").0, Ok(2));
        assert_eq!(run("return \"12\"").0, Ok(12));
        assert_eq!(run("return true").0, Ok(1));
    }

    #[test]
    fn return_stops_execution() {
        let (result, output) = run(indoc! {r#"
            print("before")
            if true {
                return 4
            }
            print("after")
        "#});
        assert_eq!(result, Ok(4));
        assert_eq!(output, "before\n");
    }

    #[test]
    fn non_finite_exit_code_is_rejected() {
        let (result, _) = run("return 1.0 / 0.0 + 1");
        assert_eq!(result, Err(RuntimeError::FloatDivisionByZero { line: 1 }));

        let (result, _) = run(indoc! {"
            declare float big as 300000000000000000000000000000000000000.0
            return big * 10.0
        "});
        assert!(matches!(result, Err(RuntimeError::InvalidExitCode { line: 2, .. })));
    }

    #[test]
    fn unknown_identifier_at_runtime() {
        assert_eq!(run("print(ghost)").0,
                   Err(RuntimeError::UnknownIdentifier { name: "ghost".to_string(),
                                                         line: 1, }));
    }

    #[test]
    fn expressions_follow_precedence() {
        let (_, output) = run(indoc! {r#"
            print(1 + 2 * 3)
            print(2 ^ 3 ^ 2)
            print(-2 ^ 2)
            print((1 + 2) * 3)
            print(7 / 2, 7.0 / 2, 7 % 3)
            print("a" + 1 + 2)
        "#});
        assert_eq!(output, "7\n512\n4\n9\n3\n3.5\n1\na12\n");
    }
}
