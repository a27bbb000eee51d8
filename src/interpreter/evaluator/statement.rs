use log::trace;

use crate::{
    ast::{Block, ElseBranch, Expr, IfChain, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{BlockExit, Context, EvalResult},
        value::core::{DataType, Value},
    },
};

impl Context<'_, '_> {
    /// Executes a single statement.
    ///
    /// # Returns
    /// [`BlockExit::Returned`] if the statement, or a statement nested in
    /// it, executed a `return`; [`BlockExit::Completed`] otherwise.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<BlockExit> {
        match statement {
            Statement::VariableDeclaration { name,
                                             data_type,
                                             value,
                                             line, } => {
                let value = self.eval(value)?;
                let data_type = data_type.unwrap_or_else(|| value.data_type());
                self.scopes
                    .declare(name, value, data_type)
                    .ok_or_else(|| RuntimeError::VariableAlreadyDeclared { name: name.clone(),
                                                                           line: *line, })?;
                Ok(BlockExit::Completed)
            },
            Statement::Assignment { name, value, line } => {
                let slot = self.scopes.lookup(name).ok_or_else(|| {
                                                      RuntimeError::UnknownIdentifier { name: name.clone(),
                                                                                        line: *line, }
                                                  })?;
                let value = self.eval(value)?;
                self.scopes.assign(slot, value);
                Ok(BlockExit::Completed)
            },
            Statement::FunctionCall(call) => {
                self.eval_call(call)?;
                Ok(BlockExit::Completed)
            },
            Statement::Return { value, line } => {
                let value = value.as_ref().map(|value| self.eval(value)).transpose()?;
                if self.scopes.call_depth() == 0
                   && let Some(Value::Float(x)) = &value
                   && !x.is_finite()
                {
                    return Err(RuntimeError::InvalidExitCode { value: x.to_string(),
                                                               line:  *line, });
                }
                Ok(BlockExit::Returned(value))
            },
            Statement::If(chain) => self.exec_if(chain),
            Statement::While { condition, body, .. } => {
                while self.eval(condition)?.as_bool() {
                    if let exit @ BlockExit::Returned(_) = self.exec_block(body)? {
                        return Ok(exit);
                    }
                }
                Ok(BlockExit::Completed)
            },
            Statement::Repeat { count, body, .. } => {
                let mut iteration: i64 = 0;
                while iteration < i64::from(self.eval(count)?.as_int()) {
                    if let exit @ BlockExit::Returned(_) = self.exec_block(body)? {
                        return Ok(exit);
                    }
                    iteration += 1;
                }
                Ok(BlockExit::Completed)
            },
            Statement::Assertion { condition, line } => {
                self.exec_assertion(condition, *line)?;
                Ok(BlockExit::Completed)
            },
            Statement::TryCatch { try_block,
                                  catch_variable,
                                  catch_block,
                                  .. } => match self.exec_block(try_block) {
                Err(error) if !error.is_interpreter_bug() => {
                    trace!("Caught: {error}");
                    self.exec_catch(catch_variable.as_deref(), &error, catch_block)
                },
                result => result,
            },
        }
    }

    /// Walks an `if` / `else if` / `else` chain and runs the first block
    /// whose condition holds.
    fn exec_if(&mut self, chain: &IfChain) -> EvalResult<BlockExit> {
        let mut link = chain;
        loop {
            if self.eval(&link.condition)?.as_bool() {
                return self.exec_block(&link.body);
            }
            match link.otherwise.as_deref() {
                Some(ElseBranch::ElseIf(next)) => link = next,
                Some(ElseBranch::Else(block)) => return self.exec_block(block),
                None => return Ok(BlockExit::Completed),
            }
        }
    }

    /// Runs a catch block with the error message bound to the catch
    /// variable, if one was named.
    fn exec_catch(&mut self,
                  variable: Option<&str>,
                  error: &RuntimeError,
                  block: &Block)
                  -> EvalResult<BlockExit> {
        let Some(variable) = variable else {
            return self.exec_block(block);
        };

        self.scopes.enter_block();
        // The level was just opened, so the name is always free.
        let _ = self.scopes
                    .declare(variable, Value::String(error.to_string()), DataType::String);
        let result = self.exec_block(block);
        self.scopes.exit_block();
        result
    }

    /// Checks an assertion and describes the failed condition.
    ///
    /// Comparison and logic conditions report both evaluated operands. Any
    /// other condition reports its own value.
    fn exec_assertion(&mut self, condition: &Expr, line: usize) -> EvalResult<()> {
        let failure = match condition {
            Expr::Comparison { left,
                               operator,
                               right,
                               line: expr_line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                let holds = Self::eval_comparison(*operator, &left, &right, *expr_line)?.as_bool();
                (!holds).then(|| (left.to_string(), Some(operator.to_string()), Some(right.to_string())))
            },
            Expr::Logic { left,
                          operator,
                          right,
                          .. } => {
                let outcome = self.eval_logic(left, *operator, right)?;
                (!outcome.result).then(|| {
                                     (outcome.left.to_string(),
                                      Some(operator.to_string()),
                                      outcome.right.map(|right| right.to_string()))
                                 })
            },
            other => {
                let value = self.eval(other)?;
                (!value.as_bool()).then(|| (value.to_string(), None, None))
            },
        };

        match failure {
            Some((left, operator, right)) => Err(RuntimeError::AssertionFailed { left,
                                                                                  operator,
                                                                                  right,
                                                                                  line }),
            None => Ok(()),
        }
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
    fn declarations_coerce_to_their_type() {
        let (_, output) = run(indoc! {r#"
            declare int a as 2.75
            declare string b as 10
            bool c = "non-empty"
            declare d as 1.5
            set d to 7
            declare float e
            print(a, b, c, d, e)
        "#});
        assert_eq!(output, "2\n10\ntrue\n7\n0\n");
    }

    #[test]
    fn assignment_keeps_declared_type() {
        let (_, output) = run(indoc! {r#"
            declare int n as 1
            n = "12"
            print(n + 1)
            set n to 3.9
            print(n)
        "#});
        assert_eq!(output, "13\n3\n");
    }

    #[test]
    fn redeclaration_in_same_block_fails() {
        let (result, _) = run("declare int x\ndeclare int x");
        assert_eq!(result,
                   Err(RuntimeError::VariableAlreadyDeclared { name: "x".to_string(),
                                                               line: 2, }));
    }

    #[test]
    fn if_chain_runs_first_matching_block() {
        let (_, output) = run(indoc! {r#"
            declare int x as 5
            if x is greater than 10 {
                print("big")
            } else if x is at least 5 {
                print("medium")
            } else if x is at least 0 {
                print("small")
            } else {
                print("negative")
            }
            if false { print("never") }
        "#});
        assert_eq!(output, "medium\n");
    }

    #[test]
    fn while_reevaluates_condition() {
        let (_, output) = run(indoc! {"
            declare int i as 0
            while i < 3 {
                print(i)
                set i to i + 1
            }
        "});
        assert_eq!(output, "0\n1\n2\n");
    }

    #[test]
    fn repeat_decrementing_its_own_count_from_three_runs_twice() {
        let (_, output) = run(indoc! {"
            declare int n as 3
            declare int iterations as 0
            repeat n times {
                set n to n - 1
                set iterations to iterations + 1
            }
            print(iterations)
        "});
        // The count is re-read before each pass: 0 < 3, 1 < 2, then 2 < 1 stops.
        assert_eq!(output, "2\n");
    }

    #[test]
    fn repeat_with_fixed_count() {
        let (_, output) = run(indoc! {r#"
            declare int n as 3
            repeat n times {
                print("tick")
            }
            repeat -2 times { print("never") }
        "#});
        assert_eq!(output, "tick\ntick\ntick\n");
    }

    #[test]
    fn block_variables_do_not_outlive_block() {
        let (result, output) = run(indoc! {r#"
            declare int x as 1
            if true {
                declare int x as 2
                declare int inner as 3
                print(x)
            }
            print(x)
            print(inner)
        "#});
        assert_eq!(output, "2\n1\n");
        assert_eq!(result,
                   Err(RuntimeError::UnknownIdentifier { name: "inner".to_string(),
                                                         line: 8, }));
    }

    #[test]
    fn assertion_reports_operands() {
        let (result, _) = run("declare int x as 2\nassert x + 1 == 4");
        assert_eq!(result,
                   Err(RuntimeError::AssertionFailed { left:     "3".to_string(),
                                                       operator: Some("==".to_string()),
                                                       right:    Some("4".to_string()),
                                                       line:     2, }));

        let (result, _) = run("assert false and 1 / 0");
        assert_eq!(result,
                   Err(RuntimeError::AssertionFailed { left:     "false".to_string(),
                                                       operator: Some("and".to_string()),
                                                       right:    None,
                                                       line:     1, }));

        let (result, _) = run("assert 0");
        assert_eq!(result,
                   Err(RuntimeError::AssertionFailed { left:     "0".to_string(),
                                                       operator: None,
                                                       right:    None,
                                                       line:     1, }));

        assert_eq!(run("assert 1 < 2 and \"a\" is \"a\"").0, Ok(0));
    }

    #[test]
    fn try_catch_recovers_from_division_by_zero() {
        let (result, output) = run(indoc! {r#"
            try {
                declare int inside as 1
                print(5 / 0)
            } catch message {
                print(message)
            }
            try {
                print(5.0 / 0.0)
            } catch (string message) {
                print(message)
            }
            try { assert 1 == 2 } catch { print("caught") }
            print(inside)
        "#});
        assert_eq!(output,
                   "Error on line 3: Integer division by zero.\n\
                    Error on line 8: Float division by zero.\n\
                    caught\n");
        assert!(matches!(result, Err(RuntimeError::UnknownIdentifier { line: 13, .. })));
    }

    #[test]
    fn catch_variable_is_scoped_to_catch_block() {
        let (result, _) = run(indoc! {"
            try { assert false } catch message { }
            print(message)
        "});
        assert!(matches!(result, Err(RuntimeError::UnknownIdentifier { line: 2, .. })));
    }

    #[test]
    fn return_inside_try_propagates() {
        let (result, output) = run(indoc! {r#"
            try {
                return 3
            } catch {
                print("not reached")
            }
            print("not reached either")
        "#});
        assert_eq!(result, Ok(3));
        assert_eq!(output, "");
    }
}
