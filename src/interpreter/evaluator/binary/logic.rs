use crate::{
    ast::{Expr, LogicOperator},
    interpreter::evaluator::core::{Context, EvalResult},
};

/// The operands and result of a logic operation.
///
/// Assertions use the operands to describe a failed condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicOutcome {
    /// The left operand coerced to `bool`.
    pub left:   bool,
    /// The right operand coerced to `bool`, or `None` if it was skipped.
    pub right:  Option<bool>,
    /// The value of the whole expression.
    pub result: bool,
}

impl Context<'_, '_> {
    /// Evaluates `left <operator> right` on booleans.
    ///
    /// The left operand is always evaluated. The right operand is skipped,
    /// together with any calls inside it, when `left` is `false` for `and`
    /// or `true` for `or`. `xor` always evaluates both sides.
    pub fn eval_logic(&mut self,
                      left: &Expr,
                      operator: LogicOperator,
                      right: &Expr)
                      -> EvalResult<LogicOutcome> {
        let left = self.eval(left)?.as_bool();

        let decided = match operator {
            LogicOperator::And if !left => Some(false),
            LogicOperator::Or if left => Some(true),
            _ => None,
        };
        if let Some(result) = decided {
            return Ok(LogicOutcome { left,
                                     right: None,
                                     result });
        }

        let right = self.eval(right)?.as_bool();
        let result = match operator {
            LogicOperator::And => left && right,
            LogicOperator::Or => left || right,
            LogicOperator::Xor => left ^ right,
        };

        Ok(LogicOutcome { left,
                          right: Some(right),
                          result })
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::interpreter::{
        evaluator::core::Context, lexer::tokenize, parser::core::parse_program,
        terminal::BufferTerminal,
    };

    fn output(source: &str) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let program = parse_program(&tokenize(&lines).unwrap()).unwrap();
        let mut terminal = BufferTerminal::new();
        Context::new(&program, &mut terminal).run(&program).unwrap();
        terminal.output().to_string()
    }

    const SIDE_EFFECT: &str = indoc! {r#"
        define bool function sideEffect() {
            print("called")
            return true
        }
    "#};

    #[test]
    fn short_circuit_skips_right_operand() {
        let source = format!("{SIDE_EFFECT}declare bool a as true or run sideEffect()\n\
                              declare bool b as false and run sideEffect()\n\
                              print(a, b)");
        assert_eq!(output(&source), "true\nfalse\n");
    }

    #[test]
    fn undecided_left_operand_evaluates_right_once() {
        let source = format!("{SIDE_EFFECT}declare bool a as false or run sideEffect()\n\
                              declare bool b as true and run sideEffect()\n\
                              declare bool c as true xor run sideEffect()\n\
                              print(a, b, c)");
        assert_eq!(output(&source), "called\ncalled\ncalled\ntrue\ntrue\nfalse\n");
    }

    #[test]
    fn operands_are_coerced_to_bool() {
        assert_eq!(output("print(1 and \"yes\", 0 or \"\", 2 xor 0.0)"), "true\nfalse\ntrue\n");
    }
}
