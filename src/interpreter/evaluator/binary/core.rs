use crate::{
    ast::MathOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{DataType, Value},
    },
};

impl Context<'_, '_> {
    /// Evaluates an arithmetic operation between two values.
    ///
    /// Both operands are first coerced to the higher of their two kinds
    /// (`String > Float > Int > Bool`), then the operation runs on that kind.
    ///
    /// # Parameters
    /// - `operator`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use skimskript::{
    ///     ast::MathOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_math(MathOperator::Add, Value::Int(3), Value::Float(0.5), 1);
    /// assert_eq!(result.unwrap(), Value::Float(3.5));
    ///
    /// let result = Context::eval_math(MathOperator::Add, Value::from("n="), Value::Int(4), 1);
    /// assert_eq!(result.unwrap(), Value::from("n=4"));
    /// ```
    pub fn eval_math(operator: MathOperator,
                     left: Value,
                     right: Value,
                     line: usize)
                     -> EvalResult<Value> {
        let kind = DataType::resolve(left.data_type(), right.data_type());

        match (left.into_type(kind), right.into_type(kind)) {
            (Value::Int(a), Value::Int(b)) => Self::eval_int_math(operator, a, b, line),
            (Value::Float(a), Value::Float(b)) => Self::eval_float_math(operator, a, b, line),
            (Value::Bool(a), Value::Bool(b)) => Ok(Self::eval_bool_math(operator, a, b)),
            (Value::String(a), Value::String(b)) => {
                Self::eval_string_math(operator, &a, &b, line)
            },
            (left, right) => {
                Err(RuntimeError::InvalidOperation { details: format!("operands {left:?} and {right:?} did not resolve to one kind"),
                                                     line })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math(operator: MathOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_math(operator, left.into(), right.into(), 1)
    }

    #[test]
    fn mixed_operands_are_promoted() {
        assert_eq!(math(MathOperator::Add, true, 2), Ok(Value::Int(3)));
        assert_eq!(math(MathOperator::Multiply, 2, 1.5_f32), Ok(Value::Float(3.0)));
        assert_eq!(math(MathOperator::Add, 1.5_f32, "x"), Ok(Value::from("1.5x")));
        assert_eq!(math(MathOperator::Add, false, "!"), Ok(Value::from("false!")));
    }

    #[test]
    fn division_by_zero_depends_on_kind() {
        assert_eq!(math(MathOperator::Divide, 5, 0),
                   Err(RuntimeError::IntegerDivisionByZero { line: 1 }));
        assert_eq!(math(MathOperator::Divide, 5.0_f32, 0),
                   Err(RuntimeError::FloatDivisionByZero { line: 1 }));
        assert_eq!(math(MathOperator::Modulo, 5, false),
                   Err(RuntimeError::IntegerDivisionByZero { line: 1 }));
    }
}
