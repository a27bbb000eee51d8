use crate::{
    ast::MathOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::int_pow,
};

impl Context<'_, '_> {
    /// Integer arithmetic.
    ///
    /// Overflow wraps. Division truncates toward zero and the remainder takes
    /// the sign of the dividend.
    ///
    /// # Errors
    /// `RuntimeError::IntegerDivisionByZero` for `/` and `%` with a zero
    /// divisor.
    pub fn eval_int_math(operator: MathOperator, a: i32, b: i32, line: usize) -> EvalResult<Value> {
        let result = match operator {
            MathOperator::Add => a.wrapping_add(b),
            MathOperator::Subtract => a.wrapping_sub(b),
            MathOperator::Multiply => a.wrapping_mul(b),
            MathOperator::Divide | MathOperator::Modulo if b == 0 => {
                return Err(RuntimeError::IntegerDivisionByZero { line });
            },
            MathOperator::Divide => a.wrapping_div(b),
            MathOperator::Modulo => a.wrapping_rem(b),
            MathOperator::Power => int_pow(a, b),
        };
        Ok(Value::Int(result))
    }

    /// Float arithmetic.
    ///
    /// # Errors
    /// `RuntimeError::FloatDivisionByZero` for `/` and `%` with a zero
    /// divisor.
    pub fn eval_float_math(operator: MathOperator, a: f32, b: f32, line: usize) -> EvalResult<Value> {
        let result = match operator {
            MathOperator::Add => a + b,
            MathOperator::Subtract => a - b,
            MathOperator::Multiply => a * b,
            MathOperator::Divide | MathOperator::Modulo if b == 0.0 => {
                return Err(RuntimeError::FloatDivisionByZero { line });
            },
            MathOperator::Divide => a / b,
            MathOperator::Modulo => a % b,
            MathOperator::Power => a.powf(b),
        };
        Ok(Value::Float(result))
    }

    /// Boolean "arithmetic".
    ///
    /// Only reached when both operands are booleans. Each operator maps to a
    /// logic function:
    ///
    /// | operator | result            |
    /// |----------|-------------------|
    /// | `+`      | `a or b`          |
    /// | `-`      | `a and not b`     |
    /// | `*`      | `a and b`         |
    /// | `/`      | `not a and b`     |
    /// | `^`      | `b implies a`     |
    /// | `%`      | `a xor b`         |
    #[must_use]
    pub const fn eval_bool_math(operator: MathOperator, a: bool, b: bool) -> Value {
        Value::Bool(match operator {
                        MathOperator::Add => a || b,
                        MathOperator::Subtract => a && !b,
                        MathOperator::Multiply => a && b,
                        MathOperator::Divide => !a && b,
                        MathOperator::Power => !b || a,
                        MathOperator::Modulo => a ^ b,
                    })
    }
}
