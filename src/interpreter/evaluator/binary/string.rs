use crate::{
    ast::MathOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_, '_> {
    /// String arithmetic.
    ///
    /// `+` concatenates and `-` removes the first occurrence of the right
    /// string from the left one.
    ///
    /// # Errors
    /// `RuntimeError::UnsupportedStringOperation` for `* / % ^`.
    ///
    /// # Example
    /// ```
    /// use skimskript::{
    ///     ast::MathOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_string_math(MathOperator::Subtract, "hello world", "o", 1);
    /// assert_eq!(result.unwrap(), Value::from("hell world"));
    /// ```
    pub fn eval_string_math(operator: MathOperator, a: &str, b: &str, line: usize) -> EvalResult<Value> {
        match operator {
            MathOperator::Add => Ok(Value::String(format!("{a}{b}"))),
            MathOperator::Subtract => Ok(Value::String(a.replacen(b, "", 1))),
            _ => Err(RuntimeError::UnsupportedStringOperation { operator: operator.to_string(),
                                                                line }),
        }
    }
}
