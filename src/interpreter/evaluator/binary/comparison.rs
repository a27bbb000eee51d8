use std::cmp::Ordering;

use crate::{
    ast::ComparisonOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{DataType, Value},
    },
};

/// Maps an ordering to the result of a comparison operator.
///
/// `None` stands for unordered floats (NaN), for which only `!=` holds.
const fn ordering_result(operator: ComparisonOperator, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return matches!(operator, ComparisonOperator::NotEqual);
    };
    match operator {
        ComparisonOperator::Equal => ordering.is_eq(),
        ComparisonOperator::NotEqual => ordering.is_ne(),
        ComparisonOperator::Greater => ordering.is_gt(),
        ComparisonOperator::GreaterEqual => ordering.is_ge(),
        ComparisonOperator::Less => ordering.is_lt(),
        ComparisonOperator::LessEqual => ordering.is_le(),
    }
}

impl Context<'_, '_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Both operands are coerced to their common kind first. Numbers compare
    /// by value and strings compare ordinally, byte by byte. Booleans only
    /// support `==` and `!=`.
    ///
    /// # Errors
    /// `RuntimeError::InvalidOperation` for an ordering comparison between
    /// two booleans, such as `true > false`. Programs can reach it; it is
    /// classified as an interpreter error, exits with code 70 and is not
    /// caught by `try`/`catch`.
    ///
    /// # Example
    /// ```
    /// use skimskript::{
    ///     ast::ComparisonOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(ComparisonOperator::Less,
    ///                                       &Value::Int(3),
    ///                                       &Value::Float(3.5),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(operator: ComparisonOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let kind = DataType::resolve(left.data_type(), right.data_type());

        let ordering = match kind {
            DataType::Int => Some(left.as_int().cmp(&right.as_int())),
            DataType::Float => left.as_float().partial_cmp(&right.as_float()),
            DataType::String => Some(left.as_string().cmp(&right.as_string())),
            DataType::Bool => match operator {
                ComparisonOperator::Equal | ComparisonOperator::NotEqual => {
                    Some(left.as_bool().cmp(&right.as_bool()))
                },
                _ => {
                    return Err(RuntimeError::InvalidOperation { details: format!("cannot order booleans with '{operator}'"),
                                                                line });
                },
            },
        };

        Ok(Value::Bool(ordering_result(operator, ordering)))
    }
}
