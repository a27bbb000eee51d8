use std::fmt;

use crate::{
    ast::LiteralValue,
    util::num::{f32_to_i32_truncating, usize_to_f32_saturating, usize_to_i32_saturating},
};

/// The static type of a variable slot, parameter or function result.
///
/// Variants are declared in coercion precedence order, lowest first, so the
/// derived `Ord` answers "which kind wins" when two operands meet:
/// `String > Float > Int > Bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    /// `bool` / `boolean`
    Bool,
    /// `int` / `integer`, a 32-bit signed integer.
    Int,
    /// `float` / `decimal`, a 32-bit float.
    Float,
    /// `string` / `text`
    String,
}

impl DataType {
    /// Returns the type both operands are coerced to before a binary
    /// operation.
    ///
    /// The result is the higher of the two kinds in the precedence order
    /// `String > Float > Int > Bool`, so the resolution is symmetric.
    ///
    /// # Example
    /// ```
    /// use skimskript::interpreter::value::core::DataType;
    ///
    /// assert_eq!(DataType::resolve(DataType::Int, DataType::Float), DataType::Float);
    /// assert_eq!(DataType::resolve(DataType::String, DataType::Bool), DataType::String);
    /// ```
    #[must_use]
    pub fn resolve(left: Self, right: Self) -> Self {
        left.max(right)
    }

    /// Returns the literal a declaration without initializer receives.
    #[must_use]
    pub fn default_literal(self) -> LiteralValue {
        match self {
            Self::Bool => LiteralValue::Bool(false),
            Self::Int => LiteralValue::Int(0),
            Self::Float => LiteralValue::Float(0.0),
            Self::String => LiteralValue::String(String::new()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        };
        write!(f, "{name}")
    }
}

/// Represents a runtime value in the interpreter.
///
/// Values are plain data. Aliasing between variables only happens through
/// shared slots in the scope arena, never through the values themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 32-bit signed integer.
    Int(i32),
    /// A 32-bit float.
    Float(f32),
    /// `true` or `false`.
    Bool(bool),
    /// UTF-8 text.
    String(String),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Int(n) => Self::Int(*n),
            LiteralValue::Float(x) => Self::Float(*x),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::String(s) => Self::String(s.clone()),
        }
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
            Self::Bool(_) => DataType::Bool,
            Self::String(_) => DataType::String,
        }
    }

    /// Converts the value to another kind, consuming it.
    ///
    /// Conversions never fail. Unparseable strings fall back to their length
    /// when converted to a number.
    ///
    /// # Example
    /// ```
    /// use skimskript::interpreter::value::core::{DataType, Value};
    ///
    /// assert_eq!(Value::Float(-2.9).into_type(DataType::Int), Value::Int(-2));
    /// assert_eq!(Value::from("42").into_type(DataType::Int), Value::Int(42));
    /// assert_eq!(Value::from("hello").into_type(DataType::Int), Value::Int(5));
    /// ```
    #[must_use]
    pub fn into_type(self, target: DataType) -> Self {
        if self.data_type() == target {
            return self;
        }
        match target {
            DataType::Int => Self::Int(self.as_int()),
            DataType::Float => Self::Float(self.as_float()),
            DataType::Bool => Self::Bool(self.as_bool()),
            DataType::String => Self::String(self.as_string()),
        }
    }

    /// Integer view of the value.
    ///
    /// Floats truncate toward zero, booleans map to `1`/`0` and strings are
    /// parsed, falling back to their character count.
    #[must_use]
    pub fn as_int(&self) -> i32 {
        match self {
            Self::Int(n) => *n,
            Self::Float(x) => f32_to_i32_truncating(*x),
            Self::Bool(b) => i32::from(*b),
            Self::String(s) => s.trim()
                                .parse()
                                .unwrap_or_else(|_| usize_to_i32_saturating(s.chars().count())),
        }
    }

    /// Float view of the value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> f32 {
        match self {
            Self::Int(n) => *n as f32,
            Self::Float(x) => *x,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            },
            Self::String(s) => s.trim()
                                .parse()
                                .unwrap_or_else(|_| usize_to_f32_saturating(s.chars().count())),
        }
    }

    /// Boolean view of the value: nonzero numbers and nonempty strings are
    /// `true`.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::Bool(b) => *b,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Text view of the value, as `print` shows it.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [DataType; 4] =
        [DataType::Bool, DataType::Int, DataType::Float, DataType::String];

    #[test]
    fn resolution_is_symmetric_and_follows_precedence() {
        for a in ALL_TYPES {
            for b in ALL_TYPES {
                let resolved = DataType::resolve(a, b);
                assert_eq!(resolved, DataType::resolve(b, a));
                assert!(resolved == a || resolved == b);
            }
        }
        assert_eq!(DataType::resolve(DataType::Bool, DataType::Int), DataType::Int);
        assert_eq!(DataType::resolve(DataType::Int, DataType::Float), DataType::Float);
        assert_eq!(DataType::resolve(DataType::Float, DataType::String), DataType::String);
        assert_eq!(DataType::resolve(DataType::Bool, DataType::Float), DataType::Float);
    }

    #[test]
    fn bool_casts() {
        assert_eq!(Value::Bool(true).into_type(DataType::Int), Value::Int(1));
        assert_eq!(Value::Bool(false).into_type(DataType::Int), Value::Int(0));
        assert_eq!(Value::Bool(true).into_type(DataType::Float), Value::Float(1.0));
        assert_eq!(Value::Bool(false).into_type(DataType::String), Value::from("false"));
    }

    #[test]
    fn numeric_casts() {
        assert_eq!(Value::Int(7).into_type(DataType::Float), Value::Float(7.0));
        assert_eq!(Value::Int(0).into_type(DataType::Bool), Value::Bool(false));
        assert_eq!(Value::Int(-3).into_type(DataType::Bool), Value::Bool(true));
        assert_eq!(Value::Int(12).into_type(DataType::String), Value::from("12"));
        assert_eq!(Value::Float(3.99).into_type(DataType::Int), Value::Int(3));
        assert_eq!(Value::Float(-3.99).into_type(DataType::Int), Value::Int(-3));
        assert_eq!(Value::Float(0.0).into_type(DataType::Bool), Value::Bool(false));
        assert_eq!(Value::Float(2.5).into_type(DataType::String), Value::from("2.5"));
        assert_eq!(Value::Float(3.0).into_type(DataType::String), Value::from("3"));
    }

    #[test]
    fn string_casts_fall_back_to_length() {
        assert_eq!(Value::from(" 17 ").into_type(DataType::Int), Value::Int(17));
        assert_eq!(Value::from("1.25").into_type(DataType::Float), Value::Float(1.25));
        assert_eq!(Value::from("abc").into_type(DataType::Int), Value::Int(3));
        assert_eq!(Value::from("four").into_type(DataType::Float), Value::Float(4.0));
        assert_eq!(Value::from("1.5").into_type(DataType::Int), Value::Int(3));
        assert_eq!(Value::from("").into_type(DataType::Bool), Value::Bool(false));
        assert_eq!(Value::from("no").into_type(DataType::Bool), Value::Bool(true));
    }

    #[test]
    fn literal_text_round_trips_through_its_own_kind() {
        assert_eq!(Value::from("-42").into_type(DataType::Int).into_type(DataType::Int),
                   Value::Int(-42));
        assert_eq!(Value::Float(0.1).into_type(DataType::Float), Value::Float(0.1));
        assert_eq!(Value::Bool(true).into_type(DataType::Bool), Value::Bool(true));
        assert_eq!(Value::from("x y").into_type(DataType::String), Value::from("x y"));
        assert_eq!(Value::Int(i32::MAX).into_type(DataType::String).into_type(DataType::Int),
                   Value::Int(i32::MAX));
    }

    #[test]
    fn default_literals_match_their_type() {
        for data_type in ALL_TYPES {
            assert_eq!(Value::from(&data_type.default_literal()).data_type(), data_type);
        }
    }
}
