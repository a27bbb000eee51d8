/// Converts a length or count to `i32`, clamping at `i32::MAX`.
///
/// ## Parameters
/// - `value`: The count to convert.
///
/// ## Returns
/// The value as `i32`, or `i32::MAX` if it does not fit.
///
/// ## Example
/// ```
/// use skimskript::util::num::usize_to_i32_saturating;
///
/// assert_eq!(usize_to_i32_saturating(5), 5);
/// assert_eq!(usize_to_i32_saturating(usize::MAX), i32::MAX);
/// ```
#[must_use]
pub fn usize_to_i32_saturating(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Converts a length or count to `f32`.
///
/// Counts above `2^24` lose precision, which is acceptable for the string
/// length fallback this is used for.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f32_saturating(value: usize) -> f32 {
    value as f32
}

/// Truncates an `f32` toward zero into an `i32`.
///
/// Out-of-range values saturate at the `i32` bounds and NaN becomes `0`.
///
/// ## Example
/// ```
/// use skimskript::util::num::f32_to_i32_truncating;
///
/// assert_eq!(f32_to_i32_truncating(-2.75), -2);
/// assert_eq!(f32_to_i32_truncating(1e20), i32::MAX);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn f32_to_i32_truncating(value: f32) -> i32 {
    value as i32
}

/// Raises an integer to an integer power the way the language defines it.
///
/// Non-negative exponents use wrapping integer exponentiation. Negative
/// exponents are computed in floating point and truncated toward zero, so
/// `2 ^ -1` is `0` and `1 ^ -5` is `1`.
///
/// ## Example
/// ```
/// use skimskript::util::num::int_pow;
///
/// assert_eq!(int_pow(2, 10), 1024);
/// assert_eq!(int_pow(2, -1), 0);
/// assert_eq!(int_pow(-1, -3), -1);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn int_pow(base: i32, exponent: i32) -> i32 {
    u32::try_from(exponent).map_or_else(|_| f32_to_i32_truncating((base as f32).powi(exponent)),
                                        |exponent| base.wrapping_pow(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_exponent_of_zero_saturates() {
        assert_eq!(int_pow(0, -1), i32::MAX);
    }

    #[test]
    fn large_powers_wrap() {
        assert_eq!(int_pow(2, 31), i32::MIN);
        assert_eq!(int_pow(2, 32), 0);
    }

    #[test]
    fn nan_truncates_to_zero() {
        assert_eq!(f32_to_i32_truncating(f32::NAN), 0);
    }
}
