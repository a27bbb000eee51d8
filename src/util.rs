/// Numeric conversion helpers.
///
/// Lossy conversions between `usize`, `i32` and `f32` that the language
/// defines explicitly, such as using a string's length as a number.
pub mod num;
/// Source file loading.
///
/// Validates the `.skim` extension and splits a source file into the lines
/// the scanner consumes.
pub mod source;
