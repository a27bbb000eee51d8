/// Runtime values and their data types.
///
/// Defines `Value`, the closed set of four value kinds the interpreter works
/// with, and `DataType`, the static type of variables and parameters. All
/// implicit conversions between kinds live here.
pub mod core;
