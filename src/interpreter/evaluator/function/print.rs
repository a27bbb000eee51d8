use crate::interpreter::{
    evaluator::{core::EvalResult, function::terminal_error},
    terminal::Terminal,
    value::core::Value,
};

/// Writes every argument to the console, one per line.
///
/// Arguments are shown as their string coercion. Without arguments a single
/// empty line is written.
///
/// # Parameters
/// - `terminal`: Console to write to.
/// - `args`: Values to print.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `None`; `print` produces no value.
///
/// # Example
/// ```
/// use skimskript::interpreter::{
///     evaluator::function::print::print, terminal::BufferTerminal, value::core::Value,
/// };
///
/// let mut terminal = BufferTerminal::new();
/// print(&mut terminal, &[Value::Int(42), Value::Float(1.5)], 1).unwrap();
///
/// assert_eq!(terminal.output(), "42\n1.5\n");
/// ```
pub fn print(terminal: &mut dyn Terminal, args: &[Value], line: usize) -> EvalResult<Option<Value>> {
    let text = args.iter().map(Value::as_string).collect::<Vec<_>>().join("\n");

    terminal.write_line(&text)
            .map_err(|error| terminal_error(&error, line))?;
    Ok(None)
}
