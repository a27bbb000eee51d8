use crate::interpreter::{
    evaluator::{core::EvalResult, function::terminal_error},
    terminal::Terminal,
    value::core::Value,
};

/// Clears the console. Takes no arguments and produces no value.
pub fn clear(terminal: &mut dyn Terminal, _args: &[Value], line: usize) -> EvalResult<Option<Value>> {
    terminal.clear()
            .map_err(|error| terminal_error(&error, line))?;
    Ok(None)
}
