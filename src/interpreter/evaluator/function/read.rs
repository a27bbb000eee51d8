use crate::interpreter::{
    evaluator::{core::EvalResult, function::terminal_error},
    terminal::Terminal,
    value::core::Value,
};

/// Reads one line of input.
///
/// Any arguments form the prompt: they are joined with line breaks and
/// followed by a single space. No prompt is shown without arguments. At end
/// of input the result is the empty string.
///
/// # Example
/// ```
/// use skimskript::interpreter::{
///     evaluator::function::read::read, terminal::BufferTerminal, value::core::Value,
/// };
///
/// let mut terminal = BufferTerminal::with_input(["blue"]);
/// let answer = read(&mut terminal, &[Value::from("Favourite colour?")], 1).unwrap();
///
/// assert_eq!(answer, Some(Value::from("blue")));
/// assert_eq!(terminal.output(), "Favourite colour? ");
/// ```
pub fn read(terminal: &mut dyn Terminal, args: &[Value], line: usize) -> EvalResult<Option<Value>> {
    if !args.is_empty() {
        let prompt = args.iter().map(Value::as_string).collect::<Vec<_>>().join("\n");
        terminal.write_prompt(&format!("{prompt} "))
                .map_err(|error| terminal_error(&error, line))?;
    }

    let input = terminal.read_line()
                        .map_err(|error| terminal_error(&error, line))?;
    Ok(Some(Value::String(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::terminal::BufferTerminal;

    #[test]
    fn multiple_prompt_arguments_share_one_prompt() {
        let mut terminal = BufferTerminal::with_input(["7"]);
        let value = read(&mut terminal, &[Value::from("Pick"), Value::Int(1)], 1).unwrap();

        assert_eq!(value, Some(Value::from("7")));
        assert_eq!(terminal.output(), "Pick\n1 ");
    }

    #[test]
    fn exhausted_input_reads_empty_string() {
        let mut terminal = BufferTerminal::new();
        assert_eq!(read(&mut terminal, &[], 1).unwrap(), Some(Value::from("")));
        assert_eq!(terminal.output(), "");
    }
}
