use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

/// The console the built-in functions talk to.
///
/// The interpreter never touches stdin or stdout directly, so programs can
/// run against a scripted console in tests.
pub trait Terminal {
    /// Writes `text` followed by a line break.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Writes `text` without a line break and makes it visible immediately.
    fn write_prompt(&mut self, text: &str) -> io::Result<()>;

    /// Reads one line of input without its line terminator.
    ///
    /// Returns an empty string at end of input.
    fn read_line(&mut self) -> io::Result<String>;

    /// Clears the display.
    fn clear(&mut self) -> io::Result<()>;
}

/// A [`Terminal`] backed by the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{text}")
    }

    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{text}")?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        // Erase the screen and move the cursor home.
        write!(stdout, "\x1b[2J\x1b[H")?;
        stdout.flush()
    }
}

/// A [`Terminal`] that records output and replays scripted input.
///
/// # Example
/// ```
/// use skimskript::interpreter::terminal::{BufferTerminal, Terminal};
///
/// let mut terminal = BufferTerminal::with_input(["Ada"]);
/// terminal.write_prompt("Name? ").unwrap();
/// let name = terminal.read_line().unwrap();
/// terminal.write_line(&format!("Hello, {name}")).unwrap();
///
/// assert_eq!(terminal.output(), "Name? Hello, Ada\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferTerminal {
    output: String,
    input:  VecDeque<String>,
    clears: usize,
}

impl BufferTerminal {
    /// Creates a terminal with no scripted input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a terminal that answers reads with `lines`, in order.
    #[must_use]
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { input: lines.into_iter().map(Into::into).collect(),
               ..Self::default() }
    }

    /// Returns everything written since the last clear.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns how often the display was cleared.
    #[must_use]
    pub const fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Terminal for BufferTerminal {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        Ok(self.input.pop_front().unwrap_or_default())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.output.clear();
        self.clears += 1;
        Ok(())
    }
}
