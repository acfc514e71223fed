use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented terminal dialogue over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Writes `block` as is, without a trailing newline.
    pub fn print(&mut self, block: impl Display) -> io::Result<()> {
        write!(self.output, "{block}")
    }

    /// Prints `question` and reads one line. `None` once input is exhausted.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T, E: Display>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(e)?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
