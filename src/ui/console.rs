use std::fmt::Display;
use std::io::{BufRead, Write};

use crossterm::style::{style, Color, Stylize};

use crate::error::{InventoryError, Result};

/// How a status line should stand out from regular output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn color(&self) -> Option<Color> {
        match self {
            StatusKind::Info => None,
            StatusKind::Success => Some(Color::Green),
            StatusKind::Error => Some(Color::Red),
        }
    }
}

/// Line-oriented terminal the workflows talk to. Generic over the reader and
/// writer so tests can script a whole session with in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Print `prompt` without a newline and return the next line with
    /// surrounding whitespace removed. End of input is
    /// [`InventoryError::InputClosed`].
    ///
    /// A line that is not valid UTF-8 is rejected with a message and the
    /// prompt is shown again, so every caller only ever sees text.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                writeln!(self.output)?;
                return Err(InventoryError::InputClosed);
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.error(InventoryError::NotText)?,
            }
        }
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn status(&mut self, text: impl Display, kind: StatusKind) -> Result<()> {
        match kind.color().filter(|_| self.color) {
            Some(color) => writeln!(self.output, "{}", style(text).with(color))?,
            None => writeln!(self.output, "{text}")?,
        }
        Ok(())
    }

    pub fn success(&mut self, text: impl Display) -> Result<()> {
        self.status(text, StatusKind::Success)?;
        self.say("")
    }

    /// Rejections are followed by a blank line so the next prompt stands apart.
    pub fn error(&mut self, text: impl Display) -> Result<()> {
        self.status(text, StatusKind::Error)?;
        self.say("")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
