//! Player-facing line I/O.
//!
//! The engine reads one line per `input` call and writes whole lines of
//! expanded text. [`ScriptedConsole`] replays canned input and records
//! output, for tests and batch runs.

use std::collections::VecDeque;

use gdesc_foundation::Result;

/// Result of reading a line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadResult {
    /// A line was read.
    Line(String),
    /// The player interrupted input (Ctrl+C).
    Interrupted,
    /// Input is exhausted (Ctrl+D or end of script).
    Eof,
}

/// Line-oriented console.
pub trait Console {
    /// Reads a line, showing `prompt` first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying terminal or stream fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Writes one line of output.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying terminal or stream fails.
    fn write_line(&mut self, text: &str) -> Result<()>;
}

/// Console fed from a fixed script, capturing everything written.
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    prompts: usize,
}

impl ScriptedConsole {
    /// Creates a console that will answer reads with `lines`, then EOF.
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts: 0,
        }
    }

    /// Queues another input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Lines written so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Takes the lines written so far, leaving the log empty.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Number of reads attempted.
    #[must_use]
    pub fn prompts(&self) -> usize {
        self.prompts
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        self.prompts += 1;
        Ok(self
            .input
            .pop_front()
            .map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.output.push(text.to_owned());
        Ok(())
    }
}
