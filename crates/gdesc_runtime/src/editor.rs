//! Terminal console backed by rustyline.
//!
//! Player commands are read with line editing, history, and completion of
//! the world's vocabulary words. Output goes to stdout.

use std::io::Write;

use gdesc_engine::{Console, ReadResult};
use gdesc_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{
    Completer, Config, Context, Editor, Helper, Highlighter, Hinter, Validator,
};

/// Completes the word under the cursor from the game vocabulary.
struct VocabularyCompleter {
    words: Vec<String>,
}

impl Completer for VocabularyCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let prefix = head[start..].to_lowercase();
        let candidates = self
            .words
            .iter()
            .filter(|word| word.starts_with(&prefix))
            .map(|word| Pair {
                display: word.clone(),
                replacement: word.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

#[derive(Helper, Completer, Hinter, Validator, Highlighter)]
struct GameHelper {
    #[rustyline(Completer)]
    completer: VocabularyCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

/// Console on the controlling terminal.
pub struct RustylineConsole {
    editor: Editor<GameHelper, DefaultHistory>,
}

impl RustylineConsole {
    /// Creates a console with an empty completion vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(500)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = GameHelper {
            completer: VocabularyCompleter { words: Vec::new() },
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }

    /// Replaces the words offered for tab completion.
    pub fn set_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.words = words.into_iter().map(Into::into).collect();
        }
    }
}

impl Console for RustylineConsole {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadResult::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Io(e.to_string()))),
        }
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")
            .and_then(|()| stdout.flush())
            .map_err(|e| Error::new(ErrorKind::Io(format!("failed to write output: {e}"))))
    }
}
