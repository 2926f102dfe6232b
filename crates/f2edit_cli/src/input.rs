use std::io;

use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::completion::{CompletionTable, ShellHelper};

/// Where the launcher and the shell read their answers from.
pub trait LineSource {
    /// Show `prompt` and read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Interactive terminal input with history and tab completion.
pub struct Terminal {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl Terminal {
    pub fn new() -> rustyline::Result<Self> {
        let editor = Editor::<ShellHelper, DefaultHistory>::new()?;
        Ok(Self { editor })
    }

    pub fn set_completions(&mut self, table: CompletionTable) {
        self.editor.set_helper(Some(ShellHelper::new(table)));
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl-C drops the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}
