use campus_app::Confirm;
use console::Term;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

pub enum ReadResult {
    Success(String),
    Empty,
    Continue,
    Exit,
}

/// Line editor for the interactive chat, with in-memory history.
pub struct CampusEditor {
    editor: DefaultEditor,
}

impl CampusEditor {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }

    pub fn prompt(&mut self, prompt: &str) -> anyhow::Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return Ok(ReadResult::Empty);
                }
                self.editor.add_history_entry(trimmed)?;
                Ok(ReadResult::Success(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Continue),
            Err(ReadlineError::Eof) => Ok(ReadResult::Exit),
            Err(error) => Err(error.into()),
        }
    }
}

/// Reads a password without echoing it.
pub fn read_password() -> anyhow::Result<String> {
    let term = Term::stderr();
    term.write_str("Password: ")?;
    Ok(term.read_secure_line()?)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// `[y/N]` prompt on stderr. Anything but yes, including a read failure,
/// declines.
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&self, message: &str) -> bool {
        let term = Term::stderr();
        if let Err(error) = term.write_str(&format!("{message} [y/N] ")) {
            warn!(?error, "Failed to show confirmation prompt");
            return false;
        }
        term.read_line()
            .map(|answer| is_yes(&answer))
            .unwrap_or(false)
    }
}
