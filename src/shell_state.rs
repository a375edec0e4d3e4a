//! In-memory state carried across one REPL session: command history and
//! where (if anywhere) it should be persisted.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Shared mutable state the builtins and the REPL loop both touch.
pub struct ShellState {
    /// Every line successfully lexed and parsed so far, oldest first.
    pub history: Vec<String>,
    /// Where `history -r`/`history -w` read from and write to by default,
    /// and where the session's history is saved on a clean exit, if set.
    pub history_file: Option<PathBuf>,
}

impl ShellState {
    pub fn new(history_file: Option<PathBuf>) -> ShellState {
        ShellState {
            history: Vec::new(),
            history_file,
        }
    }

    /// Record `line` unless it is empty or a repeat of the immediately
    /// preceding entry (consecutive-duplicate suppression, the common
    /// convention across the shells in the corpus).
    pub fn record(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if self.history.last().map(String::as_str) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
    }

    /// Load history entries from `path`, appending them after whatever is
    /// already in memory.
    pub fn load_history(&mut self, path: &std::path::Path) -> io::Result<()> {
        let file = fs::File::open(path)?;
        for line in io::BufReader::new(file).lines() {
            self.history.push(line?);
        }
        Ok(())
    }

    /// Write the full in-memory history to `path`, one entry per line.
    pub fn save_history(&self, path: &std::path::Path) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        for entry in &self.history {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }
}
