//! The out-of-scope line-editing front end, specified only by its
//! interface. Anything that can hand the REPL one line at a time — a
//! readline-style editor with completion, a test harness feeding canned
//! input — can implement `LineSource`. This crate ships exactly one
//! implementation: a plain blocking reader over `Stdin`.

use std::io::{self, BufRead, Write};

/// Supplies one input line at a time to the REPL controller.
pub trait LineSource {
    /// Print `prompt`, then read one line. `Ok(None)` means end of input
    /// (the REPL should exit cleanly); the returned string never includes
    /// the trailing newline.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the process's standard input with no editing or completion.
pub struct StdinLineSource {
    stdin: io::Stdin,
}

impl StdinLineSource {
    pub fn new() -> StdinLineSource {
        StdinLineSource { stdin: io::stdin() }
    }
}

impl Default for StdinLineSource {
    fn default() -> Self {
        StdinLineSource::new()
    }
}

impl LineSource for StdinLineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let mut lock = self.stdin.lock();
        let n = lock.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
