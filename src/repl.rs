//! The REPL controller: prompt, read, lex, parse, execute, repeat. Also
//! the one-shot `-c` entry point used by `tinysh -c '<line>'`.

use log::warn;

use crate::error::Result;
use crate::executor::{self, Disposition};
use crate::line_source::LineSource;
use crate::parser;
use crate::shell_state::ShellState;
use crate::token;

const PROMPT: &str = "$ ";

/// Run the interactive loop until EOF or `exit`, returning the process
/// exit code.
pub fn run(line_source: &mut dyn LineSource, state: &mut ShellState) -> i32 {
    loop {
        let line = match line_source.read_line(PROMPT) {
            Ok(Some(line)) => line,
            Ok(None) => return 0, // EOF on stdin: exit cleanly
            Err(err) => {
                warn!("read error, ending session: {err}");
                return 1;
            }
        };

        state.record(&line);

        match run_line(&line, state) {
            Ok(Disposition::Continue(_)) => {}
            Ok(Disposition::Terminate(code)) => return code,
            Err(err) => eprint!("{}", err),
        }
    }
}

/// Run exactly one line (`tinysh -c '<line>'`), returning the process
/// exit code it should end with.
pub fn run_once(line: &str, state: &mut ShellState) -> i32 {
    match run_line(line, state) {
        Ok(Disposition::Continue(code)) => code,
        Ok(Disposition::Terminate(code)) => code,
        Err(err) => {
            eprint!("{}", err);
            2
        }
    }
}

fn run_line(line: &str, state: &mut ShellState) -> Result<Disposition> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Disposition::Continue(0));
    }

    let tokens = token::lex(line)?;
    if tokens.is_empty() {
        return Ok(Disposition::Continue(0));
    }
    let pipeline = parser::parse(tokens)?;
    executor::execute(&pipeline, state)
}
