//! The builtin registry: commands the executor dispatches to in-process
//! instead of spawning an external. Every builtin runs synchronously to
//! completion and writes whatever it produces into the `Sink` it is
//! handed before returning, so it never needs the poll-based
//! deadlock-avoidance a general-purpose process library uses for two
//! externals running concurrently.

mod cd;
mod echo;
mod exit;
mod history;
mod pwd;
mod r#type;

use crate::error::Result;
use crate::shell_state::ShellState;
use crate::sink::Sink;

/// The builtins known to this shell. `type` consults this list before
/// falling back to a `PATH` scan, and the executor consults it before
/// deciding whether a stage is dispatched in-process or spawned.
const NAMES: &[&str] = &["exit", "echo", "pwd", "cd", "type", "history"];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

/// The result of running a builtin: its exit code, and, for `exit`, the
/// process exit code the REPL should stop with.
pub struct Outcome {
    pub exit_code: i32,
    pub terminate: Option<i32>,
}

impl Outcome {
    fn ok() -> Outcome {
        Outcome {
            exit_code: 0,
            terminate: None,
        }
    }

    fn code(code: i32) -> Outcome {
        Outcome {
            exit_code: code,
            terminate: None,
        }
    }
}

/// Dispatch to the builtin named `name`. Panics if `name` is not
/// `is_builtin` — callers are expected to check first.
pub fn run(name: &str, args: &[String], sink: &mut dyn Sink, state: &mut ShellState) -> Result<Outcome> {
    match name {
        "exit" => exit::run(args),
        "echo" => echo::run(args, sink),
        "pwd" => pwd::run(sink),
        "cd" => cd::run(args),
        "type" => r#type::run(args, sink),
        "history" => history::run(args, sink, state),
        other => unreachable!("{other} is not a registered builtin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell_state::ShellState;

    #[test]
    fn registry_matches_the_documented_set() {
        for name in ["exit", "echo", "pwd", "cd", "type", "history"] {
            assert!(is_builtin(name));
        }
        assert!(!is_builtin("ls"));
        assert!(!is_builtin(""));
    }

    #[test]
    fn echo_writes_args_joined_with_spaces() {
        let mut state = ShellState::new(None);
        let mut buf: Vec<u8> = Vec::new();
        let outcome = run("echo", &["hi".into(), "there".into()], &mut buf, &mut state).unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(buf, b"hi there\n");
    }

    #[test]
    fn exit_with_no_argument_terminates_with_zero() {
        let mut state = ShellState::new(None);
        let mut buf: Vec<u8> = Vec::new();
        let outcome = run("exit", &[], &mut buf, &mut state).unwrap();
        assert_eq!(outcome.terminate, Some(0));
    }
}
