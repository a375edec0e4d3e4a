use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::shell_state::ShellState;
use crate::sink::Sink;

use super::Outcome;

/// `history [N] | history -r [file] | history -w [file]`.
///
/// With no argument, lists the whole in-memory history. With a numeric
/// argument, lists only the last `N` entries, indexed from their true
/// position (not renumbered from 1), right-aligned to width 5 — matching
/// `fc -l`/`history N` in the shells this was modeled on. `-r`/`-w` load
/// from or save to a file instead of listing, defaulting to
/// `state.history_file` when no path is given; if neither an explicit path
/// nor a default is available, that's an invalid usage. I/O failures
/// against an explicit or default path are silent, matching every other
/// builtin's behavior for this pair.
pub fn run(args: &[String], sink: &mut dyn Sink, state: &mut ShellState) -> Result<Outcome> {
    match args {
        [] => {
            list(&state.history, 0, sink);
            Ok(Outcome::ok())
        }
        [n] if n.parse::<usize>().is_ok() => {
            let n: usize = n.parse().unwrap();
            let start = state.history.len().saturating_sub(n);
            list(&state.history[start..], start, sink);
            Ok(Outcome::ok())
        }
        [flag] if flag == "-r" => with_default_path(state, sink, |s, path| {
            let _ = s.load_history(path);
        }),
        [flag] if flag == "-w" => with_default_path(state, sink, |s, path| {
            let _ = s.save_history(path);
        }),
        [flag, path] if flag == "-r" => {
            let _ = state.load_history(&PathBuf::from(path));
            Ok(Outcome::ok())
        }
        [flag, path] if flag == "-w" => {
            let _ = state.save_history(&PathBuf::from(path));
            Ok(Outcome::ok())
        }
        _ => {
            let _ = writeln!(sink, "history: invalid usage");
            Ok(Outcome::code(1))
        }
    }
}

/// Run `action` against `state.history_file` if one was configured;
/// otherwise report the same "invalid usage" a malformed argument list
/// gets, since `-r`/`-w` need a path from somewhere.
fn with_default_path(
    state: &mut ShellState,
    sink: &mut dyn Sink,
    action: impl FnOnce(&mut ShellState, &std::path::Path),
) -> Result<Outcome> {
    match state.history_file.clone() {
        Some(path) => {
            action(state, &path);
            Ok(Outcome::ok())
        }
        None => {
            let _ = writeln!(sink, "history: invalid usage");
            Ok(Outcome::code(1))
        }
    }
}

fn list(entries: &[String], base_index: usize, sink: &mut dyn Sink) {
    for (offset, entry) in entries.iter().enumerate() {
        let index = base_index + offset + 1;
        let _ = writeln!(sink, "{:>5}  {}", index, entry);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn state_with(entries: &[&str]) -> ShellState {
        let mut state = ShellState::new(None);
        for e in entries {
            state.history.push(e.to_string());
        }
        state
    }

    #[test]
    fn no_argument_lists_everything_from_one() {
        let mut state = state_with(&["a", "b", "c"]);
        let mut buf = Vec::new();
        run(&[], &mut buf, &mut state).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "    1  a\n    2  b\n    3  c\n");
    }

    #[test]
    fn numeric_argument_keeps_true_indices() {
        let mut state = state_with(&["a", "b", "c", "d", "e"]);
        let mut buf = Vec::new();
        run(&["2".to_string()], &mut buf, &mut state).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "    4  d\n    5  e\n");
    }

    #[test]
    fn write_then_read_round_trips_through_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let mut state = state_with(&["a", "b"]);
        let mut buf = Vec::new();

        run(&["-w".to_string(), path.to_string_lossy().into_owned()], &mut buf, &mut state).unwrap();

        let mut fresh = ShellState::new(None);
        run(&["-r".to_string(), path.to_string_lossy().into_owned()], &mut buf, &mut fresh).unwrap();
        assert_eq!(fresh.history, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn bare_dash_w_then_dash_r_use_the_configured_default_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let mut state = ShellState::new(Some(path.clone()));
        state.history.push("a".to_string());
        state.history.push("b".to_string());
        let mut buf = Vec::new();

        run(&["-w".to_string()], &mut buf, &mut state).unwrap();

        let mut fresh = ShellState::new(Some(path));
        run(&["-r".to_string()], &mut buf, &mut fresh).unwrap();
        assert_eq!(fresh.history, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn bare_dash_r_without_a_default_path_is_invalid_usage() {
        let mut state = ShellState::new(None);
        let mut buf = Vec::new();
        let outcome = run(&["-r".to_string()], &mut buf, &mut state).unwrap();
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(String::from_utf8(buf).unwrap(), "history: invalid usage\n");
    }
}
