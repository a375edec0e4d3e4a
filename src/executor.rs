//! Wires a parsed `Pipeline` to builtins and external processes: resolves
//! `PATH`, opens redirection targets, connects stages with OS pipes, and
//! waits for whatever it spawned.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::builtins;
use crate::error::{Error, Result};
use crate::parser::{Pipeline, Stage};
use crate::posix;
use crate::process::Process;
use crate::shell_state::ShellState;
use crate::sink::Sink;
use crate::token::{Fd, Mode};

/// What the REPL loop should do after a line has run.
pub enum Disposition {
    /// Keep prompting. Carries the exit code of the line just run.
    Continue(i32),
    /// Stop the REPL (the `exit` builtin was invoked), with this process
    /// exit code.
    Terminate(i32),
}

/// Search `PATH` for an executable named `name`. Performed fresh on every
/// call — no caching, per the shell's explicit no-caching contract.
pub fn search_path(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let candidate = PathBuf::from(name);
        return is_executable(&candidate).then_some(candidate);
    }

    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn set_cloexec_best_effort(file: &File) {
    use std::os::unix::io::AsRawFd;
    let _ = posix::set_cloexec(file.as_raw_fd(), true);
}

fn is_executable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// One stage's resolved destination for a standard stream: left as the
/// shell's own terminal stream, or pointed at an open file (a redirection
/// target, or the next stage's pipe end).
enum Output {
    Inherit,
    File(File),
}

fn open_redirection(path: &str, mode: Mode) -> Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    if mode == Mode::Append {
        opts.append(true);
    } else {
        opts.truncate(true);
    }
    let file = opts.open(path).map_err(|source| Error::FileOpenFailed {
        path: PathBuf::from(path),
        source,
    })?;
    set_cloexec_best_effort(&file);
    Ok(file)
}

/// Resolve a stage's own redirection for `fd`, if it declared one.
fn own_redirection(stage: &Stage, fd: Fd) -> Result<Option<File>> {
    match stage.redirection(fd) {
        Some(r) => Ok(Some(open_redirection(&r.path, r.mode)?)),
        None => Ok(None),
    }
}

/// Run a full pipeline (one or more stages joined by `|`) to completion.
pub fn execute(pipeline: &Pipeline, state: &mut ShellState) -> Result<Disposition> {
    let stages = &pipeline.stages;
    debug!("executing pipeline of {} stage(s)", stages.len());

    // pipe_reads[k] / pipe_writes[k] are the two ends of the pipe between
    // stage k and stage k+1. Each `Option` is taken exactly once, by the
    // stage on its side of the pipe.
    let n_pipes = stages.len().saturating_sub(1);
    let mut pipe_reads: Vec<Option<File>> = Vec::with_capacity(n_pipes);
    let mut pipe_writes: Vec<Option<File>> = Vec::with_capacity(n_pipes);
    for _ in 0..n_pipes {
        let (read, write) = posix::pipe().map_err(|source| Error::SpawnFailed {
            name: "pipe".into(),
            source,
        })?;
        // Close-on-exec by default: a stage's fork() still inherits every
        // pipe end currently open in the parent, not just the one or two
        // it actually needs. Without this, a stage several hops down the
        // pipeline would keep an earlier pipe's write end alive in its own
        // fd table, so the reader on the other end never sees EOF until
        // that unrelated process also exits. dup2 onto 0/1/2 clears
        // CLOEXEC on the new descriptor, so the fd a stage is actually
        // meant to use still survives its own exec.
        set_cloexec_best_effort(&read);
        set_cloexec_best_effort(&write);
        pipe_reads.push(Some(read));
        pipe_writes.push(Some(write));
    }

    let mut processes: Vec<Process> = Vec::new();
    let mut last_code = 0;
    let mut terminate: Option<i32> = None;

    for (i, stage) in stages.iter().enumerate() {
        let stdin_file: Option<File> = if i > 0 { pipe_reads[i - 1].take() } else { None };

        // A redirection that fails to open aborts only this stage (spec.md
        // §4.4's Pending->Completed-with-error transition): record the
        // error, release whatever this stage was holding, and move on to
        // the next stage instead of propagating out of `execute` and
        // leaking every process already spawned earlier in the pipeline.
        let own_stdout = match own_redirection(stage, Fd::Stdout) {
            Ok(r) => r,
            Err(err) => {
                last_code = stage_error_code(&err);
                report_stage_error(&err, Output::Inherit);
                if let Some(unused) = pipe_writes.get_mut(i) {
                    unused.take();
                }
                continue;
            }
        };
        let stdout_output = match own_stdout {
            Some(file) => {
                // This stage's stdout is redirected away from the pipe that
                // would otherwise carry it to the next stage. Drop the
                // parent's copy of that pipe's write end right now: left
                // open, it would be an extra writer nobody uses, and the
                // next stage's read on the other end would never see EOF.
                if let Some(unused) = pipe_writes.get_mut(i) {
                    unused.take();
                }
                Output::File(file)
            }
            None => match pipe_writes.get_mut(i).and_then(Option::take) {
                Some(file) => Output::File(file),
                None => Output::Inherit,
            },
        };

        // stderr is never connected to a pipe; only an explicit
        // redirection moves it off the terminal.
        let own_stderr = match own_redirection(stage, Fd::Stderr) {
            Ok(r) => r,
            Err(err) => {
                last_code = stage_error_code(&err);
                report_stage_error(&err, Output::Inherit);
                continue;
            }
        };
        let stderr_output = match own_stderr {
            Some(file) => Output::File(file),
            None => Output::Inherit,
        };

        let name = stage.argv[0].as_str();
        if builtins::is_builtin(name) {
            let mut sink: Box<dyn Sink> = match stdout_output {
                Output::File(f) => Box::new(f),
                Output::Inherit => Box::new(io::stdout()),
            };
            let stage_result = builtins::run(name, &stage.argv[1..], sink.as_mut(), state);
            drop(sink); // close the pipe write end now, before the next stage blocks reading it

            match stage_result {
                Ok(outcome) => {
                    last_code = outcome.exit_code;
                    if let Some(code) = outcome.terminate {
                        terminate = Some(code);
                    }
                }
                Err(err) => {
                    last_code = stage_error_code(&err);
                    report_stage_error(&err, stderr_output);
                }
            }
        } else {
            match search_path(name) {
                Some(path) => {
                    let mut argv = stage.argv.clone();
                    argv[0] = path.to_string_lossy().into_owned();
                    let spawned = Process::spawn(
                        &argv,
                        stdin_file.as_ref(),
                        output_file(&stdout_output),
                        output_file(&stderr_output),
                    );
                    match spawned {
                        Ok(process) => processes.push(process),
                        Err(err) => {
                            last_code = stage_error_code(&err);
                            report_stage_error(&err, stderr_output);
                        }
                    }
                }
                None => {
                    let err = Error::CommandNotFound {
                        name: name.to_string(),
                    };
                    last_code = stage_error_code(&err);
                    report_stage_error(&err, stderr_output);
                }
            }
            // stderr_output for a successfully spawned external is consumed
            // by `output_file` above and dropped here with `stdin_file`/
            // `stdout_output`, closing the parent's copy of every fd this
            // stage handed to its child.
        }
    }

    for process in processes {
        match process.wait() {
            Ok(status) => last_code = status.code(),
            Err(err) => {
                eprint!("{}", err);
                last_code = 127;
            }
        }
    }

    trace!("pipeline finished with exit code {}", last_code);
    match terminate {
        Some(code) => Ok(Disposition::Terminate(code)),
        None => Ok(Disposition::Continue(last_code)),
    }
}

fn output_file(output: &Output) -> Option<&File> {
    match output {
        Output::File(f) => Some(f),
        Output::Inherit => None,
    }
}

fn stage_error_code(err: &Error) -> i32 {
    match err {
        Error::CommandNotFound { .. } | Error::SpawnFailed { .. } => 127,
        Error::ChdirFailed { .. } | Error::FileOpenFailed { .. } => 1,
        Error::UnterminatedQuote | Error::RedirectionMissingTarget | Error::EmptyPipelineStage => 2,
    }
}

fn report_stage_error(err: &Error, stderr_output: Output) {
    match stderr_output {
        Output::File(mut f) => {
            use std::io::Write;
            let _ = write!(f, "{}", err);
        }
        Output::Inherit => eprint!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::parser;
    use crate::token;

    fn run_line(line: &str, state: &mut ShellState) -> Disposition {
        let tokens = token::lex(line).unwrap();
        let pipeline = parser::parse(tokens).unwrap();
        execute(&pipeline, state).unwrap()
    }

    #[test]
    fn redirection_truncate_then_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut state = ShellState::new(None);

        run_line(&format!("echo one > {}", path.display()), &mut state);
        run_line(&format!("echo two >> {}", path.display()), &mut state);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn later_redirection_wins_over_earlier_truncate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut state = ShellState::new(None);
        fs::write(&path, "stale\n").unwrap();

        run_line(&format!("echo fresh > {}", path.display()), &mut state);

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn redirection_open_failure_aborts_only_its_own_stage() {
        // A failing redirection on stage 1 must not stop stage 2 from
        // running, and must not leave stage 2 (or the shell) hanging on a
        // pipe nobody will ever write to.
        let mut state = ShellState::new(None);
        match run_line(
            "echo hi > /no/such/directory/out.txt | wc -l",
            &mut state,
        ) {
            Disposition::Continue(code) => assert_eq!(code, 0),
            Disposition::Terminate(_) => panic!("expected Continue"),
        }
    }

    #[test]
    fn command_not_found_reports_exit_code_127() {
        let mut state = ShellState::new(None);
        match run_line("definitely-not-a-real-command-xyz", &mut state) {
            Disposition::Continue(code) => assert_eq!(code, 127),
            Disposition::Terminate(_) => panic!("expected Continue"),
        }
    }

    #[test]
    fn exit_builtin_terminates_with_its_code() {
        let mut state = ShellState::new(None);
        match run_line("exit 3", &mut state) {
            Disposition::Terminate(code) => assert_eq!(code, 3),
            Disposition::Continue(_) => panic!("expected Terminate"),
        }
    }

    #[test]
    fn multi_stage_pipeline_with_external_processes() {
        let mut state = ShellState::new(None);
        match run_line("echo hello world | wc -w", &mut state) {
            Disposition::Continue(code) => assert_eq!(code, 0),
            Disposition::Terminate(_) => panic!("expected Continue"),
        }
    }

    #[test]
    fn builtin_output_flows_through_pipeline_to_external() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut state = ShellState::new(None);

        run_line(&format!("echo hello | cat > {}", path.display()), &mut state);

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn search_path_finds_a_coreutil() {
        assert!(search_path("ls").is_some());
    }

    #[test]
    fn search_path_rejects_unknown_name() {
        assert!(search_path("definitely-not-a-real-command-xyz").is_none());
    }
}
