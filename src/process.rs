//! Spawning one external command with its standard streams wired to
//! whatever `File`s the executor has prepared (pipe ends, redirection
//! targets, or left untouched to inherit the shell's own terminal).

use std::fs::File;
use std::os::unix::io::AsRawFd;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::posix;

pub use crate::posix::ExitStatus;

/// A running external process, not yet reaped.
pub struct Process {
    pid: u32,
}

impl Process {
    /// Fork and exec `argv[0]` with `argv` as its arguments, after dup2'ing
    /// `stdin`/`stdout`/`stderr` onto fds 0/1/2 if given. A `None` stream
    /// is left alone, so the child inherits the shell's own stream.
    ///
    /// Callers must drop (close) any pipe ends they handed to the child
    /// *before* calling `wait`; otherwise a reader on the other end of a
    /// pipe can block forever on a write end the parent is still holding
    /// open. The executor's pipeline wiring follows this discipline by
    /// construction: it closes its copy of each pipe end immediately after
    /// the stage that owns it has been spawned.
    pub fn spawn(
        argv: &[String],
        stdin: Option<&File>,
        stdout: Option<&File>,
        stderr: Option<&File>,
    ) -> Result<Process> {
        let name = argv[0].clone();
        trace!("spawning {:?}", argv);

        // Safety: the child only dup2's pre-opened fds and calls execvp or
        // _exit before returning, so no non-async-signal-safe code runs
        // between fork and exec.
        let pid = unsafe { posix::fork() }.map_err(|source| Error::SpawnFailed {
            name: name.clone(),
            source,
        })?;

        if pid == 0 {
            child_exec(argv, stdin, stdout, stderr);
        }

        debug!("spawned {} as pid {}", name, pid);
        Ok(Process { pid })
    }

    /// Block until the process exits, returning its decoded status.
    pub fn wait(self) -> Result<ExitStatus> {
        posix::waitpid(self.pid).map_err(|source| Error::SpawnFailed {
            name: format!("pid {}", self.pid),
            source,
        })
    }
}

/// Runs only in the forked child. Never returns: either `execvp` succeeds
/// and replaces this process image, or it fails and the child exits
/// immediately with 127, the conventional "found it, couldn't run it" code.
fn child_exec(
    argv: &[String],
    stdin: Option<&File>,
    stdout: Option<&File>,
    stderr: Option<&File>,
) -> ! {
    let wire = |file: Option<&File>, fd: i32| -> std::io::Result<()> {
        match file {
            Some(file) => posix::dup2(file.as_raw_fd(), fd),
            None => Ok(()),
        }
    };

    if wire(stdin, 0).is_err() || wire(stdout, 1).is_err() || wire(stderr, 2).is_err() {
        posix::exit_now(127);
    }

    let _ = posix::execvp(&argv[0], argv);
    posix::exit_now(127);
}
