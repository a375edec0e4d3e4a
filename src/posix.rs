//! Thin, safe-signatured wrappers around the raw POSIX calls the executor
//! needs: `pipe`, `fork`, `execvp`, `waitpid`, `dup2`, and close-on-exec.
//! Every wrapper turns a `-1` return into `io::Error::last_os_error` so
//! callers can use `?` the way the rest of the crate does.
//!
//! This module has no concept of a shell, a stage, or a pipeline — it is
//! the same kind of narrow syscall seam the rest of the corpus keeps
//! beneath process-management code, just pared down to what a
//! single-threaded, blocking executor actually calls.

use std::ffi::{CString, OsStr};
use std::fs::File;
use std::io::{Error, Result};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::FromRawFd;
use std::ptr;

fn check_err<T: Ord + Default>(num: T) -> Result<T> {
    if num < T::default() {
        return Err(Error::last_os_error());
    }
    Ok(num)
}

/// Create a pipe, returning `(read_end, write_end)`.
pub fn pipe() -> Result<(File, File)> {
    let mut fds = [0 as libc::c_int; 2];
    check_err(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    Ok(unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) })
}

/// `fork(2)`. Returns `0` in the child, the child's pid in the parent.
///
/// # Safety
/// The child process runs with only the parent's memory snapshot; until it
/// calls `execvp` or `_exit`, it must avoid anything that is not
/// async-signal-safe (allocating through a poisoned global lock, for
/// instance). Callers are expected to go straight from `fork` to `execvp`
/// or `_exit` with nothing but `dup2`/close calls in between.
pub unsafe fn fork() -> Result<u32> {
    check_err(unsafe { libc::fork() }).map(|pid| pid as u32)
}

fn os_to_cstring(s: &OsStr) -> Result<CString> {
    CString::new(s.as_bytes()).map_err(|_| Error::from_raw_os_error(libc::EINVAL))
}

/// Replace the current process image with `cmd`, passing `args` as argv
/// (conventionally including `args[0] == cmd`). Never returns on success.
pub fn execvp<S1, S2>(cmd: S1, args: &[S2]) -> Result<()>
where
    S1: AsRef<OsStr>,
    S2: AsRef<OsStr>,
{
    let args_cstring: Vec<CString> = args
        .iter()
        .map(|a| os_to_cstring(a.as_ref()))
        .collect::<Result<_>>()?;
    let mut argv: Vec<*const libc::c_char> =
        args_cstring.iter().map(|s| s.as_ptr()).collect();
    argv.push(ptr::null());

    let cmd_cstring = os_to_cstring(cmd.as_ref())?;
    check_err(unsafe { libc::execvp(cmd_cstring.as_ptr(), argv.as_ptr()) })?;
    unreachable!("execvp returns only on error, which check_err turns into Err")
}

/// `_exit(2)`: terminate the calling process without running destructors,
/// atexit handlers, or flushing stdio buffers. Used only in a forked child
/// after a failed `execvp`, so the parent's open buffers are never touched.
pub fn exit_now(status: i32) -> ! {
    unsafe { libc::_exit(status) }
}

/// The decoded result of `waitpid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The process called `exit` (or returned from `main`) with this code.
    Exited(i32),
    /// The process was terminated by this signal.
    Signaled(i32),
}

impl ExitStatus {
    /// The shell-visible exit code: the exit code itself, or `128 + signal`.
    pub fn code(&self) -> i32 {
        match *self {
            ExitStatus::Exited(code) => code,
            ExitStatus::Signaled(sig) => 128 + sig,
        }
    }
}

/// Block until `pid` exits, returning its decoded status.
pub fn waitpid(pid: u32) -> Result<ExitStatus> {
    let mut status: libc::c_int = 0;
    check_err(unsafe { libc::waitpid(pid as libc::pid_t, &mut status, 0) })?;
    Ok(decode_exit_status(status))
}

fn decode_exit_status(status: libc::c_int) -> ExitStatus {
    unsafe {
        if libc::WIFEXITED(status) {
            ExitStatus::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            ExitStatus::Signaled(libc::WTERMSIG(status))
        } else {
            ExitStatus::Exited(status)
        }
    }
}

/// `dup2(2)`: make `newfd` refer to the same open file description as
/// `oldfd`, closing `newfd` first if it was already open.
pub fn dup2(oldfd: i32, newfd: i32) -> Result<()> {
    check_err(unsafe { libc::dup2(oldfd, newfd) })?;
    Ok(())
}

/// Set or clear `FD_CLOEXEC` on `fd`, so a pipe end the parent keeps open
/// for bookkeeping doesn't leak into a child's file descriptor table across
/// `execvp`.
pub fn set_cloexec(fd: i32, cloexec: bool) -> Result<()> {
    let current = check_err(unsafe { libc::fcntl(fd, libc::F_GETFD) })?;
    let updated = if cloexec {
        current | libc::FD_CLOEXEC
    } else {
        current & !libc::FD_CLOEXEC
    };
    check_err(unsafe { libc::fcntl(fd, libc::F_SETFD, updated) })?;
    Ok(())
}
