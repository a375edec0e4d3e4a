//! The output capability handed to builtins.
//!
//! A builtin never knows whether it is writing to the terminal, a
//! redirected file, or the write end of a pipe feeding the next pipeline
//! stage — it only sees a `&mut dyn Sink`. Blanket-implemented over
//! anything that is `Write`, so `io::Stdout`, `fs::File`, and the pipe
//! `File` handles from `posix::pipe` all qualify with no wrapper type.

use std::io::Write;

/// A writable, flushable byte destination: a terminal stream, a redirected
/// file, or the write end of a pipe to the next pipeline stage.
pub trait Sink: Write {}

impl<T: Write + ?Sized> Sink for T {}
