//! Error kinds shared by the lexer, parser, and executor.
//!
//! Every variant corresponds to one of the error kinds named in the
//! specification's error-handling section, and `Display` produces the
//! bit-exact diagnostic string where one is specified. The REPL controller
//! is the only place that catches these: it prints the message to stderr
//! and returns to the prompt.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong lexing, parsing, or executing one input line.
#[derive(Debug, Error)]
pub enum Error {
    /// End of input reached while still inside a single or double quote.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// A redirection operator (`>`, `>>`, `1>`, `1>>`, `2>`, `2>>`) was the
    /// last token of a stage, or was immediately followed by another
    /// operator instead of a word.
    #[error("redirection missing target")]
    RedirectionMissingTarget,

    /// A pipeline stage had no argv tokens after redirections were stripped.
    #[error("empty pipeline stage")]
    EmptyPipelineStage,

    /// An external command could not be found on `PATH`.
    #[error("{name}: command not found\n")]
    CommandNotFound {
        /// The command name that was searched for.
        name: String,
    },

    /// A redirection target file could not be opened.
    #[error("{path}: {source}")]
    FileOpenFailed {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// `cd` could not change to the requested directory.
    #[error("cd: {path}: No such file or directory\n")]
    ChdirFailed {
        /// The path `cd` could not switch to.
        path: String,
    },

    /// Spawning an external process failed (fork/exec/posix_spawn failure).
    #[error("failed to spawn {name}: {source}")]
    SpawnFailed {
        /// The command name that failed to spawn.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
