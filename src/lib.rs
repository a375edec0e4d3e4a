//! tinysh: a small interactive command shell.
//!
//! Reads one line at a time, lexes it, parses it into a pipeline of
//! stages connected by `|` with per-stage redirections, and executes
//! each stage as either a builtin or an external process on `PATH`.
//!
//! The pipeline through the crate is linear: [`token::lex`] produces a
//! token stream, [`parser::parse`] turns that into a [`parser::Pipeline`],
//! and [`executor::execute`] runs it. [`repl`] owns the read/execute loop
//! and the one-shot `-c` entry point; [`builtins`] holds the in-process
//! commands the executor dispatches to instead of spawning.
//!
//! # Examples
//!
//! ```
//! use tinysh::{executor, parser, shell_state::ShellState, token};
//!
//! let tokens = token::lex("echo hello").unwrap();
//! let pipeline = parser::parse(tokens).unwrap();
//! let mut state = ShellState::new(None);
//! executor::execute(&pipeline, &mut state).unwrap();
//! ```

#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod executor;
pub mod line_source;
pub mod parser;
pub mod posix;
pub mod process;
pub mod repl;
pub mod shell_state;
pub mod sink;
pub mod token;

pub use error::{Error, Result};
