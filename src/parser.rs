//! The pipeline parser: turns a token sequence into a `Pipeline`.
//!
//! Splits the token list at `|`, then walks each stage's tokens
//! left-to-right, collecting argv words and consuming each redirection
//! operator's following word as its target.

use crate::error::{Error, Result};
use crate::token::{Fd, Mode, Token};

/// A single redirection attached to a stage: which stream, which file,
/// truncate or append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    /// `Fd::Stdout` or `Fd::Stderr`.
    pub fd: Fd,
    /// The target file path.
    pub path: String,
    /// Truncate-or-create versus append-or-create.
    pub mode: Mode,
}

/// One stage of a pipeline: a command name plus arguments, plus its
/// redirections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stage {
    /// Argument vector; `argv[0]` is the command name. Always non-empty
    /// once a `Stage` has been produced by `parse`.
    pub argv: Vec<String>,
    /// This stage's redirections. At most one per `Fd`; if the same `Fd`
    /// is targeted twice, the later one wins (earlier entries are
    /// overwritten in place, see `push_redirection`).
    pub redirections: Vec<Redirection>,
}

impl Stage {
    /// The redirection for `fd`, if any, preferring the last one set.
    pub fn redirection(&self, fd: Fd) -> Option<&Redirection> {
        self.redirections.iter().rev().find(|r| r.fd == fd)
    }

    fn push_redirection(&mut self, fd: Fd, path: String, mode: Mode) {
        if let Some(existing) = self.redirections.iter_mut().find(|r| r.fd == fd) {
            existing.path = path;
            existing.mode = mode;
        } else {
            self.redirections.push(Redirection { fd, path, mode });
        }
    }
}

/// An ordered, non-empty sequence of stages connected by pipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// The stages, in left-to-right pipeline order.
    pub stages: Vec<Stage>,
}

/// Split `tokens` on `|` and parse each segment into a `Stage`.
pub fn parse(tokens: Vec<Token>) -> Result<Pipeline> {
    let mut stages = Vec::new();
    let mut current_tokens = Vec::new();

    for token in tokens {
        match token {
            Token::Pipe => {
                stages.push(parse_stage(std::mem::take(&mut current_tokens))?);
            }
            other => current_tokens.push(other),
        }
    }
    stages.push(parse_stage(current_tokens)?);

    Ok(Pipeline { stages })
}

fn parse_stage(tokens: Vec<Token>) -> Result<Stage> {
    let mut stage = Stage::default();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Word(w) => stage.argv.push(w),
            Token::Redirect(op) => match iter.next() {
                Some(Token::Word(target)) => {
                    stage.push_redirection(op.fd, target, op.mode);
                }
                _ => return Err(Error::RedirectionMissingTarget),
            },
            Token::Pipe => unreachable!("pipes are split out before parse_stage is called"),
        }
    }

    if stage.argv.is_empty() {
        return Err(Error::EmptyPipelineStage);
    }
    Ok(stage)
}
