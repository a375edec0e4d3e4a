use std::env;
use std::io::Write;

use crate::error::Result;
use crate::sink::Sink;

use super::Outcome;

/// `pwd`: print the current working directory.
pub fn run(sink: &mut dyn Sink) -> Result<Outcome> {
    let cwd = env::current_dir().unwrap_or_default();
    let _ = writeln!(sink, "{}", cwd.display());
    Ok(Outcome::ok())
}
