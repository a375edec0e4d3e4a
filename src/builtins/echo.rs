use std::io::Write;

use crate::error::Result;
use crate::sink::Sink;

use super::Outcome;

/// `echo [args...]`: write the arguments joined by single spaces, followed
/// by a newline.
pub fn run(args: &[String], sink: &mut dyn Sink) -> Result<Outcome> {
    let _ = writeln!(sink, "{}", args.join(" "));
    Ok(Outcome::ok())
}
