use std::io::Write;

use crate::error::Result;
use crate::executor::search_path;
use crate::sink::Sink;

use super::{is_builtin, Outcome};

/// `type name`: report whether `name` is a shell builtin or an external
/// found on `PATH`. The builtin-set check runs before the `PATH` scan, so
/// a name that shadows both (unlikely, but possible) is reported as the
/// builtin.
pub fn run(args: &[String], sink: &mut dyn Sink) -> Result<Outcome> {
    let Some(name) = args.first() else {
        return Ok(Outcome::ok());
    };

    if is_builtin(name) {
        let _ = writeln!(sink, "{} is a shell builtin", name);
        return Ok(Outcome::ok());
    }

    match search_path(name) {
        Some(path) => {
            let _ = writeln!(sink, "{} is {}", name, path.display());
            Ok(Outcome::ok())
        }
        None => {
            let _ = writeln!(sink, "{}: not found", name);
            Ok(Outcome::code(1))
        }
    }
}
