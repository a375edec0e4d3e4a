use crate::error::Result;

use super::Outcome;

/// `exit [code]`: stop the REPL. With no argument, exits 0. A non-numeric
/// argument is treated as 0, matching the permissive behavior of the
/// shells in the corpus rather than erroring out of a session-ending
/// command.
pub fn run(args: &[String]) -> Result<Outcome> {
    let code = args.first().and_then(|s| s.parse::<i32>().ok()).unwrap_or(0);
    Ok(Outcome {
        exit_code: code,
        terminate: Some(code),
    })
}
