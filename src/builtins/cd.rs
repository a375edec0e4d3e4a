use std::env;

use crate::error::{Error, Result};

use super::Outcome;

/// `cd [path]`: change the working directory. A bare `cd` with no argument
/// is a no-op (this shell has no notion of a default home target to jump
/// to). A leading `~` expands to `$HOME`; no other `~user` form is
/// supported.
pub fn run(args: &[String]) -> Result<Outcome> {
    let Some(target) = args.first() else {
        return Ok(Outcome::ok());
    };

    let expanded = expand_tilde(target);
    env::set_current_dir(&expanded).map_err(|_| Error::ChdirFailed {
        path: target.clone(),
    })?;
    Ok(Outcome::ok())
}

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = env::var_os("HOME").or_else(|| dirs::home_dir().map(Into::into)) {
                return format!("{}{}", home.to_string_lossy(), rest);
            }
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tilde_expands_to_home() {
        let home = env::var("HOME").unwrap();
        assert_eq!(expand_tilde("~"), home);
    }

    #[test]
    fn tilde_slash_expands_the_prefix_only() {
        let home = env::var("HOME").unwrap();
        assert_eq!(expand_tilde("~/projects"), format!("{home}/projects"));
    }

    #[test]
    fn tilde_mid_path_is_left_alone() {
        assert_eq!(expand_tilde("/tmp/~unchanged"), "/tmp/~unchanged");
    }

    #[test]
    fn bare_cd_with_no_argument_is_a_no_op() {
        let before = env::current_dir().unwrap();
        run(&[]).unwrap();
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn cd_into_missing_directory_errors() {
        let err = run(&["/no/such/directory/surely".to_string()]).unwrap_err();
        assert!(matches!(err, Error::ChdirFailed { .. }));
    }
}
