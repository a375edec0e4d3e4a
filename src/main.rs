use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use tinysh::line_source::StdinLineSource;
use tinysh::repl;
use tinysh::shell_state::ShellState;

/// A small interactive command shell.
#[derive(Parser, Debug)]
#[command(name = "tinysh", version, about)]
struct Args {
    /// Run a single command line instead of entering the interactive loop.
    #[arg(short = 'c', value_name = "COMMAND")]
    command: Option<String>,

    /// Where to load and save history across sessions.
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Disable history entirely, in memory and on disk.
    #[arg(long)]
    no_history: bool,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging output.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let history_file = if args.no_history { None } else { args.history_file };
    let mut state = ShellState::new(history_file.clone());
    if let Some(path) = &history_file {
        let _ = state.load_history(path);
    }

    let code = if let Some(command) = &args.command {
        repl::run_once(command, &mut state)
    } else {
        let mut line_source = StdinLineSource::new();
        repl::run(&mut line_source, &mut state)
    };

    if let Some(path) = &history_file {
        let _ = state.save_history(path);
    }

    ExitCode::from(code.rem_euclid(256) as u8)
}
