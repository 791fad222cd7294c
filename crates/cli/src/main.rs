//! qatrack CLI: project and testcase records from the terminal.
//!
//! Three modes:
//! - **Shell mode**: `qatrack [flags] COMMAND` — single command, exit
//! - **REPL mode**: `qatrack [flags]` — interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "project list" | qatrack` — line-by-line from stdin

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::process;

use qatrack_executor::Tracker;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::OutputMode;
use state::SessionState;

/// Environment variable holding the log filter
const LOG_ENV: &str = "QATRACK_LOG";

fn main() {
    init_logging();

    let cli = build_cli();
    let matches = cli.get_matches();

    // Determine output mode
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    // Open database
    let tracker = match open_database(&matches) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let initial_project = matches.get_one::<String>("project").cloned();
    let mut state = SessionState::new(tracker, initial_project);

    // Dispatch mode
    let exit_code = if matches.subcommand().is_some() {
        // Shell mode: parse, execute, format, exit
        repl::execute_action(&matches, &mut state, output_mode)
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
        0
    } else {
        repl::run_pipe(&mut state, output_mode)
    };

    if let Err(e) = state.shutdown() {
        eprintln!("{}", format::format_error(&e, output_mode));
        process::exit(1);
    }
    process::exit(exit_code);
}

/// Log to stderr, filtered by `QATRACK_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn open_database(matches: &clap::ArgMatches) -> Result<Tracker, String> {
    if matches.get_flag("ephemeral") {
        Tracker::ephemeral().map_err(|e| format!("Failed to open ephemeral database: {}", e))
    } else {
        let path = matches
            .get_one::<String>("db")
            .map(|s| s.as_str())
            .unwrap_or(".qatrack");
        Tracker::open(path).map_err(|e| format!("Failed to open database: {}", e))
    }
}
