//! REPL loop with rustyline.
//!
//! Interactive mode: prompt, meta-commands, history, TAB completion.
//! Pipe mode: read lines from stdin, execute each.

use std::io::{self, BufRead};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use tracing::debug;

use crate::commands::build_repl_cmd;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{check_meta_command, matches_to_command, MetaCommand};
use crate::state::SessionState;

/// Run the interactive REPL.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<TrackerHelper, _> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) Failed to start line editor: {}", e);
            return;
        }
    };
    rl.set_helper(Some(TrackerHelper));

    // Load history
    let history_path = history_file();
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            debug!(target: "qatrack::cli", error = %e, "No history loaded");
        }
    }

    loop {
        let prompt = state.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                // Check meta-commands first
                if let Some(meta) = check_meta_command(trimmed) {
                    match meta {
                        MetaCommand::Quit => break,
                        MetaCommand::Clear => {
                            // ANSI clear screen
                            print!("\x1B[2J\x1B[1;1H");
                        }
                        MetaCommand::Help { command } => {
                            print_help(command.as_deref());
                        }
                        MetaCommand::Use { project } => state.set_project(project),
                    }
                    continue;
                }

                // Tokenize with shlex (respects quotes)
                let tokens = match shlex::split(trimmed) {
                    Some(t) => t,
                    None => {
                        eprintln!("(error) Invalid quoting");
                        continue;
                    }
                };

                if tokens.is_empty() {
                    continue;
                }

                // Parse via clap
                let cmd = build_repl_cmd();
                let matches = match cmd.try_get_matches_from(tokens) {
                    Ok(m) => m,
                    Err(e) => {
                        // clap error — show help text
                        eprintln!("{}", e);
                        continue;
                    }
                };

                execute_action(&matches, state, mode);
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C — just show new prompt
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D — exit
                break;
            }
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        if let Err(e) = rl.save_history(path) {
            debug!(target: "qatrack::cli", error = %e, "History not saved");
        }
    }
}

/// Run in pipe mode: read lines from stdin, execute each.
///
/// Returns 1 if any line failed, 0 otherwise.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // `use` works in pipes too so scripts can set project context
        if let Some(MetaCommand::Use { project }) = check_meta_command(trimmed) {
            state.set_project(project);
            continue;
        }

        let tokens = match shlex::split(trimmed) {
            Some(t) => t,
            None => {
                eprintln!("(error) Invalid quoting: {}", trimmed);
                exit_code = 1;
                continue;
            }
        };

        if tokens.is_empty() {
            continue;
        }

        let cmd = build_repl_cmd();
        let matches = match cmd.try_get_matches_from(tokens) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("{}", e);
                exit_code = 1;
                continue;
            }
        };

        if execute_action(&matches, state, mode) != 0 {
            exit_code = 1;
        }
    }

    exit_code
}

/// Execute a parsed action. Returns the exit code: 0 on success, 1 on error.
pub fn execute_action(
    matches: &clap::ArgMatches,
    state: &mut SessionState,
    mode: OutputMode,
) -> i32 {
    match matches_to_command(matches, state) {
        Ok(cmd) => match state.execute(cmd) {
            Ok(output) => {
                let formatted = format_output(&output, mode);
                if !formatted.is_empty() {
                    println!("{}", formatted);
                }
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                1
            }
        },
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.qatrack_history", h))
}

fn print_help(command: Option<&str>) {
    if let Some(cmd) = command {
        // Show help for a specific command
        let cli = build_repl_cmd();
        match cli.try_get_matches_from(vec![cmd, "--help"]) {
            Ok(_) => {}
            Err(e) => println!("{}", e),
        }
    } else {
        println!("Available commands:");
        println!("  project     Project operations (list, create, update, del)");
        println!("  testcase    Testcase operations (list, create, update, del)");
        println!("  plan        Plan tier (get, upgrade)");
        println!("  dashboard   Totals and pass/fail rates");
        println!("  ping        Ping the database");
        println!("  info        Database information");
        println!("  flush       Write the snapshot to disk");
        println!();
        println!("Meta-commands:");
        println!("  use [project-id]       Set or clear the current project");
        println!("  help [command]         Show help");
        println!("  quit / exit            Exit REPL");
        println!("  clear                  Clear screen");
    }
}

// =========================================================================
// TAB Completion
// =========================================================================

/// Known top-level commands for TAB completion.
const TOP_LEVEL_COMMANDS: &[&str] = &[
    "project", "testcase", "plan", "dashboard", "ping", "info", "flush", "use", "help", "quit",
    "exit", "clear",
];

/// Known subcommands for each top-level command.
fn subcommands_for(cmd: &str) -> &'static [&'static str] {
    match cmd {
        "project" | "testcase" => &["list", "create", "update", "del"],
        "plan" => &["get", "upgrade"],
        _ => &[],
    }
}

fn pairs<'a>(items: impl Iterator<Item = &'a &'a str>) -> Vec<Pair> {
    items
        .map(|s| Pair {
            display: s.to_string(),
            replacement: s.to_string(),
        })
        .collect()
}

struct TrackerHelper;

impl Helper for TrackerHelper {}
impl Validator for TrackerHelper {}
impl Highlighter for TrackerHelper {}
impl Hinter for TrackerHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for TrackerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();

        // Determine if we're completing a partial word or starting a new word
        let trailing_space = line_to_pos.ends_with(' ');

        if parts.is_empty() || (parts.len() == 1 && !trailing_space) {
            // Completing top-level command
            let prefix = parts.first().copied().unwrap_or("");
            let start = pos - prefix.len();
            Ok((
                start,
                pairs(TOP_LEVEL_COMMANDS.iter().filter(|c| c.starts_with(prefix))),
            ))
        } else if parts.len() == 1 && trailing_space {
            // Just typed the top-level command, completing subcommand
            Ok((pos, pairs(subcommands_for(parts[0]).iter())))
        } else if parts.len() == 2 && !trailing_space {
            // Completing partial subcommand
            let prefix = parts[1];
            let start = pos - prefix.len();
            Ok((
                start,
                pairs(
                    subcommands_for(parts[0])
                        .iter()
                        .filter(|s| s.starts_with(prefix)),
                ),
            ))
        } else {
            Ok((pos, vec![]))
        }
    }
}
