//! Clap command tree definition.
//!
//! Builds the full `clap::Command` tree used by both shell mode (directly)
//! and REPL mode (via `try_get_matches_from`).

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
///
/// This is shared between shell mode and REPL mode.
pub fn build_cli() -> Command {
    Command::new("qatrack")
        .about("Project and testcase records for QA teams")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .arg(
            Arg::new("db")
                .long("db")
                .env("QATRACK_DB")
                .help("Database path (default: .qatrack)")
                .global(true),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .help("In-memory database, nothing written to disk (overrides --db)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .help("Initial project context for testcase commands")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (bare values, one per line)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommands(subcommands())
}

/// Build a command tree for REPL mode (no global flags).
pub fn build_repl_cmd() -> Command {
    Command::new("repl")
        .multicall(true)
        .subcommand_required(true)
        .subcommands(subcommands())
}

fn subcommands() -> Vec<Command> {
    vec![
        build_ping(),
        build_info(),
        build_flush(),
        build_plan(),
        build_project(),
        build_testcase(),
        build_dashboard(),
    ]
}

// =========================================================================
// Database
// =========================================================================

fn build_ping() -> Command {
    Command::new("ping").about("Ping the database")
}

fn build_info() -> Command {
    Command::new("info").about("Get database information")
}

fn build_flush() -> Command {
    Command::new("flush").about("Write the snapshot to disk now")
}

// =========================================================================
// Plan
// =========================================================================

fn build_plan() -> Command {
    Command::new("plan")
        .about("Plan tier (get, upgrade)")
        .subcommand_required(true)
        .subcommand(Command::new("get").about("Show the current plan"))
        .subcommand(Command::new("upgrade").about("Upgrade to pro"))
}

// =========================================================================
// Project
// =========================================================================

fn description_args() -> [Arg; 2] {
    [
        Arg::new("description")
            .long("description")
            .short('d')
            .help("New description"),
        Arg::new("clear-description")
            .long("clear-description")
            .action(ArgAction::SetTrue)
            .conflicts_with("description")
            .help("Remove the description"),
    ]
}

fn build_project() -> Command {
    Command::new("project")
        .about("Project operations")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List all projects"))
        .subcommand(
            Command::new("create")
                .about("Create a project")
                .arg(Arg::new("name").required(true).help("Project name"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Free-text description"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Update a project")
                .arg(Arg::new("id").required(true).help("Project id"))
                .arg(Arg::new("name").long("name").short('n').help("New name"))
                .args(description_args()),
        )
        .subcommand(
            Command::new("del")
                .about("Delete a project and its testcases")
                .arg(Arg::new("id").required(true).help("Project id")),
        )
}

// =========================================================================
// Testcase
// =========================================================================

fn status_arg() -> Arg {
    Arg::new("status")
        .long("status")
        .short('s')
        .value_parser(["Pass", "Fail", "Pending"])
        .help("Outcome")
}

fn build_testcase() -> Command {
    Command::new("testcase")
        .about("Testcase operations")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List testcases of a project")
                .arg(Arg::new("project-id").help("Project id (default: current project)")),
        )
        .subcommand(
            Command::new("create")
                .about("Create a testcase")
                .arg(Arg::new("name").required(true).help("Testcase name"))
                .arg(
                    Arg::new("project-id")
                        .long("in")
                        .help("Project id (default: current project)"),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Free-text description"),
                )
                .arg(status_arg()),
        )
        .subcommand(
            Command::new("update")
                .about("Update a testcase")
                .arg(Arg::new("id").required(true).help("Testcase id"))
                .arg(Arg::new("name").long("name").short('n').help("New name"))
                .args(description_args())
                .arg(status_arg()),
        )
        .subcommand(
            Command::new("del")
                .about("Delete a testcase")
                .arg(Arg::new("id").required(true).help("Testcase id")),
        )
}

// =========================================================================
// Dashboard
// =========================================================================

fn build_dashboard() -> Command {
    Command::new("dashboard").about("Totals and pass/fail rates")
}
