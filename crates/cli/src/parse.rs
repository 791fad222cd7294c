//! ArgMatches → Command conversion, plus REPL meta-command detection.
//!
//! Meta-commands (`use`, `help`, `quit`, `clear`) are recognized on the raw
//! line before clap runs; everything else goes through clap into a `Command`.

use clap::ArgMatches;
use qatrack_executor::{Command, Project, ProjectUpdate, TestStatus, Testcase, TestcaseUpdate};

use crate::state::SessionState;

/// REPL meta-commands.
pub enum MetaCommand {
    Use { project: Option<String> },
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?;

    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => {
            let command = parts.next().map(|s| s.trim().to_string());
            Some(MetaCommand::Help { command })
        }
        "use" => {
            let project = parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            Some(MetaCommand::Use { project })
        }
        _ => None,
    }
}

/// Convert clap ArgMatches into a Command.
pub fn matches_to_command(matches: &ArgMatches, state: &SessionState) -> Result<Command, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "ping" => Ok(Command::Ping),
        "info" => Ok(Command::Info),
        "flush" => Ok(Command::Flush),
        "dashboard" => Ok(Command::Dashboard),
        "plan" => parse_plan(sub_matches),
        "project" => parse_project(sub_matches),
        "testcase" => parse_testcase(sub_matches, state),
        other => Err(format!("Unknown command: {}", other)),
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn required(matches: &ArgMatches, name: &str) -> Result<String, String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

/// `--description X` sets, `--clear-description` clears, neither leaves it.
fn description_patch(matches: &ArgMatches) -> Option<Option<String>> {
    if matches.get_flag("clear-description") {
        Some(None)
    } else {
        optional(matches, "description").map(Some)
    }
}

fn status(matches: &ArgMatches) -> Result<Option<TestStatus>, String> {
    optional(matches, "status")
        .map(|s| s.parse::<TestStatus>().map_err(|e| e.to_string()))
        .transpose()
}

/// Explicit project id, else the session's current project.
fn project_id(matches: &ArgMatches, state: &SessionState) -> Result<String, String> {
    optional(matches, "project-id")
        .or_else(|| state.project().map(str::to_string))
        .ok_or_else(|| "No project given and no current project (see `use`)".to_string())
}

// =========================================================================
// Plan
// =========================================================================

fn parse_plan(matches: &ArgMatches) -> Result<Command, String> {
    match matches.subcommand() {
        Some(("get", _)) => Ok(Command::PlanGet),
        Some(("upgrade", _)) => Ok(Command::PlanUpgrade),
        Some((other, _)) => Err(format!("Unknown plan subcommand: {}", other)),
        None => Err("Missing plan subcommand".to_string()),
    }
}

// =========================================================================
// Project
// =========================================================================

fn parse_project(matches: &ArgMatches) -> Result<Command, String> {
    let (sub, m) = matches
        .subcommand()
        .ok_or_else(|| "Missing project subcommand".to_string())?;

    let cmd = match sub {
        "list" => Command::ProjectList,
        "create" => {
            let mut project = Project::new(required(m, "name")?);
            if let Some(d) = optional(m, "description") {
                project = project.with_description(d);
            }
            Command::ProjectCreate { project }
        }
        "update" => Command::ProjectUpdate {
            id: required(m, "id")?,
            update: ProjectUpdate {
                name: optional(m, "name"),
                description: description_patch(m),
            },
        },
        "del" => Command::ProjectDelete {
            id: required(m, "id")?,
        },
        other => return Err(format!("Unknown project subcommand: {}", other)),
    };
    Ok(cmd)
}

// =========================================================================
// Testcase
// =========================================================================

fn parse_testcase(matches: &ArgMatches, state: &SessionState) -> Result<Command, String> {
    let (sub, m) = matches
        .subcommand()
        .ok_or_else(|| "Missing testcase subcommand".to_string())?;

    let cmd = match sub {
        "list" => Command::TestcaseList {
            project_id: project_id(m, state)?,
        },
        "create" => {
            let project_id = project_id(m, state)?;
            let mut testcase = Testcase::new(project_id.clone(), required(m, "name")?);
            if let Some(d) = optional(m, "description") {
                testcase = testcase.with_description(d);
            }
            if let Some(s) = status(m)? {
                testcase = testcase.with_status(s);
            }
            Command::TestcaseCreate {
                project_id,
                testcase,
            }
        }
        "update" => Command::TestcaseUpdate {
            id: required(m, "id")?,
            update: TestcaseUpdate {
                name: optional(m, "name"),
                description: description_patch(m),
                status: status(m)?,
            },
        },
        "del" => Command::TestcaseDelete {
            id: required(m, "id")?,
        },
        other => return Err(format!("Unknown testcase subcommand: {}", other)),
    };
    Ok(cmd)
}
