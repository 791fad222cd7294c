//! Output → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default on TTY): numbered lists, `(integer) 3`, `OK`
//! - **JSON** (`--json`): the response body, pretty-printed
//! - **Raw** (`--raw`): Bare values, no quotes, no type prefixes

use qatrack_executor::{Dashboard, Error, Output, Project, Stored, Testcase};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(output),
        OutputMode::Raw => format_raw(output),
        OutputMode::Human => format_human(output),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "detail": err.to_string(),
            "status": err.status_code(),
        }))
        .unwrap_or_else(|_| format!("{{\"detail\": \"{}\"}}", err)),
        OutputMode::Raw => format!("{}", err),
        OutputMode::Human => format!("(error) {}", err),
    }
}

// =========================================================================
// JSON mode
// =========================================================================

fn format_json(output: &Output) -> String {
    output
        .clone()
        .into_body()
        .and_then(|body| serde_json::to_string_pretty(&body))
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// =========================================================================
// Raw mode
// =========================================================================

fn format_raw(output: &Output) -> String {
    match output {
        Output::Unit => String::new(),
        Output::Pong { version } => version.clone(),
        Output::DatabaseInfo(info) => format!(
            "{}\n{}\n{}",
            info.database_name, info.connection_status, info.plan
        ),
        Output::Plan(info) => info.plan.to_string(),
        Output::Project(p) => p.id.clone(),
        Output::Projects(ps) => ps
            .iter()
            .map(|p| format!("{}\t{}", p.id, p.name))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Testcase(t) => t.id.clone(),
        Output::Testcases(ts) => ts
            .iter()
            .map(|t| format!("{}\t{}\t{}", t.id, t.status, t.name))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Deleted(status) => status.status.clone(),
        Output::Dashboard(d) => format!(
            "{} {} {} {} {} {} {}",
            d.total_projects,
            d.total_testcases,
            d.pass_count,
            d.fail_count,
            d.pending_count,
            d.pass_rate,
            d.fail_rate
        ),
    }
}

// =========================================================================
// Human mode
// =========================================================================

fn format_human(output: &Output) -> String {
    match output {
        Output::Unit => "OK".to_string(),
        Output::Pong { version } => format!("PONG {}", version),
        Output::DatabaseInfo(info) => {
            let mut lines = vec![
                format!("version: {}", info.version),
                format!("database: {}", info.database_name),
                format!("connection: {}", info.connection_status),
                format!("persistent: {}", info.persistent),
                format!("plan: {}", info.plan),
            ];
            if info.collections.is_empty() {
                lines.push("collections: (none)".to_string());
            } else {
                lines.push(format!("collections: {}", info.collections.join(", ")));
            }
            lines.join("\n")
        }
        Output::Plan(info) => format!("(plan) {}", info.plan),
        Output::Project(p) => format_project(p),
        Output::Projects(ps) => numbered(ps.iter().map(format_project_line)),
        Output::Testcase(t) => format_testcase(t),
        Output::Testcases(ts) => numbered(ts.iter().map(format_testcase_line)),
        Output::Deleted(_) => "(deleted)".to_string(),
        Output::Dashboard(d) => format_dashboard(d),
    }
}

fn numbered(items: impl Iterator<Item = String>) -> String {
    let lines: Vec<String> = items
        .enumerate()
        .map(|(i, line)| format!("{}) {}", i + 1, line))
        .collect();
    if lines.is_empty() {
        "(empty list)".to_string()
    } else {
        lines.join("\n")
    }
}

fn format_project_line(p: &Stored<Project>) -> String {
    format!("{} \"{}\"", p.id, p.name)
}

fn format_project(p: &Stored<Project>) -> String {
    let mut lines = vec![format!("id: {}", p.id), format!("name: \"{}\"", p.name)];
    if let Some(d) = &p.description {
        lines.push(format!("description: \"{}\"", d));
    }
    push_timestamps(&mut lines, p.created_at.as_deref(), p.updated_at.as_deref());
    lines.join("\n")
}

fn format_testcase_line(t: &Stored<Testcase>) -> String {
    format!("{} [{}] \"{}\"", t.id, t.status, t.name)
}

fn format_testcase(t: &Stored<Testcase>) -> String {
    let mut lines = vec![
        format!("id: {}", t.id),
        format!("project_id: {}", t.project_id),
        format!("name: \"{}\"", t.name),
        format!("status: {}", t.status),
    ];
    if let Some(d) = &t.description {
        lines.push(format!("description: \"{}\"", d));
    }
    push_timestamps(&mut lines, t.created_at.as_deref(), t.updated_at.as_deref());
    lines.join("\n")
}

fn push_timestamps(lines: &mut Vec<String>, created: Option<&str>, updated: Option<&str>) {
    if let Some(c) = created {
        lines.push(format!("created_at: {}", c));
    }
    if let Some(u) = updated {
        lines.push(format!("updated_at: {}", u));
    }
}

fn format_dashboard(d: &Dashboard) -> String {
    [
        format!("projects: {}", d.total_projects),
        format!("testcases: {}", d.total_testcases),
        format!("pass: {}", d.pass_count),
        format!("fail: {}", d.fail_count),
        format!("pending: {}", d.pending_count),
        format!("pass rate: {}%", d.pass_rate),
        format!("fail rate: {}%", d.fail_rate),
    ]
    .join("\n")
}
