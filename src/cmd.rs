//! Command implementations for the CLI interface.
//!
//! Every handler opens the task file, runs one command through the tracker,
//! saves the session state (expansion and completed-today counter) and prints
//! the result. Unknown ids are reported and otherwise ignored.

use std::io;
use std::path::Path;

use chrono::{Local, TimeZone, Utc};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;

use crate::cli::Cli;
use crate::error::Result;
use crate::fields::*;
use crate::stats::{Summary, Tally};
use crate::store::JsonStore;
use crate::sync::{Command, Outcome, Tracker};
use crate::task::{NewTask, Task};
use crate::tui::run::run_tui;
use crate::view::{self, Row};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Parent task ID. The task is added as its last subtask.
        #[arg(long)]
        parent: Option<u64>,
        /// Category (default: Uncategorized).
        #[arg(long)]
        category: Option<String>,
        /// Assignee (default: Unassigned).
        #[arg(long)]
        assignee: Option<String>,
        /// Workflow status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Print the task tree.
    List {
        /// Show every subtask, ignoring which tasks are expanded.
        #[arg(long)]
        all: bool,
    },

    /// View a single task.
    Show {
        id: u64,
    },

    /// Toggle a task between done and not done.
    Toggle {
        id: u64,
    },

    /// Change a task's title.
    Rename {
        id: u64,
        title: String,
    },

    /// Change a task's category.
    Category {
        id: u64,
        category: String,
    },

    /// Change a task's assignee.
    Assign {
        id: u64,
        assignee: String,
    },

    /// Change a task's workflow status.
    Status {
        id: u64,
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task and all of its subtasks.
    Delete {
        id: u64,
    },

    /// Expand or collapse a task in `list` and the dashboard.
    Expand {
        id: u64,
    },

    /// Show progress and per-category, per-assignee and per-status counts.
    Stats {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List known categories.
    Categories,

    /// List known assignees.
    Assignees,

    /// List workflow statuses.
    Statuses,

    /// Reset the completed-today counter.
    ResetToday,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the task file and restore the saved session state.
pub fn open_tracker(db_path: &Path) -> Result<Tracker<JsonStore>> {
    let store = JsonStore::open(db_path)?;
    let state = store.session_state();
    let mut tracker = Tracker::open(store)?;
    tracker.session_mut().restore_state(state);
    Ok(tracker)
}

/// Persist expansion and the completed-today counter.
pub fn save_state(tracker: &mut Tracker<JsonStore>) -> Result<()> {
    let state = tracker.session().state();
    tracker.store_mut().save_session_state(&state)
}

/// Run a command, save state, and report a missing task.
fn run(tracker: &mut Tracker<JsonStore>, command: Command) -> Result<Outcome> {
    let missing = match &command {
        Command::Add { parent_id, .. } => *parent_id,
        Command::Toggle(id)
        | Command::Rename(id, _)
        | Command::Recategorize(id, _)
        | Command::Reassign(id, _)
        | Command::SetStatus(id, _)
        | Command::Delete(id)
        | Command::ToggleExpansion(id) => Some(*id),
        Command::ResetCompletedToday => None,
    };
    let outcome = tracker.execute(command)?;
    if outcome == Outcome::NotFound {
        if let Some(id) = missing {
            println!("Task with ID {id} not found; nothing changed");
        }
    } else {
        save_state(tracker)?;
    }
    Ok(outcome)
}

/// Launch the terminal user interface.
pub fn cmd_ui(db_path: &Path) -> Result<()> {
    run_tui(db_path)
}

/// Add a new task.
pub fn cmd_add(
    tracker: &mut Tracker<JsonStore>,
    title: String,
    parent: Option<u64>,
    category: Option<String>,
    assignee: Option<String>,
    status: Option<Status>,
    desc: Option<String>,
) -> Result<()> {
    let fields = NewTask {
        title: Some(title),
        category,
        assignee,
        status,
        description: desc,
        parent_id: parent,
    };
    if let Outcome::Applied(Some(id)) = run(
        tracker,
        Command::Add {
            parent_id: parent,
            fields,
        },
    )? {
        match parent {
            Some(p) => println!("Added task {id} under {p}"),
            None => println!("Added task {id}"),
        }
    }
    Ok(())
}

/// Print the tree, pruned by the expansion set unless `all` is set.
pub fn cmd_list(tracker: &Tracker<JsonStore>, all: bool) {
    let session = tracker.session();
    if session.forest().is_empty() {
        println!("No tasks yet. Add one with `tt add <title>`.");
        return;
    }
    let rows: Vec<Row> = if all {
        view::walk(session.forest()).collect()
    } else {
        session.visible().collect()
    };
    print_tree(&rows, |id| all || session.is_expanded(id));
    println!();
    print_progress(&session.summary(), session.completed_today());
}

/// Print rows as an indented table.
pub fn print_tree(rows: &[Row], is_open: impl Fn(u64) -> bool) {
    println!(
        "{:<6} {:<16} {:<14} {:<14} {}",
        "ID", "Status", "Category", "Assignee", "Title"
    );
    for row in rows {
        println!(
            "{:<6} {:<16} {:<14} {:<14} {}",
            row.task.id,
            format_status(row.task.status),
            truncate(&row.task.category, 14),
            truncate(&row.task.assignee, 14),
            tree_label(row, is_open(row.task.id)),
        );
    }
}

/// Indentation, expander, checkbox and title for one row.
pub fn tree_label(row: &Row, open: bool) -> String {
    let expander = match (row.task.is_leaf(), open) {
        (true, _) => ' ',
        (false, true) => '▼',
        (false, false) => '▶',
    };
    let check = if row.task.completed { "[x]" } else { "[ ]" };
    format!("{}{} {} {}", "  ".repeat(row.depth), expander, check, row.task.title)
}

fn print_progress(summary: &Summary, completed_today: u32) {
    println!(
        "Progress: {:.0}% ({}/{} completed) | {} completed today",
        summary.progress_percent, summary.completed, summary.total, completed_today
    );
}

/// Show a single task.
pub fn cmd_show(tracker: &Tracker<JsonStore>, id: u64) {
    let Some(task) = tracker.session().find(id) else {
        println!("Task with ID {id} not found");
        return;
    };
    print_task(task, tracker.session().is_expanded(id));
}

fn print_task(task: &Task, expanded: bool) {
    println!("ID:        {}", task.id);
    println!("Title:     {}", task.title);
    println!("Done:      {}", if task.completed { "yes" } else { "no" });
    println!("Status:    {}", format_status(task.status));
    println!("Category:  {}", task.category);
    println!("Assignee:  {}", task.assignee);
    println!("Created:   {}", format_timestamp(task.created_at_utc));
    println!("Updated:   {}", format_timestamp(task.updated_at_utc));
    if let Some(desc) = &task.description {
        println!("Description:\n  {desc}");
    }
    if !task.subtasks.is_empty() {
        println!(
            "Subtasks ({}{}):",
            task.subtasks.len(),
            if expanded { ", expanded" } else { "" }
        );
        for sub in &task.subtasks {
            println!("  {} {} {}", sub.id, if sub.completed { "[x]" } else { "[ ]" }, sub.title);
        }
    }
}

/// Format a stored UTC timestamp in local time.
pub fn format_timestamp(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(dt) if ts > 0 => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        _ => "-".to_string(),
    }
}

/// Toggle completion.
pub fn cmd_toggle(tracker: &mut Tracker<JsonStore>, id: u64) -> Result<()> {
    if run(tracker, Command::Toggle(id))? != Outcome::NotFound {
        if let Some(task) = tracker.session().find(id) {
            let state = if task.completed { "done" } else { "not done" };
            println!("Task {id} marked {state} ({} completed today)", tracker.session().completed_today());
        }
    }
    Ok(())
}

/// Apply a single-field edit and confirm it.
pub fn cmd_edit(tracker: &mut Tracker<JsonStore>, command: Command) -> Result<()> {
    let label = match &command {
        Command::Rename(..) => "renamed",
        Command::Recategorize(..) => "recategorized",
        Command::Reassign(..) => "reassigned",
        Command::SetStatus(..) => "updated",
        _ => "changed",
    };
    if let Outcome::Applied(Some(id)) = run(tracker, command)? {
        println!("Task {id} {label}");
    }
    Ok(())
}

/// Delete a task and its subtree.
pub fn cmd_delete(tracker: &mut Tracker<JsonStore>, id: u64) -> Result<()> {
    let removed = tracker
        .session()
        .find(id)
        .map(|task| {
            let mut ids = Vec::new();
            crate::tree::subtree_ids(task, &mut ids);
            ids.len()
        })
        .unwrap_or(0);
    if run(tracker, Command::Delete(id))? != Outcome::NotFound {
        println!("Deleted {removed} task(s)");
    }
    Ok(())
}

/// Toggle whether a task shows its subtasks.
pub fn cmd_expand(tracker: &mut Tracker<JsonStore>, id: u64) -> Result<()> {
    run(tracker, Command::ToggleExpansion(id))?;
    let state = if tracker.session().is_expanded(id) { "expanded" } else { "collapsed" };
    println!("Task {id} {state}");
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    summary: Summary,
    completed_today: u32,
}

/// Print progress and tallies.
pub fn cmd_stats(tracker: &Tracker<JsonStore>, json: bool) -> Result<()> {
    let report = StatsReport {
        summary: tracker.session().summary(),
        completed_today: tracker.session().completed_today(),
    };
    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("{out}");
        return Ok(());
    }
    print_progress(&report.summary, report.completed_today);
    print_tallies("Tasks by Category", &report.summary.by_category);
    print_tallies("Tasks by Assignee", &report.summary.by_assignee);
    print_tallies("Tasks by Status", &report.summary.by_status);
    Ok(())
}

fn print_tallies(title: &str, tallies: &[Tally]) {
    println!();
    println!("{title}");
    if tallies.is_empty() {
        println!("  -");
    }
    for tally in tallies {
        println!("  {:<20} {}", truncate(&tally.name, 20), tally.count);
    }
}

/// Print a vocabulary, one value per line.
pub fn cmd_vocabulary(values: &[String]) {
    for value in values {
        println!("{value}");
    }
}

/// Print every workflow status with its CLI name.
pub fn cmd_statuses() {
    for status in Status::ALL {
        let name = format_status(status).to_lowercase().replace(' ', "-");
        println!("{:<16} {}", format_status(status), name);
    }
}

/// Reset the completed-today counter.
pub fn cmd_reset_today(tracker: &mut Tracker<JsonStore>) -> Result<()> {
    run(tracker, Command::ResetCompletedToday)?;
    println!("Completed-today counter reset");
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tt", &mut io::stdout());
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
