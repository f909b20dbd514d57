//! # tt - Hierarchical Task Tracker
//!
//! A command-line task tracker with arbitrarily nested subtasks, live progress
//! and an interactive terminal dashboard.
//!
//! ## Key Features
//!
//! - **Nested Tasks**: Any task can hold subtasks, to any depth
//! - **Task Metadata**: Category, assignee and an eight-stage workflow status
//! - **Live Progress**: Completion percentage plus breakdowns by category, assignee and status
//! - **Completed Today**: A running count of tasks finished since the last reset
//! - **Multiple Interfaces**: Full CLI for scripting + interactive TUI dashboard
//! - **Local File Storage**: A single JSON file, written atomically
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard
//! tt ui
//!
//! # Add a task and a subtask
//! tt add "Ship release" --category Ops --assignee Ada
//! tt add "Write release notes" --parent 1
//!
//! # Show the tree and progress
//! tt list --all
//! tt stats
//! ```
//!
//! Data is stored in `~/.tasktree/tasks.json` unless `--db` or `TASKTREE_DB`
//! points elsewhere. Set `TASKTREE_LOG=debug` to turn on logging.

use clap::Parser;

use tasktree::cli::Cli;
use tasktree::cmd::*;
use tasktree::config::Config;
use tasktree::error::Result;
use tasktree::logging::{self, Sink};
use tasktree::sync::Command;

fn main() {
    let cli = Cli::parse();

    // Completions need neither the task file nor logging.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::from_env(cli.db.as_deref())?;
    config.ensure_data_dir()?;

    let log_path = config.log_path();
    match cli.command {
        Commands::Ui => logging::init(Sink::File(&log_path)),
        _ => logging::init(Sink::Stderr),
    }
    tracing::debug!(db = %config.db_path.display(), "resolved task file");

    if let Commands::Ui = cli.command {
        return cmd_ui(&config.db_path);
    }

    let mut tracker = open_tracker(&config.db_path)?;

    match cli.command {
        Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),
        Commands::Add {
            title,
            parent,
            category,
            assignee,
            status,
            desc,
        } => cmd_add(&mut tracker, title, parent, category, assignee, status, desc)?,
        Commands::List { all } => cmd_list(&tracker, all),
        Commands::Show { id } => cmd_show(&tracker, id),
        Commands::Toggle { id } => cmd_toggle(&mut tracker, id)?,
        Commands::Rename { id, title } => cmd_edit(&mut tracker, Command::Rename(id, title))?,
        Commands::Category { id, category } => {
            cmd_edit(&mut tracker, Command::Recategorize(id, category))?
        }
        Commands::Assign { id, assignee } => {
            cmd_edit(&mut tracker, Command::Reassign(id, assignee))?
        }
        Commands::Status { id, status } => cmd_edit(&mut tracker, Command::SetStatus(id, status))?,
        Commands::Delete { id } => cmd_delete(&mut tracker, id)?,
        Commands::Expand { id } => cmd_expand(&mut tracker, id)?,
        Commands::Stats { json } => cmd_stats(&tracker, json)?,
        Commands::Categories => cmd_vocabulary(tracker.session().categories()),
        Commands::Assignees => cmd_vocabulary(tracker.session().assignees()),
        Commands::Statuses => cmd_statuses(),
        Commands::ResetToday => cmd_reset_today(&mut tracker)?,
    }
    Ok(())
}
