//! Enumerations and field types for tasks.
//!
//! This module defines the fixed workflow status labels and the dimensions
//! along which top-level tasks are tallied.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow status of a task. The first variant is the default for new tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[serde(alias = "Dev Pending")]
    DevPending,
    #[serde(alias = "Dev In Progress")]
    DevInProgress,
    #[serde(alias = "Done")]
    Done,
    #[serde(alias = "In QA")]
    InQa,
    #[serde(alias = "On Hold")]
    OnHold,
    #[serde(alias = "Blocked")]
    Blocked,
    #[serde(alias = "Deployed")]
    Deployed,
    #[serde(alias = "In Integration")]
    InIntegration,
}

impl Status {
    /// Every status, in menu order.
    pub const ALL: [Status; 8] = [
        Status::DevPending,
        Status::DevInProgress,
        Status::Done,
        Status::InQa,
        Status::OnHold,
        Status::Blocked,
        Status::Deployed,
        Status::InIntegration,
    ];

    /// The status after this one in menu order, wrapping around.
    pub fn next(self) -> Status {
        let idx = Status::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Status::ALL[(idx + 1) % Status::ALL.len()]
    }
}

/// Format a status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::DevPending => "Dev Pending",
        Status::DevInProgress => "Dev In Progress",
        Status::Done => "Done",
        Status::InQa => "In QA",
        Status::OnHold => "On Hold",
        Status::Blocked => "Blocked",
        Status::Deployed => "Deployed",
        Status::InIntegration => "In Integration",
    }
}

/// Parse a status from either its display label or its kebab-case name.
pub fn parse_status(s: &str) -> Option<Status> {
    let wanted = s.trim().to_lowercase();
    Status::ALL.into_iter().find(|status| {
        format_status(*status).to_lowercase() == wanted
            || format_status(*status).to_lowercase().replace(' ', "-") == wanted
    })
}

/// A task field that top-level tasks can be tallied by.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Dimension {
    Category,
    Assignee,
    Status,
}
