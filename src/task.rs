//! Task data structure and related functionality.
//!
//! This module defines the core `Task` node of the tree, the `NewTask` fields
//! accepted at creation, and the `TaskPatch` partial update understood by the
//! store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fields::*;

pub const DEFAULT_TITLE: &str = "New Task";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_ASSIGNEE: &str = "Unassigned";

/// A node in the task tree.
///
/// Children are reference counted so that an update rebuilds only the path
/// from the root to the changed node; every other subtree is shared with the
/// previous forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub category: String,
    pub assignee: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Arc<Task>>,
    #[serde(default)]
    pub created_at_utc: i64,
    #[serde(default)]
    pub updated_at_utc: i64,
}

impl Task {
    /// True when the task has no subtasks.
    pub fn is_leaf(&self) -> bool {
        self.subtasks.is_empty()
    }
}

/// Fields supplied when creating a task. Blank or missing values are defaulted,
/// never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub category: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<Status>,
    pub description: Option<String>,
    pub parent_id: Option<u64>,
}

impl NewTask {
    /// Start a draft with just a title.
    pub fn titled(title: &str) -> Self {
        NewTask {
            title: Some(title.to_string()),
            ..NewTask::default()
        }
    }

    /// Build the leaf task these fields describe.
    pub fn into_task(self, id: u64, now_utc: i64) -> Task {
        Task {
            id,
            title: or_default(self.title, DEFAULT_TITLE),
            completed: false,
            category: or_default(self.category, DEFAULT_CATEGORY),
            assignee: or_default(self.assignee, DEFAULT_ASSIGNEE),
            status: self.status.unwrap_or_default(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            subtasks: Vec::new(),
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        }
    }
}

/// A partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<Status>,
}

impl TaskPatch {
    /// Apply the patch to a copy of `task`, keeping its subtasks.
    pub fn apply(&self, task: &Task, now_utc: i64) -> Task {
        let mut out = task.clone();
        if let Some(title) = &self.title {
            out.title = or_default(Some(title.clone()), DEFAULT_TITLE);
        }
        if let Some(completed) = self.completed {
            out.completed = completed;
        }
        if let Some(category) = &self.category {
            out.category = or_default(Some(category.clone()), DEFAULT_CATEGORY);
        }
        if let Some(assignee) = &self.assignee {
            out.assignee = or_default(Some(assignee.clone()), DEFAULT_ASSIGNEE);
        }
        if let Some(status) = self.status {
            out.status = status;
        }
        out.updated_at_utc = now_utc;
        out
    }
}

/// Trim `value`, falling back to `default` when it is missing or blank.
pub fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_defaulted() {
        let fields = NewTask {
            title: Some("   ".into()),
            category: None,
            assignee: Some(String::new()),
            ..NewTask::default()
        };
        let task = fields.into_task(7, 100);
        assert_eq!(task.id, 7);
        assert_eq!(task.title, DEFAULT_TITLE);
        assert_eq!(task.category, DEFAULT_CATEGORY);
        assert_eq!(task.assignee, DEFAULT_ASSIGNEE);
        assert_eq!(task.status, Status::DevPending);
        assert!(!task.completed);
        assert!(task.is_leaf());
        assert_eq!(task.created_at_utc, 100);
    }

    #[test]
    fn test_patch_keeps_subtasks_and_untouched_fields() {
        let mut parent = NewTask::titled("Parent").into_task(1, 0);
        parent.subtasks.push(Arc::new(NewTask::titled("Child").into_task(2, 0)));

        let patch = TaskPatch {
            completed: Some(true),
            category: Some("Ops".into()),
            ..TaskPatch::default()
        };
        let out = patch.apply(&parent, 50);
        assert!(out.completed);
        assert_eq!(out.category, "Ops");
        assert_eq!(out.title, "Parent");
        assert_eq!(out.subtasks.len(), 1);
        assert!(Arc::ptr_eq(&out.subtasks[0], &parent.subtasks[0]));
        assert_eq!(out.updated_at_utc, 50);
    }

    #[test]
    fn test_task_json_omits_missing_description() {
        let task = NewTask::titled("A").into_task(1, 0);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("description"));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
