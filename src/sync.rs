//! Commands applied through a store.
//!
//! A `Tracker` pairs a `TaskStore` with a `Session`. Each command is checked
//! against the local tree, sent to the store, and the store's confirmed result
//! is then applied locally with the same id-addressed primitive the session
//! uses. When the store fails the error is returned and the local tree stays
//! at its last confirmed state.
//!
//! Commands run one at a time to completion. Two edits to the same id must not
//! be interleaved by callers.

use tracing::{debug, warn};

use crate::error::Result;
use crate::fields::*;
use crate::session::Session;
use crate::store::TaskStore;
use crate::task::{NewTask, TaskPatch};
use crate::tree;

/// Something a user or a surface asks the tracker to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        parent_id: Option<u64>,
        fields: NewTask,
    },
    Toggle(u64),
    Rename(u64, String),
    Recategorize(u64, String),
    Reassign(u64, String),
    SetStatus(u64, Status),
    Delete(u64),
    ToggleExpansion(u64),
    ResetCompletedToday,
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tree or the session state changed. Carries the affected id when
    /// there is one.
    Applied(Option<u64>),
    /// The command named a task that does not exist; nothing happened.
    NotFound,
}

/// A store and the session mirroring it.
pub struct Tracker<S: TaskStore> {
    store: S,
    session: Session,
}

impl<S: TaskStore> Tracker<S> {
    /// Load the forest and vocabularies from `store`.
    pub fn open(store: S) -> Result<Self> {
        let forest = store
            .list_top_level_tasks()?
            .into_iter()
            .map(std::sync::Arc::new)
            .collect();
        let categories = store.list_categories()?.into_iter().collect();
        let assignees = store.list_assignees()?.into_iter().collect();
        let session = Session::from_parts(forest, categories, assignees);
        debug!(
            tasks = session.forest().len(),
            categories = session.categories().len(),
            "tracker opened"
        );
        Ok(Tracker { store, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Run one command to completion.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let outcome = match command {
            Command::Add { parent_id, fields } => self.add(parent_id, fields),
            Command::Toggle(id) => {
                let Some(task) = self.session.find(id) else {
                    return Ok(self.not_found(id));
                };
                let patch = TaskPatch {
                    completed: Some(!task.completed),
                    ..TaskPatch::default()
                };
                self.update(id, patch)
            }
            Command::Rename(id, title) => self.update(
                id,
                TaskPatch {
                    title: Some(title),
                    ..TaskPatch::default()
                },
            ),
            Command::Recategorize(id, category) => self.update(
                id,
                TaskPatch {
                    category: Some(category),
                    ..TaskPatch::default()
                },
            ),
            Command::Reassign(id, assignee) => self.update(
                id,
                TaskPatch {
                    assignee: Some(assignee),
                    ..TaskPatch::default()
                },
            ),
            Command::SetStatus(id, status) => self.update(
                id,
                TaskPatch {
                    status: Some(status),
                    ..TaskPatch::default()
                },
            ),
            Command::Delete(id) => self.delete(id),
            Command::ToggleExpansion(id) => {
                self.session.toggle_expansion(id);
                Ok(Outcome::Applied(Some(id)))
            }
            Command::ResetCompletedToday => {
                self.session.reset_completed_today();
                Ok(Outcome::Applied(None))
            }
        };
        if let Err(e) = &outcome {
            warn!(error = %e, "command failed; local tree unchanged");
        }
        outcome
    }

    fn not_found(&self, id: u64) -> Outcome {
        debug!(task_id = id, "task not found; command ignored");
        Outcome::NotFound
    }

    fn add(&mut self, parent_id: Option<u64>, mut fields: NewTask) -> Result<Outcome> {
        if let Some(parent) = parent_id {
            if !tree::contains(self.session.forest(), parent) {
                return Ok(self.not_found(parent));
            }
        }
        fields.parent_id = parent_id;
        let created = self.store.create_task(&fields)?;
        let id = created.id;
        self.session.attach(parent_id, created);
        Ok(Outcome::Applied(Some(id)))
    }

    fn update(&mut self, id: u64, patch: TaskPatch) -> Result<Outcome> {
        if self.session.find(id).is_none() {
            return Ok(self.not_found(id));
        }
        let confirmed = self.store.update_task(id, &patch)?;
        self.session.apply_confirmed(&confirmed);
        Ok(Outcome::Applied(Some(id)))
    }

    fn delete(&mut self, id: u64) -> Result<Outcome> {
        if self.session.find(id).is_none() {
            return Ok(self.not_found(id));
        }
        self.store.delete_task(id)?;
        self.session.delete_task(id);
        Ok(Outcome::Applied(Some(id)))
    }
}
