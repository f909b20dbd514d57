//! The session: one forest plus the process-lifetime state that travels with it.
//!
//! A `Session` owns the current forest, the category and assignee
//! vocabularies, the expansion set, the "completed today" counter and the id
//! allocator. Every command replaces the forest wholesale; nothing is mutated
//! in place. Unknown ids are no-ops, never errors.
//!
//! Vocabularies are never reset. The completed-today counter is reset only by
//! `reset_completed_today`.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::*;
use crate::stats::Summary;
use crate::task::{NewTask, Task, TaskPatch, DEFAULT_TITLE};
use crate::tree::{self, Forest};
use crate::view::{self, ExpansionSet, Rows};

/// An append-only ordered set of strings, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    /// Record `value`; returns true when it had not been seen before.
    pub fn observe(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Vocabulary::default();
        for value in iter {
            vocab.observe(value.as_ref());
        }
        vocab
    }
}

/// Presentation state that outlives a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub expanded: ExpansionSet,
    #[serde(default)]
    pub completed_today: u32,
}

/// The in-memory task tree and its side tables.
#[derive(Debug, Clone, Default)]
pub struct Session {
    forest: Forest,
    categories: Vocabulary,
    assignees: Vocabulary,
    expanded: ExpansionSet,
    completed_today: u32,
    next_id: u64,
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Session {
            next_id: 1,
            ..Session::default()
        }
    }

    /// Start from an existing forest and known vocabularies.
    ///
    /// Values present on tasks but missing from the given vocabularies are
    /// appended in pre-order.
    pub fn from_parts(forest: Forest, categories: Vocabulary, assignees: Vocabulary) -> Self {
        let mut session = Session {
            next_id: tree::max_id(&forest).map_or(1, |id| id + 1),
            forest,
            categories,
            assignees,
            ..Session::default()
        };
        let observed: Vec<(String, String)> = view::walk(&session.forest)
            .map(|row| (row.task.category.clone(), row.task.assignee.clone()))
            .collect();
        for (category, assignee) in observed {
            session.categories.observe(&category);
            session.assignees.observe(&assignee);
        }
        session
    }

    pub fn forest(&self) -> &[Arc<Task>] {
        &self.forest
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        tree::find(&self.forest, id)
    }

    pub fn categories(&self) -> &[String] {
        self.categories.as_slice()
    }

    pub fn assignees(&self) -> &[String] {
        self.assignees.as_slice()
    }

    pub fn completed_today(&self) -> u32 {
        self.completed_today
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.forest)
    }

    /// Rows currently visible under the expansion set.
    pub fn visible(&self) -> Rows<'_> {
        view::visible(&self.forest, &self.expanded)
    }

    /// Create a task with a fresh id, top-level or under `parent_id`.
    ///
    /// Returns the new id, or `None` if `parent_id` names no task.
    pub fn add_task(&mut self, parent_id: Option<u64>, fields: NewTask) -> Option<u64> {
        let id = self.next_id;
        let task = fields.into_task(id, Utc::now().timestamp());
        if !self.attach(parent_id, task) {
            return None;
        }
        Some(id)
    }

    /// Insert an already-built leaf task, e.g. one confirmed by a store.
    ///
    /// Returns false and leaves the forest alone if `parent_id` names no task.
    pub fn attach(&mut self, parent_id: Option<u64>, task: Task) -> bool {
        let id = task.id;
        let category = task.category.clone();
        let assignee = task.assignee.clone();

        match parent_id {
            None => {
                let mut forest = self.forest.clone();
                forest.push(Arc::new(task));
                self.forest = forest;
            }
            Some(parent) => match tree::add_child(&self.forest, parent, task) {
                Some(forest) => self.forest = forest,
                None => {
                    debug!(parent_id = parent, "parent task not found; add ignored");
                    return false;
                }
            },
        }

        self.next_id = self.next_id.max(id + 1);
        self.categories.observe(&category);
        self.assignees.observe(&assignee);
        true
    }

    /// Apply `update` to the task with id `id`. Returns false when not found.
    pub fn find_and_replace<F>(&mut self, id: u64, update: F) -> bool
    where
        F: FnOnce(&Task) -> Task,
    {
        match tree::try_replace(&self.forest, id, update) {
            Some(forest) => {
                self.forest = forest;
                true
            }
            None => {
                debug!(task_id = id, "task not found; update ignored");
                false
            }
        }
    }

    fn patch(&mut self, id: u64, patch: TaskPatch) -> bool {
        let now = Utc::now().timestamp();
        self.find_and_replace(id, |task| patch.apply(task, now))
    }

    /// Flip completion and move the completed-today counter with it.
    ///
    /// Returns the new completion state, or `None` when not found.
    pub fn toggle_completion(&mut self, id: u64) -> Option<bool> {
        let completed = !self.find(id)?.completed;
        self.patch(
            id,
            TaskPatch {
                completed: Some(completed),
                ..TaskPatch::default()
            },
        );
        self.count_completion(completed);
        Some(completed)
    }

    fn count_completion(&mut self, completed: bool) {
        if completed {
            self.completed_today += 1;
        } else {
            self.completed_today = self.completed_today.saturating_sub(1);
        }
    }

    pub fn rename_task(&mut self, id: u64, title: &str) -> bool {
        self.patch(
            id,
            TaskPatch {
                title: Some(title.to_string()),
                ..TaskPatch::default()
            },
        )
    }

    /// Set the category and add it to the vocabulary if it is new.
    pub fn recategorize(&mut self, id: u64, category: &str) -> bool {
        let found = self.patch(
            id,
            TaskPatch {
                category: Some(category.to_string()),
                ..TaskPatch::default()
            },
        );
        if found {
            if let Some(task) = self.find(id) {
                let value = task.category.clone();
                self.categories.observe(&value);
            }
        }
        found
    }

    /// Set the assignee and add it to the vocabulary if it is new.
    pub fn reassign(&mut self, id: u64, assignee: &str) -> bool {
        let found = self.patch(
            id,
            TaskPatch {
                assignee: Some(assignee.to_string()),
                ..TaskPatch::default()
            },
        );
        if found {
            if let Some(task) = self.find(id) {
                let value = task.assignee.clone();
                self.assignees.observe(&value);
            }
        }
        found
    }

    pub fn set_status(&mut self, id: u64, status: Status) -> bool {
        self.patch(
            id,
            TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
    }

    /// Remove a task and its subtree. Vocabularies keep their values.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let Some(task) = self.find(id) else {
            debug!(task_id = id, "task not found; delete ignored");
            return false;
        };
        let mut removed = Vec::new();
        tree::subtree_ids(task, &mut removed);

        match tree::remove(&self.forest, id) {
            Some(forest) => {
                self.forest = forest;
                self.expanded.retain(|id| !removed.contains(&id));
                true
            }
            None => false,
        }
    }

    /// Apply a record confirmed by the store, keeping the local subtasks.
    ///
    /// Moves the completed-today counter if the completion flag changed.
    pub fn apply_confirmed(&mut self, confirmed: &Task) -> bool {
        let Some(previous) = self.find(confirmed.id).map(|t| t.completed) else {
            debug!(task_id = confirmed.id, "confirmed task no longer present");
            return false;
        };

        self.find_and_replace(confirmed.id, |local| {
            let mut task = confirmed.clone();
            task.subtasks = local.subtasks.clone();
            if task.title.trim().is_empty() {
                task.title = DEFAULT_TITLE.to_string();
            }
            task
        });

        if previous != confirmed.completed {
            self.count_completion(confirmed.completed);
        }
        self.categories.observe(&confirmed.category);
        self.assignees.observe(&confirmed.assignee);
        true
    }

    pub fn reset_completed_today(&mut self) {
        self.completed_today = 0;
    }

    pub fn is_expanded(&self, id: u64) -> bool {
        self.expanded.is_expanded(id)
    }

    /// Flip whether `id` shows its subtasks. Returns the new state.
    pub fn toggle_expansion(&mut self, id: u64) -> bool {
        self.expanded.toggle(id)
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            expanded: self.expanded.clone(),
            completed_today: self.completed_today,
        }
    }

    pub fn restore_state(&mut self, state: SessionState) {
        self.expanded = state.expanded;
        self.completed_today = state.completed_today;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{count_completed, count_total, progress_percent};

    fn titled(title: &str) -> NewTask {
        NewTask::titled(title)
    }

    #[test]
    fn test_add_toggle_scenario() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        let b = session.add_task(Some(a), titled("B")).unwrap();
        assert_eq!(session.toggle_completion(b), Some(true));

        let forest = session.forest();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "A");
        assert!(!forest[0].completed);
        assert_eq!(forest[0].subtasks.len(), 1);
        assert_eq!(forest[0].subtasks[0].title, "B");
        assert!(forest[0].subtasks[0].completed);
        assert!(forest[0].subtasks[0].subtasks.is_empty());

        assert_eq!(count_total(forest), 2);
        assert_eq!(count_completed(forest), 1);
        assert_eq!(progress_percent(forest), 50.0);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        let b = session.add_task(Some(a), titled("B")).unwrap();
        session.delete_task(b);
        let c = session.add_task(None, titled("C")).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_add_under_missing_parent_is_a_noop() {
        let mut session = Session::new();
        session.add_task(None, titled("A"));
        let mut fields = titled("lost");
        fields.category = Some("Nowhere".into());
        assert_eq!(session.add_task(Some(999), fields), None);
        assert_eq!(session.forest().len(), 1);
        assert!(!session.categories().contains(&"Nowhere".to_string()));
    }

    #[test]
    fn test_add_defaults_and_registers_vocabulary() {
        let mut session = Session::new();
        let id = session.add_task(None, NewTask::default()).unwrap();
        let task = session.find(id).unwrap();
        assert_eq!(task.title, "New Task");
        assert_eq!(session.categories(), ["Uncategorized".to_string()]);
        assert_eq!(session.assignees(), ["Unassigned".to_string()]);
    }

    #[test]
    fn test_toggle_twice_restores_flag_and_counter() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        session.toggle_completion(a);
        assert_eq!(session.completed_today(), 1);
        session.toggle_completion(a);
        assert!(!session.find(a).unwrap().completed);
        assert_eq!(session.completed_today(), 0);
    }

    #[test]
    fn test_counter_floors_at_zero() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        session.toggle_completion(a);
        session.reset_completed_today();
        assert_eq!(session.toggle_completion(a), Some(false));
        assert_eq!(session.completed_today(), 0);
        assert_eq!(session.toggle_completion(404), None);
    }

    #[test]
    fn test_vocabularies_are_append_only() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        assert!(session.recategorize(a, "Work"));
        assert!(session.recategorize(a, "Home"));
        assert!(session.reassign(a, "Kim"));
        assert!(session.delete_task(a));
        assert_eq!(
            session.categories(),
            ["Uncategorized".to_string(), "Work".to_string(), "Home".to_string()]
        );
        assert_eq!(session.assignees(), ["Unassigned".to_string(), "Kim".to_string()]);
        assert!(!session.recategorize(a, "Gone"));
        assert!(!session.categories().contains(&"Gone".to_string()));
    }

    #[test]
    fn test_edits_touch_one_field_deep_in_the_tree() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        let b = session.add_task(Some(a), titled("B")).unwrap();
        let c = session.add_task(Some(b), titled("C")).unwrap();
        let sibling = session.add_task(None, titled("S")).unwrap();
        let before = session.forest().to_vec();

        assert!(session.rename_task(c, "Renamed"));
        assert!(session.set_status(c, Status::InQa));
        let task = session.find(c).unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.status, Status::InQa);
        assert_eq!(session.find(sibling).unwrap().title, "S");
        assert!(Arc::ptr_eq(&session.forest()[1], &before[1]));
        assert!(!session.rename_task(12345, "x"));
    }

    #[test]
    fn test_delete_clears_expansion_of_removed_subtree() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        let b = session.add_task(Some(a), titled("B")).unwrap();
        let other = session.add_task(None, titled("Other")).unwrap();
        session.toggle_expansion(a);
        session.toggle_expansion(b);
        session.toggle_expansion(other);
        assert!(session.delete_task(a));
        assert!(!session.is_expanded(a));
        assert!(!session.is_expanded(b));
        assert!(session.is_expanded(other));
        assert!(!session.delete_task(a));
    }

    #[test]
    fn test_expansion_is_independent_of_tree() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        session.add_task(Some(a), titled("B"));
        assert_eq!(session.visible().count(), 1);
        assert!(session.toggle_expansion(a));
        assert_eq!(session.visible().count(), 2);
        assert!(!session.toggle_expansion(a));
        assert_eq!(session.visible().count(), 1);
        // Ids that are not in the tree can still be toggled.
        assert!(session.toggle_expansion(77));
    }

    #[test]
    fn test_apply_confirmed_keeps_children_and_counts_completion() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        session.add_task(Some(a), titled("B"));

        let mut confirmed = (*session.find(a).unwrap()).clone();
        confirmed.subtasks.clear();
        confirmed.completed = true;
        confirmed.category = "Release".into();
        assert!(session.apply_confirmed(&confirmed));

        let task = session.find(a).unwrap();
        assert!(task.completed);
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(session.completed_today(), 1);
        assert!(session.categories().contains(&"Release".to_string()));

        confirmed.id = 999;
        assert!(!session.apply_confirmed(&confirmed));
    }

    #[test]
    fn test_from_parts_seeds_vocabularies_and_ids() {
        let mut seeded = Session::new();
        let a = seeded.add_task(None, titled("A")).unwrap();
        seeded.recategorize(a, "Work");
        let forest = seeded.forest().to_vec();

        let mut session = Session::from_parts(forest, ["Home"].into_iter().collect(), Vocabulary::default());
        assert_eq!(session.categories(), ["Home".to_string(), "Work".to_string()]);
        assert_eq!(session.assignees(), ["Unassigned".to_string()]);
        let next = session.add_task(None, titled("B")).unwrap();
        assert!(next > a);
    }

    #[test]
    fn test_state_round_trips() {
        let mut session = Session::new();
        let a = session.add_task(None, titled("A")).unwrap();
        session.toggle_completion(a);
        session.toggle_expansion(a);
        let state = session.state();

        let mut fresh = Session::new();
        fresh.restore_state(state.clone());
        assert_eq!(fresh.completed_today(), 1);
        assert!(fresh.is_expanded(a));
        assert_eq!(fresh.state(), state);
    }
}
