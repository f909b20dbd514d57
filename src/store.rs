//! Task storage.
//!
//! `TaskStore` is the interface the rest of the crate consumes; `JsonStore` is
//! the file-backed implementation. Records are kept flat with a `parent_id`,
//! the way a relational table would hold them, and assembled into trees when
//! listed.
//!
//! The category and assignee vocabularies are stored beside the records and
//! only ever grow, so a value survives the edit or delete of the last task
//! that used it.

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::*;
use crate::session::{SessionState, Vocabulary};
use crate::task::{NewTask, Task, TaskPatch};

/// Create, read, update and delete tasks by id.
pub trait TaskStore {
    /// Top-level tasks, each with its subtasks attached.
    fn list_top_level_tasks(&self) -> Result<Vec<Task>>;

    /// Create a leaf task, top-level or under `fields.parent_id`.
    fn create_task(&mut self, fields: &NewTask) -> Result<Task>;

    /// Apply `patch` and return the updated record. The returned task carries
    /// no subtasks.
    fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task>;

    /// Delete a task and everything below it.
    fn delete_task(&mut self, id: u64) -> Result<()>;

    fn list_categories(&self) -> Result<Vec<String>>;

    fn list_assignees(&self) -> Result<Vec<String>>;
}

/// One stored task. Children point at their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
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
    pub parent_id: Option<u64>,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

impl TaskRecord {
    fn from_task(task: &Task, parent_id: Option<u64>) -> Self {
        TaskRecord {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            category: task.category.clone(),
            assignee: task.assignee.clone(),
            status: task.status,
            description: task.description.clone(),
            parent_id,
            created_at_utc: task.created_at_utc,
            updated_at_utc: task.updated_at_utc,
        }
    }

    fn to_task(&self) -> Task {
        Task {
            id: self.id,
            title: self.title.clone(),
            completed: self.completed,
            category: self.category.clone(),
            assignee: self.assignee.clone(),
            status: self.status,
            description: self.description.clone(),
            subtasks: Vec::new(),
            created_at_utc: self.created_at_utc,
            updated_at_utc: self.updated_at_utc,
        }
    }
}

/// The on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    categories: Vocabulary,
    #[serde(default)]
    assignees: Vocabulary,
    #[serde(default)]
    session: SessionState,
}

impl Database {
    /// Allocate an id that has never been handed out before.
    fn allocate_id(&mut self) -> u64 {
        let floor = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        id
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut TaskRecord> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn contains(&self, id: u64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    fn observe(&mut self, task: &Task) {
        self.categories.observe(&task.category);
        self.assignees.observe(&task.assignee);
    }

    /// Files written before the vocabularies were stored only have the records.
    fn seed_vocabularies(&mut self) {
        for record in &self.tasks {
            self.categories.observe(&record.category);
            self.assignees.observe(&record.assignee);
        }
    }
}

/// Build a map of parent task IDs to their children's IDs, in insertion order.
fn build_children_map(tasks: &[TaskRecord]) -> BTreeMap<u64, Vec<usize>> {
    let mut map: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
    for (idx, t) in tasks.iter().enumerate() {
        if let Some(p) = t.parent_id {
            map.entry(p).or_default().push(idx);
        }
    }
    map
}

/// Collect all descendant task IDs of `root`.
fn collect_descendants(
    root: u64,
    tasks: &[TaskRecord],
    children: &BTreeMap<u64, Vec<usize>>,
    out: &mut HashSet<u64>,
) {
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        for &idx in children.get(&id).into_iter().flatten() {
            let child = tasks[idx].id;
            if out.insert(child) {
                pending.push(child);
            }
        }
    }
}

/// Build the task at `idx` with its subtree. Recurses once per level.
fn assemble(idx: usize, tasks: &[TaskRecord], children: &BTreeMap<u64, Vec<usize>>) -> Task {
    let mut task = tasks[idx].to_task();
    if let Some(kids) = children.get(&task.id) {
        task.subtasks = kids
            .iter()
            .map(|&k| Arc::new(assemble(k, tasks, children)))
            .collect();
    }
    task
}

/// Tasks kept in a single JSON file.
///
/// Every mutation is written with an atomic-ish temp file + rename, and only
/// becomes visible in memory once the write succeeded.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    db: Database,
}

impl JsonStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no task file yet; starting empty");
            return Ok(JsonStore {
                path: path.to_path_buf(),
                db: Database::default(),
            });
        }
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|source| Error::StoreUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        let mut db: Database = serde_json::from_str(&buf).map_err(|source| Error::CorruptStore {
            path: path.to_path_buf(),
            source,
        })?;
        db.seed_vocabularies();
        Ok(JsonStore {
            path: path.to_path_buf(),
            db,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expansion set and completed-today counter saved by the last run.
    pub fn session_state(&self) -> SessionState {
        self.db.session.clone()
    }

    pub fn save_session_state(&mut self, state: &SessionState) -> Result<()> {
        self.commit(|db| {
            db.session = state.clone();
            Ok(())
        })
    }

    /// Apply `change` to a copy of the document, write it, then keep it.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut next = self.db.clone();
        let out = change(&mut next)?;
        write_atomic(&self.path, &next)?;
        self.db = next;
        Ok(out)
    }
}

fn write_atomic(path: &Path, db: &Database) -> Result<()> {
    let unavailable = |source: std::io::Error| Error::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let data = serde_json::to_string_pretty(db)
        .map_err(|e| unavailable(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    let tmp = path.with_extension("json.tmp");
    let mut f = File::create(&tmp).map_err(unavailable)?;
    f.write_all(data.as_bytes()).map_err(unavailable)?;
    f.flush().map_err(unavailable)?;
    fs::rename(&tmp, path).map_err(unavailable)?;
    debug!(path = %path.display(), tasks = db.tasks.len(), "task file written");
    Ok(())
}

impl TaskStore for JsonStore {
    fn list_top_level_tasks(&self) -> Result<Vec<Task>> {
        let tasks = &self.db.tasks;
        let children = build_children_map(tasks);
        Ok(tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.parent_id.is_none())
            .map(|(idx, _)| assemble(idx, tasks, &children))
            .collect())
    }

    fn create_task(&mut self, fields: &NewTask) -> Result<Task> {
        self.commit(|db| {
            if let Some(parent) = fields.parent_id {
                if !db.contains(parent) {
                    return Err(Error::TaskNotFound(parent));
                }
            }
            let id = db.allocate_id();
            let task = fields.clone().into_task(id, Utc::now().timestamp());
            db.tasks.push(TaskRecord::from_task(&task, fields.parent_id));
            db.observe(&task);
            Ok(task)
        })
    }

    fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        self.commit(|db| {
            let record = db.get_mut(id).ok_or(Error::TaskNotFound(id))?;
            let updated = patch.apply(&record.to_task(), Utc::now().timestamp());
            *record = TaskRecord::from_task(&updated, record.parent_id);
            db.observe(&updated);
            Ok(updated)
        })
    }

    fn delete_task(&mut self, id: u64) -> Result<()> {
        self.commit(|db| {
            if !db.contains(id) {
                return Err(Error::TaskNotFound(id));
            }
            let children = build_children_map(&db.tasks);
            let mut doomed = HashSet::from([id]);
            collect_descendants(id, &db.tasks, &children, &mut doomed);
            db.tasks.retain(|t| !doomed.contains(&t.id));
            db.session.expanded.retain(|id| !doomed.contains(&id));
            Ok(())
        })
    }

    fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self.db.categories.as_slice().to_vec())
    }

    fn list_assignees(&self) -> Result<Vec<String>> {
        Ok(self.db.assignees.as_slice().to_vec())
    }
}
