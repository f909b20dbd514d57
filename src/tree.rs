//! Id-addressed, structure-preserving operations on a forest of tasks.
//!
//! Every operation here is pure: it takes the current forest by reference and
//! returns a new one. Only the nodes on the path from a root to the target are
//! rebuilt; every other subtree is the same `Arc` as before, so callers can
//! cheaply tell unaffected branches apart with `Arc::ptr_eq`.
//!
//! Lookups are pre-order. When ids are (incorrectly) duplicated, the first
//! match wins and exactly one node is touched.
//!
//! Lookups walk with an explicit stack and handle any depth. Replacement and
//! removal recurse once per level on the path to the target, as does dropping
//! a tree, so chains tens of thousands of levels deep need more than the
//! default 2 MiB thread stack.

use std::sync::Arc;

use crate::task::Task;
use crate::view;

/// The ordered sequence of top-level task trees.
pub type Forest = Vec<Arc<Task>>;

/// Replace the first node with id `id` by `update(node)`.
///
/// Returns `None` when no node has that id.
pub fn try_replace<F>(forest: &[Arc<Task>], id: u64, update: F) -> Option<Forest>
where
    F: FnOnce(&Task) -> Task,
{
    let mut update = Some(update);
    replace_in(forest, id, &mut update)
}

/// Replace the first node with id `id` by `update(node)`.
///
/// An unknown id yields a forest made of the original `Arc`s.
pub fn find_and_replace<F>(forest: &[Arc<Task>], id: u64, update: F) -> Forest
where
    F: FnOnce(&Task) -> Task,
{
    try_replace(forest, id, update).unwrap_or_else(|| forest.to_vec())
}

fn replace_in<F>(nodes: &[Arc<Task>], id: u64, update: &mut Option<F>) -> Option<Forest>
where
    F: FnOnce(&Task) -> Task,
{
    for (idx, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            let f = update.take()?;
            Arc::new(f(node))
        } else if let Some(children) = replace_in(&node.subtasks, id, update) {
            let mut rebuilt = (**node).clone();
            rebuilt.subtasks = children;
            Arc::new(rebuilt)
        } else {
            continue;
        };

        let mut out = nodes.to_vec();
        out[idx] = replacement;
        return Some(out);
    }
    None
}

/// Append `child` as the last subtask of the task with id `parent_id`.
///
/// Returns `None` when the parent is not in the forest.
pub fn add_child(forest: &[Arc<Task>], parent_id: u64, child: Task) -> Option<Forest> {
    try_replace(forest, parent_id, move |parent| {
        let mut parent = parent.clone();
        parent.subtasks.push(Arc::new(child));
        parent
    })
}

/// Remove the task with id `id` together with its whole subtree.
///
/// Each level is searched before descending into it. Returns `None` when the
/// id is not in the forest.
pub fn remove(forest: &[Arc<Task>], id: u64) -> Option<Forest> {
    if let Some(idx) = forest.iter().position(|t| t.id == id) {
        let mut out = forest.to_vec();
        out.remove(idx);
        return Some(out);
    }

    for (idx, node) in forest.iter().enumerate() {
        if let Some(children) = remove(&node.subtasks, id) {
            let mut rebuilt = (**node).clone();
            rebuilt.subtasks = children;
            let mut out = forest.to_vec();
            out[idx] = Arc::new(rebuilt);
            return Some(out);
        }
    }
    None
}

/// Find the first task with id `id` in pre-order.
pub fn find(forest: &[Arc<Task>], id: u64) -> Option<&Task> {
    view::walk(forest).map(|row| row.task).find(|task| task.id == id)
}

/// True when some task in the forest has id `id`.
pub fn contains(forest: &[Arc<Task>], id: u64) -> bool {
    find(forest, id).is_some()
}

/// The largest id anywhere in the forest.
pub fn max_id(forest: &[Arc<Task>]) -> Option<u64> {
    view::walk(forest).map(|row| row.task.id).max()
}

/// Collect the id of `task` and of every descendant.
pub fn subtree_ids(task: &Task, out: &mut Vec<u64>) {
    out.push(task.id);
    out.extend(view::walk(&task.subtasks).map(|row| row.task.id));
}
