//! Presentation state kept beside the tree: which tasks are expanded, and the
//! sequence of rows that are visible because of it.

use std::collections::BTreeSet;
use std::slice;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Ids of the tasks whose subtasks are currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet(BTreeSet<u64>);

impl ExpansionSet {
    pub fn is_expanded(&self, id: u64) -> bool {
        self.0.contains(&id)
    }

    /// Flip membership of `id` and return whether it is now expanded.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(u64) -> bool) {
        self.0.retain(|id| keep(*id));
    }
}

/// One visible task and how deep it sits.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub task: &'a Task,
    pub depth: usize,
}

/// Lazy pre-order walk over a forest, optionally pruned by an expansion set.
///
/// Uses an explicit stack so arbitrarily deep trees cannot overflow.
pub struct Rows<'a> {
    stack: Vec<(usize, slice::Iter<'a, Arc<Task>>)>,
    expanded: Option<&'a ExpansionSet>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Row<'a>> {
        loop {
            let (depth, next) = {
                let (depth, iter) = self.stack.last_mut()?;
                (*depth, iter.next())
            };
            match next {
                Some(task) => {
                    let descend = self.expanded.map_or(true, |set| set.is_expanded(task.id));
                    if descend && !task.subtasks.is_empty() {
                        self.stack.push((depth + 1, task.subtasks.iter()));
                    }
                    return Some(Row { task: &**task, depth });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Rows visible under `expanded`: a task's subtasks are walked only when it is
/// in the set. Call again to restart.
pub fn visible<'a>(forest: &'a [Arc<Task>], expanded: &'a ExpansionSet) -> Rows<'a> {
    Rows {
        stack: vec![(0, forest.iter())],
        expanded: Some(expanded),
    }
}

/// Every task in pre-order, ignoring expansion.
pub fn walk(forest: &[Arc<Task>]) -> Rows<'_> {
    Rows {
        stack: vec![(0, forest.iter())],
        expanded: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::sample;

    fn ids(rows: Rows<'_>) -> Vec<(u64, usize)> {
        rows.map(|r| (r.task.id, r.depth)).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut set = ExpansionSet::default();
        assert!(set.toggle(3));
        assert!(set.is_expanded(3));
        assert!(!set.toggle(3));
        assert!(!set.is_expanded(3));
        assert_eq!(set, ExpansionSet::default());
    }

    #[test]
    fn test_collapsed_forest_shows_roots_only() {
        let forest = sample();
        let set = ExpansionSet::default();
        assert_eq!(ids(visible(&forest, &set)), vec![(1, 0), (6, 0)]);
    }

    #[test]
    fn test_visible_is_pruned_at_collapsed_tasks() {
        let forest = sample();
        let mut set = ExpansionSet::default();
        set.toggle(1);
        set.toggle(3); // 2 is collapsed, so 3 stays hidden
        assert_eq!(ids(visible(&forest, &set)), vec![(1, 0), (2, 1), (5, 1), (6, 0)]);

        set.toggle(2);
        assert_eq!(
            ids(visible(&forest, &set)),
            vec![(1, 0), (2, 1), (3, 2), (4, 3), (5, 1), (6, 0)]
        );
    }

    #[test]
    fn test_walk_visits_everything_and_restarts() {
        let forest = sample();
        let first: Vec<_> = ids(walk(&forest));
        let second: Vec<_> = ids(walk(&forest));
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut set = ExpansionSet::default();
        set.toggle(9);
        set.toggle(2);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[2,9]");
    }
}
