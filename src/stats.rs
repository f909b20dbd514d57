//! Summary statistics derived from a forest.
//!
//! Counting is deliberately shallow: a top-level task counts once and each of
//! its direct subtasks counts once. Deeper descendants are not counted, so
//! trees more than two levels deep are under-counted. Changing this would
//! change every reported percentage.

use std::sync::Arc;

use serde::Serialize;

use crate::fields::*;
use crate::task::Task;

/// Completed top-level tasks plus completed direct subtasks.
pub fn count_completed(forest: &[Arc<Task>]) -> usize {
    forest
        .iter()
        .map(|t| usize::from(t.completed) + t.subtasks.iter().filter(|s| s.completed).count())
        .sum()
}

/// Top-level tasks plus their direct subtasks.
pub fn count_total(forest: &[Arc<Task>]) -> usize {
    forest.iter().map(|t| 1 + t.subtasks.len()).sum()
}

/// Percentage of counted tasks that are completed; 0 for an empty forest.
pub fn progress_percent(forest: &[Arc<Task>]) -> f64 {
    let total = count_total(forest);
    if total == 0 {
        return 0.0;
    }
    count_completed(forest) as f64 / total as f64 * 100.0
}

/// Number of top-level tasks sharing one value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub count: usize,
}

impl Dimension {
    /// Read this dimension's value from a task.
    pub fn read(self, task: &Task) -> &str {
        match self {
            Dimension::Category => &task.category,
            Dimension::Assignee => &task.assignee,
            Dimension::Status => format_status(task.status),
        }
    }
}

/// Count top-level tasks by the value of `dimension`, in order of first appearance.
pub fn tally_by(forest: &[Arc<Task>], dimension: Dimension) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    for task in forest {
        let value = dimension.read(task);
        match tallies.iter_mut().find(|t| t.name == value) {
            Some(tally) => tally.count += 1,
            None => tallies.push(Tally {
                name: value.to_string(),
                count: 1,
            }),
        }
    }
    tallies
}

/// Everything the dashboard shows about a forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub completed: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub by_category: Vec<Tally>,
    pub by_assignee: Vec<Tally>,
    pub by_status: Vec<Tally>,
}

impl Summary {
    pub fn of(forest: &[Arc<Task>]) -> Self {
        Summary {
            completed: count_completed(forest),
            total: count_total(forest),
            progress_percent: progress_percent(forest),
            by_category: tally_by(forest, Dimension::Category),
            by_assignee: tally_by(forest, Dimension::Assignee),
            by_status: tally_by(forest, Dimension::Status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::*;
    use crate::tree::{find_and_replace, remove};

    fn complete(forest: &[Arc<Task>], id: u64) -> Vec<Arc<Task>> {
        find_and_replace(forest, id, |t| {
            let mut t = t.clone();
            t.completed = true;
            t
        })
    }

    #[test]
    fn test_progress_of_empty_forest_is_zero() {
        assert_eq!(progress_percent(&[]), 0.0);
        assert_eq!(count_total(&[]), 0);
    }

    #[test]
    fn test_progress_half_done() {
        let forest = vec![node(1, "a", vec![]), node(2, "b", vec![])];
        let forest = complete(&forest, 1);
        assert_eq!(count_completed(&forest), 1);
        assert_eq!(progress_percent(&forest), 50.0);
    }

    #[test]
    fn test_counting_stops_at_direct_subtasks() {
        // 1 -> 2 -> 3 -> 4, plus 1 -> 5, plus 6.
        let forest = sample();
        assert_eq!(count_total(&forest), 4);

        let forest = complete(&forest, 4);
        assert_eq!(count_completed(&forest), 0);
        let forest = complete(&forest, 5);
        assert_eq!(count_completed(&forest), 1);
        assert_eq!(progress_percent(&forest), 25.0);
    }

    #[test]
    fn test_delete_top_level_drops_it_and_its_direct_subtasks() {
        let forest = sample();
        let before = count_total(&forest);
        let direct = forest[0].subtasks.len();
        let out = remove(&forest, 1).unwrap();
        assert_eq!(count_total(&out), before - (1 + direct));
    }

    #[test]
    fn test_tallies_count_top_level_in_first_appearance_order() {
        let mut a = leaf(1, "a");
        a.category = "Work".into();
        a.assignee = "Sam".into();
        let mut b = leaf(2, "b");
        b.category = "Home".into();
        b.status = Status::Blocked;
        let mut c = leaf(3, "c");
        c.category = "Work".into();
        let mut nested = leaf(4, "nested");
        nested.category = "Garden".into();
        c.subtasks.push(Arc::new(nested));
        let forest: Vec<Arc<Task>> = vec![Arc::new(a), Arc::new(b), Arc::new(c)];

        let by_category = tally_by(&forest, Dimension::Category);
        assert_eq!(
            by_category,
            vec![
                Tally { name: "Work".into(), count: 2 },
                Tally { name: "Home".into(), count: 1 },
            ]
        );

        let by_assignee = tally_by(&forest, Dimension::Assignee);
        assert_eq!(by_assignee[0], Tally { name: "Sam".into(), count: 1 });
        assert_eq!(by_assignee[1], Tally { name: "Unassigned".into(), count: 2 });

        let by_status = tally_by(&forest, Dimension::Status);
        assert_eq!(by_status[0].name, "Dev Pending");
        assert_eq!(by_status[0].count, 2);
        assert_eq!(by_status[1].name, "Blocked");
    }

    #[test]
    fn test_summary_serializes() {
        let summary = Summary::of(&sample());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], 4);
        assert_eq!(json["by_status"][0]["count"], 2);
    }
}
