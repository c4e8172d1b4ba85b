use std::cmp::Ordering;

use crate::task::{FilterMode, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

#[must_use]
pub fn counts(tasks: &[Task]) -> Counts {
    let completed = tasks.iter().filter(|task| task.completed).count();
    Counts {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

/// Derives the display order for one render pass. Always a fresh vector, so
/// the store's insertion order is never aliased; recomputed on every call.
#[must_use]
pub fn project(tasks: &[Task], mode: FilterMode) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| mode.matches(task))
        .cloned()
        .collect();

    // Stable sort: ties keep insertion order.
    view.sort_by(compare_for_view);
    view
}

fn compare_for_view(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| cmp_due(a.due_date.as_ref(), b.due_date.as_ref()))
}

fn cmp_due<T: Ord>(left: Option<&T>, right: Option<&T>) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{counts, project};
    use crate::task::{FilterMode, Task};

    fn task(id: u64, text: &str, due: Option<(i32, u32, u32)>, completed: bool) -> Task {
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .expect("valid time");
        let due_date =
            due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid due date"));
        let mut task = Task::new(id, text.to_string(), due_date, now);
        task.completed = completed;
        task
    }

    #[test]
    fn dated_tasks_sort_ascending_before_undated_and_completed_sink() {
        // Insertion order deliberately scrambled.
        let tasks = vec![
            task(1, "later", Some((2024, 1, 10)), false),
            task(2, "done", Some((2024, 1, 1)), true),
            task(3, "no due", None, false),
            task(4, "sooner", Some((2024, 1, 5)), false),
        ];

        let view = project(&tasks, FilterMode::All);
        let ids: Vec<u64> = view.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);
    }

    #[test]
    fn ties_preserve_insertion_order() {
        let tasks = vec![
            task(1, "a", Some((2024, 3, 1)), false),
            task(2, "b", Some((2024, 3, 1)), false),
            task(3, "c", None, false),
            task(4, "d", None, false),
        ];

        let view = project(&tasks, FilterMode::All);
        let ids: Vec<u64> = view.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn filter_modes_select_the_expected_subset() {
        let tasks = vec![
            task(1, "open", None, false),
            task(2, "done", None, true),
        ];

        assert_eq!(project(&tasks, FilterMode::All).len(), 2);

        let active = project(&tasks, FilterMode::Active);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);

        let completed = project(&tasks, FilterMode::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, 2);
    }

    #[test]
    fn completed_sink_even_under_the_completed_filter_sort() {
        let tasks = vec![
            task(1, "done late", Some((2024, 2, 2)), true),
            task(2, "done early", Some((2024, 2, 1)), true),
        ];

        let view = project(&tasks, FilterMode::Completed);
        let ids: Vec<u64> = view.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn counts_are_independent_of_filter() {
        let tasks = vec![
            task(1, "open", None, false),
            task(2, "done", None, true),
            task(3, "done too", None, true),
        ];

        let counts = counts(&tasks);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.completed, 2);
    }
}
