//! Presentation order for todos.
//!
//! # Ordering
//! 1. Priority weight, highest first (`Urgent` 4 .. `Low` 1; missing or
//!    unrecognized priorities weigh 2).
//! 2. Within a weight, earliest deadline first. Todos without a usable
//!    deadline come after every todo that has one.
//! 3. Nothing else: the sort is stable, so fully tied todos keep the order
//!    the backend returned them in.
//!
//! # Views
//! `TodoViews` splits an ordered snapshot into active and completed lists by
//! filtering, never re-sorting, so both keep the order above.
//!
//! Everything here is pure: inputs are borrowed and never modified.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::types::Todo;

/// Compare two todos by presentation order.
pub fn compare(a: &Todo, b: &Todo) -> Ordering {
    b.priority_weight()
        .cmp(&a.priority_weight())
        .then_with(|| compare_deadlines(a.deadline.as_ref(), b.deadline.as_ref()))
}

fn compare_deadlines(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Return a new, ordered copy of `todos`.
pub fn order(todos: &[Todo]) -> Vec<Todo> {
    let mut ordered = todos.to_vec();
    // `sort_by` is stable.
    ordered.sort_by(compare);
    ordered
}

/// Active and completed todos, each in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoViews {
    pub active: Vec<Todo>,
    pub completed: Vec<Todo>,
}

impl TodoViews {
    /// Order a snapshot and split it.
    pub fn from_snapshot(todos: &[Todo]) -> Self {
        partition(order(todos))
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}

/// Split an already ordered list without changing relative order.
pub fn partition(ordered: Vec<Todo>) -> TodoViews {
    let (completed, active): (Vec<Todo>, Vec<Todo>) =
        ordered.into_iter().partition(|todo| todo.completed);
    tracing::debug!(
        active = active.len(),
        completed = completed.len(),
        "partitioned todo snapshot"
    );
    TodoViews { active, completed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::parse_deadline;
    use crate::priority::Priority;
    use crate::id::RecordId;

    fn todo(id: i64, priority: Option<&str>, deadline: Option<&str>, completed: bool) -> Todo {
        Todo {
            id: RecordId::Int(id),
            title: format!("todo {id}"),
            description: None,
            priority: priority.map(Priority::parse),
            deadline: deadline.and_then(parse_deadline),
            completed,
            created_at: None,
        }
    }

    fn ids(todos: &[Todo]) -> Vec<i64> {
        todos
            .iter()
            .map(|t| match t.id {
                RecordId::Int(n) => n,
                RecordId::Text(_) => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn urgent_by_deadline_then_low() {
        let input = vec![
            todo(1, Some("Low"), None, false),
            todo(2, Some("Urgent"), Some("2099-01-01T00:00"), false),
            todo(3, Some("Urgent"), Some("2050-01-01T00:00"), false),
        ];
        assert_eq!(ids(&order(&input)), vec![3, 2, 1]);
    }

    #[test]
    fn deadline_sorts_before_no_deadline() {
        let input = vec![
            todo(1, Some("Medium"), Some("2030-06-01T10:00"), false),
            todo(2, Some("Medium"), None, false),
        ];
        assert_eq!(ids(&order(&input)), vec![1, 2]);

        let reversed = vec![input[1].clone(), input[0].clone()];
        assert_eq!(ids(&order(&reversed)), vec![1, 2]);
    }

    #[test]
    fn bogus_priority_ties_with_medium() {
        let input = vec![
            todo(5, Some("Bogus"), None, false),
            todo(6, Some("Medium"), None, false),
            todo(7, Some("High"), None, false),
            todo(8, Some("Low"), None, false),
        ];
        assert_eq!(ids(&order(&input)), vec![7, 5, 6, 8]);
    }

    #[test]
    fn priority_beats_deadline() {
        let input = vec![
            todo(1, Some("Low"), Some("2000-01-01T00:00"), false),
            todo(2, Some("High"), None, false),
        ];
        assert_eq!(ids(&order(&input)), vec![2, 1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            todo(4, None, None, false),
            todo(1, Some("Medium"), None, false),
            todo(3, Some("Medium"), Some("2031-01-01T00:00"), false),
            todo(2, None, Some("2031-01-01T00:00"), false),
        ];
        assert_eq!(ids(&order(&input)), vec![3, 2, 4, 1]);
    }

    #[test]
    fn unparseable_deadline_sorts_as_absent() {
        let mut garbled = todo(1, Some("High"), None, false);
        garbled.deadline = parse_deadline("tomorrow-ish");
        let input = vec![garbled, todo(2, Some("High"), Some("2040-01-01"), false)];
        assert_eq!(ids(&order(&input)), vec![2, 1]);
    }

    #[test]
    fn order_is_idempotent_and_leaves_input_alone() {
        let input = vec![
            todo(1, Some("Low"), None, true),
            todo(2, None, Some("2030-01-01T00:00"), false),
            todo(3, Some("Urgent"), None, false),
            todo(4, Some("Low"), Some("2029-01-01T00:00"), true),
        ];
        let snapshot = input.clone();
        let once = order(&input);
        assert_eq!(order(&once), once);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn views_split_without_reordering() {
        let input = vec![
            todo(1, Some("Low"), None, true),
            todo(2, Some("Urgent"), None, false),
            todo(3, Some("Urgent"), None, true),
            todo(4, Some("High"), None, false),
        ];
        let views = TodoViews::from_snapshot(&input);
        assert_eq!(ids(&views.active), vec![2, 4]);
        assert_eq!(ids(&views.completed), vec![3, 1]);
        assert_eq!(views.len(), input.len());
    }

    #[test]
    fn empty_snapshot_gives_empty_views() {
        let views = TodoViews::from_snapshot(&[]);
        assert!(views.is_empty());
    }
}
