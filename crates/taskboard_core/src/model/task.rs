//! Task domain model and pure task-list transformations.
//!
//! # Responsibility
//! - Define the task record owned by exactly one board.
//! - Provide side-effect free helpers that return new task lists.
//!
//! # Invariants
//! - `id` is unique within the owning board, not globally.
//! - New ids are `max(existing) + 1`, or `1` for an empty list. If `max` is
//!   already `u32::MAX`, the smallest unused id is assigned instead.
//! - List order is display order; helpers never reorder.
//! - Operations on an id that is not present return the input unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Board-local task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Transient rename-mode flag. Still part of the persisted record.
    #[serde(default, rename = "isEditing")]
    pub is_editing: bool,
}

impl Task {
    /// Creates a not-done, not-editing task with the given id.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            is_editing: false,
        }
    }
}

/// Returns the id the next created task receives.
///
/// Normally `max + 1`. When that would overflow, the smallest unused id is
/// taken instead so ids stay unique within the board.
pub fn next_task_id(tasks: &[Task]) -> TaskId {
    let max = tasks.iter().map(|task| task.id.0).max().unwrap_or(0);
    match max.checked_add(1) {
        Some(next) => TaskId(next),
        None => smallest_unused_id(tasks),
    }
}

fn smallest_unused_id(tasks: &[Task]) -> TaskId {
    let mut used: Vec<u32> = tasks.iter().map(|task| task.id.0).collect();
    used.sort_unstable();
    used.dedup();
    let mut candidate = 1_u32;
    for id in used {
        if id > candidate {
            break;
        }
        if id == candidate {
            // A board cannot hold u32::MAX distinct tasks in memory.
            candidate = candidate.saturating_add(1);
        }
    }
    TaskId(candidate)
}

/// Builds a new task for `tasks` without inserting it.
pub fn create_task(tasks: &[Task], text: impl Into<String>) -> Task {
    Task::new(next_task_id(tasks), text)
}

/// Builds a new task labelled `New Task {id}`.
pub fn create_placeholder_task(tasks: &[Task]) -> Task {
    let id = next_task_id(tasks);
    Task::new(id, format!("New Task {id}"))
}

/// Returns `tasks` with a new task appended at the end.
pub fn append_task(tasks: &[Task], text: impl Into<String>) -> Vec<Task> {
    let mut next = tasks.to_vec();
    next.push(create_task(tasks, text));
    next
}

/// Replaces the text of task `id` and leaves edit mode.
pub fn rename_task(tasks: &[Task], id: TaskId, text: &str) -> Vec<Task> {
    map_matching(tasks, id, |task| {
        task.text = text.to_string();
        task.is_editing = false;
    })
}

pub fn toggle_task_done(tasks: &[Task], id: TaskId) -> Vec<Task> {
    map_matching(tasks, id, |task| task.done = !task.done)
}

/// Sets the completion flag to an explicit value (checkbox semantics).
pub fn set_task_done(tasks: &[Task], id: TaskId, done: bool) -> Vec<Task> {
    map_matching(tasks, id, |task| task.done = done)
}

pub fn toggle_task_edit(tasks: &[Task], id: TaskId) -> Vec<Task> {
    map_matching(tasks, id, |task| task.is_editing = !task.is_editing)
}

pub fn delete_task(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

/// Number of completed tasks, for the `N of M` header.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.done).count()
}

fn map_matching(tasks: &[Task], id: TaskId, mut update: impl FnMut(&mut Task)) -> Vec<Task> {
    tasks
        .iter()
        .cloned()
        .map(|mut task| {
            if task.id == id {
                update(&mut task);
            }
            task
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{append_task, create_placeholder_task, next_task_id, rename_task, Task, TaskId};

    #[test]
    fn next_id_reuses_smallest_gap_when_max_is_taken() {
        let tasks = vec![Task::new(TaskId(u32::MAX), "last")];
        assert_eq!(next_task_id(&tasks), TaskId(1));

        let tasks = vec![
            Task::new(TaskId(2), "two"),
            Task::new(TaskId(u32::MAX), "last"),
            Task::new(TaskId(1), "one"),
            Task::new(TaskId(4), "four"),
        ];
        assert_eq!(next_task_id(&tasks), TaskId(3));
    }

    #[test]
    fn appending_after_max_id_keeps_ids_unique() {
        let stored = serde_json::json!([{ "id": u32::MAX, "text": "x" }]);
        let tasks: Vec<Task> = serde_json::from_value(stored).unwrap();

        let appended = append_task(&tasks, "y");
        assert_eq!(appended.len(), 2);
        assert_ne!(appended[0].id, appended[1].id);

        let renamed = rename_task(&appended, appended[1].id, "renamed");
        assert_eq!(renamed[0].text, "x");
        assert_eq!(renamed[1].text, "renamed");
    }

    #[test]
    fn placeholder_text_uses_assigned_id() {
        let tasks = vec![Task::new(TaskId(4), "existing")];
        let task = create_placeholder_task(&tasks);
        assert_eq!(task.id, TaskId(5));
        assert_eq!(task.text, "New Task 5");
    }
}
