//! Mutation requests issued by the presentation layer.
//!
//! # Responsibility
//! - Name every user-driven board/task mutation as a value.
//! - Reduce `(boards, action)` into the full next board sequence.
//!
//! # Invariants
//! - `apply_action` touches no state beyond one debug log event; its output
//!   is the payload handed to `save`.
//! - Task-scoped actions address `(board title, task id)` and touch only
//!   tasks inside boards with that title.

use super::board::{
    append_board, delete_board, rename_board, toggle_board_edit, update_board_tasks, Board,
};
use super::color::ArgbColor;
use super::task::{
    append_task, create_placeholder_task, delete_task, rename_task, set_task_done,
    toggle_task_done, toggle_task_edit, TaskId,
};
use log::debug;

/// One user-driven mutation of the board list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    AddBoard {
        color: ArgbColor,
    },
    RenameBoard {
        title: String,
        new_title: String,
    },
    ToggleBoardEdit {
        title: String,
    },
    DeleteBoard {
        title: String,
    },
    /// `text = None` creates a `New Task {id}` placeholder.
    AddTask {
        board_title: String,
        text: Option<String>,
    },
    RenameTask {
        board_title: String,
        task_id: TaskId,
        text: String,
    },
    SetTaskDone {
        board_title: String,
        task_id: TaskId,
        done: bool,
    },
    ToggleTaskDone {
        board_title: String,
        task_id: TaskId,
    },
    ToggleTaskEdit {
        board_title: String,
        task_id: TaskId,
    },
    DeleteTask {
        board_title: String,
        task_id: TaskId,
    },
}

impl BoardAction {
    /// Stable snake_case name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBoard { .. } => "add_board",
            Self::RenameBoard { .. } => "rename_board",
            Self::ToggleBoardEdit { .. } => "toggle_board_edit",
            Self::DeleteBoard { .. } => "delete_board",
            Self::AddTask { .. } => "add_task",
            Self::RenameTask { .. } => "rename_task",
            Self::SetTaskDone { .. } => "set_task_done",
            Self::ToggleTaskDone { .. } => "toggle_task_done",
            Self::ToggleTaskEdit { .. } => "toggle_task_edit",
            Self::DeleteTask { .. } => "delete_task",
        }
    }
}

/// Returns the board sequence that results from applying `action`.
pub fn apply_action(boards: &[Board], action: &BoardAction) -> Vec<Board> {
    debug!(
        "event=board_action module=model status=ok action={} boards={}",
        action.name(),
        boards.len()
    );
    match action {
        BoardAction::AddBoard { color } => append_board(boards, *color),
        BoardAction::RenameBoard { title, new_title } => rename_board(boards, title, new_title),
        BoardAction::ToggleBoardEdit { title } => toggle_board_edit(boards, title),
        BoardAction::DeleteBoard { title } => delete_board(boards, title),
        BoardAction::AddTask { board_title, text } => {
            update_board_tasks(boards, board_title, |tasks| match text {
                Some(text) => append_task(tasks, text.as_str()),
                None => {
                    let mut next = tasks.to_vec();
                    next.push(create_placeholder_task(tasks));
                    next
                }
            })
        }
        BoardAction::RenameTask {
            board_title,
            task_id,
            text,
        } => update_board_tasks(boards, board_title, |tasks| {
            rename_task(tasks, *task_id, text)
        }),
        BoardAction::SetTaskDone {
            board_title,
            task_id,
            done,
        } => update_board_tasks(boards, board_title, |tasks| {
            set_task_done(tasks, *task_id, *done)
        }),
        BoardAction::ToggleTaskDone {
            board_title,
            task_id,
        } => update_board_tasks(boards, board_title, |tasks| {
            toggle_task_done(tasks, *task_id)
        }),
        BoardAction::ToggleTaskEdit {
            board_title,
            task_id,
        } => update_board_tasks(boards, board_title, |tasks| {
            toggle_task_edit(tasks, *task_id)
        }),
        BoardAction::DeleteTask {
            board_title,
            task_id,
        } => update_board_tasks(boards, board_title, |tasks| delete_task(tasks, *task_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::BoardAction;
    use crate::model::color::BOARD_PALETTE;
    use crate::model::task::TaskId;
    use std::collections::HashSet;

    #[test]
    fn action_names_are_distinct_log_tokens() {
        let title = || "Work".to_string();
        let actions = [
            BoardAction::AddBoard {
                color: BOARD_PALETTE[0],
            },
            BoardAction::RenameBoard {
                title: title(),
                new_title: "Office".to_string(),
            },
            BoardAction::ToggleBoardEdit { title: title() },
            BoardAction::DeleteBoard { title: title() },
            BoardAction::AddTask {
                board_title: title(),
                text: None,
            },
            BoardAction::RenameTask {
                board_title: title(),
                task_id: TaskId(1),
                text: "x".to_string(),
            },
            BoardAction::SetTaskDone {
                board_title: title(),
                task_id: TaskId(1),
                done: true,
            },
            BoardAction::ToggleTaskDone {
                board_title: title(),
                task_id: TaskId(1),
            },
            BoardAction::ToggleTaskEdit {
                board_title: title(),
                task_id: TaskId(1),
            },
            BoardAction::DeleteTask {
                board_title: title(),
                task_id: TaskId(1),
            },
        ];

        let names: HashSet<&str> = actions.iter().map(BoardAction::name).collect();
        assert_eq!(names.len(), actions.len());
        assert!(names
            .iter()
            .all(|name| name.chars().all(|c| c.is_ascii_lowercase() || c == '_')));
    }
}
