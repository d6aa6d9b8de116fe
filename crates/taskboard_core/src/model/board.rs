//! Board domain model and pure board-list transformations.
//!
//! # Responsibility
//! - Define the colored, titled container for an ordered task list.
//! - Provide title-keyed helpers used by the presentation layer, plus
//!   id-keyed variants backed by a stable `BoardId`.
//!
//! # Invariants
//! - Helpers never mutate their input; each returns a fresh list.
//! - Title uniqueness is not enforced. Title-keyed rename/toggle/delete
//!   apply to every match, `find_board` returns the first match.
//! - A title with no match leaves the sequence unchanged.
//! - `BoardId` is assigned once at creation and never rewritten.

use super::color::ArgbColor;
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque, immutable board identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub Uuid);

impl BoardId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for BoardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named, colored container for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Documents written before boards carried ids decode with a fresh one.
    #[serde(default = "BoardId::generate")]
    pub id: BoardId,
    pub title: String,
    pub color: ArgbColor,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Transient rename-mode flag. Still part of the persisted record.
    #[serde(default, rename = "isEditing")]
    pub is_editing: bool,
}

impl Board {
    /// Creates an empty, not-editing board with a generated id.
    pub fn new(title: impl Into<String>, color: ArgbColor) -> Self {
        Self::with_id(BoardId::generate(), title, color)
    }

    /// Creates an empty board with a caller-provided id.
    pub fn with_id(id: BoardId, title: impl Into<String>, color: ArgbColor) -> Self {
        Self {
            id,
            title: title.into(),
            color,
            tasks: Vec::new(),
            is_editing: false,
        }
    }
}

/// Seed board names and colors used on first launch.
const SEED_BOARDS: [(&str, u32); 4] = [
    ("Inspiration", 0xFFFD_E68A),
    ("Travel Plans", 0xFFE9_D5FF),
    ("Work", 0xFFFF_E4E6),
    ("Groceries", 0xFF9E_E6C3),
];

/// Returns the four default boards shown when nothing has been persisted.
pub fn seed_boards() -> Vec<Board> {
    SEED_BOARDS
        .iter()
        .map(|(title, argb)| Board::new(*title, ArgbColor::from_packed(*argb)))
        .collect()
}

/// Substitutes the seed defaults for an empty loaded sequence.
pub fn boards_or_seed(loaded: Vec<Board>) -> Vec<Board> {
    if loaded.is_empty() {
        seed_boards()
    } else {
        loaded
    }
}

/// Builds `New Board {n+1}` for a list of `n` boards, without inserting it.
pub fn create_board(boards: &[Board], color: ArgbColor) -> Board {
    Board::new(format!("New Board {}", boards.len() + 1), color)
}

/// Returns `boards` with a freshly created board appended.
pub fn append_board(boards: &[Board], color: ArgbColor) -> Vec<Board> {
    let mut next = boards.to_vec();
    next.push(create_board(boards, color));
    next
}

/// Renames every board titled `title` and clears their edit flag.
pub fn rename_board(boards: &[Board], title: &str, new_title: &str) -> Vec<Board> {
    map_where(
        boards,
        |board| board.title == title,
        |board| {
            board.title = new_title.to_string();
            board.is_editing = false;
        },
    )
}

pub fn toggle_board_edit(boards: &[Board], title: &str) -> Vec<Board> {
    map_where(
        boards,
        |board| board.title == title,
        |board| board.is_editing = !board.is_editing,
    )
}

/// Removes every board titled `title`, keeping relative order.
pub fn delete_board(boards: &[Board], title: &str) -> Vec<Board> {
    boards
        .iter()
        .filter(|board| board.title != title)
        .cloned()
        .collect()
}

/// First board titled `title`.
pub fn find_board<'a>(boards: &'a [Board], title: &str) -> Option<&'a Board> {
    boards.iter().find(|board| board.title == title)
}

/// Replaces the task list of every board titled `title`.
pub fn replace_board_tasks(boards: &[Board], title: &str, tasks: &[Task]) -> Vec<Board> {
    map_where(
        boards,
        |board| board.title == title,
        |board| board.tasks = tasks.to_vec(),
    )
}

/// Applies a task-list transformation to every board titled `title`.
pub fn update_board_tasks(
    boards: &[Board],
    title: &str,
    mut update: impl FnMut(&[Task]) -> Vec<Task>,
) -> Vec<Board> {
    map_where(
        boards,
        |board| board.title == title,
        |board| board.tasks = update(&board.tasks),
    )
}

pub fn rename_board_by_id(boards: &[Board], id: BoardId, new_title: &str) -> Vec<Board> {
    map_where(
        boards,
        |board| board.id == id,
        |board| {
            board.title = new_title.to_string();
            board.is_editing = false;
        },
    )
}

pub fn delete_board_by_id(boards: &[Board], id: BoardId) -> Vec<Board> {
    boards.iter().filter(|board| board.id != id).cloned().collect()
}

pub fn find_board_by_id(boards: &[Board], id: BoardId) -> Option<&Board> {
    boards.iter().find(|board| board.id == id)
}

fn map_where(
    boards: &[Board],
    matches: impl Fn(&Board) -> bool,
    mut update: impl FnMut(&mut Board),
) -> Vec<Board> {
    boards
        .iter()
        .cloned()
        .map(|mut board| {
            if matches(&board) {
                update(&mut board);
            }
            board
        })
        .collect()
}
