//! Board/task domain model.
//!
//! # Responsibility
//! - Define the value shapes the presentation layer renders and mutates.
//! - Keep every transformation pure so each mutation yields a full new list.
//!
//! # Invariants
//! - Task ids are board-local; board titles are display keys, not unique.
//! - List order is display order everywhere.

pub mod action;
pub mod board;
pub mod color;
pub mod task;
