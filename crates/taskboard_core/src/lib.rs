//! Board/task state and persistence core.
//!
//! Holds the domain model the presentation layer mutates and the gateway
//! that persists the full board list to a durable key-value store.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use codec::{decode_boards, encode_boards, CodecError, CodecResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::action::{apply_action, BoardAction};
pub use model::board::{
    append_board, boards_or_seed, create_board, delete_board, delete_board_by_id, find_board,
    find_board_by_id, rename_board, rename_board_by_id, replace_board_tasks, seed_boards,
    toggle_board_edit, update_board_tasks, Board, BoardId,
};
pub use model::color::{decode_color, encode_color, palette_color, ArgbColor, BOARD_PALETTE};
pub use model::task::{
    append_task, completed_count, create_placeholder_task, create_task, delete_task,
    next_task_id, rename_task, set_task_done, toggle_task_done, toggle_task_edit, Task, TaskId,
};
pub use service::background_saver::{BackgroundSaver, SaverError, SaverResult};
pub use service::board_gateway::{
    BoardGateway, BoardSubscription, GatewayError, GatewayResult, BOARDS_KEY,
};
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
