//! Persistence gateway services.
//!
//! # Responsibility
//! - Own the save/load/subscribe contract for the board document.
//! - Keep callers decoupled from store and encoding details.

pub mod background_saver;
pub mod board_gateway;
