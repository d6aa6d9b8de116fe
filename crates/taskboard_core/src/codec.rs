//! Persisted board document encoding.
//!
//! # Responsibility
//! - Serialize the full board sequence into one JSON text blob.
//! - Reconstruct exactly the same sequence from that blob.
//!
//! # Invariants
//! - The document is a JSON array of board objects in display order.
//! - Colors are stored as signed ARGB integers (see `model::color`).
//! - Decoding never partially succeeds: any malformed board rejects the
//!   whole document.

use crate::model::board::Board;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode board document: {err}"),
            Self::Decode(err) => write!(f, "failed to decode board document: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Encodes the full board sequence as a JSON document.
pub fn encode_boards(boards: &[Board]) -> CodecResult<String> {
    serde_json::to_string(boards).map_err(CodecError::Encode)
}

/// Decodes a JSON document produced by [`encode_boards`].
pub fn decode_boards(document: &str) -> CodecResult<Vec<Board>> {
    serde_json::from_str(document).map_err(CodecError::Decode)
}
