//! Persistence gateway for the full board list.
//!
//! # Responsibility
//! - Save the whole board sequence under one well-known store key.
//! - Load it back, degrading corrupt or unreadable content to "no data".
//! - Publish every successfully saved sequence to live subscribers.
//!
//! # Invariants
//! - Each save is a total overwrite of the previous document.
//! - A failed save writes nothing and publishes nothing.
//! - `load` never fails; read and decode errors are logged and yield an
//!   empty sequence.
//! - Subscribers receive the current value on registration, then one value
//!   per successful save, in write order.

use crate::codec::{decode_boards, encode_boards, CodecError};
use crate::model::board::Board;
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Store key holding the board document.
pub const BOARDS_KEY: &str = "boards_json";

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug)]
pub enum GatewayError {
    Codec(CodecError),
    Store(StoreError),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "board store write failed: {err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CodecError> for GatewayError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<StoreError> for GatewayError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Saves and loads the board list through a [`KeyValueStore`].
pub struct BoardGateway<S: KeyValueStore> {
    store: Mutex<S>,
    key: String,
    subscribers: Mutex<Vec<Sender<Vec<Board>>>>,
}

impl<S: KeyValueStore> BoardGateway<S> {
    /// Creates a gateway using [`BOARDS_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, BOARDS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store: Mutex::new(store),
            key: key.into(),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encodes and writes the whole sequence, replacing any prior document.
    ///
    /// # Errors
    /// - `GatewayError::Codec` when the sequence cannot be serialized.
    /// - `GatewayError::Store` when the underlying write fails.
    pub fn save(&self, boards: &[Board]) -> GatewayResult<()> {
        let started_at = Instant::now();
        let document = encode_boards(boards).map_err(|err| {
            error!(
                "event=board_save module=gateway status=error error_code=encode_failed error={}",
                err
            );
            err
        })?;

        let store = self.lock_store();
        if let Err(err) = store.put(&self.key, &document) {
            error!(
                "event=board_save module=gateway status=error error_code=store_write_failed duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        // Publishing under the store lock keeps delivery order equal to
        // write order.
        let delivered = self.publish(boards);
        drop(store);

        info!(
            "event=board_save module=gateway status=ok boards={} tasks={} bytes={} subscribers={} duration_ms={}",
            boards.len(),
            task_total(boards),
            document.len(),
            delivered,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Reads the current board sequence.
    ///
    /// Returns an empty sequence when nothing was saved yet, when the stored
    /// document is corrupt, or when the store cannot be read. Seed defaults
    /// are the caller's concern.
    pub fn load(&self) -> Vec<Board> {
        let store = self.lock_store();
        self.read_current(&*store)
    }

    /// Registers a subscriber that first receives the current sequence and
    /// then every successfully saved one.
    pub fn subscribe(&self) -> BoardSubscription {
        let (tx, rx) = mpsc::channel();
        let store = self.lock_store();
        let current = self.read_current(&*store);
        // Receiver is alive, send cannot fail here.
        let _ = tx.send(current);
        let mut subscribers = self.lock_subscribers();
        subscribers.push(tx);
        debug!(
            "event=board_subscribe module=gateway status=ok subscribers={}",
            subscribers.len()
        );
        drop(subscribers);
        drop(store);
        BoardSubscription { rx }
    }

    /// Number of registered subscribers, including ones dropped since the
    /// last publish.
    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    fn read_current(&self, store: &S) -> Vec<Board> {
        let document = match store.get(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!("event=board_load module=gateway status=ok result=absent");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=board_load module=gateway status=error error_code=store_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_boards(&document) {
            Ok(boards) => {
                debug!(
                    "event=board_load module=gateway status=ok boards={} bytes={}",
                    boards.len(),
                    document.len()
                );
                boards
            }
            Err(err) => {
                warn!(
                    "event=board_load module=gateway status=error error_code=corrupt_document bytes={} error={}",
                    document.len(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn publish(&self, boards: &[Board]) -> usize {
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|tx| tx.send(boards.to_vec()).is_ok());
        subscribers.len()
    }

    fn lock_store(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<Vec<Board>>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Continuously updating feed of decoded board sequences.
///
/// Iterating blocks until the next value and ends when the gateway is
/// dropped.
pub struct BoardSubscription {
    rx: Receiver<Vec<Board>>,
}

impl BoardSubscription {
    /// Blocks for the next value. `None` once the gateway is gone.
    pub fn recv(&self) -> Option<Vec<Board>> {
        self.rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<Vec<Board>> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Vec<Board>> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Drains everything queued and returns the newest value, if any.
    pub fn latest(&self) -> Option<Vec<Board>> {
        let mut latest = None;
        while let Some(boards) = self.try_recv() {
            latest = Some(boards);
        }
        latest
    }
}

impl Iterator for BoardSubscription {
    type Item = Vec<Board>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

fn task_total(boards: &[Board]) -> usize {
    boards.iter().map(|board| board.tasks.len()).sum()
}
