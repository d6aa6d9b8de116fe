//! Fire-and-forget board saving on a dedicated worker thread.
//!
//! # Responsibility
//! - Accept save requests without blocking the caller on store I/O.
//! - Coalesce queued requests so only the newest sequence is written.
//!
//! # Invariants
//! - Requests are applied last-write-wins; an older queued sequence is
//!   never written after a newer one.
//! - `flush` returns only after every earlier submission is persisted
//!   (or has failed and been logged).
//! - Dropping the saver drains the queue before the worker exits.

use super::board_gateway::BoardGateway;
use crate::model::board::Board;
use crate::store::KeyValueStore;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "board-saver";

pub type SaverResult<T> = Result<T, SaverError>;

#[derive(Debug)]
pub enum SaverError {
    Spawn(std::io::Error),
    /// The worker thread has exited.
    Disconnected,
}

impl Display for SaverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "failed to start board saver thread: {err}"),
            Self::Disconnected => write!(f, "board saver worker is not running"),
        }
    }
}

impl Error for SaverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            Self::Disconnected => None,
        }
    }
}

enum SaverCommand {
    Save(Vec<Board>),
    Flush(Sender<()>),
}

/// Background writer in front of a shared [`BoardGateway`].
pub struct BackgroundSaver {
    tx: Option<Sender<SaverCommand>>,
    worker: Option<JoinHandle<()>>,
    failed_saves: Arc<AtomicU64>,
}

impl BackgroundSaver {
    /// Starts the worker thread.
    pub fn spawn<S>(gateway: Arc<BoardGateway<S>>) -> SaverResult<Self>
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let failed_saves = Arc::new(AtomicU64::new(0));
        let worker_failed = Arc::clone(&failed_saves);

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(&gateway, &rx, &worker_failed))
            .map_err(SaverError::Spawn)?;

        info!("event=saver_start module=saver status=ok");
        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
            failed_saves,
        })
    }

    /// Queues `boards` for saving and returns immediately.
    pub fn submit(&self, boards: Vec<Board>) -> SaverResult<()> {
        self.send(SaverCommand::Save(boards))
    }

    /// Blocks until every earlier submission has been handled.
    pub fn flush(&self) -> SaverResult<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(SaverCommand::Flush(reply_tx))?;
        reply_rx.recv().map_err(|_| SaverError::Disconnected)
    }

    /// Number of writes that failed since the saver started.
    pub fn failed_saves(&self) -> u64 {
        self.failed_saves.load(Ordering::Relaxed)
    }

    fn send(&self, command: SaverCommand) -> SaverResult<()> {
        let tx = self.tx.as_ref().ok_or(SaverError::Disconnected)?;
        tx.send(command).map_err(|_| SaverError::Disconnected)
    }
}

impl Drop for BackgroundSaver {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=saver_stop module=saver status=error error_code=worker_panicked");
                return;
            }
        }
        info!("event=saver_stop module=saver status=ok");
    }
}

fn run_worker<S: KeyValueStore>(
    gateway: &BoardGateway<S>,
    rx: &Receiver<SaverCommand>,
    failed_saves: &AtomicU64,
) {
    while let Ok(command) = rx.recv() {
        let mut pending = None;
        let mut waiters = Vec::new();
        let mut coalesced = 0_usize;

        absorb(command, &mut pending, &mut waiters, &mut coalesced);
        while let Ok(next) = rx.try_recv() {
            absorb(next, &mut pending, &mut waiters, &mut coalesced);
        }

        if let Some(boards) = pending {
            if coalesced > 1 {
                debug!(
                    "event=saver_coalesce module=saver status=ok dropped={}",
                    coalesced - 1
                );
            }
            // The gateway already logs the failure details.
            if gateway.save(&boards).is_err() {
                failed_saves.fetch_add(1, Ordering::Relaxed);
            }
        }

        for waiter in waiters {
            let _ = waiter.send(());
        }
    }
}

fn absorb(
    command: SaverCommand,
    pending: &mut Option<Vec<Board>>,
    waiters: &mut Vec<Sender<()>>,
    coalesced: &mut usize,
) {
    match command {
        SaverCommand::Save(boards) => {
            *pending = Some(boards);
            *coalesced += 1;
        }
        SaverCommand::Flush(reply) => waiters.push(reply),
    }
}
