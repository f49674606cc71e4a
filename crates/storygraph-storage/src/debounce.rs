use crate::{NodePositions, PositionRepository, StorageError};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

enum Command {
    Save(NodePositions),
    Flush(Sender<Result<(), StorageError>>),
}

/// Saves positions on a background thread once submissions stop arriving for
/// the configured delay. Only the latest submission is written. Pending
/// positions are written when the writer is dropped.
pub struct DebouncedWriter {
    tx: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl DebouncedWriter {
    pub fn spawn<R>(repo: R, delay: Duration) -> Self
    where
        R: PositionRepository + 'static,
    {
        let (tx, rx) = unbounded::<Command>();
        let handle = thread::spawn(move || run(repo, rx, delay));
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn submit(&self, positions: NodePositions) -> Result<(), StorageError> {
        self.send(Command::Save(positions))
    }

    /// Write any pending positions now and wait for the result.
    pub fn flush(&self) -> Result<(), StorageError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(Command::Flush(reply_tx))?;
        reply_rx.recv().map_err(|_| StorageError::WriterClosed)?
    }

    fn send(&self, command: Command) -> Result<(), StorageError> {
        self.tx
            .as_ref()
            .ok_or(StorageError::WriterClosed)?
            .send(command)
            .map_err(|_| StorageError::WriterClosed)
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        // Closing the channel makes the worker write what is pending and exit.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Position writer thread panicked");
            }
        }
    }
}

fn run<R: PositionRepository>(repo: R, rx: Receiver<Command>, delay: Duration) {
    let mut pending: Option<NodePositions> = None;

    loop {
        let command = if pending.is_some() {
            match rx.recv_timeout(delay) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => {
                    write(&repo, pending.take());
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(command) => command,
                Err(_) => break,
            }
        };

        match command {
            Command::Save(positions) => pending = Some(positions),
            Command::Flush(reply) => {
                let result = match pending.take() {
                    Some(positions) => repo.save(&positions),
                    None => Ok(()),
                };
                let _ = reply.send(result);
            }
        }
    }

    write(&repo, pending.take());
}

fn write<R: PositionRepository>(repo: &R, positions: Option<NodePositions>) {
    let Some(positions) = positions else {
        return;
    };
    match repo.save(&positions) {
        Ok(()) => debug!("Saved {} node positions (debounced)", positions.len()),
        Err(err) => warn!("Failed to save node positions: {}", err),
    }
}
