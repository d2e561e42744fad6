//! Snapshot persistence with debounced writes
//!
//! The whole store is saved as one [`Snapshot`] record under a single key.
//! A drag gesture can fire dozens of mutations in a second, so writes are
//! coalesced: [`PersistenceAdapter::schedule_save`] arms a timer, and every
//! new call before it fires replaces the pending snapshot and restarts the
//! timer. Only the last snapshot of a burst reaches the backend.
//!
//! Writes are ordered by a generation number taken when they are scheduled.
//! A slow write that is overtaken by a newer one is skipped once it gets the
//! write gate, so the stored copy only ever moves forward.
//!
//! Storage failures never reach mutation call sites. A failed write is
//! logged and the in-memory store keeps working; a missing or unreadable
//! snapshot loads as the empty state.

mod file;
mod memory;

pub use file::{FileKeyValueStore, StoreLock};
pub use memory::MemoryKeyValueStore;

use crate::config::BoardConfig;
use crate::error::Result;
use crate::store::Snapshot;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Key-value byte storage backing the snapshot
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove `key` if present
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Serializes backend writes and remembers the newest generation stored
type WriteGate = Arc<tokio::sync::Mutex<u64>>;

/// A debounced write that has not reached the backend yet
struct PendingWrite {
    handle: JoinHandle<()>,
    generation: u64,
    /// Taken by whoever writes first: the timer task or `flush`
    payload: Arc<Mutex<Option<Vec<u8>>>>,
}

impl PendingWrite {
    fn take_payload(&self) -> Option<Vec<u8>> {
        self.payload.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Loads the snapshot at startup and writes it back after quiet periods.
///
/// Each adapter owns its own pending timer, so independent stores (for
/// example in tests) never share debounce state. Scheduling requires a
/// running Tokio runtime.
pub struct PersistenceAdapter {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    debounce: Duration,
    pending: Option<PendingWrite>,
    generation: u64,
    gate: WriteGate,
}

impl PersistenceAdapter {
    /// Create an adapter over any backend
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>, debounce: Duration) -> Self {
        Self {
            backend,
            key: key.into(),
            debounce,
            pending: None,
            generation: 0,
            gate: Arc::new(tokio::sync::Mutex::new(0)),
        }
    }

    /// Create a file-backed adapter from configuration
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            Arc::new(FileKeyValueStore::new(&config.storage_dir)),
            config.snapshot_key.clone(),
            config.debounce(),
        )
    }

    /// The key the snapshot is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The quiet interval before a scheduled write fires
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Read the persisted snapshot.
    ///
    /// Missing data, unreadable storage and corrupt JSON all yield the empty
    /// snapshot; the latter two are logged.
    pub async fn load(&self) -> Snapshot {
        match self.backend.get(&self.key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) => {
                    debug!(
                        key = %self.key,
                        projects = snapshot.projects.len(),
                        "loaded snapshot"
                    );
                    snapshot
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "corrupt snapshot, starting empty");
                    Snapshot::default()
                }
            },
            Ok(None) => {
                debug!(key = %self.key, "no snapshot stored, starting empty");
                Snapshot::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "snapshot unreadable, starting empty");
                Snapshot::default()
            }
        }
    }

    /// Arrange for `snapshot` to be written once no newer save arrives
    /// within the debounce interval
    pub fn schedule_save(&mut self, snapshot: &Snapshot) {
        let bytes = match serde_json::to_vec(snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to serialize snapshot");
                return;
            }
        };

        if let Some(previous) = self.pending.take() {
            // A timer that already took its payload is mid-write; the gate
            // orders it before anything newer.
            if previous.take_payload().is_some() {
                previous.handle.abort();
            }
        }

        self.generation += 1;
        let generation = self.generation;
        let payload = Arc::new(Mutex::new(Some(bytes)));
        let task_payload = Arc::clone(&payload);
        let backend = Arc::clone(&self.backend);
        let gate = Arc::clone(&self.gate);
        let key = self.key.clone();
        let debounce = self.debounce;

        trace!(key = %key, generation, delay_ms = debounce.as_millis() as u64, "scheduled snapshot write");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let bytes = task_payload.lock().ok().and_then(|mut slot| slot.take());
            if let Some(bytes) = bytes {
                let size = bytes.len();
                match write_generation(&gate, backend.as_ref(), &key, generation, bytes).await {
                    Ok(true) => debug!(key = %key, bytes = size, "wrote snapshot"),
                    Ok(false) => {}
                    Err(e) => warn!(key = %key, error = %e, "failed to write snapshot"),
                }
            }
        });

        self.pending = Some(PendingWrite {
            handle,
            generation,
            payload,
        });
    }

    /// True while a scheduled write has not completed
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Write any pending snapshot now instead of waiting for the timer.
    ///
    /// Unlike timer-driven writes, a failure here is returned to the caller.
    pub async fn flush(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        match pending.take_payload() {
            Some(bytes) => {
                pending.handle.abort();
                write_generation(
                    &self.gate,
                    self.backend.as_ref(),
                    &self.key,
                    pending.generation,
                    bytes,
                )
                .await?;
                debug!(key = %self.key, "flushed snapshot");
                Ok(())
            }
            None => {
                // The timer is already writing; wait for it to land.
                let _ = pending.handle.await;
                Ok(())
            }
        }
    }

    /// Write a snapshot immediately, bypassing the debounce timer
    pub async fn save_now(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.schedule_save(snapshot);
        self.flush().await
    }
}

/// Write `bytes` unless a newer generation is already stored.
///
/// Returns `Ok(false)` when the write was skipped as stale.
async fn write_generation(
    gate: &WriteGate,
    backend: &dyn KeyValueStore,
    key: &str,
    generation: u64,
    bytes: Vec<u8>,
) -> Result<bool> {
    let mut stored = gate.lock().await;
    if generation <= *stored {
        trace!(key = %key, generation, stored = *stored, "skipping stale snapshot write");
        return Ok(false);
    }
    backend.set(key, bytes).await?;
    *stored = generation;
    Ok(true)
}
