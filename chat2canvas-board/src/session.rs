//! A store wired to persistence and drag state
//!
//! [`BoardSession`] is what an embedding application holds for the lifetime
//! of a board view. Every successful mutation schedules a debounced save of
//! the full snapshot; failed mutations leave both the store and the stored
//! snapshot untouched.

use crate::error::Result;
use crate::gesture::{DragItem, DragSession, OverContext};
use crate::persistence::PersistenceAdapter;
use crate::store::BoardStore;
use tracing::info;

pub struct BoardSession {
    store: BoardStore,
    persistence: PersistenceAdapter,
    drag: DragSession,
}

impl BoardSession {
    /// Hydrate a session from whatever the adapter has stored
    pub async fn open(persistence: PersistenceAdapter) -> Self {
        let snapshot = persistence.load().await;
        info!(
            key = persistence.key(),
            projects = snapshot.projects.len(),
            "opened board session"
        );
        Self {
            store: BoardStore::from_snapshot(snapshot),
            persistence,
            drag: DragSession::new(),
        }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Run a mutation against the store and schedule a save if it succeeds.
    ///
    /// The closure may chain several store calls; if any of them fails the
    /// store is rolled back to its state before the closure ran.
    pub fn apply<T, F>(&mut self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut BoardStore) -> Result<T>,
    {
        let before = self.store.clone();
        match mutation(&mut self.store) {
            Ok(output) => {
                self.persistence.schedule_save(&self.store.snapshot());
                Ok(output)
            }
            Err(e) => {
                self.store = before;
                Err(e)
            }
        }
    }

    pub fn drag_start(&mut self, item_id: &str) -> Option<DragItem> {
        self.drag.drag_start(&self.store, item_id).cloned()
    }

    /// Forward a hover; saves only when the card actually moved
    pub fn drag_over(&mut self, active_id: &str, over_id: &str, over: OverContext) -> Result<bool> {
        let moved = self
            .drag
            .drag_over(&mut self.store, active_id, over_id, over)?;
        if moved {
            self.persistence.schedule_save(&self.store.snapshot());
        }
        Ok(moved)
    }

    pub fn settle(&mut self) {
        self.drag.settle();
    }

    pub fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> Result<()> {
        let before = self.store.clone();
        if let Err(e) = self.drag.drag_end(&mut self.store, active_id, over_id) {
            self.store = before;
            return Err(e);
        }
        if self.store != before {
            self.persistence.schedule_save(&self.store.snapshot());
        }
        Ok(())
    }

    /// Write any pending save now
    pub async fn flush(&mut self) -> Result<()> {
        self.persistence.flush().await
    }

    /// Flush and hand back the store
    pub async fn close(mut self) -> Result<BoardStore> {
        self.flush().await?;
        Ok(self.store)
    }
}
