//! Kanban board engine for AI-assisted project planning
//!
//! Projects hold ordered columns, columns hold ordered cards, and cards hold
//! a checklist of tasks. Whole projects travel in and out as Canvas Code, a
//! small JSON format an AI assistant can generate and a user can paste back.
//!
//! ## Overview
//!
//! - **One owner** - [`BoardStore`] holds every project; all changes go through its methods
//! - **Numbered cards** - cards in a column are always numbered `1..N` in display order
//! - **Forgiving import** - Canvas Code is found inside surrounding prose and
//!   missing nested fields get defaults
//! - **Debounced persistence** - the whole store is saved as one snapshot after
//!   a quiet period
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use chat2canvas_board::{BoardSession, BoardConfig, CardDraft, PersistenceAdapter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load()?;
//! let mut session = BoardSession::open(PersistenceAdapter::from_config(&config)).await;
//!
//! let project = session.apply(|store| Ok(store.create_project("Website")))?;
//! session.apply(|store| {
//!     let todo = store.project(&project).unwrap().columns[0].id.clone();
//!     store.create_card(&project, &todo, CardDraft::new("Wireframes", "#fef3c7"))
//! })?;
//!
//! session.flush().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Snapshot Format
//!
//! ```text
//! {
//!   "projects": [
//!     { "id", "name", "columns": [
//!         { "id", "title", "color", "cards": [
//!             { "id", "number", "title", "color", "tasks": [ { "text", "done" } ] } ] } ] }
//!   ],
//!   "activeProjectId": "01J..." | null
//! }
//! ```

pub mod auto_color;
pub mod codec;
pub mod config;
mod error;
pub mod gesture;
pub mod persistence;
pub mod prompts;
pub mod reorder;
mod session;
mod store;
pub mod types;

pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use gesture::{DragItem, DragSession, OverContext};
pub use persistence::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistenceAdapter, StoreLock,
};
pub use session::BoardSession;
pub use store::{BoardStore, Snapshot};
pub use types::{
    Card, CardDraft, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, Project, ProjectId, Task,
};

pub use codec::{parse_canvas_code, to_canvas_code, CanvasCard, CanvasColumn, CanvasProject};
