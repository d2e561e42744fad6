//! Core types for the board engine

mod board;
mod card;
mod ids;

// Re-export all types
pub use board::{Column, ColumnUpdate, Project};
pub use card::{Card, CardDraft, CardUpdate, Task};
pub use ids::{CardId, ColumnId, ProjectId};
