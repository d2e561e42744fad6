//! Board-level types: Project, Column

use super::card::Card;
use super::ids::{CardId, ColumnId, ProjectId};
use crate::auto_color::{BLUE, GREEN, SLATE};
use serde::{Deserialize, Serialize};

/// A project owns an ordered sequence of columns.
///
/// Column order in `columns` is the display order; there is no separate
/// sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Project {
    /// Create a new project seeded with the default columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            columns: Self::default_columns(),
        }
    }

    /// The columns every new project starts with
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("To Do", SLATE),
            Column::new("In Progress", BLUE),
            Column::new("Done", GREEN),
        ]
    }

    /// Find a column by id
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Find a column by id, mutably
    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// Position of a column in the project
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

/// A column is an ordered bucket of cards within one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    /// Create an empty column
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            color: color.into(),
            cards: Vec::new(),
        }
    }

    /// Position of a card in this column
    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == id)
    }

    /// Find a card by id
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }
}

/// Partial update for a column's title and/or color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ColumnUpdate {
    /// Update only the title
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            color: None,
        }
    }

    /// Update only the color
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            title: None,
            color: Some(color.into()),
        }
    }
}
