//! Card types: Card, Task, and the inputs used to create or edit cards

use super::ids::CardId;
use serde::{Deserialize, Serialize};

/// A card on the board.
///
/// `number` is a display sequence derived from the card's position in its
/// column (1-based, contiguous). The store recomputes it after every change
/// to the column's order or membership; it is never user-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub number: usize,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Card {
    /// Build a card from a draft at the given display number
    pub fn from_draft(draft: CardDraft, number: usize) -> Self {
        Self {
            id: CardId::new(),
            number,
            title: draft.title,
            color: draft.color,
            tasks: draft.tasks,
        }
    }

    /// Completed and total task counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.done).count();
        (done, self.tasks.len())
    }
}

/// A single checklist line. Tasks have no identity of their own and are
/// addressed by index within their card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Create an open task
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    /// Create a completed task
    pub fn done(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: true,
        }
    }
}

/// Input for creating a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl CardDraft {
    /// Create a draft with no tasks
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
            tasks: Vec::new(),
        }
    }

    /// Set the task checklist
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Append a single open task
    pub fn with_task(mut self, text: impl Into<String>) -> Self {
        self.tasks.push(Task::new(text));
        self
    }
}

/// Partial update for a card. `None` fields are left untouched; `tasks`
/// replaces the whole checklist when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

impl CardUpdate {
    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the checklist
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.color.is_none() && self.tasks.is_none()
    }
}
