//! Canvas Code: the JSON interchange format for whole projects
//!
//! ```text
//! { "name": string,
//!   "columns": [ { "title": string, "color": "#rrggbb",
//!                  "cards": [ { "title": string, "color": "#rrggbb",
//!                               "tasks": [ { "text": string, "done": bool } ] } ] } ] }
//! ```
//!
//! Identifiers and card numbers never appear in Canvas Code. Importing
//! generates fresh ids and numbers every card by position; exporting drops
//! both.
//!
//! Import is strict at the top level (`name` must be a non-empty string,
//! `columns` an array) and forgiving below it:
//!
//! | missing            | becomes                 |
//! |--------------------|-------------------------|
//! | `cards`, `tasks`   | `[]`                    |
//! | `title`            | `"Untitled"`            |
//! | `color` (or `""`)  | `auto_color(title)`     |
//! | `text` / `done`    | `""` / `false`          |
//!
//! `null` counts as missing for `title`, `color`, `cards` and `tasks`.
//! A nested value of the wrong shape (say `"cards": "none"`) rejects the
//! whole payload. Unknown keys, including stray `id` or `number` fields,
//! are ignored.

mod extract;

pub use extract::extract_json_object;

use crate::auto_color::auto_color;
use crate::error::{BoardError, Result};
use crate::reorder;
use crate::types::{Card, CardId, Column, ColumnId, Project, ProjectId, Task};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const UNTITLED: &str = "Untitled";

/// A project in Canvas Code form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasProject {
    pub name: String,
    pub columns: Vec<CanvasColumn>,
}

/// A column in Canvas Code form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasColumn {
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<CanvasCard>,
}

/// A card in Canvas Code form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasCard {
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

impl CanvasProject {
    /// Project an internal project into Canvas Code, dropping ids and numbers
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            columns: project
                .columns
                .iter()
                .map(|column| CanvasColumn {
                    title: column.title.clone(),
                    color: column.color.clone(),
                    cards: column
                        .cards
                        .iter()
                        .map(|card| CanvasCard {
                            title: card.title.clone(),
                            color: card.color.clone(),
                            tasks: card.tasks.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Build a brand-new project with fresh ids and cards numbered 1..N
    pub fn into_project(self) -> Project {
        let columns = self
            .columns
            .into_iter()
            .map(|column| {
                let mut cards: Vec<Card> = column
                    .cards
                    .into_iter()
                    .map(|card| Card {
                        id: CardId::new(),
                        number: 0,
                        color: color_or_auto(card.color, &card.title),
                        title: card.title,
                        tasks: card.tasks,
                    })
                    .collect();
                reorder::renumber(&mut cards);
                Column {
                    id: ColumnId::new(),
                    color: color_or_auto(column.color, &column.title),
                    title: column.title,
                    cards,
                }
            })
            .collect();

        Project {
            id: ProjectId::new(),
            name: self.name,
            columns,
        }
    }
}

/// Extract, validate and decode Canvas Code from free-form text
pub fn parse_canvas_code(text: &str) -> Result<CanvasProject> {
    let candidate = extract_json_object(text)
        .ok_or_else(|| BoardError::malformed("no JSON object found in text"))?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| BoardError::malformed(format!("invalid JSON: {}", e)))?;

    match value.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => {
            return Err(BoardError::malformed(
                "\"name\" must be a non-empty string",
            ))
        }
    }
    if !value.get("columns").is_some_and(Value::is_array) {
        return Err(BoardError::malformed("\"columns\" must be an array"));
    }

    serde_json::from_value(value)
        .map_err(|e| BoardError::malformed(format!("invalid board structure: {}", e)))
}

/// Serialize Canvas Code as pretty-printed JSON
pub fn to_canvas_code(project: &CanvasProject) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

fn color_or_auto(color: String, title: &str) -> String {
    if color.trim().is_empty() {
        auto_color(title).to_string()
    } else {
        color
    }
}

fn untitled() -> String {
    UNTITLED.to_string()
}

fn title_or_untitled<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(untitled))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
