//! YAML views of board entities for terminal output

use chat2canvas_board::{BoardStore, Card, Column, Project};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub columns: usize,
    pub cards: usize,
}

impl ProjectSummary {
    pub fn list(store: &BoardStore) -> Vec<Self> {
        let active = store.active_project_id();
        store
            .projects()
            .iter()
            .map(|project| Self {
                id: project.id.to_string(),
                name: project.name.clone(),
                active: active == Some(&project.id),
                columns: project.columns.len(),
                cards: project.card_count(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct BoardView {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub id: String,
    pub title: String,
    pub color: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: String,
    pub number: usize,
    pub title: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub text: String,
    pub done: bool,
}

impl From<&Project> for BoardView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            columns: project.columns.iter().map(ColumnView::from).collect(),
        }
    }
}

impl From<&Column> for ColumnView {
    fn from(column: &Column) -> Self {
        Self {
            id: column.id.to_string(),
            title: column.title.clone(),
            color: column.color.clone(),
            cards: column.cards.iter().map(CardView::from).collect(),
        }
    }
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let (done, total) = card.progress();
        Self {
            id: card.id.to_string(),
            number: card.number,
            title: card.title.clone(),
            color: card.color.clone(),
            progress: (total > 0).then(|| format!("{}/{} completed", done, total)),
            tasks: card
                .tasks
                .iter()
                .enumerate()
                .map(|(index, task)| TaskView {
                    index,
                    text: task.text.clone(),
                    done: task.done,
                })
                .collect(),
        }
    }
}

/// Result of a create-style command
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
    pub name: String,
}

pub fn print_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    print!("{}", serde_yaml_ng::to_string(value)?);
    Ok(())
}
