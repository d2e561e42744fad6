//! Card operations: CRUD, task toggling, reordering and cross-column moves
//!
//! Any operation that changes a column's card order or membership finishes
//! by renumbering that column, so card numbers always read 1..N.

use super::{column_index, column_mut, BoardStore};
use crate::error::{BoardError, Result};
use crate::reorder;
use crate::types::{Card, CardDraft, CardId, CardUpdate, Column, ColumnId, ProjectId};
use tracing::debug;

impl BoardStore {
    /// Append a card to the end of a column.
    ///
    /// The new card is numbered `len + 1`.
    pub fn create_card(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        draft: CardDraft,
    ) -> Result<CardId> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        let card = Card::from_draft(draft, column.cards.len() + 1);
        let id = card.id.clone();
        debug!(column = %column_id, card = %id, number = card.number, "created card");
        column.cards.push(card);
        Ok(id)
    }

    /// Edit a card's title, color and/or checklist
    pub fn update_card(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        card_id: &CardId,
        update: CardUpdate,
    ) -> Result<()> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        let card = card_mut(column, card_id)?;
        if let Some(title) = update.title {
            card.title = title;
        }
        if let Some(color) = update.color {
            card.color = color;
        }
        if let Some(tasks) = update.tasks {
            card.tasks = tasks;
        }
        debug!(column = %column_id, card = %card_id, "updated card");
        Ok(())
    }

    /// Delete a card and renumber the rest of its column. Returns the removed card.
    pub fn delete_card(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        card_id: &CardId,
    ) -> Result<Card> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        let index = column
            .card_index(card_id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: card_id.to_string(),
            })?;
        let removed = column.cards.remove(index);
        reorder::renumber(&mut column.cards);
        debug!(column = %column_id, card = %card_id, "deleted card");
        Ok(removed)
    }

    /// Flip the `done` flag of the task at `task_index`. Returns the new value.
    pub fn toggle_task(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        card_id: &CardId,
        task_index: usize,
    ) -> Result<bool> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        let card = card_mut(column, card_id)?;
        let task = card
            .tasks
            .get_mut(task_index)
            .ok_or_else(|| BoardError::TaskNotFound {
                card: card_id.to_string(),
                index: task_index,
            })?;
        task.done = !task.done;
        debug!(card = %card_id, task = task_index, done = task.done, "toggled task");
        Ok(task.done)
    }

    /// Move a card within its column and renumber the column
    pub fn reorder_cards(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        old_index: usize,
        new_index: usize,
    ) -> Result<()> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        reorder::move_within(&mut column.cards, old_index, new_index)?;
        reorder::renumber(&mut column.cards);
        debug!(column = %column_id, from = old_index, to = new_index, "reordered cards");
        Ok(())
    }

    /// Transfer a card from one column to another.
    ///
    /// The card lands at `insert_index` in the target column; a missing or
    /// past-the-end index appends. Both columns are renumbered. When source
    /// and target are the same column this is a reorder to
    /// `min(insert_index, len - 1)`. Returns the card's final index.
    pub fn move_card_between_columns(
        &mut self,
        project_id: &ProjectId,
        card_id: &CardId,
        from_column: &ColumnId,
        to_column: &ColumnId,
        insert_index: Option<usize>,
    ) -> Result<usize> {
        let project = self.project_mut(project_id)?;
        let from = column_index(project, from_column)?;
        let to = column_index(project, to_column)?;
        let current = project.columns[from]
            .card_index(card_id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: card_id.to_string(),
            })?;

        let landed = if from == to {
            let cards = &mut project.columns[from].cards;
            let target = reorder::insertion_index(cards.len(), insert_index).min(cards.len() - 1);
            reorder::move_within(cards, current, target)?;
            reorder::renumber(cards);
            target
        } else {
            let (source, target) = pair_mut(&mut project.columns, from, to);
            let landed =
                reorder::move_across(&mut source.cards, &mut target.cards, card_id, insert_index)
                    .ok_or_else(|| BoardError::CardNotFound {
                        id: card_id.to_string(),
                    })?;
            reorder::renumber(&mut source.cards);
            reorder::renumber(&mut target.cards);
            landed
        };

        debug!(
            card = %card_id,
            from = %from_column,
            to = %to_column,
            index = landed,
            "moved card"
        );
        Ok(landed)
    }

    /// The column that currently owns a card
    pub fn find_card_column(&self, project_id: &ProjectId, card_id: &CardId) -> Option<&ColumnId> {
        self.project(project_id)?
            .columns
            .iter()
            .find(|c| c.card_index(card_id).is_some())
            .map(|c| &c.id)
    }
}

fn card_mut<'a>(column: &'a mut Column, id: &CardId) -> Result<&'a mut Card> {
    column
        .cards
        .iter_mut()
        .find(|c| &c.id == id)
        .ok_or_else(|| BoardError::CardNotFound { id: id.to_string() })
}

/// Borrow two distinct columns mutably at once
fn pair_mut(columns: &mut [Column], a: usize, b: usize) -> (&mut Column, &mut Column) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = columns.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = columns.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
