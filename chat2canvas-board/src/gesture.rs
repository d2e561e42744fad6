//! Drag-and-drop intents for the active project
//!
//! A drag runs as start → any number of hovers → end. Hovering a card over
//! another column moves it there right away so the board re-renders live;
//! dropping finalizes the order within a column (or of the columns) and
//! resyncs card numbers.
//!
//! Ids arrive as plain strings because the drag layer does not know whether
//! an id names a column or a card. Anything that does not resolve inside
//! the active project is ignored.

use crate::error::Result;
use crate::store::BoardStore;
use crate::types::{CardId, ColumnId, Project};
use tracing::{debug, trace};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Column(ColumnId),
    Card(CardId),
}

/// What kind of element the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverContext {
    /// A column body (or its empty area)
    Column,
    /// A card inside some column
    Card,
}

/// Per-gesture state: the dragged item and the hover guard.
#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<DragItem>,
    busy: bool,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item currently being dragged
    pub fn active(&self) -> Option<&DragItem> {
        self.active.as_ref()
    }

    /// True between a hover-triggered move and the next [`DragSession::settle`]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Record the dragged item if `item_id` names a column or card of the
    /// active project
    pub fn drag_start(&mut self, store: &BoardStore, item_id: &str) -> Option<&DragItem> {
        self.active = store.active_project().and_then(|project| {
            if let Some(column) = project.columns.iter().find(|c| c.id.as_str() == item_id) {
                Some(DragItem::Column(column.id.clone()))
            } else {
                owning_column(project, item_id)
                    .map(|_| DragItem::Card(CardId::from_string(item_id)))
            }
        });
        trace!(item = item_id, active = ?self.active, "drag start");
        self.active.as_ref()
    }

    /// Handle a hover. Returns true when the card was moved to another column.
    ///
    /// Moves are dropped while a previous one is unsettled, so one hover
    /// burst cannot bounce a card between columns.
    pub fn drag_over(
        &mut self,
        store: &mut BoardStore,
        active_id: &str,
        over_id: &str,
        over: OverContext,
    ) -> Result<bool> {
        if self.busy || active_id == over_id {
            return Ok(false);
        }
        if matches!(self.active, Some(DragItem::Column(_))) {
            return Ok(false);
        }
        let Some(project) = store.active_project() else {
            return Ok(false);
        };

        let Some(from) = owning_column(project, active_id) else {
            return Ok(false);
        };
        let target = match over {
            OverContext::Column => project.columns.iter().position(|c| c.id.as_str() == over_id),
            OverContext::Card => owning_column(project, over_id),
        };
        let Some(to) = target else {
            return Ok(false);
        };
        if from == to {
            return Ok(false);
        }

        let target_column = &project.columns[to];
        let insert_index = match over {
            OverContext::Card => target_column
                .cards
                .iter()
                .position(|c| c.id.as_str() == over_id)
                .unwrap_or(target_column.cards.len()),
            OverContext::Column => target_column.cards.len(),
        };

        let project_id = project.id.clone();
        let from_id = project.columns[from].id.clone();
        let to_id = target_column.id.clone();

        self.busy = true;
        store.move_card_between_columns(
            &project_id,
            &CardId::from_string(active_id),
            &from_id,
            &to_id,
            Some(insert_index),
        )?;
        debug!(card = active_id, to = %to_id, index = insert_index, "drag moved card");
        Ok(true)
    }

    /// Let the next hover move through
    pub fn settle(&mut self) {
        self.busy = false;
    }

    /// Finish the gesture: reorder in place, then resync card numbers.
    ///
    /// `over_id` is `None` when the item was dropped outside any target.
    pub fn drag_end(
        &mut self,
        store: &mut BoardStore,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Result<()> {
        self.active = None;
        self.busy = false;

        let Some(over_id) = over_id else {
            return Ok(());
        };
        let Some(project) = store.active_project() else {
            return Ok(());
        };
        let project_id = project.id.clone();

        if active_id != over_id {
            let old = project.columns.iter().position(|c| c.id.as_str() == active_id);
            let new = project.columns.iter().position(|c| c.id.as_str() == over_id);
            if let (Some(old), Some(new)) = (old, new) {
                store.reorder_columns(&project_id, old, new)?;
            }
        }

        let project = store.active_project();
        let card_move = project.and_then(|project| {
            let column = &project.columns[owning_column(project, active_id)?];
            let old = column.cards.iter().position(|c| c.id.as_str() == active_id)?;
            let new = column.cards.iter().position(|c| c.id.as_str() == over_id)?;
            (old != new).then(|| (column.id.clone(), old, new))
        });
        if let Some((column_id, old, new)) = card_move {
            store.reorder_cards(&project_id, &column_id, old, new)?;
        }

        store.sync_project_numbers(&project_id)?;
        trace!(item = active_id, over = over_id, "drag end");
        Ok(())
    }
}

/// Index of the column holding the card with `card_id`
fn owning_column(project: &Project, card_id: &str) -> Option<usize> {
    project
        .columns
        .iter()
        .position(|c| c.cards.iter().any(|card| card.id.as_str() == card_id))
}
