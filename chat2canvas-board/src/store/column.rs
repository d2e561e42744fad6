//! Column operations scoped to one project

use super::{column_index, column_mut, BoardStore};
use crate::error::Result;
use crate::reorder;
use crate::types::{Column, ColumnId, ColumnUpdate, ProjectId};
use tracing::debug;

impl BoardStore {
    /// Append an empty column to a project
    pub fn create_column(
        &mut self,
        project_id: &ProjectId,
        title: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<ColumnId> {
        let project = self.project_mut(project_id)?;
        let column = Column::new(title, color);
        let id = column.id.clone();
        debug!(project = %project_id, column = %id, title = %column.title, "created column");
        project.columns.push(column);
        Ok(id)
    }

    /// Change a column's title and/or color. Fields left `None` are kept.
    pub fn update_column(
        &mut self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        update: ColumnUpdate,
    ) -> Result<()> {
        let project = self.project_mut(project_id)?;
        let column = column_mut(project, column_id)?;
        if let Some(title) = update.title {
            column.title = title;
        }
        if let Some(color) = update.color {
            column.color = color;
        }
        debug!(project = %project_id, column = %column_id, "updated column");
        Ok(())
    }

    /// Delete a column and all of its cards. Returns the removed column.
    pub fn delete_column(&mut self, project_id: &ProjectId, column_id: &ColumnId) -> Result<Column> {
        let project = self.project_mut(project_id)?;
        let index = column_index(project, column_id)?;
        let removed = project.columns.remove(index);
        debug!(
            project = %project_id,
            column = %column_id,
            cards = removed.cards.len(),
            "deleted column"
        );
        Ok(removed)
    }

    /// Move a column within its project. Card numbers are unaffected.
    pub fn reorder_columns(
        &mut self,
        project_id: &ProjectId,
        old_index: usize,
        new_index: usize,
    ) -> Result<()> {
        let project = self.project_mut(project_id)?;
        reorder::move_within(&mut project.columns, old_index, new_index)?;
        debug!(project = %project_id, from = old_index, to = new_index, "reordered columns");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::types::CardDraft;

    fn setup() -> (BoardStore, ProjectId) {
        let mut store = BoardStore::new();
        let id = store.create_project("P");
        (store, id)
    }

    fn titles(store: &BoardStore, id: &ProjectId) -> Vec<String> {
        store
            .project(id)
            .unwrap()
            .columns
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    #[test]
    fn test_create_column_appends() {
        let (mut store, pid) = setup();
        let id = store.create_column(&pid, "Blocked", "#fee2e2").unwrap();
        let project = store.project(&pid).unwrap();
        assert_eq!(project.columns.len(), 4);
        assert_eq!(project.columns[3].id, id);
        assert_eq!(project.columns[3].color, "#fee2e2");
        assert!(project.columns[3].cards.is_empty());
    }

    #[test]
    fn test_create_column_missing_project() {
        let (mut store, _) = setup();
        let err = store
            .create_column(&ProjectId::from_string("nope"), "X", "#fff")
            .unwrap_err();
        assert!(matches!(err, BoardError::ProjectNotFound { .. }));
    }

    #[test]
    fn test_update_column_partial() {
        let (mut store, pid) = setup();
        let col = store.project(&pid).unwrap().columns[0].id.clone();

        store
            .update_column(&pid, &col, ColumnUpdate::title("Backlog"))
            .unwrap();
        let column = store.project(&pid).unwrap().column(&col).unwrap();
        assert_eq!(column.title, "Backlog");
        assert_eq!(column.color, "#f8fafc");

        store
            .update_column(&pid, &col, ColumnUpdate::color("#fef3c7"))
            .unwrap();
        let column = store.project(&pid).unwrap().column(&col).unwrap();
        assert_eq!(column.title, "Backlog");
        assert_eq!(column.color, "#fef3c7");
    }

    #[test]
    fn test_delete_column_cascades() {
        let (mut store, pid) = setup();
        let col = store.project(&pid).unwrap().columns[1].id.clone();
        store
            .create_card(&pid, &col, CardDraft::new("a", "#fff"))
            .unwrap();

        let removed = store.delete_column(&pid, &col).unwrap();
        assert_eq!(removed.cards.len(), 1);
        assert_eq!(titles(&store, &pid), vec!["To Do", "Done"]);
        assert_eq!(store.project(&pid).unwrap().card_count(), 0);
    }

    #[test]
    fn test_delete_missing_column() {
        let (mut store, pid) = setup();
        let before = store.clone();
        let err = store
            .delete_column(&pid, &ColumnId::from_string("nope"))
            .unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_reorder_columns() {
        let (mut store, pid) = setup();
        store.reorder_columns(&pid, 2, 0).unwrap();
        assert_eq!(titles(&store, &pid), vec!["Done", "To Do", "In Progress"]);
        store.reorder_columns(&pid, 0, 2).unwrap();
        assert_eq!(titles(&store, &pid), vec!["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn test_reorder_columns_out_of_range() {
        let (mut store, pid) = setup();
        let before = store.clone();
        let err = store.reorder_columns(&pid, 0, 3).unwrap_err();
        assert!(matches!(err, BoardError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(store, before);
    }
}
