//! Project operations: create, rename, delete, renumber, import, export

use super::BoardStore;
use crate::codec::{self, CanvasProject};
use crate::error::{BoardError, Result};
use crate::reorder;
use crate::types::{Project, ProjectId};
use tracing::debug;

impl BoardStore {
    /// Append a new project seeded with the default columns and make it active
    pub fn create_project(&mut self, name: impl Into<String>) -> ProjectId {
        let project = Project::new(name);
        let id = project.id.clone();
        debug!(project = %id, name = %project.name, "created project");
        self.projects.push(project);
        self.active_project_id = Some(id.clone());
        id
    }

    /// Rename a project
    pub fn rename_project(&mut self, id: &ProjectId, name: impl Into<String>) -> Result<()> {
        let project = self.project_mut(id)?;
        project.name = name.into();
        debug!(project = %id, name = %project.name, "renamed project");
        Ok(())
    }

    /// Delete a project together with all of its columns, cards and tasks.
    ///
    /// If the deleted project was active, the first remaining project becomes
    /// active, or none when the list is now empty. Deleting any other project
    /// leaves the active id untouched. Returns the removed project.
    pub fn delete_project(&mut self, id: &ProjectId) -> Result<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })?;
        let removed = self.projects.remove(index);

        if self.active_project_id.as_ref() == Some(id) {
            self.active_project_id = self.projects.first().map(|p| p.id.clone());
        }

        debug!(
            project = %id,
            cards = removed.card_count(),
            active = ?self.active_project_id,
            "deleted project"
        );
        Ok(removed)
    }

    /// Recompute card numbers in every column of a project
    pub fn sync_project_numbers(&mut self, id: &ProjectId) -> Result<()> {
        let project = self.project_mut(id)?;
        for column in &mut project.columns {
            reorder::renumber(&mut column.cards);
        }
        Ok(())
    }

    /// Import Canvas Code text as a brand-new active project.
    ///
    /// The text may wrap the JSON object in surrounding prose. On any
    /// validation failure the store is left untouched and a
    /// `MalformedPayload` error is returned. Importing never merges into an
    /// existing project.
    pub fn import_project(&mut self, text: &str) -> Result<ProjectId> {
        let canvas = codec::parse_canvas_code(text)?;
        Ok(self.import_canvas(canvas))
    }

    /// Add an already-parsed interchange project as a new active project
    pub fn import_canvas(&mut self, canvas: CanvasProject) -> ProjectId {
        let project = canvas.into_project();
        let id = project.id.clone();
        debug!(
            project = %id,
            columns = project.columns.len(),
            cards = project.card_count(),
            "imported project"
        );
        self.projects.push(project);
        self.active_project_id = Some(id.clone());
        id
    }

    /// Export a project as pretty-printed Canvas Code
    pub fn export_project(&self, id: &ProjectId) -> Result<String> {
        let project = self.project_ref(id)?;
        codec::to_canvas_code(&CanvasProject::from_project(project))
    }

    /// Export the active project as pretty-printed Canvas Code
    pub fn export_active_project(&self) -> Result<String> {
        let project = self.active_project().ok_or_else(|| BoardError::ProjectNotFound {
            id: self
                .active_project_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        })?;
        codec::to_canvas_code(&CanvasProject::from_project(project))
    }
}
