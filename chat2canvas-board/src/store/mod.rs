//! BoardStore - the single owner of all projects
//!
//! Every mutation goes through a method on [`BoardStore`]. Methods run to
//! completion synchronously and either apply their whole change or return
//! an error with the store left exactly as it was. A reference to a
//! project, column, card or task index that does not exist yields the
//! matching `*NotFound` error; callers that prefer silent no-ops can ignore
//! it.
//!
//! Operations are grouped by the entity they act on:
//!
//! - [`project`] - create, rename, delete, activate, import, export
//! - [`column`] - create, recolor/rename, delete, reorder
//! - [`card`] - create, edit, delete, toggle tasks, reorder, cross-column move

mod card;
mod column;
mod project;

use crate::error::{BoardError, Result};
use crate::reorder;
use crate::types::{Column, ColumnId, Project, ProjectId};
use serde::{Deserialize, Serialize};

/// The persisted part of the store.
///
/// Serialized as `{ "projects": [...], "activeProjectId": "..." | null }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub active_project_id: Option<ProjectId>,
}

/// In-memory tree of projects, columns, cards and tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    projects: Vec<Project>,
    active_project_id: Option<ProjectId>,
}

impl BoardStore {
    /// Create an empty store with no projects and no active project
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a store from a persisted snapshot.
    ///
    /// Card numbers are recomputed for every column, so a snapshot edited by
    /// hand cannot break the numbering invariant.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self {
            projects: snapshot.projects,
            active_project_id: snapshot.active_project_id,
        };
        for project in &mut store.projects {
            for column in &mut project.columns {
                reorder::renumber(&mut column.cards);
            }
        }
        store
    }

    /// Copy the persisted part of the store
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.clone(),
            active_project_id: self.active_project_id.clone(),
        }
    }

    /// Consume the store into its persisted form
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            projects: self.projects,
            active_project_id: self.active_project_id,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// All projects in creation order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Find a project by id
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// The raw active project id. May dangle; see [`BoardStore::active_project`].
    pub fn active_project_id(&self) -> Option<&ProjectId> {
        self.active_project_id.as_ref()
    }

    /// The active project, or `None` when no project is active or the active
    /// id no longer resolves
    pub fn active_project(&self) -> Option<&Project> {
        self.active_project_id
            .as_ref()
            .and_then(|id| self.project(id))
    }

    /// Point the active project at `id`.
    ///
    /// The id is not checked; a dangling id reads back as "no active
    /// project" through [`BoardStore::active_project`].
    pub fn set_active_project(&mut self, id: impl Into<ProjectId>) {
        let id = id.into();
        tracing::debug!(project = %id, "set active project");
        self.active_project_id = Some(id);
    }

    /// Clear the active project
    pub fn clear_active_project(&mut self) {
        self.active_project_id = None;
    }

    // =========================================================================
    // Lookup helpers shared by the operation modules
    // =========================================================================

    fn project_mut(&mut self, id: &ProjectId) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })
    }

    fn project_ref(&self, id: &ProjectId) -> Result<&Project> {
        self.project(id)
            .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })
    }
}

/// Resolve a column inside a project
fn column_mut<'a>(project: &'a mut Project, id: &ColumnId) -> Result<&'a mut Column> {
    project
        .column_mut(id)
        .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
}

/// Resolve a column's position inside a project
fn column_index(project: &Project, id: &ColumnId) -> Result<usize> {
    project
        .column_index(id)
        .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
}
