//! Persistence contract consumed by the planner.
//!
//! The scheduling engine itself never sees a store; the [`Planner`] reads a
//! project's phases through [`PhaseStore`], runs an engine over them and
//! writes the result back with a batch upsert.
//!
//! [`Planner`]: crate::planner::Planner

pub mod error;
pub mod json;
pub mod memory;

use uuid::Uuid;

use crate::model::{Phase, Project, Snapshot, Team};

pub use error::{Result, StoreError};
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Row-level access to projects and phases.
pub trait PhaseStore {
    fn list_projects(&self) -> Result<Vec<Project>>;

    fn get_project(&self, id: Uuid) -> Result<Project>;

    /// Insert or replace a project by id.
    fn persist_project(&mut self, project: &Project) -> Result<()>;

    /// Delete a project and every phase it owns.
    fn delete_project(&mut self, id: Uuid) -> Result<()>;

    /// A project's phases ordered by `sort_order`.
    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>>;

    fn get_phase(&self, id: Uuid) -> Result<Phase>;

    fn persist_phase(&mut self, phase: &Phase) -> Result<()> {
        self.persist_phases(std::slice::from_ref(phase))
    }

    /// Batch upsert keyed by phase id. Every phase must belong to an existing
    /// project; on error nothing is written.
    fn persist_phases(&mut self, phases: &[Phase]) -> Result<()>;

    fn delete_phase(&mut self, id: Uuid) -> Result<()>;

    fn team(&self) -> Result<Team>;

    /// Everything at once, for read-only views.
    fn snapshot(&self) -> Result<Snapshot>;
}

// ── Shared snapshot-backed implementation ───────────────────────

pub(crate) fn snapshot_get_project(snapshot: &Snapshot, id: Uuid) -> Result<Project> {
    snapshot
        .project(id)
        .cloned()
        .ok_or(StoreError::ProjectNotFound(id))
}

pub(crate) fn snapshot_get_phase(snapshot: &Snapshot, id: Uuid) -> Result<Phase> {
    snapshot
        .phase(id)
        .cloned()
        .ok_or(StoreError::PhaseNotFound(id))
}

pub(crate) fn snapshot_list_phases(snapshot: &Snapshot, project_id: Uuid) -> Result<Vec<Phase>> {
    if snapshot.project(project_id).is_none() {
        return Err(StoreError::ProjectNotFound(project_id));
    }
    Ok(snapshot.project_phases(project_id))
}

pub(crate) fn snapshot_persist_phases(snapshot: &mut Snapshot, phases: &[Phase]) -> Result<()> {
    if let Some(orphan) = phases.iter().find(|p| snapshot.project(p.project_id).is_none()) {
        return Err(StoreError::ProjectNotFound(orphan.project_id));
    }
    for phase in phases {
        snapshot.upsert_phase(phase.clone());
    }
    Ok(())
}

pub(crate) fn snapshot_delete_project(snapshot: &mut Snapshot, id: Uuid) -> Result<()> {
    snapshot
        .remove_project(id)
        .map(|_| ())
        .ok_or(StoreError::ProjectNotFound(id))
}

pub(crate) fn snapshot_delete_phase(snapshot: &mut Snapshot, id: Uuid) -> Result<()> {
    snapshot
        .remove_phase(id)
        .map(|_| ())
        .ok_or(StoreError::PhaseNotFound(id))
}
