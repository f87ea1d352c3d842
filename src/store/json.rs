use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{PhaseStore, Result};
use crate::io::file;
use crate::model::{Phase, Project, Snapshot, Team};

/// Store backed by a single JSON document on disk.
///
/// The whole snapshot is read once on open and rewritten after every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonFileStore {
    /// Open (or lazily create) the data file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = file::load_or_default(&path)?;
        tracing::debug!(
            path = %path.display(),
            projects = snapshot.projects.len(),
            phases = snapshot.phases.len(),
            "opened data file"
        );
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, discarding the in-memory copy.
    pub fn reload(&mut self) -> Result<()> {
        self.snapshot = file::load_or_default(&self.path)?;
        Ok(())
    }

    /// Apply `change` to a copy of the snapshot and write it out. The copy
    /// replaces the in-memory state only once the file is saved.
    fn commit(&mut self, change: impl FnOnce(&mut Snapshot) -> Result<()>) -> Result<()> {
        let mut next = self.snapshot.clone();
        change(&mut next)?;
        file::save_snapshot(&next, &self.path)?;
        self.snapshot = next;
        Ok(())
    }
}

impl PhaseStore for JsonFileStore {
    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot.projects.clone())
    }

    fn get_project(&self, id: Uuid) -> Result<Project> {
        super::snapshot_get_project(&self.snapshot, id)
    }

    fn persist_project(&mut self, project: &Project) -> Result<()> {
        self.commit(|snapshot| {
            snapshot.upsert_project(project.clone());
            Ok(())
        })
    }

    fn delete_project(&mut self, id: Uuid) -> Result<()> {
        self.commit(|snapshot| super::snapshot_delete_project(snapshot, id))
    }

    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>> {
        super::snapshot_list_phases(&self.snapshot, project_id)
    }

    fn get_phase(&self, id: Uuid) -> Result<Phase> {
        super::snapshot_get_phase(&self.snapshot, id)
    }

    fn persist_phases(&mut self, phases: &[Phase]) -> Result<()> {
        self.commit(|snapshot| super::snapshot_persist_phases(snapshot, phases))
    }

    fn delete_phase(&mut self, id: Uuid) -> Result<()> {
        self.commit(|snapshot| super::snapshot_delete_phase(snapshot, id))
    }

    fn team(&self) -> Result<Team> {
        Ok(self.snapshot.team.clone())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
