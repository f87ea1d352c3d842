use uuid::Uuid;

use super::{PhaseStore, Result};
use crate::model::{Phase, Project, Snapshot, Team};

/// Store that keeps everything in a [`Snapshot`] in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn with_team(team: Team) -> Self {
        Self::new(Snapshot {
            team,
            ..Default::default()
        })
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }
}

impl PhaseStore for MemoryStore {
    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot.projects.clone())
    }

    fn get_project(&self, id: Uuid) -> Result<Project> {
        super::snapshot_get_project(&self.snapshot, id)
    }

    fn persist_project(&mut self, project: &Project) -> Result<()> {
        self.snapshot.upsert_project(project.clone());
        Ok(())
    }

    fn delete_project(&mut self, id: Uuid) -> Result<()> {
        super::snapshot_delete_project(&mut self.snapshot, id)
    }

    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>> {
        super::snapshot_list_phases(&self.snapshot, project_id)
    }

    fn get_phase(&self, id: Uuid) -> Result<Phase> {
        super::snapshot_get_phase(&self.snapshot, id)
    }

    fn persist_phases(&mut self, phases: &[Phase]) -> Result<()> {
        super::snapshot_persist_phases(&mut self.snapshot, phases)
    }

    fn delete_phase(&mut self, id: Uuid) -> Result<()> {
        super::snapshot_delete_phase(&mut self.snapshot, id)
    }

    fn team(&self) -> Result<Team> {
        Ok(self.snapshot.team.clone())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
