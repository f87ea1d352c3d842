use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Phase, Project, ProjectStatus, Team};
use crate::schedule::{dates, ordering};

/// Complete planner state: every project, every phase and the team roster.
///
/// Engines never reach for global state; whoever holds a `Snapshot` hands the
/// relevant phases to them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub phases: Vec<Phase>,
    pub team: Team,
}

impl Snapshot {
    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn phase(&self, id: Uuid) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// A project's phases, cloned and sorted by `sort_order`.
    pub fn project_phases(&self, project_id: Uuid) -> Vec<Phase> {
        let mut phases: Vec<Phase> = self
            .phases
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        ordering::sort_by_order(&mut phases);
        phases
    }

    // ── Mutation ────────────────────────────────────────────────

    pub fn upsert_project(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    /// Remove a project together with all of its phases.
    pub fn remove_project(&mut self, id: Uuid) -> Option<Project> {
        let idx = self.projects.iter().position(|p| p.id == id)?;
        self.phases.retain(|p| p.project_id != id);
        Some(self.projects.remove(idx))
    }

    pub fn upsert_phase(&mut self, phase: Phase) {
        match self.phases.iter_mut().find(|p| p.id == phase.id) {
            Some(existing) => *existing = phase,
            None => self.phases.push(phase),
        }
    }

    pub fn remove_phase(&mut self, id: Uuid) -> Option<Phase> {
        let idx = self.phases.iter().position(|p| p.id == id)?;
        Some(self.phases.remove(idx))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Percentage (0-100) of a project's phases that are done.
    pub fn project_progress(&self, project_id: Uuid) -> u32 {
        let (total, done) = self
            .phases
            .iter()
            .filter(|p| p.project_id == project_id)
            .fold((0u32, 0u32), |(total, done), p| {
                (total + 1, done + u32::from(p.status.is_done()))
            });
        if total == 0 {
            return 0;
        }
        ((f64::from(done) / f64::from(total)) * 100.0).round() as u32
    }

    /// Earliest end date among the project's open, dated phases.
    pub fn next_phase_due(&self, project_id: Uuid) -> Option<NaiveDate> {
        self.phases
            .iter()
            .filter(|p| p.project_id == project_id && !p.status.is_done())
            .filter_map(|p| p.end_date)
            .min()
    }

    /// Open phases overlapping the Monday-to-Sunday week containing `day`,
    /// soonest due first.
    pub fn phases_in_week(&self, day: NaiveDate) -> Vec<&Phase> {
        let (monday, sunday) = dates::week_bounds(day);
        let mut phases: Vec<&Phase> = self
            .phases
            .iter()
            .filter(|p| !p.status.is_done() && p.overlaps(monday, sunday))
            .collect();
        phases.sort_by_key(|p| p.end_date);
        phases
    }

    /// Open phases flagged as blocked, undated first, then soonest due.
    pub fn blocked_phases(&self) -> Vec<&Phase> {
        let mut phases: Vec<&Phase> = self
            .phases
            .iter()
            .filter(|p| p.blocked && !p.status.is_done())
            .collect();
        phases.sort_by_key(|p| p.end_date);
        phases
    }

    /// Projects in a given status, in insertion order.
    pub fn projects_with_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.status == status).collect()
    }
}
