use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::io::CsvError;
use crate::model::template::merge_templates;
use crate::model::{
    builtin_templates, find_template, Phase, PhaseStatus, Priority, Project, ProjectStatus,
    ProjectType, Team, Template,
};
use crate::schedule::{self, dates};
use crate::store::{PhaseStore, StoreError};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("invalid project window: {start} .. {end} (the deadline must come after the start)")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("no template named {0:?}")]
    UnknownTemplate(String),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid duration {0:?}, expected a whole number of days")]
    InvalidDuration(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Everything needed to open a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    pub kind: Option<ProjectType>,
    pub priority: Option<Priority>,
    pub lead: String,
    pub start: NaiveDate,
    pub deadline: NaiveDate,
    pub notes: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>, start: NaiveDate, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            client: String::new(),
            kind: None,
            priority: None,
            lead: String::new(),
            start,
            deadline,
            notes: String::new(),
        }
    }
}

/// Edits to a project's tracking fields. Unset fields stay as they are.
///
/// Moving the window does not re-date phases; that takes an explicit
/// [`Planner::redistribute`].
#[derive(Debug, Clone, Default)]
pub struct ProjectEdit {
    pub status: Option<ProjectStatus>,
    pub lead: Option<String>,
    pub start: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

/// A phase added by hand to an existing project.
#[derive(Debug, Clone)]
pub struct NewPhase {
    pub project_id: Uuid,
    pub name: String,
    pub discipline: String,
    pub owner: String,
    pub status: PhaseStatus,
    /// Length in days; zero is treated as one.
    pub duration: u32,
    /// 1-based slot; `None` appends.
    pub position: Option<u32>,
}

impl NewPhase {
    pub fn new(project_id: Uuid, name: impl Into<String>, duration: u32) -> Self {
        Self {
            project_id,
            name: name.into(),
            discipline: String::new(),
            owner: String::new(),
            status: PhaseStatus::NotStarted,
            duration,
            position: None,
        }
    }
}

/// Edits to an existing phase. Unset fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct PhaseEdit {
    pub name: Option<String>,
    pub discipline: Option<String>,
    pub owner: Option<String>,
    pub status: Option<PhaseStatus>,
    pub blocked: Option<bool>,
    pub blocked_reason: Option<String>,
    /// New start; defaults to the current start (or today when unplaced).
    pub start: Option<NaiveDate>,
    /// New length in days; defaults to the current length.
    pub duration: Option<u32>,
}

impl PhaseEdit {
    fn touches_dates(&self) -> bool {
        self.start.is_some() || self.duration.is_some()
    }
}

/// Runs the tracker's workflows against a store.
///
/// Every workflow reloads the project's phases from the store, applies one
/// engine operation in memory and persists the whole project back, so the
/// engine always sees the authoritative list.
pub struct Planner<S: PhaseStore> {
    store: S,
    templates: Vec<Template>,
}

impl<S: PhaseStore> Planner<S> {
    /// A planner using only the built-in templates.
    pub fn new(store: S) -> Self {
        Self::with_templates(store, Vec::new())
    }

    /// A planner whose user templates override built-ins of the same name.
    pub fn with_templates(store: S, user_templates: Vec<Template>) -> Self {
        Self {
            store,
            templates: merge_templates(builtin_templates(), user_templates),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    // ── Projects ────────────────────────────────────────────────

    /// Create a project, seed it from its type's template and spread the
    /// phases across the project window.
    pub fn create_project(&mut self, new: NewProject) -> Result<Project> {
        validate_window(new.start, new.deadline)?;
        let template = match new.kind {
            Some(kind) => Some(
                find_template(&self.templates, kind.label())
                    .ok_or_else(|| PlannerError::UnknownTemplate(kind.label().to_string()))?
                    .clone(),
            ),
            None => None,
        };

        let mut project = Project::new(new.name);
        project.client = new.client;
        project.kind = new.kind;
        project.priority = new.priority;
        project.lead = Team::normalize_owner(&new.lead);
        project.start_date = Some(new.start);
        project.target_deadline = Some(new.deadline);
        project.notes = new.notes;

        let phases = match &template {
            Some(template) => schedule::instantiate(template, project.id, &self.store.team()?),
            None => Vec::new(),
        };
        self.store.persist_project(&project)?;

        let phase_count = if phases.is_empty() {
            0
        } else {
            self.store.persist_phases(&phases)?;
            self.redistribute_stored(project.id, new.start, new.deadline)?
        };

        tracing::info!(
            project = %project.id,
            name = %project.name,
            phases = phase_count,
            "created project"
        );
        Ok(project)
    }

    /// Seed an existing project from a named template, appending its phases
    /// and redistributing everything over the project window when one is set.
    pub fn apply_template(&mut self, project_id: Uuid, template_name: &str) -> Result<Vec<Phase>> {
        let project = self.store.get_project(project_id)?;
        let template = find_template(&self.templates, template_name)
            .ok_or_else(|| PlannerError::UnknownTemplate(template_name.to_string()))?;
        let team = self.store.team()?;

        let existing = self.store.list_phases(project_id)?;
        let offset = u32::try_from(existing.len()).unwrap_or(u32::MAX);
        let mut phases = schedule::instantiate(template, project_id, &team);
        for phase in phases.iter_mut() {
            phase.sort_order += offset;
        }
        self.store.persist_phases(&phases)?;

        if let Some((start, end)) = project.window() {
            self.redistribute_stored(project_id, start, end)?;
        }
        tracing::info!(project = %project_id, template = template_name, "applied template");
        Ok(self.store.list_phases(project_id)?)
    }

    /// Set a new project window and redistribute all phases across it.
    pub fn redistribute(
        &mut self,
        project_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Phase>> {
        validate_window(start, end)?;
        let mut project = self.store.get_project(project_id)?;
        project.start_date = Some(start);
        project.target_deadline = Some(end);
        self.store.persist_project(&project)?;

        self.redistribute_stored(project_id, start, end)?;
        tracing::info!(project = %project_id, %start, %end, "redistributed phases");
        Ok(self.store.list_phases(project_id)?)
    }

    /// Update a project's status, lead or window. Phases are left alone.
    pub fn update_project(&mut self, project_id: Uuid, edit: ProjectEdit) -> Result<Project> {
        let mut project = self.store.get_project(project_id)?;
        let start = edit.start.or(project.start_date);
        let deadline = edit.deadline.or(project.target_deadline);
        if let (Some(start), Some(deadline)) = (start, deadline) {
            validate_window(start, deadline)?;
        }

        if let Some(status) = edit.status {
            project.status = status;
        }
        if let Some(lead) = &edit.lead {
            project.lead = Team::normalize_owner(lead);
        }
        project.start_date = start;
        project.target_deadline = deadline;
        self.store.persist_project(&project)?;

        tracing::info!(project = %project_id, status = project.status.label(), "updated project");
        Ok(project)
    }

    pub fn delete_project(&mut self, project_id: Uuid) -> Result<()> {
        self.store.delete_project(project_id)?;
        tracing::info!(project = %project_id, "deleted project");
        Ok(())
    }

    // ── Phases ──────────────────────────────────────────────────

    /// Insert a phase at its requested position and cascade the rest.
    pub fn add_phase(&mut self, new: NewPhase) -> Result<Phase> {
        let project = self.store.get_project(new.project_id)?;
        let mut phases = self.store.list_phases(new.project_id)?;

        let mut phase = Phase::new(new.project_id, new.name);
        phase.discipline = new.discipline;
        phase.owner = Team::normalize_owner(&new.owner);
        phase.status = new.status;
        let id = phase.id;

        let position = new
            .position
            .unwrap_or_else(|| u32::try_from(phases.len() + 1).unwrap_or(u32::MAX));
        let fallback_start = project.start_date.unwrap_or_else(dates::today);
        let used = schedule::insert_phase(
            &mut phases,
            phase,
            position,
            new.duration.max(1),
            fallback_start,
        );
        self.store.persist_phases(&phases)?;

        tracing::info!(project = %new.project_id, phase = %id, position = used, "added phase");
        phases
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(PlannerError::Store(StoreError::PhaseNotFound(id)))
    }

    /// Apply edits to a phase; date changes cascade to the phases after it.
    pub fn update_phase(&mut self, phase_id: Uuid, edit: PhaseEdit) -> Result<Phase> {
        let current = self.store.get_phase(phase_id)?;
        let mut phases = self.store.list_phases(current.project_id)?;

        let Some(phase) = phases.iter_mut().find(|p| p.id == phase_id) else {
            return Err(StoreError::PhaseNotFound(phase_id).into());
        };
        if let Some(name) = edit.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            phase.name = name.to_string();
        }
        if let Some(discipline) = &edit.discipline {
            phase.discipline = discipline.clone();
        }
        if let Some(owner) = &edit.owner {
            phase.owner = Team::normalize_owner(owner);
        }
        if let Some(status) = edit.status {
            phase.status = status;
        }
        if let Some(blocked) = edit.blocked {
            phase.blocked = blocked;
        }
        if let Some(reason) = &edit.blocked_reason {
            phase.blocked_reason = reason.trim().to_string();
        }

        if edit.touches_dates() {
            let start = edit
                .start
                .or(phase.start_date)
                .unwrap_or_else(dates::today);
            let days = edit
                .duration
                .map(i64::from)
                .or_else(|| phase.duration_days())
                .unwrap_or(1);
            let days = u32::try_from(days.max(1)).unwrap_or(u32::MAX);
            schedule::resize_phase(&mut phases, phase_id, start, days);
        }

        self.store.persist_phases(&phases)?;
        tracing::info!(phase = %phase_id, redated = edit.touches_dates(), "updated phase");
        Ok(self.store.get_phase(phase_id)?)
    }

    /// Move a phase to another slot and re-date the project's chain.
    pub fn move_phase(&mut self, phase_id: Uuid, position: u32) -> Result<Vec<Phase>> {
        let current = self.store.get_phase(phase_id)?;
        let mut phases = self.store.list_phases(current.project_id)?;
        let used = schedule::move_phase(&mut phases, phase_id, position)
            .ok_or(StoreError::PhaseNotFound(phase_id))?;
        self.store.persist_phases(&phases)?;
        tracing::info!(phase = %phase_id, position = used, "moved phase");
        Ok(phases)
    }

    /// Delete a phase, renumber the remainder and close the date gap.
    pub fn delete_phase(&mut self, phase_id: Uuid) -> Result<Vec<Phase>> {
        let current = self.store.get_phase(phase_id)?;
        let mut phases = self.store.list_phases(current.project_id)?;
        schedule::remove_phase(&mut phases, phase_id);

        self.store.delete_phase(phase_id)?;
        if !phases.is_empty() {
            self.store.persist_phases(&phases)?;
        }
        tracing::info!(project = %current.project_id, phase = %phase_id, "deleted phase");
        Ok(phases)
    }

    /// Reload a project's phases, redistribute them and persist. Returns the
    /// number of phases laid out.
    fn redistribute_stored(&mut self, project_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<usize> {
        let mut phases = self.store.list_phases(project_id)?;
        if schedule::redistribute(&mut phases, start, end) {
            self.store.persist_phases(&phases)?;
        }
        tracing::debug!(project = %project_id, phases = phases.len(), "redistribution pass");
        Ok(phases.len())
    }
}

/// A usable window ends strictly after it starts.
fn validate_window(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end <= start {
        return Err(PlannerError::InvalidWindow { start, end });
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    match dates::parse_iso(s) {
        Ok(Some(date)) => Ok(date),
        _ => Err(PlannerError::InvalidDate(s.to_string())),
    }
}

/// Parse a day count argument.
pub fn parse_days_arg(s: &str) -> Result<u32> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|d| *d >= 1)
        .ok_or_else(|| PlannerError::InvalidDuration(s.to_string()))
}
