//! Command-line front end: argument parsing and plain-text reports.

use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use studio_phase_planner::model::{Phase, PhaseStatus, Project, ProjectStatus, ProjectType, Snapshot};
use studio_phase_planner::io::export_schedule_csv;
use studio_phase_planner::planner::{
    self, parse_date_arg, parse_days_arg, NewPhase, NewProject, PhaseEdit, Planner, PlannerError,
    ProjectEdit,
};
use studio_phase_planner::schedule::dates::{self, format_iso};
use studio_phase_planner::store::PhaseStore;

pub const USAGE: &str = "\
usage: studio-phase-planner <command> [args]

  projects [status]                          list projects with progress
  phases <project>                           list a project's phases
  templates                                  list available templates
  new-project <name> <type|-> <start> <deadline>
  add-phase <project> <name> <days> [position]
  edit-phase <phase> <start> <days>
  set-status <phase> <status>
  block <phase> <reason>
  unblock <phase>
  move-phase <phase> <position>
  delete-phase <phase>
  redistribute <project> <start> <end>
  apply-template <project> <template>
  set-project-status <project> <status>
  set-lead <project> <name>
  edit-window <project> <start> <deadline>   move the window, phases stay put
  delete-project <project>
  this-week [date]
  blocked
  export-csv <project> <path>

Dates are YYYY-MM-DD.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Projects(Option<ProjectStatus>),
    Phases(Uuid),
    Templates,
    NewProject {
        name: String,
        kind: Option<ProjectType>,
        start: NaiveDate,
        deadline: NaiveDate,
    },
    AddPhase {
        project: Uuid,
        name: String,
        days: u32,
        position: Option<u32>,
    },
    EditPhase {
        phase: Uuid,
        start: NaiveDate,
        days: u32,
    },
    SetStatus(Uuid, PhaseStatus),
    Block(Uuid, String),
    Unblock(Uuid),
    MovePhase(Uuid, u32),
    DeletePhase(Uuid),
    Redistribute {
        project: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },
    ApplyTemplate(Uuid, String),
    SetProjectStatus(Uuid, ProjectStatus),
    SetLead(Uuid, String),
    EditWindow {
        project: Uuid,
        start: NaiveDate,
        deadline: NaiveDate,
    },
    DeleteProject(Uuid),
    ThisWeek(Option<NaiveDate>),
    Blocked,
    ExportCsv(Uuid, PathBuf),
}

/// Parse arguments (without the program name) into a command.
pub fn parse(args: &[String]) -> Result<Command, String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let cmd = match args.as_slice() {
        ["projects"] => Command::Projects(None),
        ["projects", status] => Command::Projects(Some(project_status(status)?)),
        ["phases", project] => Command::Phases(id(project)?),
        ["templates"] => Command::Templates,
        ["new-project", name, kind, start, deadline] => Command::NewProject {
            name: name.to_string(),
            kind: match *kind {
                "-" | "" => None,
                other => Some(
                    ProjectType::parse(other)
                        .ok_or_else(|| format!("unknown project type {other:?}"))?,
                ),
            },
            start: date(start)?,
            deadline: date(deadline)?,
        },
        ["add-phase", project, name, days, rest @ ..] if rest.len() <= 1 => Command::AddPhase {
            project: id(project)?,
            name: name.to_string(),
            days: day_count(days)?,
            position: rest.first().map(|p| position(p)).transpose()?,
        },
        ["edit-phase", phase, start, days] => Command::EditPhase {
            phase: id(phase)?,
            start: date(start)?,
            days: day_count(days)?,
        },
        ["set-status", phase, status] => Command::SetStatus(
            id(phase)?,
            PhaseStatus::parse(status).ok_or_else(|| format!("unknown status {status:?}"))?,
        ),
        ["block", phase, reason] => Command::Block(id(phase)?, reason.to_string()),
        ["unblock", phase] => Command::Unblock(id(phase)?),
        ["move-phase", phase, pos] => Command::MovePhase(id(phase)?, position(pos)?),
        ["delete-phase", phase] => Command::DeletePhase(id(phase)?),
        ["redistribute", project, start, end] => Command::Redistribute {
            project: id(project)?,
            start: date(start)?,
            end: date(end)?,
        },
        ["apply-template", project, template] => {
            Command::ApplyTemplate(id(project)?, template.to_string())
        }
        ["set-project-status", project, status] => {
            Command::SetProjectStatus(id(project)?, project_status(status)?)
        }
        ["set-lead", project, lead] => Command::SetLead(id(project)?, lead.to_string()),
        ["edit-window", project, start, deadline] => Command::EditWindow {
            project: id(project)?,
            start: date(start)?,
            deadline: date(deadline)?,
        },
        ["delete-project", project] => Command::DeleteProject(id(project)?),
        ["this-week"] => Command::ThisWeek(None),
        ["this-week", day] => Command::ThisWeek(Some(date(day)?)),
        ["blocked"] => Command::Blocked,
        ["export-csv", project, path] => Command::ExportCsv(id(project)?, PathBuf::from(path)),
        _ => return Err(USAGE.to_string()),
    };
    Ok(cmd)
}

fn id(s: &str) -> Result<Uuid, String> {
    Uuid::parse_str(s).map_err(|e| format!("invalid id {s:?}: {e}"))
}

fn project_status(s: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::parse(s).ok_or_else(|| format!("unknown project status {s:?}"))
}

fn date(s: &str) -> Result<NaiveDate, String> {
    parse_date_arg(s).map_err(|e| e.to_string())
}

fn day_count(s: &str) -> Result<u32, String> {
    parse_days_arg(s).map_err(|e| e.to_string())
}

fn position(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("invalid position {s:?}"))
}

/// Run a command, returning the text to print.
pub fn run<S: PhaseStore>(planner: &mut Planner<S>, command: Command) -> planner::Result<String> {
    let out = match command {
        Command::Projects(status) => {
            let snapshot = planner.store().snapshot()?;
            let projects = match status {
                Some(status) => snapshot.projects_with_status(status),
                None => snapshot.projects.iter().collect(),
            };
            project_report(&snapshot, &projects)
        }
        Command::Phases(project) => phase_table(&planner.store().list_phases(project)?),
        Command::Templates => planner
            .templates()
            .iter()
            .map(|t| {
                format!(
                    "{:<10} {:>2} phases {:>3} days",
                    t.name,
                    t.phases.len(),
                    t.total_days()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Command::NewProject {
            name,
            kind,
            start,
            deadline,
        } => {
            let mut new = NewProject::new(name, start, deadline);
            new.kind = kind;
            let project = planner.create_project(new)?;
            let phases = planner.store().list_phases(project.id)?;
            format!("created {} ({})\n{}", project.name, project.id, phase_table(&phases))
        }
        Command::AddPhase {
            project,
            name,
            days,
            position,
        } => {
            let mut new = NewPhase::new(project, name, days);
            new.position = position;
            let phase = planner.add_phase(new)?;
            format!("added {} ({}) at position {}", phase.name, phase.id, phase.sort_order)
        }
        Command::EditPhase { phase, start, days } => {
            let edit = PhaseEdit {
                start: Some(start),
                duration: Some(days),
                ..Default::default()
            };
            phase_line(&planner.update_phase(phase, edit)?)
        }
        Command::SetStatus(phase, status) => {
            let edit = PhaseEdit {
                status: Some(status),
                ..Default::default()
            };
            phase_line(&planner.update_phase(phase, edit)?)
        }
        Command::Block(phase, reason) => {
            let edit = PhaseEdit {
                blocked: Some(true),
                blocked_reason: Some(reason),
                ..Default::default()
            };
            phase_line(&planner.update_phase(phase, edit)?)
        }
        Command::Unblock(phase) => {
            let edit = PhaseEdit {
                blocked: Some(false),
                blocked_reason: Some(String::new()),
                ..Default::default()
            };
            phase_line(&planner.update_phase(phase, edit)?)
        }
        Command::MovePhase(phase, position) => phase_table(&planner.move_phase(phase, position)?),
        Command::DeletePhase(phase) => phase_table(&planner.delete_phase(phase)?),
        Command::Redistribute {
            project,
            start,
            end,
        } => phase_table(&planner.redistribute(project, start, end)?),
        Command::ApplyTemplate(project, template) => {
            phase_table(&planner.apply_template(project, &template)?)
        }
        Command::SetProjectStatus(project, status) => {
            let edit = ProjectEdit {
                status: Some(status),
                ..Default::default()
            };
            project_line(&planner.update_project(project, edit)?)
        }
        Command::SetLead(project, lead) => {
            let edit = ProjectEdit {
                lead: Some(lead),
                ..Default::default()
            };
            project_line(&planner.update_project(project, edit)?)
        }
        Command::EditWindow {
            project,
            start,
            deadline,
        } => {
            let edit = ProjectEdit {
                start: Some(start),
                deadline: Some(deadline),
                ..Default::default()
            };
            project_line(&planner.update_project(project, edit)?)
        }
        Command::DeleteProject(project) => {
            planner.delete_project(project)?;
            format!("deleted project {project}")
        }
        Command::ThisWeek(day) => {
            let snapshot = planner.store().snapshot()?;
            let day = day.unwrap_or_else(dates::today);
            let (monday, sunday) = dates::week_bounds(day);
            let phases: Vec<Phase> = snapshot.phases_in_week(day).into_iter().cloned().collect();
            format!(
                "week of {} .. {}\n{}",
                format_iso(Some(monday)),
                format_iso(Some(sunday)),
                phase_table(&phases)
            )
        }
        Command::Blocked => {
            let snapshot = planner.store().snapshot()?;
            let phases: Vec<Phase> = snapshot.blocked_phases().into_iter().cloned().collect();
            phase_table(&phases)
        }
        Command::ExportCsv(project, path) => {
            let phases = planner.store().list_phases(project)?;
            let count = export_schedule_csv(&phases, &path).map_err(PlannerError::from)?;
            format!("wrote {count} phases to {}", path.display())
        }
    };
    Ok(out)
}

fn project_report(snapshot: &Snapshot, projects: &[&Project]) -> String {
    if projects.is_empty() {
        return "no projects".to_string();
    }
    projects
        .iter()
        .map(|p| {
            let next = snapshot
                .next_phase_due(p.id)
                .map(|d| format_iso(Some(d)))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{}  {:<30} {:<18} {:>3}%  next due {}",
                p.id,
                p.name,
                p.status.label(),
                snapshot.project_progress(p.id),
                next
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn project_line(p: &Project) -> String {
    format!(
        "{}  {:<30} {:<18} lead {:<10} {} .. {}",
        p.id,
        p.name,
        p.status.label(),
        if p.lead.is_empty() { "-" } else { p.lead.as_str() },
        format_iso(p.start_date),
        format_iso(p.target_deadline)
    )
}

fn phase_line(p: &Phase) -> String {
    let days = p
        .duration_days()
        .map(|d| format!("{d}d"))
        .unwrap_or_else(|| "-".to_string());
    let blocked = if p.blocked {
        format!("  BLOCKED {}", p.blocked_reason)
    } else {
        String::new()
    };
    format!(
        "{:>2}. {:<24} {:<10} {:<10} {:>4}  {} .. {}  {:<17} {}{}",
        p.sort_order,
        p.name,
        p.discipline,
        p.owner,
        days,
        format_iso(p.start_date),
        format_iso(p.end_date),
        p.status.label(),
        p.id,
        blocked
    )
}

fn phase_table(phases: &[Phase]) -> String {
    if phases.is_empty() {
        return "no phases".to_string();
    }
    phases.iter().map(phase_line).collect::<Vec<_>>().join("\n")
}
