use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::opt_date;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Incoming,
    Active,
    #[serde(rename = "Waiting on Client")]
    WaitingOnClient,
    #[serde(rename = "On Hold")]
    OnHold,
    Complete,
    Cancelled,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Incoming => "Incoming",
            ProjectStatus::Active => "Active",
            ProjectStatus::WaitingOnClient => "Waiting on Client",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Complete => "Complete",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }

    pub fn all() -> &'static [ProjectStatus] {
        &[
            ProjectStatus::Incoming,
            ProjectStatus::Active,
            ProjectStatus::WaitingOnClient,
            ProjectStatus::OnHold,
            ProjectStatus::Complete,
            ProjectStatus::Cancelled,
        ]
    }

    /// Case-insensitive lookup by label; dashes and underscores count as spaces.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::all()
            .iter()
            .copied()
            .find(|status| status.label().to_lowercase() == wanted)
    }
}

/// Kind of deliverable; each kind has a built-in phase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    Deck,
    Web,
    Brand,
    #[serde(rename = "LP")]
    LandingPage,
    #[serde(rename = "MVB")]
    MinimumViableBrand,
    Retainer,
}

impl ProjectType {
    /// Short label, also used as the template name.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Deck => "Deck",
            ProjectType::Web => "Web",
            ProjectType::Brand => "Brand",
            ProjectType::LandingPage => "LP",
            ProjectType::MinimumViableBrand => "MVB",
            ProjectType::Retainer => "Retainer",
        }
    }

    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::Deck,
            ProjectType::Web,
            ProjectType::Brand,
            ProjectType::LandingPage,
            ProjectType::MinimumViableBrand,
            ProjectType::Retainer,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
    }
}

/// Project priority, P1 being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P1 => "P1 (Urgent)",
            Priority::P2 => "P2 (High)",
            Priority::P3 => "P3 (Normal)",
            Priority::P4 => "P4 (Low)",
        }
    }
}

/// A client project owning an ordered list of phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(rename = "type", default)]
    pub kind: Option<ProjectType>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub lead: String,
    #[serde(default, with = "opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub target_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client: String::new(),
            kind: None,
            status: ProjectStatus::Incoming,
            priority: None,
            lead: String::new(),
            start_date: None,
            target_deadline: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// The `[start, deadline]` window, when both ends are set.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.target_deadline?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_labels_round_trip_through_parse() {
        for kind in ProjectType::all() {
            assert_eq!(ProjectType::parse(kind.label()), Some(*kind));
        }
        assert_eq!(ProjectType::parse("lp"), Some(ProjectType::LandingPage));
        assert_eq!(ProjectType::parse("podcast"), None);
    }

    #[test]
    fn project_status_parses_loosely() {
        for status in ProjectStatus::all() {
            assert_eq!(ProjectStatus::parse(status.label()), Some(*status));
        }
        assert_eq!(ProjectStatus::parse("on-hold"), Some(ProjectStatus::OnHold));
        assert_eq!(ProjectStatus::parse("waiting_on_client"), Some(ProjectStatus::WaitingOnClient));
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn window_requires_both_dates() {
        let mut project = Project::new("Acme Rebrand");
        project.start_date = NaiveDate::from_ymd_opt(2025, 1, 6);
        assert_eq!(project.window(), None);
        project.target_deadline = NaiveDate::from_ymd_opt(2025, 2, 14);
        assert!(project.window().is_some());
    }

    #[test]
    fn serializes_type_under_its_wire_name() {
        let mut project = Project::new("Acme");
        project.kind = Some(ProjectType::MinimumViableBrand);
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "MVB");
        assert_eq!(json["targetDeadline"], "");
    }
}
