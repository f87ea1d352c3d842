use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::dates;

/// Disciplines offered by the studio. Phases store the discipline as free text
/// so imported templates may introduce new ones.
pub const DISCIPLINES: &[&str] = &["Strategy", "Design", "Development", "Motion", "Copy", "PM"];

/// Workflow status of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    Revisions,
    #[serde(rename = "Waiting on Client")]
    WaitingOnClient,
    Done,
}

impl PhaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "Not Started",
            PhaseStatus::InProgress => "In Progress",
            PhaseStatus::InReview => "In Review",
            PhaseStatus::Revisions => "Revisions",
            PhaseStatus::WaitingOnClient => "Waiting on Client",
            PhaseStatus::Done => "Done",
        }
    }

    pub fn all() -> &'static [PhaseStatus] {
        &[
            PhaseStatus::NotStarted,
            PhaseStatus::InProgress,
            PhaseStatus::InReview,
            PhaseStatus::Revisions,
            PhaseStatus::WaitingOnClient,
            PhaseStatus::Done,
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

    pub fn is_done(&self) -> bool {
        matches!(self, PhaseStatus::Done)
    }
}

/// A schedulable unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub status: PhaseStatus,
    /// Team member name, empty when unassigned.
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default, with = "opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date")]
    pub end_date: Option<NaiveDate>,
    /// Provisional length in days, only meaningful until the phase has dates.
    #[serde(
        rename = "_templateDuration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub template_duration: Option<u32>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub blocked_reason: String,
    /// 1-based rank within the project.
    pub sort_order: u32,
}

impl Phase {
    /// Create an undated, unassigned phase. The caller positions it.
    pub fn new(project_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            status: PhaseStatus::NotStarted,
            owner: String::new(),
            discipline: String::new(),
            start_date: None,
            end_date: None,
            template_duration: None,
            blocked: false,
            blocked_reason: String::new(),
            sort_order: 1,
        }
    }

    pub fn is_dated(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Inclusive length in days, `None` for an unplaced phase.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(dates::days_between(start, end) + 1),
            _ => None,
        }
    }

    /// Place the phase at `start` spanning `days` calendar days (at least one).
    pub fn place(&mut self, start: NaiveDate, days: i64) {
        self.start_date = Some(start);
        self.end_date = Some(dates::add_days(start, days.max(1) - 1));
    }

    /// Whether the phase overlaps the inclusive range `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= to && end >= from,
            _ => false,
        }
    }
}

/// Serde helper for optional ISO dates: unset dates travel as `""`.
pub(crate) mod opt_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::schedule::dates;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dates::format_iso(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Deserialize::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => dates::parse_iso(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn status_parse_accepts_labels_loosely() {
        assert_eq!(PhaseStatus::parse("waiting on client"), Some(PhaseStatus::WaitingOnClient));
        assert_eq!(PhaseStatus::parse("in-progress"), Some(PhaseStatus::InProgress));
        assert_eq!(PhaseStatus::parse("DONE"), Some(PhaseStatus::Done));
        assert_eq!(PhaseStatus::parse("shipped"), None);
    }

    #[test]
    fn place_never_produces_zero_length() {
        let mut phase = Phase::new(Uuid::new_v4(), "Wireframes");
        phase.place(date("2025-03-01"), 0);
        assert_eq!(phase.duration_days(), Some(1));
        phase.place(date("2025-03-01"), 4);
        assert_eq!(phase.end_date, Some(date("2025-03-04")));
    }

    #[test]
    fn unset_dates_serialize_as_empty_strings() {
        let mut phase = Phase::new(Uuid::new_v4(), "Brief");
        phase.template_duration = Some(2);
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["startDate"], "");
        assert_eq!(json["endDate"], "");
        assert_eq!(json["_templateDuration"], 2);
        assert_eq!(json["status"], "Not Started");

        let back: Phase = serde_json::from_value(json).unwrap();
        assert_eq!(back, phase);
    }

    #[test]
    fn null_or_missing_dates_deserialize_as_unset() {
        let id = Uuid::new_v4();
        let project = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{id}","projectId":"{project}","name":"QA","startDate":null,"sortOrder":3}}"#
        );
        let phase: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase.start_date, None);
        assert_eq!(phase.end_date, None);
        assert_eq!(phase.sort_order, 3);
    }

    #[test]
    fn overlap_is_inclusive() {
        let mut phase = Phase::new(Uuid::new_v4(), "Dev");
        phase.place(date("2025-03-03"), 3);
        assert!(phase.overlaps(date("2025-03-05"), date("2025-03-09")));
        assert!(!phase.overlaps(date("2025-03-06"), date("2025-03-09")));
    }
}
