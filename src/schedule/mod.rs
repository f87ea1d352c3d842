//! The phase scheduling engine.
//!
//! All functions here work on one project's phases held in memory. They never
//! fail and never touch storage; the caller loads a fresh list, runs an
//! operation and persists the result.
//!
//! - [`dates`]: calendar-day arithmetic
//! - [`ordering`]: dense `sort_order` maintenance
//! - [`cascade`]: keep later phases contiguous after a change
//! - [`redistribute`]: rescale all phases onto a project window
//! - [`template`]: expand a template into undated phases

pub mod cascade;
pub mod dates;
pub mod ordering;
pub mod redistribute;
pub mod template;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Phase;

pub use cascade::cascade;
pub use ordering::renumber;
pub use redistribute::redistribute;
pub use template::instantiate;

/// Insert `phase` at `position` (clamped to `[1, N+1]`) spanning `days`.
///
/// The new phase starts the day after its predecessor ends, or at
/// `fallback_start` when it lands first (or its predecessor is undated).
/// Everything after it cascades. Returns the position used.
pub fn insert_phase(
    phases: &mut Vec<Phase>,
    phase: Phase,
    position: u32,
    days: u32,
    fallback_start: NaiveDate,
) -> u32 {
    let position = ordering::insert_at(phases, phase, position);
    let idx = (position - 1) as usize;
    let start = idx
        .checked_sub(1)
        .and_then(|prev| phases[prev].end_date)
        .map(|end| dates::add_days(end, 1))
        .unwrap_or(fallback_start);
    phases[idx].place(start, i64::from(days));
    cascade(phases);
    position
}

/// Remove a phase, renumber the rest and cascade them over the gap.
pub fn remove_phase(phases: &mut Vec<Phase>, id: Uuid) -> Option<Phase> {
    let removed = ordering::remove(phases, id)?;
    cascade(phases);
    Some(removed)
}

/// Move a phase to `position` and re-date the chain.
///
/// The project's chain keeps its first start date: whichever phase ends up first
/// is shifted there with its own length before the rest cascade behind it.
pub fn move_phase(phases: &mut Vec<Phase>, id: Uuid, position: u32) -> Option<u32> {
    ordering::sort_by_order(phases);
    let chain_start = phases.first().and_then(|p| p.start_date);
    let position = ordering::move_to(phases, id, position)?;
    if let (Some(start), Some(first)) = (chain_start, phases.first_mut()) {
        if let Some(days) = first.duration_days() {
            first.place(start, days);
        }
    }
    cascade(phases);
    Some(position)
}

/// Give a phase a new start and length, then cascade the phases after it.
///
/// Only the first phase keeps an arbitrary start; any later phase is pulled
/// back against its predecessor by the cascade, so for those the edit
/// effectively changes the length alone.
pub fn resize_phase(phases: &mut [Phase], id: Uuid, start: NaiveDate, days: u32) -> bool {
    let Some(phase) = phases.iter_mut().find(|p| p.id == id) else {
        return false;
    };
    phase.place(start, i64::from(days));
    cascade(phases);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::dates::add_days;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Contiguous phases from 2025-05-05 with the given lengths.
    fn chain(lengths: &[i64]) -> Vec<Phase> {
        let project = Uuid::new_v4();
        let mut cursor = date("2025-05-05");
        lengths
            .iter()
            .enumerate()
            .map(|(i, &days)| {
                let mut p = Phase::new(project, format!("phase-{}", i + 1));
                p.place(cursor, days);
                p.sort_order = i as u32 + 1;
                cursor = add_days(p.end_date.unwrap(), 1);
                p
            })
            .collect()
    }

    fn names(phases: &[Phase]) -> Vec<&str> {
        phases.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn inserting_at_two_shifts_and_redates_followers() {
        let mut phases = chain(&[3, 2, 4]);
        let project = phases[0].project_id;
        let new = Phase::new(project, "inserted");

        let used = insert_phase(&mut phases, new, 2, 5, date("2025-01-01"));
        assert_eq!(used, 2);
        assert_eq!(names(&phases), vec!["phase-1", "inserted", "phase-2", "phase-3"]);
        assert_eq!(
            phases.iter().map(|p| p.sort_order).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );

        // phase-1: 05-05..05-07, inserted: 05-08..05-12
        assert_eq!(phases[1].start_date, Some(date("2025-05-08")));
        assert_eq!(phases[1].end_date, Some(date("2025-05-12")));
        assert_eq!(phases[2].start_date, Some(date("2025-05-13")));
        assert_eq!(phases[2].duration_days(), Some(2));
        assert_eq!(phases[3].start_date, Some(date("2025-05-15")));
        assert_eq!(phases[3].duration_days(), Some(4));
    }

    #[test]
    fn inserting_first_uses_fallback_start() {
        let mut phases = chain(&[2, 2]);
        let project = phases[0].project_id;
        insert_phase(&mut phases, Phase::new(project, "kickoff"), 1, 1, date("2025-05-01"));

        assert_eq!(phases[0].name, "kickoff");
        assert_eq!(phases[0].start_date, Some(date("2025-05-01")));
        assert_eq!(phases[1].start_date, Some(date("2025-05-02")));
    }

    #[test]
    fn deleting_second_of_four_closes_the_gap() {
        let mut phases = chain(&[3, 2, 4, 1]);
        let doomed = phases[1].id;

        let removed = remove_phase(&mut phases, doomed).unwrap();
        assert_eq!(removed.name, "phase-2");
        assert_eq!(names(&phases), vec!["phase-1", "phase-3", "phase-4"]);
        assert_eq!(
            phases.iter().map(|p| p.sort_order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(phases[1].start_date, Some(date("2025-05-08")));
        assert_eq!(phases[1].duration_days(), Some(4));
        assert_eq!(phases[2].start_date, Some(date("2025-05-12")));
    }

    #[test]
    fn moving_first_phase_keeps_chain_start() {
        let mut phases = chain(&[3, 2, 4]);
        let first = phases[0].id;

        assert_eq!(move_phase(&mut phases, first, 3), Some(3));
        assert_eq!(names(&phases), vec!["phase-2", "phase-3", "phase-1"]);
        assert_eq!(phases[0].start_date, Some(date("2025-05-05")));
        assert_eq!(phases[0].duration_days(), Some(2));
        assert_eq!(phases[2].end_date, Some(date("2025-05-13")));
    }

    #[test]
    fn resizing_pushes_followers() {
        let mut phases = chain(&[3, 2, 4]);
        let id = phases[0].id;

        assert!(resize_phase(&mut phases, id, date("2025-05-05"), 6));
        assert_eq!(phases[1].start_date, Some(date("2025-05-11")));
        assert_eq!(phases[2].start_date, Some(date("2025-05-13")));
        assert!(!resize_phase(&mut phases, Uuid::new_v4(), date("2025-05-05"), 1));
    }

    #[test]
    fn resizing_a_later_phase_changes_only_its_length() {
        let mut phases = chain(&[3, 2, 4]);
        let id = phases[1].id;

        resize_phase(&mut phases, id, date("2025-06-01"), 5);
        assert_eq!(phases[1].start_date, Some(date("2025-05-08")));
        assert_eq!(phases[1].duration_days(), Some(5));
        assert_eq!(phases[2].start_date, Some(date("2025-05-13")));
    }
}
