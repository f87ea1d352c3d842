//! Proportional rescaling of a project's phases onto a date window.

use chrono::NaiveDate;

use crate::model::Phase;
use crate::schedule::dates::{add_days, days_between};
use crate::schedule::ordering::sort_by_order;

/// Relative size of a phase before rescaling: its inclusive length when dated,
/// else its template duration, else one day.
pub fn baseline_weight(phase: &Phase) -> i64 {
    match phase.duration_days() {
        Some(days) => days.max(1),
        None => phase
            .template_duration
            .map(i64::from)
            .filter(|d| *d > 0)
            .unwrap_or(1),
    }
}

/// Scale `weights` so they sum to `total_days`, each at least one day.
///
/// The whole rounding drift is applied to the longest phase (first one on
/// ties), which never drops below one day. If that clamp bites, the other
/// phases keep their rounded lengths and the sum exceeds `total_days`.
pub fn scale_durations(weights: &[i64], total_days: i64) -> Vec<i64> {
    let total_weight: i64 = weights.iter().sum();
    if weights.is_empty() || total_weight <= 0 || total_days <= 0 {
        return vec![1; weights.len()];
    }

    let mut durations: Vec<i64> = weights
        .iter()
        .map(|&w| {
            let share = (w as f64 / total_weight as f64) * total_days as f64;
            (share.round() as i64).max(1)
        })
        .collect();

    let diff = total_days - durations.iter().sum::<i64>();
    if diff != 0 {
        if let Some(i) = longest(&durations) {
            durations[i] = (durations[i] + diff).max(1);
        }
    }
    durations
}

/// Lay the project's phases end to end across `[project_start, project_end]`,
/// sized in proportion to their baseline weights.
///
/// Returns `false` (and touches nothing) for an empty list or an inverted
/// window.
pub fn redistribute(phases: &mut [Phase], project_start: NaiveDate, project_end: NaiveDate) -> bool {
    if phases.is_empty() {
        return false;
    }
    let total_days = days_between(project_start, project_end) + 1;
    if total_days <= 0 {
        return false;
    }

    sort_by_order(phases);
    let weights: Vec<i64> = phases.iter().map(baseline_weight).collect();
    let durations = scale_durations(&weights, total_days);

    let mut cursor = project_start;
    for (phase, days) in phases.iter_mut().zip(durations) {
        let end = add_days(cursor, days - 1);
        phase.start_date = Some(cursor);
        phase.end_date = Some(end);
        cursor = add_days(end, 1);
    }
    true
}

/// Index of the first maximum.
fn longest(durations: &[i64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &d) in durations.iter().enumerate() {
        if best.map_or(true, |b| d > durations[b]) {
            best = Some(i);
        }
    }
    best
}
