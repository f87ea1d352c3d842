//! Forward propagation of a date change through a project's later phases.
//!
//! The first phase anchors the chain and is never moved. Every later phase is
//! pulled (or pushed) so it starts the day after its predecessor ends, keeping
//! its own `end - start` span. An undated phase counts as a zero-span
//! placeholder and comes out as a one-day phase.

use crate::model::Phase;
use crate::schedule::dates::{add_days, days_between};
use crate::schedule::ordering::sort_by_order;

/// Re-date every phase after the first so the chain is gap-free.
///
/// Sorts `phases` by `sort_order` first. Returns how many phases had their
/// dates changed. A phase whose predecessor has no end date has nothing to
/// hang off: it is left as is and anchors the next phase instead.
pub fn cascade(phases: &mut [Phase]) -> usize {
    if phases.len() < 2 {
        return 0;
    }
    sort_by_order(phases);

    let mut changed = 0;
    for i in 1..phases.len() {
        let Some(anchor) = phases[i - 1].end_date else {
            continue;
        };
        let current = &mut phases[i];
        let span = match (current.start_date, current.end_date) {
            (Some(start), Some(end)) => days_between(start, end),
            _ => 0,
        };
        let start = add_days(anchor, 1);
        let end = add_days(start, span.max(0));
        if current.start_date != Some(start) || current.end_date != Some(end) {
            changed += 1;
        }
        current.start_date = Some(start);
        current.end_date = Some(end);
    }
    changed
}
