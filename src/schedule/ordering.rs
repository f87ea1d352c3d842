//! Dense 1-based ranking of a project's phases.

use uuid::Uuid;

use crate::model::Phase;

/// Stable sort by `sort_order`.
pub fn sort_by_order(phases: &mut [Phase]) {
    phases.sort_by_key(|p| p.sort_order);
}

/// Re-derive `sort_order` as 1..=N from the current order, closing gaps and
/// collapsing duplicates. Ties keep their slice order.
pub fn renumber(phases: &mut [Phase]) {
    sort_by_order(phases);
    for (i, phase) in phases.iter_mut().enumerate() {
        phase.sort_order = rank(i);
    }
}

/// Insert `phase` at `position`, clamped to `[1, N+1]`. Phases at or after the
/// position move down one slot. Returns the position actually used.
pub fn insert_at(phases: &mut Vec<Phase>, mut phase: Phase, position: u32) -> u32 {
    let position = position.clamp(1, rank(phases.len()));
    for existing in phases.iter_mut() {
        if existing.sort_order >= position {
            existing.sort_order += 1;
        }
    }
    phase.sort_order = position;
    phases.push(phase);
    renumber(phases);
    position
}

/// Remove a phase by id and renumber the remainder.
pub fn remove(phases: &mut Vec<Phase>, id: Uuid) -> Option<Phase> {
    let idx = phases.iter().position(|p| p.id == id)?;
    let removed = phases.remove(idx);
    renumber(phases);
    Some(removed)
}

/// Move a phase to `position`, clamped to `[1, N]`. The other phases keep
/// their relative order. Returns the position used.
pub fn move_to(phases: &mut Vec<Phase>, id: Uuid, position: u32) -> Option<u32> {
    sort_by_order(phases);
    let from = phases.iter().position(|p| p.id == id)?;
    let position = position.clamp(1, rank(phases.len() - 1));
    let phase = phases.remove(from);
    phases.insert((position - 1) as usize, phase);
    for (i, phase) in phases.iter_mut().enumerate() {
        phase.sort_order = rank(i);
    }
    Some(position)
}

fn rank(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn phases(orders: &[u32]) -> Vec<Phase> {
        let project = Uuid::new_v4();
        orders
            .iter()
            .enumerate()
            .map(|(i, &order)| {
                let mut p = Phase::new(project, format!("phase-{i}"));
                p.sort_order = order;
                p
            })
            .collect()
    }

    fn names(phases: &[Phase]) -> Vec<&str> {
        phases.iter().map(|p| p.name.as_str()).collect()
    }

    fn orders(phases: &[Phase]) -> Vec<u32> {
        phases.iter().map(|p| p.sort_order).collect()
    }

    #[test]
    fn renumber_closes_gaps() {
        let mut list = phases(&[7, 2, 4]);
        renumber(&mut list);
        assert_eq!(orders(&list), vec![1, 2, 3]);
        assert_eq!(names(&list), vec!["phase-1", "phase-2", "phase-0"]);
    }

    #[test]
    fn insert_shifts_later_phases() {
        let mut list = phases(&[1, 2, 3]);
        let new = Phase::new(list[0].project_id, "new");
        assert_eq!(insert_at(&mut list, new, 2), 2);
        assert_eq!(names(&list), vec!["phase-0", "new", "phase-1", "phase-2"]);
        assert_eq!(orders(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn insert_clamps_position() {
        let mut list = phases(&[1, 2]);
        let project = list[0].project_id;
        assert_eq!(insert_at(&mut list, Phase::new(project, "tail"), 99), 3);
        assert_eq!(insert_at(&mut list, Phase::new(project, "head"), 0), 1);
        assert_eq!(names(&list), vec!["head", "phase-0", "phase-1", "tail"]);
    }

    #[test]
    fn remove_renumbers_remainder() {
        let mut list = phases(&[1, 2, 3, 4]);
        let id = list[1].id;
        let removed = remove(&mut list, id).unwrap();
        assert_eq!(removed.name, "phase-1");
        assert_eq!(orders(&list), vec![1, 2, 3]);
        assert!(remove(&mut list, id).is_none());
    }

    #[test]
    fn move_to_reorders_and_clamps() {
        let mut list = phases(&[1, 2, 3, 4]);
        let first = list[0].id;
        assert_eq!(move_to(&mut list, first, 3), Some(3));
        assert_eq!(names(&list), vec!["phase-1", "phase-2", "phase-0", "phase-3"]);

        let last = list[3].id;
        assert_eq!(move_to(&mut list, last, 0), Some(1));
        assert_eq!(names(&list), vec!["phase-3", "phase-1", "phase-2", "phase-0"]);
        assert_eq!(orders(&list), vec![1, 2, 3, 4]);
        assert_eq!(move_to(&mut list, Uuid::new_v4(), 1), None);
    }

    proptest! {
        #[test]
        fn renumber_yields_dense_ranks_preserving_order(raw in prop::collection::vec(1u32..50, 0..20)) {
            let mut list = phases(&raw);
            let mut expected = list.clone();
            expected.sort_by_key(|p| p.sort_order);
            let expected: Vec<Uuid> = expected.iter().map(|p| p.id).collect();

            renumber(&mut list);

            let dense: Vec<u32> = (1..=list.len() as u32).collect();
            prop_assert_eq!(orders(&list), dense);
            prop_assert_eq!(list.iter().map(|p| p.id).collect::<Vec<_>>(), expected);
        }
    }
}
