//! Expanding a template into concrete, not-yet-dated phases.

use uuid::Uuid;

use crate::model::{Phase, PhaseStatus, RoleResolver, Template};

/// One phase per blueprint, in template order. Phases carry no dates; the
/// blueprint duration rides along in `template_duration` until the project
/// window is redistributed. Roles nobody holds leave the owner empty.
pub fn instantiate<R>(template: &Template, project_id: Uuid, roles: &R) -> Vec<Phase>
where
    R: RoleResolver + ?Sized,
{
    template
        .phases
        .iter()
        .enumerate()
        .map(|(i, blueprint)| {
            let mut phase = Phase::new(project_id, blueprint.name.clone());
            phase.status = PhaseStatus::NotStarted;
            phase.discipline = blueprint.discipline.clone();
            phase.owner = roles
                .owner_for_role(&blueprint.owner_role)
                .unwrap_or_default()
                .to_string();
            phase.template_duration = Some(blueprint.duration.max(1));
            phase.sort_order = i as u32 + 1;
            phase
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{builtin_templates, find_template, PhaseBlueprint, Team};
    use crate::schedule::redistribute::redistribute;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn three_step() -> Template {
        let bp = |name: &str, role: &str, duration| PhaseBlueprint {
            name: name.into(),
            discipline: "Design".into(),
            owner_role: role.into(),
            duration,
        };
        Template::new(
            "Sprint",
            vec![bp("Plan", "PM", 2), bp("Build", "Designer", 3), bp("Review", "PM", 2)],
        )
    }

    #[test]
    fn phases_follow_template_order_without_dates() {
        let project = Uuid::new_v4();
        let phases = instantiate(&three_step(), project, &Team::default());

        assert_eq!(phases.len(), 3);
        for (i, phase) in phases.iter().enumerate() {
            assert_eq!(phase.sort_order, i as u32 + 1);
            assert_eq!(phase.project_id, project);
            assert!(!phase.is_dated());
        }
        let durations: Vec<Option<u32>> = phases.iter().map(|p| p.template_duration).collect();
        assert_eq!(durations, vec![Some(2), Some(3), Some(2)]);
    }

    #[test]
    fn owners_resolve_through_role_map() {
        let mut roles = HashMap::new();
        roles.insert("Designer".to_string(), "Maya".to_string());
        let phases = instantiate(&three_step(), Uuid::new_v4(), &roles);

        let owners: Vec<&str> = phases.iter().map(|p| p.owner.as_str()).collect();
        assert_eq!(owners, vec!["", "Maya", ""]);
    }

    #[test]
    fn instantiated_deck_fills_a_two_week_window() {
        let templates = builtin_templates();
        let deck = find_template(&templates, "Deck").unwrap();
        let mut phases = instantiate(deck, Uuid::new_v4(), &Team::default());

        let start = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        assert!(redistribute(&mut phases, start, end));

        // The deck template already totals 14 days, so lengths carry over.
        let lengths: Vec<i64> = phases.iter().map(|p| p.duration_days().unwrap()).collect();
        assert_eq!(lengths, vec![2, 2, 3, 2, 2, 1, 2]);
        assert_eq!(phases.last().unwrap().end_date, Some(end));
    }
}
