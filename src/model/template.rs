use serde::{Deserialize, Serialize};

/// One phase in a template, before it belongs to any project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBlueprint {
    pub name: String,
    pub discipline: String,
    pub owner_role: String,
    /// Nominal length in calendar days.
    pub duration: u32,
}

/// A named, ordered list of phase blueprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub phases: Vec<PhaseBlueprint>,
}

impl Template {
    pub fn new(name: impl Into<String>, phases: Vec<PhaseBlueprint>) -> Self {
        Self {
            name: name.into(),
            phases,
        }
    }

    /// Sum of blueprint durations.
    pub fn total_days(&self) -> u32 {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

fn bp(name: &str, discipline: &str, owner_role: &str, duration: u32) -> PhaseBlueprint {
    PhaseBlueprint {
        name: name.to_string(),
        discipline: discipline.to_string(),
        owner_role: owner_role.to_string(),
        duration,
    }
}

/// The studio's stock templates, one per project type.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            "Deck",
            vec![
                bp("Brief & Strategy", "Strategy", "Strategist", 2),
                bp("Content Outline", "Copy", "Copywriter", 2),
                bp("Design Exploration", "Design", "Designer", 3),
                bp("Client Review 1", "PM", "PM", 2),
                bp("Design Refinement", "Design", "Designer", 2),
                bp("Final Production", "Design", "Designer", 1),
                bp("Client Review 2", "PM", "PM", 2),
            ],
        ),
        Template::new(
            "Web",
            vec![
                bp("Discovery & Sitemap", "Strategy", "Strategist", 3),
                bp("Wireframes", "Design", "Designer", 4),
                bp("Client Review 1", "PM", "PM", 3),
                bp("Visual Design", "Design", "Designer", 5),
                bp("Client Review 2", "PM", "PM", 3),
                bp("Design Revisions", "Design", "Designer", 3),
                bp("Development", "Development", "Developer", 8),
                bp("QA & Testing", "Development", "Developer", 2),
                bp("Content Entry", "Copy", "Copywriter", 2),
                bp("Client Review 3", "PM", "PM", 3),
                bp("Launch", "Development", "Developer", 1),
            ],
        ),
        Template::new(
            "Brand",
            vec![
                bp("Discovery & Research", "Strategy", "Strategist", 4),
                bp("Strategy & Positioning", "Strategy", "Strategist", 3),
                bp("Client Review 1", "PM", "PM", 3),
                bp("Design Exploration", "Design", "Designer", 5),
                bp("Client Review 2", "PM", "PM", 3),
                bp("Design Refinement", "Design", "Designer", 4),
                bp("Client Review 3", "PM", "PM", 3),
                bp("Brand Guidelines", "Design", "Designer", 3),
                bp("Asset Production", "Design", "Designer", 2),
                bp("Final Delivery", "PM", "PM", 1),
            ],
        ),
        Template::new(
            "LP",
            vec![
                bp("Brief & Copy", "Copy", "Copywriter", 2),
                bp("Design", "Design", "Designer", 3),
                bp("Client Review", "PM", "PM", 2),
                bp("Revisions", "Design", "Designer", 1),
                bp("Development", "Development", "Developer", 3),
                bp("QA & Launch", "Development", "Developer", 1),
            ],
        ),
        Template::new(
            "MVB",
            vec![
                bp("Quick Discovery", "Strategy", "Strategist", 1),
                bp("Logo + Type + Color", "Design", "Designer", 3),
                bp("Client Review", "PM", "PM", 2),
                bp("Refinement", "Design", "Designer", 2),
                bp("Mini Guidelines", "Design", "Designer", 1),
                bp("Delivery", "PM", "PM", 1),
            ],
        ),
        Template::new(
            "Retainer",
            vec![
                bp("Monthly Planning", "PM", "PM", 1),
                bp("Design Sprint", "Design", "Designer", 5),
                bp("Dev Sprint", "Development", "Developer", 5),
                bp("Client Review", "PM", "PM", 2),
                bp("Revisions & Delivery", "Design", "Designer", 2),
            ],
        ),
    ]
}

/// Case-insensitive lookup by template name.
pub fn find_template<'a>(templates: &'a [Template], name: &str) -> Option<&'a Template> {
    templates
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Combine built-in and user templates; a user template replaces a built-in
/// of the same name, new names are appended in order.
pub fn merge_templates(mut base: Vec<Template>, user: Vec<Template>) -> Vec<Template> {
    for template in user {
        match base
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&template.name))
        {
            Some(existing) => *existing = template,
            None => base.push(template),
        }
    }
    base
}
