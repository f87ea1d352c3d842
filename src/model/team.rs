use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Placeholder member name meaning "no owner".
pub const UNASSIGNED: &str = "Unassigned";

pub const DEFAULT_ROLES: &[&str] = &["Strategist", "Designer", "Developer", "PM", "Copywriter"];

/// Resolves a template owner role to a team member name.
pub trait RoleResolver {
    fn owner_for_role(&self, role: &str) -> Option<&str>;
}

/// Studio roster and role assignments. Managed elsewhere; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub members: Vec<String>,
    pub roles: Vec<String>,
    /// role name -> member name
    pub role_assignments: BTreeMap<String, String>,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            members: vec![UNASSIGNED.to_string()],
            roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect(),
            role_assignments: BTreeMap::new(),
        }
    }
}

impl Team {
    /// Map the "Unassigned" placeholder (and blanks) to an empty owner.
    pub fn normalize_owner(name: &str) -> String {
        let name = name.trim();
        if name == UNASSIGNED {
            String::new()
        } else {
            name.to_string()
        }
    }
}

impl RoleResolver for Team {
    fn owner_for_role(&self, role: &str) -> Option<&str> {
        self.role_assignments
            .get(role)
            .map(String::as_str)
            .filter(|name| !name.is_empty() && *name != UNASSIGNED)
    }
}

impl RoleResolver for HashMap<String, String> {
    fn owner_for_role(&self, role: &str) -> Option<&str> {
        self.get(role).map(String::as_str)
    }
}

impl RoleResolver for BTreeMap<String, String> {
    fn owner_for_role(&self, role: &str) -> Option<&str> {
        self.get(role).map(String::as_str)
    }
}
