pub mod phase;
pub mod project;
pub mod snapshot;
pub mod team;
pub mod template;

pub use phase::{Phase, PhaseStatus, DISCIPLINES};
pub use project::{Priority, Project, ProjectStatus, ProjectType};
pub use snapshot::Snapshot;
pub use team::{RoleResolver, Team};
pub use template::{builtin_templates, find_template, PhaseBlueprint, Template};
