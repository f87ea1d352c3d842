use std::path::Path;

use crate::model::Snapshot;
use crate::store::Result;

/// Save a snapshot as pretty JSON.
///
/// Writes `<path>.tmp` first and renames it over `path`, so readers see either
/// the old file or the new one.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Load a snapshot, or start empty when the file does not exist yet.
pub fn load_or_default(path: &Path) -> Result<Snapshot> {
    if path.exists() {
        load_snapshot(path)
    } else {
        tracing::debug!(path = %path.display(), "no data file yet, starting empty");
        Ok(Snapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, Project};

    #[test]
    fn save_then_load_preserves_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("planner.json");

        let mut snapshot = Snapshot::default();
        let project = Project::new("Acme");
        snapshot.upsert_phase(Phase::new(project.id, "Brief"));
        snapshot.upsert_project(project);

        save_snapshot(&snapshot, &path).unwrap();
        assert!(!dir.path().join("nested").join("planner.json.tmp").exists());
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.projects.is_empty());
        assert!(load_snapshot(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_or_default(&path),
            Err(crate::store::StoreError::Json(_))
        ));
    }
}
