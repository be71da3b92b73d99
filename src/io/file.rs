use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Milestone, Project};

/// Save a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(project)?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), items = project.item_count(), "saved project");
    Ok(())
}

/// Load a project from a JSON file.
///
/// Accepts either a full project document or a bare array of milestones as
/// returned by the backend's milestone listing; the latter is named after
/// the file.
pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let project = if json.trim_start().starts_with('[') {
        let milestones: Vec<Milestone> = serde_json::from_str(&json)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.trim_end_matches(".timeline"))
            .unwrap_or("Imported Project");
        Project {
            milestones,
            ..Project::new(name)
        }
    } else {
        serde_json::from_str(&json)?
    };
    tracing::info!(path = %path.display(), items = project.item_count(), "loaded project");
    Ok(project)
}
