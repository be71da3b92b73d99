//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{Clock, FixedClock, SystemClock};
use crate::model::ViewMode;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub default_view_mode: ViewMode,
    /// Project reopened on startup.
    pub last_project: Option<PathBuf>,
    /// When set, the timeline treats this date as today.
    pub pinned_today: Option<NaiveDate>,
}

impl AppSettings {
    /// Directory holding the settings file, falling back to the working
    /// directory when the platform has no config dir.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "ProjectTimeline")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings; using defaults");
                return Self::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "corrupt settings; using defaults");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    /// The clock the timeline should use: pinned date or the wall clock.
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.pinned_today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.default_view_mode, ViewMode::Auto);
    }

    #[test]
    fn save_then_load_round_trips_into_new_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = AppSettings {
            default_view_mode: ViewMode::Week,
            last_project: Some(PathBuf::from("/tmp/site.json")),
            pinned_today: NaiveDate::from_ymd_opt(2025, 1, 15),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn corrupt_or_partial_files_fall_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());

        std::fs::write(&path, r#"{"default_view_mode":"month"}"#).unwrap();
        let partial = AppSettings::load_from(&path);
        assert_eq!(partial.default_view_mode, ViewMode::Month);
        assert_eq!(partial.pinned_today, None);
    }

    #[test]
    fn pinned_date_drives_the_clock() {
        let pinned = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let settings = AppSettings {
            pinned_today: Some(pinned),
            ..Default::default()
        };
        assert_eq!(settings.clock().today(), pinned);
    }
}
