use crate::error::ConfigError;
use crate::state::navigation::MAX_HISTORY_SIZE;
use crate::state::box_select::DEFAULT_DRAG_THRESHOLD;
use crate::state::{SortBy, SortOptions, SortOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace for the preferences file.
pub const NAMESPACE: &str = "vfs-finder";
const FILE_NAME: &str = "finder.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

/// View preferences persisted between sessions. Nothing else about the
/// finder survives a restart.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    /// "grid" or "list"
    pub view_mode: ViewMode,
    /// Sort field: "name", "modified", "created", "type"
    pub sort_by: SortBy,
    /// Sort order: "asc" or "desc"
    pub sort_order: SortOrder,
    pub sidebar_collapsed: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            view_mode: ViewMode::Grid,
            sort_by: SortBy::Name,
            sort_order: SortOrder::Ascending,
            sidebar_collapsed: false,
        }
    }
}

impl Preferences {
    /// Get the path to the preferences file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", NAMESPACE)
            .map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Load preferences from the default location, or defaults if missing or unreadable
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "using default preferences");
                Preferences::default()
            }),
            _ => Preferences::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Preferences>(&contents)?)
    }

    /// Save preferences to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn sort(&self) -> SortOptions {
        SortOptions::new(self.sort_by, self.sort_order)
    }

    pub fn set_sort(&mut self, sort: SortOptions) {
        self.sort_by = sort.sort_by;
        self.sort_order = sort.sort_order;
    }
}

/// Runtime knobs that are not persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct FinderOptions {
    pub max_history: usize,
    /// Minimum pointer travel, in points, before a drag becomes a box select
    pub drag_threshold: f32,
    pub recent_limit: usize,
    /// Upper bound on items requested per listing; `None` loads everything
    pub page_size: Option<usize>,
    pub preferences: Preferences,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY_SIZE,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            recent_limit: 50,
            page_size: None,
            preferences: Preferences::default(),
        }
    }
}
