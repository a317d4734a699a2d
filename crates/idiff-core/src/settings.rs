//! Persisted user preferences (TOML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{DEFAULT_DIFF_COMMAND, DEFAULT_FUZZ, DEFAULT_HIGHLIGHT_COLOR};
use crate::error::{IdiffError, Result};

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "IDIFF_CONFIG";

const APP_DIR: &str = "idiff";
const FILE_NAME: &str = "settings.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub interface: InterfaceSettings,
    pub merged: MergedSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSettings {
    /// Mouse wheel zooms instead of scrolling.
    pub wheel_zoom: bool,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self { wheel_zoom: true }
    }
}

/// Which implementation renders the `merged` view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergedBackend {
    /// Difference-blended composite computed in process.
    #[default]
    Native,
    /// Highlighted diff from an external `compare` command.
    External,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergedSettings {
    pub backend: MergedBackend,
    pub command: String,
    pub highlight_color: String,
    pub fuzz: String,
}

impl Default for MergedSettings {
    fn default() -> Self {
        Self {
            backend: MergedBackend::Native,
            command: DEFAULT_DIFF_COMMAND.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            fuzz: DEFAULT_FUZZ.to_string(),
        }
    }
}

impl Settings {
    /// `$IDIFF_CONFIG` if set, else `<config_dir>/idiff/settings.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IdiffError::Settings(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IdiffError::Settings(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path`, using defaults when it is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
