use crate::domain::profile::RobotProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            console_logging_enabled: default_true(),
            file_logging_enabled: default_false(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "esp32_robot_controller".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

/// Advertised name the device list is filtered by when nothing is configured.
pub const DEFAULT_DEVICE_FILTER: &str = "ESP32Roomba";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Exact advertised name a real device must carry to be listed.
    #[serde(default = "default_device_filter")]
    pub device_filter: String,

    #[serde(default)]
    pub profile: RobotProfile,
    #[serde(default = "default_preset_id")]
    pub selected_preset_id: String,

    #[serde(default)]
    pub log_settings: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_filter: default_device_filter(),
            profile: RobotProfile::default(),
            selected_preset_id: default_preset_id(),
            log_settings: LogSettings::default(),
        }
    }
}

fn default_device_filter() -> String {
    DEFAULT_DEVICE_FILTER.to_string()
}
fn default_preset_id() -> String {
    "roomba.default".to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::default_settings_path()?;
        Ok(Self::at_path(settings_path))
    }

    /// Load from an explicit path, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn at_path(settings_path: PathBuf) -> Self {
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();
        Self {
            settings,
            settings_path,
        }
    }

    fn default_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("Esp32RobotController");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The filter is persisted on every change.
    pub fn set_device_filter(&mut self, name: impl Into<String>) -> anyhow::Result<()> {
        self.settings.device_filter = name.into();
        self.save()
    }

    /// Switching the active profile also persists immediately; the caller is
    /// responsible for resetting its motor toggles.
    pub fn set_profile(&mut self, profile: RobotProfile) -> anyhow::Result<()> {
        self.settings.profile = profile;
        self.save()
    }
}
