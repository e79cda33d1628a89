//! Shared CLI settings (`~/.config/rom-shelf/settings.toml`).
//!
//! The file carries the launch command template, the registered core
//! descriptors, and the directories behind `%CORE%`/`%CONFIG%`. A core
//! entry looks like:
//!
//! ```toml
//! launch_command = "retroarch -L %CORE% --config %CONFIG% %ROM%"
//!
//! [[cores]]
//! name = "pcsx"
//! extensions = ["cue", "chd", "m3u"]
//! priority = 0
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use rom_shelf_launch::{CoreDescriptor, LaunchConfig};

const DEFAULT_LAUNCH_COMMAND: &str = "retroarch -L %CORE% --config %CONFIG% %ROM%";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub launch_command: Option<String>,
    pub core_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub cores: Vec<CoreEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CoreEntry {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub priority: u32,
}

/// Canonical path to the settings file:
/// `~/.config/rom-shelf/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rom-shelf").join("settings.toml")
}

/// Load settings, falling back to defaults when the file is missing or
/// malformed (logged, never fatal).
pub(crate) fn load_settings() -> Settings {
    let Ok(contents) = std::fs::read_to_string(settings_path()) else {
        return Settings::default();
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("ignoring malformed settings.toml: {e}");
            Settings::default()
        }
    }
}

impl Settings {
    pub(crate) fn launch_command(&self) -> &str {
        self.launch_command.as_deref().unwrap_or(DEFAULT_LAUNCH_COMMAND)
    }

    /// Translate the settings into the launch crate's configuration.
    pub(crate) fn launch_config(&self) -> LaunchConfig {
        let base = settings_path()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        LaunchConfig {
            cores: self
                .cores
                .iter()
                .map(|core| CoreDescriptor {
                    name: core.name.clone(),
                    extensions: core.extensions.clone(),
                    priority: core.priority,
                })
                .collect(),
            core_dir: self.core_dir.clone().unwrap_or_else(|| base.join("cores")),
            config_dir: self
                .config_dir
                .clone()
                .unwrap_or_else(|| base.join("configs")),
        }
    }
}
