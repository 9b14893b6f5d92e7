//! Panel settings and preferences
//!
//! Persisted as JSON next to the binary. The remembered content path is
//! the only state that survives a restart; nothing about a run does.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{PhysicsMode, Speed};

/// User preferences for the panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Physics variant for new sessions
    pub mode: PhysicsMode,
    /// Speed selector step
    pub speed: Speed,
    /// Show the FPS indicator in the status bar
    pub show_fps: bool,
    /// Last content file the user opened
    pub last_content_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: PhysicsMode::default(),
            speed: Speed::default(),
            show_fps: true,
            last_content_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    ///
    /// A missing file is the normal first-run case and logs at debug; a
    /// malformed file logs at warn and is ignored.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("no settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.mode, PhysicsMode::default());
        assert_eq!(settings.speed, Speed::default());
        assert!(settings.last_content_path.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir().join("emupanel-settings-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            mode: PhysicsMode::GravityBounce,
            speed: Speed::Double,
            show_fps: false,
            last_content_path: Some("/roms/demo.sfc".to_string()),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.mode, PhysicsMode::GravityBounce);
        assert_eq!(loaded.speed, Speed::Double);
        assert!(!loaded.show_fps);
        assert_eq!(loaded.last_content_path.as_deref(), Some("/roms/demo.sfc"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = std::env::temp_dir().join("emupanel-settings-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.speed, Speed::default());

        fs::remove_file(&path).ok();
    }
}
