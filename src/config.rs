//! User settings.
//!
//! Settings live in `config.json` under the platform config directory
//! (`~/.config/glsandbox/` on Linux). Every field has a default, so a partial
//! or missing file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// When set, `width` and `height` are ignored and the desktop size is used.
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glsandbox".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = glsandbox_core::Camera::default();
        Self {
            fov_degrees: camera.fov_degrees,
            sensitivity: camera.sensitivity,
            speed: camera.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub clear_color: [f32; 4],
    pub wireframe: bool,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            wireframe: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the settings file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glsandbox").join("config.json"))
    }

    /// Parses settings from JSON.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Loads settings from `path`.
    ///
    /// A missing file is created with the defaults. A file that does not parse
    /// is left alone and the defaults are used. Runs before the logger exists,
    /// so problems are returned as warnings for the caller to log.
    pub fn load(path: &Path) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        match std::fs::read_to_string(path) {
            Ok(s) => match Self::from_json(&s) {
                Ok(config) => return (config, warnings),
                Err(e) => warnings.push(format!(
                    "Failed to parse {}: {e}, using defaults",
                    path.display()
                )),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                if let Err(e) = config.save(path) {
                    warnings.push(format!("Failed to write {}: {e}", path.display()));
                }
                return (config, warnings);
            }
            Err(e) => warnings.push(format!(
                "Failed to read {}: {e}, using defaults",
                path.display()
            )),
        }

        (Self::default(), warnings)
    }

    /// Writes the settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
