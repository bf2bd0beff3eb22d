//! Application configuration.

use serde::{Deserialize, Serialize};
use sketchgrid_core::{CanvasConfig, ConfigError, ExerciseCatalog};
use std::path::Path;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "SKETCHGRID_CONFIG";

/// Window and canvas settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub canvas: CanvasConfig,
    /// Exercises listed next to the canvas.
    pub exercises: ExerciseCatalog,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SketchGrid".to_string(),
            width: 1280,
            height: 800,
            canvas: CanvasConfig::default(),
            exercises: ExerciseCatalog::builtin(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.canvas = config.canvas.sanitized();
        config.width = config.width.max(1);
        config.height = config.height.max(1);
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded app config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{"title": "Practice", "canvas": {"grid_period": 40.0}}"#).unwrap();
        assert_eq!(config.title, "Practice");
        assert_eq!(config.width, 1280);
        assert!((config.canvas.grid_period - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.exercises.len(), 3);
    }

    #[test]
    fn test_custom_exercises() {
        let json = r#"{"exercises": [{"title": "Cube", "description": "Draw a cube", "difficulty": "Beginner"}]}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.exercises.len(), 1);
        assert_eq!(config.exercises.get(0).map(|e| e.title.as_str()), Some("Cube"));
    }

    #[test]
    fn test_zero_window_size_is_fixed() {
        let config = AppConfig::from_json(r#"{"width": 0, "height": 0}"#).unwrap();
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_roundtrip() {
        let mut config = AppConfig::default();
        config.title = "Saved".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes()).unwrap();

        assert_eq!(AppConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(AppConfig::load(dir.path().join("missing.json")), Err(ConfigError::Io(_))));
    }
}
