//! Engine configuration.

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::stroke::SerializableColor;
use crate::tools::BrushWidth;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default grid spacing in logical units.
pub const DEFAULT_GRID_PERIOD: f64 = 20.0;

/// Tunable settings for one canvas. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Spacing between grid lines in logical units.
    pub grid_period: f64,
    pub grid_color: SerializableColor,
    pub brush_color: SerializableColor,
    /// Fill behind grid and strokes in exported images.
    pub background_color: SerializableColor,
    pub default_width: BrushWidth,
    /// Maximum number of undoable entries.
    pub history_capacity: usize,
    pub grid_visible: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_period: DEFAULT_GRID_PERIOD,
            grid_color: SerializableColor::COPPER.with_opacity(0.2),
            brush_color: SerializableColor::COPPER,
            background_color: SerializableColor::white(),
            default_width: BrushWidth::DEFAULT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            grid_visible: true,
        }
    }
}

impl CanvasConfig {
    /// Replace unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.grid_period.is_finite() && self.grid_period > 0.0) {
            log::warn!("Invalid grid period {}, using {}", self.grid_period, DEFAULT_GRID_PERIOD);
            self.grid_period = DEFAULT_GRID_PERIOD;
        }
        if self.history_capacity == 0 {
            log::warn!("History capacity must be at least 1");
            self.history_capacity = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CanvasConfig {
        serde_json::from_str::<CanvasConfig>(json).unwrap().sanitized()
    }

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert!((config.grid_period - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.grid_color, SerializableColor::new(184, 115, 51, 51));
        assert_eq!(config.brush_color, SerializableColor::COPPER);
        assert_eq!(config.default_width.get(), 3);
        assert_eq!(config.history_capacity, 200);
        assert!(config.grid_visible);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = parse(r#"{"grid_period": 40.0, "default_width": 99}"#);
        assert!((config.grid_period - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.default_width.get(), 20);
        assert_eq!(config.history_capacity, 200);
    }

    #[test]
    fn test_sanitize() {
        let config = parse(r#"{"grid_period": -1.0, "history_capacity": 0}"#);
        assert!((config.grid_period - DEFAULT_GRID_PERIOD).abs() < f64::EPSILON);
        assert_eq!(config.history_capacity, 1);
    }
}
