//! SketchGrid Core Library
//!
//! Platform-agnostic data structures and logic for the SketchGrid drawing surface.

pub mod config;
pub mod exercises;
pub mod history;
pub mod input;
pub mod stroke;
pub mod tools;
pub mod viewport;

pub use config::{CanvasConfig, ConfigError};
pub use exercises::{Difficulty, Exercise, ExerciseCatalog};
pub use history::{HistoryEntry, HistoryStack, HistoryState, DEFAULT_HISTORY_CAPACITY};
pub use input::{Modifiers, PointerEvent};
pub use stroke::{OpenStroke, SerializableColor, Stroke, StrokeId};
pub use tools::{BrushWidth, ToolKind, ToolSnapshot, ToolState};
pub use viewport::{CoordinateMapper, backing_dimensions, sanitize_scale_factor};
