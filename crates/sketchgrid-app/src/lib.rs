//! SketchGrid Application
//!
//! The embeddable drawing widget and the desktop shell that hosts it:
//! windowing, input translation and the egui toolbar.

pub mod config;
mod event_handler;
mod shortcuts;
pub mod sketchpad;
mod ui;

#[cfg(feature = "native")]
mod app;
#[cfg(feature = "native")]
mod file_ops;

#[cfg(feature = "native")]
pub use app::{App, AppError};
pub use config::AppConfig;
pub use event_handler::{EventHandler, PointerSnapshot};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use sketchpad::{PointerOutcome, SketchError, Sketchpad};
pub use ui::{CanvasView, StatusMessage, UiAction, UiState, render_canvas, render_ui};
