//! Retained-mode widget toolkit core: a widget tree, a screen that routes
//! backend input to widgets (hit-testing, focus, pointer capture, modal
//! windows, popup stacking) and a per-frame compositor with tooltips.

pub mod backend;
pub mod config;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod platform;
pub mod screen;
pub mod theme;
pub mod tree;
pub mod widget;

pub use backend::{Backend, Headless};
pub use config::{PixelRatioMode, ScreenConfig};
pub use draw::{Color, DrawCommand, DrawList, Renderer, TextAlign};
pub use geometry::{Bounds, Vector2f, Vector2i};
pub use input::{Action, ButtonMask, KeyCode, KeyEvent, Modifiers, MouseButton};
pub use screen::{Drag, NoHooks, Screen, ScreenHooks, tooltip_alpha};
pub use theme::Theme;
pub use tree::{WidgetId, WidgetNode, WidgetPath, WidgetTree};
pub use widget::{Behavior, Cursor, NodeState, Plain, Popup, Role, Window};

/// Errors surfaced by screen construction, configuration and platform setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rendering context error: {0}")]
    RenderContext(String),

    #[error("initialization error: {0}")]
    Init(String),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("platform error: {0}")]
    Platform(String),
}
