use serde::{Deserialize, Serialize};

use crate::Error;
use crate::draw::Color;
use crate::geometry::Vector2i;
use crate::theme::Theme;

/// How the screen derives its pixel ratio each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelRatioMode {
    /// The backend reports logical window sizes; the ratio is framebuffer
    /// width divided by window width.
    FromFramebuffer,
    /// The backend reports physical sizes and cursor positions; both are
    /// divided by the monitor's scale factor.
    FromMonitor,
}

impl Default for PixelRatioMode {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            PixelRatioMode::FromFramebuffer
        } else {
            PixelRatioMode::FromMonitor
        }
    }
}

/// Construction-time settings for a `Screen`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub caption: String,
    pub background: Color,
    pub pixel_ratio_mode: PixelRatioMode,
    /// Subtracted from every reported cursor position.
    pub cursor_offset: Vector2i,
    pub theme: Theme,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            caption: "Unnamed".to_string(),
            background: [0.3, 0.3, 0.32, 1.0],
            pixel_ratio_mode: PixelRatioMode::default(),
            cursor_offset: Vector2i::new(1, 2),
            theme: Theme::default(),
        }
    }
}

impl ScreenConfig {
    /// Parse a config from RON text.
    pub fn from_ron(text: &str, origin: &str) -> Result<Self, Error> {
        ron::from_str(text).map_err(|source| Error::ConfigParse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load a config from a RON file.
    pub fn load(path: &str) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_string(),
            source,
        })?;
        Self::from_ron(&content, path)
    }

    /// Load a config, falling back to defaults when the file is missing or
    /// malformed.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}, using default screen config");
                Self::default()
            }
        }
    }
}
