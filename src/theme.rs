use serde::{Deserialize, Serialize};

use crate::draw::Color;

/// Visual and timing constants shared by the compositor and built-in widgets.
///
/// Every field has a default, so a RON theme only needs to list overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // -- Fonts --
    /// Face name passed to the renderer for UI text.
    pub font_face: String,
    /// Face name for window titles.
    pub font_face_bold: String,

    // -- Tooltip --
    /// Seconds of inactivity before a tooltip appears.
    pub tooltip_delay: f64,
    /// Seconds over which the tooltip fades in after the delay.
    pub tooltip_fade: f64,
    /// Alpha reached at the end of the fade.
    pub tooltip_max_alpha: f32,
    /// Maximum tooltip width before the text is wrapped (logical pixels).
    pub tooltip_width: i32,
    /// Tooltip font size (pixels).
    pub tooltip_font_size: f32,
    /// Tooltip line height as a multiple of the font size.
    pub tooltip_line_height: f32,
    /// Gap between the widget's bottom edge and the tooltip text.
    pub tooltip_offset: i32,
    /// Padding between text bounds and the tooltip box.
    pub tooltip_padding: f32,
    pub tooltip_corner_radius: f32,
    /// Half-width of the pointer triangle.
    pub tooltip_arrow: f32,
    pub tooltip_bg_color: Color,
    pub tooltip_text_color: Color,

    // -- Windows --
    pub window_corner_radius: f32,
    pub window_fill: Color,
    pub window_fill_focused: Color,
    pub window_title_color: Color,
    pub window_title_size: f32,
    pub popup_fill: Color,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
const fn hex(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_face: "sans".to_string(),
            font_face_bold: "sans-bold".to_string(),

            tooltip_delay: 0.5,
            tooltip_fade: 0.5,
            tooltip_max_alpha: 0.8,
            tooltip_width: 150,
            tooltip_font_size: 15.0,
            tooltip_line_height: 1.1,
            tooltip_offset: 10,
            tooltip_padding: 4.0,
            tooltip_corner_radius: 3.0,
            tooltip_arrow: 7.0,
            tooltip_bg_color: hex(0x00, 0x00, 0x00),
            tooltip_text_color: hex(0xFF, 0xFF, 0xFF),

            window_corner_radius: 2.0,
            window_fill: hex_a(0x2D, 0x2D, 0x2D, 0.9),
            window_fill_focused: hex_a(0x2D, 0x2D, 0x2D, 0.95),
            window_title_color: hex_a(0xDC, 0xDC, 0xDC, 0.63),
            window_title_size: 18.0,
            popup_fill: hex_a(0x32, 0x32, 0x32, 0.95),
        }
    }
}
