use crate::geometry::Bounds;

/// sRGB RGBA color.
pub type Color = [f32; 4];

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
    Baseline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextAlign {
    pub h: HAlign,
    pub v: VAlign,
}

impl TextAlign {
    pub const LEFT_TOP: Self = Self {
        h: HAlign::Left,
        v: VAlign::Top,
    };
    pub const CENTER_TOP: Self = Self {
        h: HAlign::Center,
        v: VAlign::Top,
    };
    pub const CENTER_MIDDLE: Self = Self {
        h: HAlign::Center,
        v: VAlign::Middle,
    };
}

/// Immediate-mode vector graphics context the compositor draws through.
///
/// Coordinates are logical pixels; `begin_frame` receives the pixel ratio
/// needed to rasterize at framebuffer resolution.
pub trait Renderer {
    fn begin_frame(&mut self, width: i32, height: i32, pixel_ratio: f32);
    fn end_frame(&mut self);

    /// Clear the target before a frame. Context-specific; no-op by default.
    fn clear(&mut self, _color: Color) {}

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);

    fn font_face(&mut self, face: &str);
    fn font_size(&mut self, size: f32);
    fn font_blur(&mut self, blur: f32);
    fn text_align(&mut self, align: TextAlign);
    /// Line height as a multiple of the font size.
    fn text_line_height(&mut self, factor: f32);
    fn global_alpha(&mut self, alpha: f32);

    /// Bounds of a single line of text drawn at (x, y).
    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> Bounds;
    /// Bounds of a text box wrapped at `break_width`.
    fn text_box_bounds(&mut self, x: f32, y: f32, break_width: f32, text: &str) -> Bounds;

    fn begin_path(&mut self);
    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn fill_color(&mut self, color: Color);
    fn fill(&mut self);

    fn text(&mut self, x: f32, y: f32, text: &str);
    fn text_box(&mut self, x: f32, y: f32, break_width: f32, text: &str);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame {
        width: i32,
        height: i32,
        pixel_ratio: f32,
    },
    EndFrame,
    Clear(Color),
    Save,
    Restore,
    Translate {
        x: f32,
        y: f32,
    },
    GlobalAlpha(f32),
    BeginPath,
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
    },
    MoveTo {
        x: f32,
        y: f32,
    },
    LineTo {
        x: f32,
        y: f32,
    },
    FillColor(Color),
    Fill,
    Text {
        x: f32,
        y: f32,
        text: String,
    },
    TextBox {
        x: f32,
        y: f32,
        break_width: f32,
        text: String,
    },
}

/// Text state tracked for measurement.
#[derive(Debug, Clone)]
struct TextState {
    face: String,
    size: f32,
    blur: f32,
    align: TextAlign,
    line_height: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            face: String::new(),
            size: 16.0,
            blur: 0.0,
            align: TextAlign::LEFT_TOP,
            line_height: 1.0,
        }
    }
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;

/// Recording renderer.
///
/// Collects draw commands instead of rasterizing them, and answers text
/// metric queries with a fixed-advance approximation. Decouples the
/// compositor from GPU backends; used headless and in tests.
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    text: TextState,
    saved: Vec<TextState>,
    frames: usize,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            text: TextState::default(),
            saved: Vec::new(),
            frames: 0,
        }
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of completed frames (`end_frame` calls).
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Current font face (last `font_face` call).
    pub fn current_face(&self) -> &str {
        &self.text.face
    }

    /// Text strings drawn since the last clear, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } | DrawCommand::TextBox { text, .. } => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Last global alpha set since the last clear.
    pub fn last_alpha(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::GlobalAlpha(a) => Some(*a),
            _ => None,
        })
    }

    fn glyph_width(&self) -> f32 {
        self.text.size * GLYPH_ADVANCE
    }

    fn line_height(&self) -> f32 {
        self.text.size * self.text.line_height
    }

    fn line_width(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.glyph_width()
    }

    /// Greedy word wrap: returns row widths.
    fn wrap_rows(&self, text: &str, break_width: f32) -> Vec<f32> {
        let mut rows = Vec::new();
        for paragraph in text.split('\n') {
            let mut row = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if row.is_empty() {
                    word.to_string()
                } else {
                    format!("{row} {word}")
                };
                if !row.is_empty() && self.line_width(&candidate) > break_width {
                    rows.push(self.line_width(&row));
                    row = word.to_string();
                } else {
                    row = candidate;
                }
            }
            rows.push(self.line_width(&row));
        }
        rows
    }

    fn top_for(&self, y: f32, height: f32) -> f32 {
        match self.text.align.v {
            VAlign::Top => y,
            VAlign::Middle => y - height / 2.0,
            VAlign::Bottom => y - height,
            VAlign::Baseline => y - self.text.size * 0.8,
        }
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn begin_frame(&mut self, width: i32, height: i32, pixel_ratio: f32) {
        self.text = TextState::default();
        self.saved.clear();
        self.commands.push(DrawCommand::BeginFrame {
            width,
            height,
            pixel_ratio,
        });
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        self.commands.push(DrawCommand::EndFrame);
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn save(&mut self) {
        self.saved.push(self.text.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.text = state;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn font_face(&mut self, face: &str) {
        self.text.face = face.to_string();
    }

    fn font_size(&mut self, size: f32) {
        self.text.size = size;
    }

    fn font_blur(&mut self, blur: f32) {
        self.text.blur = blur;
    }

    fn text_align(&mut self, align: TextAlign) {
        self.text.align = align;
    }

    fn text_line_height(&mut self, factor: f32) {
        self.text.line_height = factor;
    }

    fn global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> Bounds {
        let width = self.line_width(text);
        let height = self.line_height();
        let min_x = match self.text.align.h {
            HAlign::Left => x,
            HAlign::Center => x - width / 2.0,
            HAlign::Right => x - width,
        };
        let min_y = self.top_for(y, height);
        Bounds {
            min_x,
            min_y,
            max_x: min_x + width,
            max_y: min_y + height,
        }
    }

    fn text_box_bounds(&mut self, x: f32, y: f32, break_width: f32, text: &str) -> Bounds {
        let rows = self.wrap_rows(text, break_width);
        let widest = rows.iter().copied().fold(0.0_f32, f32::max);
        let height = rows.len() as f32 * self.line_height();
        // Rows are aligned inside the [x, x + break_width] box.
        let min_x = match self.text.align.h {
            HAlign::Left => x,
            HAlign::Center => x + (break_width - widest) / 2.0,
            HAlign::Right => x + break_width - widest,
        };
        let min_y = self.top_for(y, height);
        Bounds {
            min_x,
            min_y,
            max_x: min_x + widest,
            max_y: min_y + height,
        }
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
        self.commands.push(DrawCommand::RoundedRect { x, y, w, h, radius });
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn text(&mut self, x: f32, y: f32, text: &str) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn text_box(&mut self, x: f32, y: f32, break_width: f32, text: &str) {
        self.commands.push(DrawCommand::TextBox {
            x,
            y,
            break_width,
            text: text.to_string(),
        });
    }
}
