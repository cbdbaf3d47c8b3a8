use crate::Error;
use crate::geometry::Vector2i;
use crate::widget::Cursor;

/// Windowing/input services the screen consumes.
///
/// One backend serves one platform window. It is injected at construction
/// and owned by the screen for its whole lifetime.
pub trait Backend {
    fn clipboard_string(&self) -> Option<String>;
    fn set_clipboard_string(&mut self, text: &str);

    /// Monotonic time in seconds.
    fn time(&self) -> f64;

    fn set_cursor(&mut self, cursor: Cursor);

    /// Window size as reported by the platform (logical or physical,
    /// depending on the screen's pixel ratio mode).
    fn window_size(&self) -> Vector2i;
    fn framebuffer_size(&self) -> Vector2i;

    fn swap_buffers(&mut self);

    /// Activate the rendering context for this window.
    fn make_context_current(&mut self) -> Result<(), Error>;

    /// Scale factor of the monitor hosting the window.
    fn monitor_pixel_ratio(&self) -> f32 {
        1.0
    }

    fn set_title(&mut self, _title: &str) {}
    fn set_visible(&mut self, _visible: bool) {}
    fn set_window_size(&mut self, _size: Vector2i) {}
}

/// In-memory backend for tests and offscreen use. Every query returns the
/// value stored in the matching public field.
#[derive(Debug, Clone)]
pub struct Headless {
    pub time: f64,
    pub window_size: Vector2i,
    pub framebuffer_size: Vector2i,
    pub pixel_ratio: f32,
    pub clipboard: Option<String>,
    pub title: String,
    pub visible: bool,
    /// Every cursor shape applied, in order.
    pub cursor_calls: Vec<Cursor>,
    pub swaps: usize,
    /// When set, `make_context_current` fails.
    pub context_lost: bool,
}

impl Headless {
    pub fn new(window_size: Vector2i) -> Self {
        Self {
            time: 0.0,
            window_size,
            framebuffer_size: window_size,
            pixel_ratio: 1.0,
            clipboard: None,
            title: String::new(),
            visible: true,
            cursor_calls: Vec::new(),
            swaps: 0,
            context_lost: false,
        }
    }

    /// Report a framebuffer scaled by `ratio` relative to the window.
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self.framebuffer_size = self.window_size.scaled(ratio);
        self
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

impl Backend for Headless {
    fn clipboard_string(&self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard_string(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor_calls.push(cursor);
    }

    fn window_size(&self) -> Vector2i {
        self.window_size
    }

    fn framebuffer_size(&self) -> Vector2i {
        self.framebuffer_size
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn make_context_current(&mut self) -> Result<(), Error> {
        if self.context_lost {
            return Err(Error::RenderContext("headless context lost".into()));
        }
        Ok(())
    }

    fn monitor_pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_window_size(&mut self, size: Vector2i) {
        self.window_size = size;
        self.framebuffer_size = size.scaled(self.pixel_ratio);
    }
}
