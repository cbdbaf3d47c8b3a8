//! The screen: root of the widget tree and owner of all interaction state.
//!
//! Split by concern: `dispatch` translates backend callbacks, `focus`
//! maintains the focus path, `drag` routes captured pointer motion,
//! `stacking` orders windows and popups, `compositor` draws frames.

mod compositor;
mod dispatch;
mod drag;
mod focus;
mod stacking;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

pub use compositor::tooltip_alpha;
pub use drag::Drag;

use crate::Error;
use crate::backend::Backend;
use crate::config::{PixelRatioMode, ScreenConfig};
use crate::draw::{Color, Renderer};
use crate::geometry::Vector2i;
use crate::input::{ButtonMask, Modifiers};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetPath, WidgetTree};
use crate::widget::{Behavior, Cursor, Role};

/// Application hooks on the screen itself.
#[allow(unused_variables)]
pub trait ScreenHooks {
    /// Draw custom content beneath the widgets (called by `draw_all`).
    fn draw_contents(&mut self, renderer: &mut dyn Renderer) {}

    /// Files dropped onto the window.
    fn drop_event(&mut self, paths: &[PathBuf]) -> bool {
        false
    }

    /// The window was resized to `size` (logical pixels).
    fn resize_event(&mut self, size: Vector2i) -> bool {
        false
    }
}

/// Hooks that leave every event unhandled.
#[derive(Debug, Default)]
pub struct NoHooks;

impl ScreenHooks for NoHooks {}

/// Root of a widget tree bound to one platform window.
pub struct Screen<B: Backend, R: Renderer> {
    backend: B,
    renderer: R,
    hooks: Box<dyn ScreenHooks>,
    tree: WidgetTree,
    theme: Theme,
    caption: String,
    background: Color,
    pixel_ratio_mode: PixelRatioMode,
    cursor_offset: Vector2i,

    /// Last pointer position in screen coordinates.
    mouse_pos: Vector2i,
    mouse_state: ButtonMask,
    modifiers: Modifiers,
    drag: Drag,
    /// Focused leaf first, root last. Empty when nothing is focused.
    focus_path: WidgetPath,
    /// Widgets under the pointer, leaf first.
    hover_path: WidgetPath,
    last_interaction: f64,
    /// Cursor shape last applied through the backend.
    cursor: Cursor,

    pixel_ratio: f32,
    size: Vector2i,
    fb_size: Vector2i,
}

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Create a screen over an initialized backend and renderer.
    ///
    /// Fails if the rendering context cannot be made current or the backend
    /// reports an unusable pixel ratio.
    pub fn new(mut backend: B, renderer: R, config: ScreenConfig) -> Result<Self, Error> {
        backend.make_context_current()?;

        let fb_size = backend.framebuffer_size();
        let window_size = backend.window_size();
        let (pixel_ratio, size) = match config.pixel_ratio_mode {
            PixelRatioMode::FromMonitor => {
                let ratio = backend.monitor_pixel_ratio();
                if !(ratio.is_finite() && ratio > 0.0) {
                    return Err(Error::Init(format!("invalid monitor pixel ratio {ratio}")));
                }
                (ratio, window_size.scaled(1.0 / ratio))
            }
            PixelRatioMode::FromFramebuffer => {
                let ratio = if window_size.x != 0 {
                    fb_size.x as f32 / window_size.x as f32
                } else {
                    1.0
                };
                (ratio, window_size)
            }
        };

        backend.set_title(&config.caption);
        let mut tree = WidgetTree::new();
        let root = tree.root();
        tree.set_size(root, size);

        let last_interaction = backend.time();
        log::info!(
            "screen '{}' created: {}x{} (framebuffer {}x{}, pixel ratio {})",
            config.caption,
            size.x,
            size.y,
            fb_size.x,
            fb_size.y,
            pixel_ratio
        );

        Ok(Self {
            backend,
            renderer,
            hooks: Box::new(NoHooks),
            tree,
            theme: config.theme,
            caption: config.caption,
            background: config.background,
            pixel_ratio_mode: config.pixel_ratio_mode,
            cursor_offset: config.cursor_offset,
            mouse_pos: Vector2i::ZERO,
            mouse_state: ButtonMask::empty(),
            modifiers: Modifiers::NONE,
            drag: Drag::Idle,
            focus_path: WidgetPath::new(),
            hover_path: WidgetPath::new(),
            last_interaction,
            cursor: Cursor::Arrow,
            pixel_ratio,
            size,
            fb_size,
        })
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn ScreenHooks>) {
        self.hooks = hooks;
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable tree access for geometry and property changes. Removal goes
    /// through `dispose_window` so interaction state never dangles.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Add a plain widget under `parent`.
    pub fn add_widget(&mut self, parent: WidgetId, behavior: impl Behavior + 'static) -> Option<WidgetId> {
        self.tree.insert(parent, Role::Plain, Box::new(behavior))
    }

    /// Add a floating window as the frontmost child of the root.
    pub fn add_window(&mut self, behavior: impl Behavior + 'static, modal: bool) -> WidgetId {
        let root = self.tree.root();
        let id = self.tree.insert(root, Role::Window { modal }, Box::new(behavior));
        // The root always exists.
        id.unwrap_or(root)
    }

    /// Add a popup owned by `owner`, anchored at `anchor` relative to the
    /// owner's position. Popups live directly under the root.
    pub fn add_popup(
        &mut self,
        owner: WidgetId,
        anchor: Vector2i,
        behavior: impl Behavior + 'static,
    ) -> Option<WidgetId> {
        if !self.tree.contains(owner) {
            return None;
        }
        let root = self.tree.root();
        self.tree
            .insert(root, Role::Popup { owner, anchor }, Box::new(behavior))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
        self.backend.set_title(&self.caption);
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn visible(&self) -> bool {
        self.tree.state(self.tree.root()).is_some_and(|s| s.visible)
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible() == visible {
            return;
        }
        let root = self.tree.root();
        self.tree.set_visible(root, visible);
        self.backend.set_visible(visible);
    }

    /// Logical window size.
    pub fn size(&self) -> Vector2i {
        self.size
    }

    /// Resize the platform window and the root widget.
    pub fn set_size(&mut self, size: Vector2i) {
        self.size = size;
        let root = self.tree.root();
        self.tree.set_size(root, size);
        let platform_size = match self.pixel_ratio_mode {
            PixelRatioMode::FromMonitor => size.scaled(self.pixel_ratio),
            PixelRatioMode::FromFramebuffer => size,
        };
        self.backend.set_window_size(platform_size);
    }

    pub fn framebuffer_size(&self) -> Vector2i {
        self.fb_size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn mouse_pos(&self) -> Vector2i {
        self.mouse_pos
    }

    pub fn mouse_state(&self) -> ButtonMask {
        self.mouse_state
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Focused leaf first, root last.
    pub fn focus_path(&self) -> &[WidgetId] {
        &self.focus_path
    }

    /// Widgets currently under the pointer, leaf first.
    pub fn hover_path(&self) -> &[WidgetId] {
        &self.hover_path
    }

    pub fn last_interaction(&self) -> f64 {
        self.last_interaction
    }

    /// Cursor shape currently applied to the window.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn clipboard_string(&self) -> Option<String> {
        self.backend.clipboard_string()
    }

    pub fn set_clipboard_string(&mut self, text: &str) {
        self.backend.set_clipboard_string(text);
    }

    // ------------------------------------------------------------------
    // Fatal handler guard
    // ------------------------------------------------------------------

    /// Run an input handler. A panic escaping it leaves the tree in an
    /// unknown state, so it is logged and the process aborts.
    fn guarded<T>(&mut self, callback: &'static str, handler: impl FnOnce(&mut Self) -> T) -> T {
        match panic::catch_unwind(AssertUnwindSafe(|| handler(self))) {
            Ok(value) => value,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                log::error!("caught panic in {callback} callback: {message}");
                std::process::abort();
            }
        }
    }
}
