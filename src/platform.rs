//! winit adapter: a `Backend` over a winit window and a translator from
//! `WindowEvent`s to screen callbacks.

use std::sync::Arc;
use std::time::Instant;

use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::window::{CursorIcon, Window};

use crate::Error;
use crate::backend::Backend;
use crate::config::PixelRatioMode;
use crate::draw::Renderer;
use crate::geometry::Vector2i;
use crate::input::{Action, Modifiers, MouseButton};
use crate::screen::Screen;
use crate::widget::Cursor;

/// Pixel-based scroll deltas are divided by this to approximate lines.
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Backend over a winit window.
///
/// winit has no clipboard or GPU context of its own, so the clipboard is
/// process-local and context activation always succeeds. Presentation is
/// left to the renderer.
pub struct WinitBackend {
    window: Arc<Window>,
    mode: PixelRatioMode,
    start: Instant,
    clipboard: Option<String>,
}

impl WinitBackend {
    pub fn new(window: Arc<Window>, mode: PixelRatioMode) -> Self {
        Self {
            window,
            mode,
            start: Instant::now(),
            clipboard: None,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Convert a winit cursor position into the coordinates the screen
    /// expects for this backend's pixel ratio mode.
    pub fn cursor_position(&self, position: PhysicalPosition<f64>) -> (f64, f64) {
        match self.mode {
            PixelRatioMode::FromMonitor => (position.x, position.y),
            PixelRatioMode::FromFramebuffer => {
                let logical = position.to_logical::<f64>(self.window.scale_factor());
                (logical.x, logical.y)
            }
        }
    }
}

impl Backend for WinitBackend {
    fn clipboard_string(&self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard_string(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.window.set_cursor(cursor_icon(cursor));
    }

    fn window_size(&self) -> Vector2i {
        let physical = self.window.inner_size();
        match self.mode {
            PixelRatioMode::FromMonitor => physical_to_vector(physical),
            PixelRatioMode::FromFramebuffer => {
                let logical: LogicalSize<f64> = physical.to_logical(self.window.scale_factor());
                Vector2i::new(logical.width as i32, logical.height as i32)
            }
        }
    }

    fn framebuffer_size(&self) -> Vector2i {
        physical_to_vector(self.window.inner_size())
    }

    fn swap_buffers(&mut self) {
        self.window.pre_present_notify();
    }

    fn make_context_current(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn monitor_pixel_ratio(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn set_visible(&mut self, visible: bool) {
        self.window.set_visible(visible);
    }

    fn set_window_size(&mut self, size: Vector2i) {
        let (w, h) = (size.x.max(1) as u32, size.y.max(1) as u32);
        let requested = match self.mode {
            PixelRatioMode::FromMonitor => self.window.request_inner_size(PhysicalSize::new(w, h)),
            PixelRatioMode::FromFramebuffer => self.window.request_inner_size(LogicalSize::new(w, h)),
        };
        if requested.is_none() {
            log::debug!("window resize to {w}x{h} will be applied asynchronously");
        }
    }
}

fn physical_to_vector(size: PhysicalSize<u32>) -> Vector2i {
    Vector2i::new(
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

pub fn cursor_icon(cursor: Cursor) -> CursorIcon {
    match cursor {
        Cursor::Arrow => CursorIcon::Default,
        Cursor::IBeam => CursorIcon::Text,
        Cursor::Crosshair => CursorIcon::Crosshair,
        Cursor::Hand => CursorIcon::Pointer,
        Cursor::HResize => CursorIcon::EwResize,
        Cursor::VResize => CursorIcon::NsResize,
    }
}

pub fn mouse_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match button {
        W::Left => MouseButton::Left,
        W::Right => MouseButton::Right,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Other(3),
        W::Forward => MouseButton::Other(4),
        W::Other(n) => MouseButton::Other(u8::try_from(n).unwrap_or(u8::MAX)),
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    let mut m = Modifiers::NONE;
    if state.shift_key() {
        m |= Modifiers::SHIFT;
    }
    if state.control_key() {
        m |= Modifiers::CONTROL;
    }
    if state.alt_key() {
        m |= Modifiers::ALT;
    }
    if state.super_key() {
        m |= Modifiers::SUPER;
    }
    m
}

pub fn action(state: ElementState, repeat: bool) -> Action {
    match state {
        ElementState::Released => Action::Release,
        ElementState::Pressed if repeat => Action::Repeat,
        ElementState::Pressed => Action::Press,
    }
}

/// Feeds winit window events to a screen, tracking modifier state between
/// events.
#[derive(Debug, Default)]
pub struct WinitInput {
    modifiers: Modifiers,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one window event. Returns `true` if a widget consumed it.
    pub fn dispatch<R: Renderer>(
        &mut self,
        screen: &mut Screen<WinitBackend, R>,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = screen.backend().cursor_position(*position);
                screen.cursor_pos_callback(x, y)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                screen.mouse_button_callback(mouse_button(*button), action(*state, false), self.modifiers)
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let mut handled = false;
                // winit exposes no portable scancode.
                if let PhysicalKey::Code(key) = event.physical_key {
                    handled = screen.key_callback(key, 0, action(event.state, event.repeat), self.modifiers);
                }
                if event.state == ElementState::Pressed
                    && let Some(text) = &event.text
                {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        handled |= screen.char_callback(c);
                    }
                }
                handled
            }
            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = modifiers(m.state());
                false
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(x, y) => screen.scroll_callback(f64::from(*x), f64::from(*y)),
                MouseScrollDelta::PixelDelta(pos) => {
                    screen.scroll_callback(pos.x / PIXELS_PER_SCROLL_LINE, pos.y / PIXELS_PER_SCROLL_LINE)
                }
            },
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => screen.resize_callback(),
            WindowEvent::DroppedFile(path) => screen.drop_callback(std::slice::from_ref(path)),
            _ => false,
        }
    }
}
