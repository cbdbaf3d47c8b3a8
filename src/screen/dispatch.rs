use std::path::PathBuf;

use super::{Drag, Screen};
use crate::backend::Backend;
use crate::config::PixelRatioMode;
use crate::draw::Renderer;
use crate::geometry::{Vector2f, Vector2i};
use crate::input::{Action, KeyCode, KeyEvent, Modifiers, MouseButton};
use crate::tree::{WidgetId, WidgetPath};
use crate::widget::{Behavior, Cursor, NodeState};

// ---------------------------------------------------------------------------
// Backend callbacks
// ---------------------------------------------------------------------------

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Pointer moved to `(x, y)` in backend coordinates.
    pub fn cursor_pos_callback(&mut self, x: f64, y: f64) -> bool {
        self.guarded("cursor position", |s| s.on_cursor_pos(x, y))
    }

    pub fn mouse_button_callback(
        &mut self,
        button: MouseButton,
        action: Action,
        modifiers: Modifiers,
    ) -> bool {
        self.guarded("mouse button", |s| s.on_mouse_button(button, action, modifiers))
    }

    pub fn key_callback(
        &mut self,
        key: KeyCode,
        scancode: u32,
        action: Action,
        modifiers: Modifiers,
    ) -> bool {
        let event = KeyEvent {
            key,
            scancode,
            action,
            modifiers,
        };
        self.guarded("key", |s| s.on_key(&event))
    }

    pub fn char_callback(&mut self, codepoint: char) -> bool {
        self.guarded("character", |s| s.on_char(codepoint))
    }

    pub fn drop_callback(&mut self, paths: &[PathBuf]) -> bool {
        let paths = paths.to_vec();
        self.guarded("drop", |s| s.hooks.drop_event(&paths))
    }

    pub fn scroll_callback(&mut self, dx: f64, dy: f64) -> bool {
        self.guarded("scroll", |s| s.on_scroll(dx, dy))
    }

    /// The platform window changed size. Sizes are re-queried from the
    /// backend; a zero-area result is ignored.
    pub fn resize_callback(&mut self) -> bool {
        self.guarded("resize", |s| s.on_resize())
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

impl<B: Backend, R: Renderer> Screen<B, R> {
    fn on_cursor_pos(&mut self, x: f64, y: f64) -> bool {
        let (x, y) = match self.pixel_ratio_mode {
            PixelRatioMode::FromMonitor => {
                let ratio = f64::from(self.pixel_ratio);
                (x / ratio, y / ratio)
            }
            PixelRatioMode::FromFramebuffer => (x, y),
        };
        self.last_interaction = self.backend.time();

        let p = Vector2i::new(x as i32, y as i32) - self.cursor_offset;
        let rel = p - self.mouse_pos;

        let mut handled = match self.drag {
            Drag::Idle => {
                self.update_hover(p);
                false
            }
            Drag::Active(captured) => self.route_drag(captured, p, rel),
        };

        if !handled && let Some(target) = self.tree.find_widget(p) {
            let (buttons, modifiers) = (self.mouse_state, self.modifiers);
            handled = self.bubble(target, p, |behavior, state, local| {
                behavior.mouse_motion(state, local, rel, buttons, modifiers)
            });
        }

        self.mouse_pos = p;
        handled
    }

    fn on_mouse_button(&mut self, button: MouseButton, action: Action, modifiers: Modifiers) -> bool {
        self.modifiers = modifiers;
        self.last_interaction = self.backend.time();

        if self.modal_blocks(self.mouse_pos) {
            log::trace!("{button:?} {action:?} blocked by modal window");
            return false;
        }

        let pressed = action != Action::Release;
        if pressed {
            self.mouse_state.insert(button.mask());
        } else {
            self.mouse_state.remove(button.mask());
        }

        let p = self.mouse_pos;
        let root = self.tree.root();
        let target = self.tree.find_widget(p);

        if let Drag::Active(captured) = self.drag
            && !pressed
            && target != Some(captured)
        {
            let local = p - self.tree.parent_origin(captured);
            self.tree.with_behavior(captured, |behavior, state| {
                behavior.mouse_button(state, local, button, false, modifiers)
            });
        }

        if let Some(cursor) = target.and_then(|t| self.tree.state(t)).map(|s| s.cursor) {
            self.apply_cursor(cursor);
        }

        if pressed && button.starts_drag() {
            match target {
                Some(t) if t != root => self.drag = Drag::Active(t),
                _ => {
                    self.drag = Drag::Idle;
                    self.update_focus(None);
                }
            }
        } else {
            self.drag = Drag::Idle;
        }

        let Some(target) = target else {
            return false;
        };

        if pressed
            && button == MouseButton::Left
            && target != root
            && !self.tree.state(target).is_some_and(|s| s.focused)
        {
            self.update_focus(Some(target));
        }

        self.bubble(target, p, |behavior, state, local| {
            behavior.mouse_button(state, local, button, pressed, modifiers)
        })
    }

    fn on_key(&mut self, event: &KeyEvent) -> bool {
        self.last_interaction = self.backend.time();
        self.offer_to_focused(|behavior, state| behavior.keyboard(state, event))
    }

    fn on_char(&mut self, codepoint: char) -> bool {
        self.last_interaction = self.backend.time();
        self.offer_to_focused(|behavior, state| behavior.keyboard_character(state, codepoint))
    }

    fn on_scroll(&mut self, dx: f64, dy: f64) -> bool {
        self.last_interaction = self.backend.time();

        let p = self.mouse_pos;
        if self.modal_blocks(p) {
            log::trace!("scroll blocked by modal window");
            return false;
        }
        let Some(target) = self.tree.find_widget(p) else {
            return false;
        };
        let delta = Vector2f::new(dx as f32, dy as f32);
        self.bubble(target, p, |behavior, state, local| behavior.scroll(state, local, delta))
    }

    fn on_resize(&mut self) -> bool {
        let fb_size = self.backend.framebuffer_size();
        let mut size = self.backend.window_size();
        if self.pixel_ratio_mode == PixelRatioMode::FromMonitor {
            size = size.scaled(1.0 / self.pixel_ratio);
        }
        if fb_size.is_degenerate() || size.is_degenerate() {
            log::trace!("ignoring degenerate resize to {}x{}", size.x, size.y);
            return false;
        }

        self.fb_size = fb_size;
        self.size = size;
        let root = self.tree.root();
        self.tree.set_size(root, size);
        self.last_interaction = self.backend.time();
        log::info!("screen resized to {}x{}", size.x, size.y);

        self.hooks.resize_event(size)
    }
}

// ---------------------------------------------------------------------------
// Routing helpers
// ---------------------------------------------------------------------------

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Offer an event to `target`, then each ancestor in turn, until one
    /// consumes it. `p` is in screen coordinates; each receiver gets it in
    /// its parent's space. Disabled widgets are skipped.
    fn bubble(
        &mut self,
        target: WidgetId,
        p: Vector2i,
        mut handler: impl FnMut(&mut dyn Behavior, &mut NodeState, Vector2i) -> bool,
    ) -> bool {
        for id in self.tree.ancestors(target) {
            if !self.tree.state(id).is_some_and(|s| s.enabled) {
                continue;
            }
            let local = p - self.tree.parent_origin(id);
            let consumed = self
                .tree
                .with_behavior(id, |behavior, state| handler(behavior, state, local))
                .unwrap_or(false);
            if consumed {
                log::trace!("event consumed by {id:?}");
                return true;
            }
        }
        false
    }

    /// Offer a keyboard event along the focus path, leaf first. The root is
    /// never offered keyboard input.
    fn offer_to_focused(
        &mut self,
        mut handler: impl FnMut(&mut dyn Behavior, &mut NodeState) -> bool,
    ) -> bool {
        let path: WidgetPath = self.focus_path.clone();
        let root = self.tree.root();
        for id in path.into_iter().filter(|&id| id != root) {
            let eligible = self
                .tree
                .state(id)
                .is_some_and(|s| s.focused && s.enabled);
            if !eligible {
                continue;
            }
            let consumed = self
                .tree
                .with_behavior(id, |behavior, state| handler(behavior, state))
                .unwrap_or(false);
            if consumed {
                log::trace!("key event consumed by {id:?}");
                return true;
            }
        }
        false
    }

    /// Track the widget chain under the pointer: apply the hovered widget's
    /// cursor and send leave/enter notifications for widgets that left or
    /// joined the chain.
    fn update_hover(&mut self, p: Vector2i) {
        let Some(hit) = self.tree.find_widget(p) else {
            return;
        };
        if let Some(cursor) = self.tree.state(hit).map(|s| s.cursor) {
            self.apply_cursor(cursor);
        }

        let chain = self.tree.ancestors(hit);
        let old = std::mem::replace(&mut self.hover_path, chain.clone());

        for &id in old.iter().filter(|id| !chain.contains(id)) {
            let local = p - self.tree.parent_origin(id);
            self.tree.with_behavior(id, |behavior, state| {
                behavior.mouse_enter(state, local, false);
            });
        }
        for &id in chain.iter().rev().filter(|id| !old.contains(id)) {
            let local = p - self.tree.parent_origin(id);
            self.tree.with_behavior(id, |behavior, state| {
                behavior.mouse_enter(state, local, true);
            });
        }
    }

    /// Change the window cursor, calling the backend only on change.
    fn apply_cursor(&mut self, cursor: Cursor) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.backend.set_cursor(cursor);
        }
    }
}
