use super::Screen;
use crate::backend::Backend;
use crate::draw::Renderer;
use crate::geometry::Vector2i;
use crate::tree::{WidgetId, WidgetPath};

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Move keyboard focus to `target` (or clear it with `None`).
    ///
    /// Widgets on the old path are unfocused first, then every widget from
    /// the root down to `target` is focused. The nearest enclosing window is
    /// raised along with its popups.
    pub fn update_focus(&mut self, target: Option<WidgetId>) {
        let old_path = std::mem::take(&mut self.focus_path);
        for &id in &old_path {
            let was_focused = self.tree.state(id).is_some_and(|s| s.focused);
            if !was_focused {
                continue;
            }
            self.tree.with_behavior(id, |behavior, state| {
                state.focused = false;
                behavior.focus_event(state, false);
            });
        }

        let Some(target) = target.filter(|&t| self.tree.contains(t)) else {
            log::debug!("focus cleared");
            return;
        };

        let path: WidgetPath = self.tree.ancestors(target);
        let window = path
            .iter()
            .copied()
            .find(|&id| self.tree.role(id).is_some_and(|r| r.is_window()));

        for &id in path.iter().rev() {
            self.tree.with_behavior(id, |behavior, state| {
                state.focused = true;
                behavior.focus_event(state, true);
            });
        }
        log::debug!("focus path now {} widgets deep", path.len());
        self.focus_path = path;

        if let Some(window) = window {
            self.move_window_to_front(window);
        }
    }

    /// Focus `id` as if it had been clicked.
    pub fn request_focus(&mut self, id: WidgetId) {
        self.update_focus(Some(id));
    }

    /// The modal window directly beneath the root on the focus path, if any.
    pub fn active_modal(&self) -> Option<WidgetId> {
        let len = self.focus_path.len();
        if len < 2 {
            return None;
        }
        let candidate = self.focus_path[len - 2];
        self.tree
            .role(candidate)
            .is_some_and(|r| r.is_modal())
            .then_some(candidate)
    }

    /// True if a modal window is active and `p` lies outside it.
    pub(super) fn modal_blocks(&self, p: Vector2i) -> bool {
        match self.active_modal() {
            Some(modal) => !self.tree.contains_point(modal, p),
            None => false,
        }
    }
}
