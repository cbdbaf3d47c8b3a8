use super::{Drag, Screen};
use crate::backend::Backend;
use crate::draw::Renderer;
use crate::tree::WidgetId;
use crate::widget::Role;

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Raise `window` to the front of its siblings. Popups owned by `window`
    /// or by any widget inside it that would end up behind it are raised
    /// after it, recursively, so every popup paints above its owner.
    pub fn move_window_to_front(&mut self, window: WidgetId) {
        self.tree.move_to_front(window);
        let Some(parent) = self.tree.parent(window) else {
            return;
        };
        loop {
            let Some(window_index) = self.tree.index_in_parent(window) else {
                return;
            };
            let behind = self
                .tree
                .children(parent)
                .iter()
                .take(window_index)
                .copied()
                .find(|&c| {
                    self.tree
                        .role(c)
                        .and_then(|r| r.popup_owner())
                        .is_some_and(|owner| self.tree.ancestors(owner).contains(&window))
                });
            match behind {
                Some(popup) => self.move_window_to_front(popup),
                None => break,
            }
        }
    }

    /// Remove a window (and its subtree) from the screen. Popups owned by
    /// any removed widget are disposed too. Focus, pointer capture and
    /// hover state never keep handles to removed widgets.
    pub fn dispose_window(&mut self, window: WidgetId) {
        if window == self.tree.root() {
            log::warn!("refusing to dispose the screen root");
            return;
        }
        if !self.tree.contains(window) {
            return;
        }
        // Surviving members of the focus path must hear that they lost focus.
        if self.focus_path.iter().any(|&id| self.tree.ancestors(id).contains(&window)) {
            self.update_focus(None);
        }
        let removed = self.tree.remove(window);
        log::debug!("disposed {} widgets", removed.len());

        if let Drag::Active(captured) = self.drag
            && removed.contains(&captured)
        {
            self.drag = Drag::Idle;
        }
        self.hover_path.retain(|id| !removed.contains(id));

        let root = self.tree.root();
        let orphans: Vec<WidgetId> = self
            .tree
            .children(root)
            .iter()
            .copied()
            .filter(|&c| {
                matches!(self.tree.role(c), Some(Role::Popup { owner, .. }) if removed.contains(&owner))
            })
            .collect();
        for popup in orphans {
            self.dispose_window(popup);
        }
    }

    /// Center `window` inside its parent. A window with no size yet takes
    /// its preferred size first.
    pub fn center_window(&mut self, window: WidgetId) {
        let Some(size) = self.tree.state(window).map(|s| s.size) else {
            return;
        };
        if size.is_degenerate() {
            let preferred = self
                .tree
                .preferred_size(window, &mut self.renderer, &self.theme)
                .unwrap_or(size);
            self.tree.set_size(window, preferred);
        }
        let size = self.tree.state(window).map(|s| s.size).unwrap_or(size);
        let parent_size = self
            .tree
            .parent(window)
            .and_then(|p| self.tree.state(p))
            .map(|s| s.size)
            .unwrap_or(self.size);
        self.tree.set_position(window, (parent_size - size) / 2);
    }
}
