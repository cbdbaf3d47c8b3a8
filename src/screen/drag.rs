use super::Screen;
use crate::backend::Backend;
use crate::draw::Renderer;
use crate::geometry::Vector2i;
use crate::tree::WidgetId;

/// Pointer capture state. While `Active`, motion goes to the captured
/// widget as drag events regardless of what is under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Drag {
    #[default]
    Idle,
    Active(WidgetId),
}

impl Drag {
    pub fn widget(&self) -> Option<WidgetId> {
        match self {
            Drag::Idle => None,
            Drag::Active(id) => Some(*id),
        }
    }
}

impl<B: Backend, R: Renderer> Screen<B, R> {
    pub fn drag(&self) -> Drag {
        self.drag
    }

    pub fn drag_active(&self) -> bool {
        matches!(self.drag, Drag::Active(_))
    }

    pub fn drag_widget(&self) -> Option<WidgetId> {
        self.drag.widget()
    }

    /// Deliver motion to the captured widget. `p` is in screen coordinates.
    pub(super) fn route_drag(&mut self, captured: WidgetId, p: Vector2i, rel: Vector2i) -> bool {
        let local = p - self.tree.parent_origin(captured);
        let (buttons, modifiers) = (self.mouse_state, self.modifiers);
        self.tree
            .with_behavior(captured, |behavior, state| {
                behavior.mouse_drag(state, local, rel, buttons, modifiers)
            })
            .unwrap_or(false)
    }
}
