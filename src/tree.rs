use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::draw::Renderer;
use crate::geometry::Vector2i;
use crate::theme::Theme;
use crate::widget::{Behavior, Cursor, NodeState, Plain, Role};

new_key_type! {
    /// Handle into the widget arena. Stable across insertions/removals.
    pub struct WidgetId;
}

/// Chain of widget handles, typically leaf to root.
pub type WidgetPath = SmallVec<[WidgetId; 8]>;

// ---------------------------------------------------------------------------
// Widget node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing a widget's behavior with tree metadata.
pub struct WidgetNode {
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) role: Role,
    pub(crate) state: NodeState,
    pub(crate) behavior: Box<dyn Behavior>,
}

impl WidgetNode {
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in paint order; the last child is frontmost.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Arena-backed retained widget tree with a single root.
pub struct WidgetTree {
    arena: SlotMap<WidgetId, WidgetNode>,
    root: WidgetId,
}

impl WidgetTree {
    /// Create a tree whose root is a plain container.
    pub fn new() -> Self {
        Self::with_root(Box::new(Plain))
    }

    pub fn with_root(behavior: Box<dyn Behavior>) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(WidgetNode {
            parent: None,
            children: Vec::new(),
            role: Role::Plain,
            state: NodeState::default(),
            behavior,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Insert a widget as the frontmost child of `parent`.
    /// Returns `None` if `parent` is not in the tree.
    pub fn insert(
        &mut self,
        parent: WidgetId,
        role: Role,
        behavior: Box<dyn Behavior>,
    ) -> Option<WidgetId> {
        if !self.arena.contains_key(parent) {
            return None;
        }
        let id = self.arena.insert(WidgetNode {
            parent: Some(parent),
            children: Vec::new(),
            role,
            state: NodeState::default(),
            behavior,
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(id);
        }
        Some(id)
    }

    /// Remove a widget and all its descendants. Returns the removed handles.
    /// The root cannot be removed.
    pub(crate) fn remove(&mut self, id: WidgetId) -> Vec<WidgetId> {
        if id == self.root || !self.arena.contains_key(id) {
            return Vec::new();
        }
        let mut to_remove = Vec::new();
        Self::collect_subtree(&self.arena, id, &mut to_remove);

        if let Some(node) = self.arena.get(id)
            && let Some(parent_id) = node.parent
            && let Some(parent) = self.arena.get_mut(parent_id)
        {
            parent.children.retain(|c| *c != id);
        }

        for &rid in &to_remove {
            self.arena.remove(rid);
        }
        to_remove
    }

    fn collect_subtree(
        arena: &SlotMap<WidgetId, WidgetNode>,
        id: WidgetId,
        out: &mut Vec<WidgetId>,
    ) {
        out.push(id);
        if let Some(node) = arena.get(id) {
            for &child in &node.children {
                Self::collect_subtree(arena, child, out);
            }
        }
    }

    /// Move `id` to the end of its parent's child list (front of z-order).
    pub(crate) fn move_to_front(&mut self, id: WidgetId) {
        let Some(parent_id) = self.parent(id) else {
            return;
        };
        if let Some(parent) = self.arena.get_mut(parent_id) {
            parent.children.retain(|c| *c != id);
            parent.children.push(id);
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena.get(id)
    }

    /// Run `f` against a widget's behavior and state together.
    pub(crate) fn with_behavior<T>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Behavior, &mut NodeState) -> T,
    ) -> Option<T> {
        let node = self.arena.get_mut(id)?;
        Some(f(node.behavior.as_mut(), &mut node.state))
    }

    pub fn state(&self, id: WidgetId) -> Option<&NodeState> {
        self.arena.get(id).map(|n| &n.state)
    }

    pub fn state_mut(&mut self, id: WidgetId) -> Option<&mut NodeState> {
        self.arena.get_mut(id).map(|n| &mut n.state)
    }

    pub fn role(&self, id: WidgetId) -> Option<Role> {
        self.arena.get(id).map(|n| n.role)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Index of `id` among its parent's children.
    pub fn index_in_parent(&self, id: WidgetId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    // ------------------------------------------------------------------
    // Node setters
    // ------------------------------------------------------------------

    pub fn set_position(&mut self, id: WidgetId, position: Vector2i) {
        if let Some(state) = self.state_mut(id) {
            state.position = position;
        }
    }

    pub fn set_size(&mut self, id: WidgetId, size: Vector2i) {
        if let Some(state) = self.state_mut(id) {
            state.size = size;
        }
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(state) = self.state_mut(id) {
            state.visible = visible;
        }
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if let Some(state) = self.state_mut(id) {
            state.enabled = enabled;
        }
    }

    pub fn set_cursor(&mut self, id: WidgetId, cursor: Cursor) {
        if let Some(state) = self.state_mut(id) {
            state.cursor = cursor;
        }
    }

    pub fn set_tooltip(&mut self, id: WidgetId, tooltip: impl Into<String>) {
        if let Some(state) = self.state_mut(id) {
            state.tooltip = tooltip.into();
        }
    }

    /// Toggle modality of a window. No effect on other roles.
    pub fn set_modal(&mut self, id: WidgetId, modal: bool) {
        if let Some(node) = self.arena.get_mut(id)
            && let Role::Window { .. } = node.role
        {
            node.role = Role::Window { modal };
        }
    }

    // ------------------------------------------------------------------
    // Geometry queries
    // ------------------------------------------------------------------

    /// Handles from `id` up to the root, inclusive.
    pub fn ancestors(&self, id: WidgetId) -> WidgetPath {
        let mut path = WidgetPath::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get(cid) else {
                break;
            };
            path.push(cid);
            current = node.parent;
        }
        path
    }

    /// Sum of positions from `id` up to the root.
    pub fn absolute_position(&self, id: WidgetId) -> Vector2i {
        self.ancestors(id)
            .iter()
            .filter_map(|&a| self.state(a))
            .fold(Vector2i::ZERO, |acc, s| acc + s.position)
    }

    /// Absolute origin of the coordinate space `id` lives in (its parent's
    /// absolute position, or zero for the root).
    pub fn parent_origin(&self, id: WidgetId) -> Vector2i {
        self.parent(id)
            .map(|p| self.absolute_position(p))
            .unwrap_or(Vector2i::ZERO)
    }

    /// True if `id` and every ancestor are visible.
    pub fn visible_recursive(&self, id: WidgetId) -> bool {
        let path = self.ancestors(id);
        !path.is_empty()
            && path
                .iter()
                .all(|&a| self.state(a).is_some_and(|s| s.visible))
    }

    /// True if the absolute point `p` lies inside `id`.
    pub fn contains_point(&self, id: WidgetId, p: Vector2i) -> bool {
        self.state(id)
            .is_some_and(|s| s.contains(p - self.parent_origin(id)))
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Find the topmost visible widget under the absolute point `p`.
    /// Walks children back-to-front (last child is topmost) and falls back
    /// to the enclosing node, so a visible root is always a match.
    pub fn find_widget(&self, p: Vector2i) -> Option<WidgetId> {
        let root = self.arena.get(self.root)?;
        if !root.state.visible {
            return None;
        }
        Some(self.find_in(self.root, p))
    }

    /// `p` is in the coordinate space of `id`'s parent.
    fn find_in(&self, id: WidgetId, p: Vector2i) -> WidgetId {
        let Some(node) = self.arena.get(id) else {
            return id;
        };
        let local = p - node.state.position;
        for &child in node.children.iter().rev() {
            if let Some(child_node) = self.arena.get(child)
                && child_node.state.visible
                && child_node.state.contains(local)
            {
                return self.find_in(child, local);
            }
        }
        id
    }

    // ------------------------------------------------------------------
    // Draw
    // ------------------------------------------------------------------

    /// Paint the tree back to front.
    pub fn draw(&self, renderer: &mut dyn Renderer, theme: &Theme) {
        self.draw_node(self.root, renderer, theme);
    }

    fn draw_node(&self, id: WidgetId, renderer: &mut dyn Renderer, theme: &Theme) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.state.visible {
            return;
        }
        node.behavior.draw(&node.state, renderer, theme);

        if node.children.is_empty() {
            return;
        }
        renderer.save();
        renderer.translate(node.state.position.x as f32, node.state.position.y as f32);
        for &child in &node.children {
            self.draw_node(child, renderer, theme);
        }
        renderer.restore();
    }

    /// Ask a widget for its preferred size.
    pub fn preferred_size(
        &self,
        id: WidgetId,
        renderer: &mut dyn Renderer,
        theme: &Theme,
    ) -> Option<Vector2i> {
        let node = self.arena.get(id)?;
        Some(node.behavior.preferred_size(&node.state, renderer, theme))
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}
