use crate::WidgetId;
use crate::draw::{Renderer, TextAlign};
use crate::geometry::{Vector2f, Vector2i};
use crate::input::{ButtonMask, KeyEvent, Modifiers, MouseButton};
use crate::theme::Theme;

/// Cursor shape a widget asks for while hovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    #[default]
    Arrow,
    IBeam,
    Crosshair,
    Hand,
    HResize,
    VResize,
}

/// Structural role of a node, used when the screen walks the tree looking
/// for windows and popups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Plain,
    /// Floating top-level window. A modal window blocks pointer input
    /// outside its bounds while it is on the focus path.
    Window { modal: bool },
    /// Popup attached to `owner`. Stacked after its owner and placed at
    /// `anchor` relative to the owner's position.
    Popup { owner: WidgetId, anchor: Vector2i },
}

impl Role {
    /// Windows and popups both take part in stacking.
    pub fn is_window(&self) -> bool {
        matches!(self, Role::Window { .. } | Role::Popup { .. })
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, Role::Window { modal: true })
    }

    pub fn popup_owner(&self) -> Option<WidgetId> {
        match self {
            Role::Popup { owner, .. } => Some(*owner),
            _ => None,
        }
    }
}

/// Per-node state shared by every widget kind. Handlers receive it mutably
/// so a behavior can move or resize itself.
#[derive(Debug, Clone)]
pub struct NodeState {
    /// Offset from the parent's origin.
    pub position: Vector2i,
    pub size: Vector2i,
    pub visible: bool,
    pub enabled: bool,
    /// Maintained by the screen's focus manager.
    pub focused: bool,
    pub cursor: Cursor,
    /// Empty string means no tooltip.
    pub tooltip: String,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            position: Vector2i::ZERO,
            size: Vector2i::ZERO,
            visible: true,
            enabled: true,
            focused: false,
            cursor: Cursor::Arrow,
            tooltip: String::new(),
        }
    }
}

impl NodeState {
    /// True if `p`, expressed in the parent's coordinates, lies inside this node.
    pub fn contains(&self, p: Vector2i) -> bool {
        let d = p - self.position;
        d.x >= 0 && d.y >= 0 && d.x < self.size.x && d.y < self.size.y
    }
}

/// Per-widget drawing and event handling.
///
/// Pointer positions are expressed in the coordinate space of the receiving
/// widget's parent. Handlers return `true` to consume an event; unconsumed
/// events bubble to the parent.
#[allow(unused_variables)]
pub trait Behavior {
    /// Paint the widget. The renderer is already translated to the parent's
    /// origin, so `state.position` is the top-left corner.
    fn draw(&self, state: &NodeState, renderer: &mut dyn Renderer, theme: &Theme) {}

    fn preferred_size(&self, state: &NodeState, renderer: &mut dyn Renderer, theme: &Theme) -> Vector2i {
        state.size
    }

    fn mouse_button(
        &mut self,
        state: &mut NodeState,
        p: Vector2i,
        button: MouseButton,
        pressed: bool,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    fn mouse_motion(
        &mut self,
        state: &mut NodeState,
        p: Vector2i,
        rel: Vector2i,
        buttons: ButtonMask,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    /// Motion while this widget holds pointer capture.
    fn mouse_drag(
        &mut self,
        state: &mut NodeState,
        p: Vector2i,
        rel: Vector2i,
        buttons: ButtonMask,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    fn mouse_enter(&mut self, state: &mut NodeState, p: Vector2i, enter: bool) -> bool {
        false
    }

    fn scroll(&mut self, state: &mut NodeState, p: Vector2i, delta: Vector2f) -> bool {
        false
    }

    /// `state.focused` already reflects the new value.
    fn focus_event(&mut self, state: &mut NodeState, focused: bool) -> bool {
        false
    }

    fn keyboard(&mut self, state: &mut NodeState, event: &KeyEvent) -> bool {
        false
    }

    fn keyboard_character(&mut self, state: &mut NodeState, codepoint: char) -> bool {
        false
    }
}

/// Container with no visuals and no event handling of its own.
#[derive(Debug, Default)]
pub struct Plain;

impl Behavior for Plain {}

const DEFAULT_HEADER_HEIGHT: i32 = 30;

/// Floating panel with a title bar. Dragging the title bar moves it.
#[derive(Debug)]
pub struct Window {
    pub title: String,
    /// Height of the draggable title bar.
    pub header_height: i32,
    dragging: bool,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            header_height: DEFAULT_HEADER_HEIGHT,
            dragging: false,
        }
    }

    pub fn with_header_height(mut self, height: i32) -> Self {
        self.header_height = height;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Behavior for Window {
    fn draw(&self, state: &NodeState, renderer: &mut dyn Renderer, theme: &Theme) {
        let (x, y) = (state.position.x as f32, state.position.y as f32);
        let fill = if state.focused {
            theme.window_fill_focused
        } else {
            theme.window_fill
        };
        renderer.begin_path();
        renderer.rounded_rect(
            x,
            y,
            state.size.x as f32,
            state.size.y as f32,
            theme.window_corner_radius,
        );
        renderer.fill_color(fill);
        renderer.fill();

        if !self.title.is_empty() {
            renderer.font_face(&theme.font_face_bold);
            renderer.font_size(theme.window_title_size);
            renderer.text_align(TextAlign::CENTER_MIDDLE);
            renderer.fill_color(theme.window_title_color);
            renderer.text(
                x + state.size.x as f32 / 2.0,
                y + self.header_height as f32 / 2.0,
                &self.title,
            );
        }
    }

    fn preferred_size(&self, state: &NodeState, renderer: &mut dyn Renderer, theme: &Theme) -> Vector2i {
        renderer.font_face(&theme.font_face_bold);
        renderer.font_size(theme.window_title_size);
        let bounds = renderer.text_bounds(0.0, 0.0, &self.title);
        let title = Vector2i::new(bounds.width() as i32 + 20, self.header_height);
        state.size.max(title)
    }

    fn mouse_button(
        &mut self,
        state: &mut NodeState,
        p: Vector2i,
        button: MouseButton,
        pressed: bool,
        _modifiers: Modifiers,
    ) -> bool {
        if button == MouseButton::Left {
            let local = p - state.position;
            self.dragging = pressed && local.y >= 0 && local.y < self.header_height;
        }
        // Windows swallow clicks so they never reach widgets underneath.
        true
    }

    fn mouse_drag(
        &mut self,
        state: &mut NodeState,
        _p: Vector2i,
        rel: Vector2i,
        buttons: ButtonMask,
        _modifiers: Modifiers,
    ) -> bool {
        if self.dragging && buttons.contains(ButtonMask::LEFT) {
            state.position = (state.position + rel).max(Vector2i::ZERO);
            return true;
        }
        false
    }

    fn scroll(&mut self, _state: &mut NodeState, _p: Vector2i, _delta: Vector2f) -> bool {
        true
    }
}

/// Panel attached to an owner window (menus, combo lists).
#[derive(Debug, Default)]
pub struct Popup;

impl Behavior for Popup {
    fn draw(&self, state: &NodeState, renderer: &mut dyn Renderer, theme: &Theme) {
        renderer.begin_path();
        renderer.rounded_rect(
            state.position.x as f32,
            state.position.y as f32,
            state.size.x as f32,
            state.size.y as f32,
            theme.window_corner_radius,
        );
        renderer.fill_color(theme.popup_fill);
        renderer.fill();
    }

    fn mouse_button(
        &mut self,
        _state: &mut NodeState,
        _p: Vector2i,
        _button: MouseButton,
        _pressed: bool,
        _modifiers: Modifiers,
    ) -> bool {
        true
    }

    fn scroll(&mut self, _state: &mut NodeState, _p: Vector2i, _delta: Vector2f) -> bool {
        true
    }
}
