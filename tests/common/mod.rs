//! Shared fixtures for screen integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use screenkit::{
    Action, Behavior, ButtonMask, DrawList, Headless, KeyCode, KeyEvent, Modifiers, MouseButton,
    NodeState, PixelRatioMode, Screen, ScreenConfig, Vector2f, Vector2i, WidgetId,
};

pub type TestScreen = Screen<Headless, DrawList>;

/// A notification received by a probe widget. Positions are exactly what
/// the handler was given (the widget's parent space).
#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    Button { at: Vector2i, button: MouseButton, pressed: bool },
    Motion { at: Vector2i, rel: Vector2i },
    Drag { at: Vector2i, rel: Vector2i },
    Enter { enter: bool },
    Scroll { at: Vector2i, delta: Vector2f },
    Focus(bool),
    Key(KeyCode),
    Char(char),
}

pub type Journal = Rc<RefCell<Vec<(&'static str, Note)>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Notes recorded by widget `name`, in order.
pub fn notes_for(journal: &Journal, name: &str) -> Vec<Note> {
    journal
        .borrow()
        .iter()
        .filter(|(n, _)| *n == name)
        .map(|(_, note)| note.clone())
        .collect()
}

/// Behavior that records every notification and consumes events when
/// `consume` is set.
pub struct Probe {
    name: &'static str,
    journal: Journal,
    consume: bool,
}

impl Probe {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            consume: false,
        }
    }

    pub fn consuming(name: &'static str, journal: &Journal) -> Self {
        Self {
            consume: true,
            ..Self::new(name, journal)
        }
    }

    fn note(&self, note: Note) -> bool {
        self.journal.borrow_mut().push((self.name, note));
        self.consume
    }
}

impl Behavior for Probe {
    fn mouse_button(
        &mut self,
        _state: &mut NodeState,
        p: Vector2i,
        button: MouseButton,
        pressed: bool,
        _modifiers: Modifiers,
    ) -> bool {
        self.note(Note::Button { at: p, button, pressed })
    }

    fn mouse_motion(
        &mut self,
        _state: &mut NodeState,
        p: Vector2i,
        rel: Vector2i,
        _buttons: ButtonMask,
        _modifiers: Modifiers,
    ) -> bool {
        self.note(Note::Motion { at: p, rel })
    }

    fn mouse_drag(
        &mut self,
        _state: &mut NodeState,
        p: Vector2i,
        rel: Vector2i,
        _buttons: ButtonMask,
        _modifiers: Modifiers,
    ) -> bool {
        self.note(Note::Drag { at: p, rel })
    }

    fn mouse_enter(&mut self, _state: &mut NodeState, _p: Vector2i, enter: bool) -> bool {
        self.note(Note::Enter { enter })
    }

    fn scroll(&mut self, _state: &mut NodeState, p: Vector2i, delta: Vector2f) -> bool {
        self.note(Note::Scroll { at: p, delta })
    }

    fn focus_event(&mut self, _state: &mut NodeState, focused: bool) -> bool {
        self.note(Note::Focus(focused))
    }

    fn keyboard(&mut self, _state: &mut NodeState, event: &KeyEvent) -> bool {
        self.note(Note::Key(event.key))
    }

    fn keyboard_character(&mut self, _state: &mut NodeState, codepoint: char) -> bool {
        self.note(Note::Char(codepoint))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Config with raw cursor coordinates: no offset, no pixel ratio scaling.
pub fn test_config() -> ScreenConfig {
    ScreenConfig {
        pixel_ratio_mode: PixelRatioMode::FromFramebuffer,
        cursor_offset: Vector2i::ZERO,
        ..ScreenConfig::default()
    }
}

/// An 800x600 headless screen.
pub fn screen() -> TestScreen {
    init_logging();
    Screen::new(Headless::new(Vector2i::new(800, 600)), DrawList::new(), test_config())
        .expect("headless screen")
}

pub fn place(screen: &mut TestScreen, id: WidgetId, pos: (i32, i32), size: (i32, i32)) {
    let tree = screen.tree_mut();
    tree.set_position(id, Vector2i::new(pos.0, pos.1));
    tree.set_size(id, Vector2i::new(size.0, size.1));
}

pub fn move_to(screen: &mut TestScreen, x: i32, y: i32) -> bool {
    screen.cursor_pos_callback(f64::from(x), f64::from(y))
}

pub fn press(screen: &mut TestScreen, button: MouseButton) -> bool {
    screen.mouse_button_callback(button, Action::Press, Modifiers::NONE)
}

pub fn release(screen: &mut TestScreen, button: MouseButton) -> bool {
    screen.mouse_button_callback(button, Action::Release, Modifiers::NONE)
}

pub fn click_at(screen: &mut TestScreen, x: i32, y: i32) {
    move_to(screen, x, y);
    press(screen, MouseButton::Left);
    release(screen, MouseButton::Left);
}
