//! Event routing through a headless screen: hit-testing, focus, pointer
//! capture, modality, keyboard routing, tooltips and resize handling.

mod common;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use common::*;
use screenkit::{
    Action, ButtonMask, Cursor, DrawCommand, Drag, Headless, KeyCode, Modifiers, MouseButton,
    PixelRatioMode, Plain, Popup, Screen, ScreenConfig, ScreenHooks, Vector2f, Vector2i, Window,
};

// ---------------------------------------------------------------------------
// Pointer capture
// ---------------------------------------------------------------------------

#[test]
fn captured_motion_goes_to_pressed_widget() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::consuming("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 15, 15);
    press(&mut s, MouseButton::Left);
    assert_eq!(s.drag(), Drag::Active(b));
    let hover_before = s.hover_path().to_vec();
    let cursor_calls_before = s.backend().cursor_calls.len();
    j.borrow_mut().clear();

    assert!(move_to(&mut s, 100, 100));

    assert_eq!(
        notes_for(&j, "B"),
        vec![Note::Drag {
            at: Vector2i::new(100, 100),
            rel: Vector2i::new(85, 85),
        }]
    );
    assert!(notes_for(&j, "A").is_empty());
    assert_eq!(s.hover_path(), hover_before.as_slice());
    assert_eq!(s.backend().cursor_calls.len(), cursor_calls_before);
    assert_eq!(s.mouse_pos(), Vector2i::new(100, 100));
}

#[test]
fn capture_with_default_offset_on_scaled_monitor() {
    init_logging();
    let mut backend = Headless::new(Vector2i::new(1600, 1200));
    backend.pixel_ratio = 2.0;
    let config = ScreenConfig {
        pixel_ratio_mode: PixelRatioMode::FromMonitor,
        ..ScreenConfig::default()
    };
    let mut s = Screen::new(backend, screenkit::DrawList::new(), config).expect("screen");
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    s.tree_mut().set_size(a, Vector2i::new(200, 200));
    let b = s.add_widget(a, Probe::consuming("B", &j)).expect("window exists");
    s.tree_mut().set_position(b, Vector2i::new(10, 10));
    s.tree_mut().set_size(b, Vector2i::new(20, 20));

    // Raw device coordinates: halved, then shifted by the (1, 2) offset.
    s.cursor_pos_callback(32.0, 34.0);
    assert_eq!(s.mouse_pos(), Vector2i::new(15, 15));
    s.mouse_button_callback(MouseButton::Left, Action::Press, Modifiers::NONE);
    assert_eq!(s.drag(), Drag::Active(b));
    j.borrow_mut().clear();

    assert!(s.cursor_pos_callback(202.0, 204.0));
    assert_eq!(
        notes_for(&j, "B"),
        vec![Note::Drag {
            at: Vector2i::new(100, 100),
            rel: Vector2i::new(85, 85),
        }]
    );
    assert!(notes_for(&j, "A").is_empty());
}

#[test]
fn drag_position_is_in_parent_space() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (100, 50), (300, 300));
    let b = s.add_widget(a, Probe::consuming("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 115, 65);
    press(&mut s, MouseButton::Left);
    j.borrow_mut().clear();

    move_to(&mut s, 200, 200);
    assert_eq!(
        notes_for(&j, "B"),
        vec![Note::Drag {
            at: Vector2i::new(100, 150),
            rel: Vector2i::new(85, 135),
        }]
    );
}

#[test]
fn unconsumed_drag_falls_through_to_motion() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::new("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 15, 15);
    press(&mut s, MouseButton::Left);
    j.borrow_mut().clear();

    move_to(&mut s, 100, 100);
    assert_eq!(notes_for(&j, "B").len(), 1);
    assert_eq!(
        notes_for(&j, "A"),
        vec![Note::Motion {
            at: Vector2i::new(100, 100),
            rel: Vector2i::new(85, 85),
        }]
    );
}

#[test]
fn release_elsewhere_notifies_captured_widget() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::consuming("A", &j), false);
    place(&mut s, a, (0, 0), (300, 300));
    let b = s.add_widget(a, Probe::consuming("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 15, 15);
    press(&mut s, MouseButton::Left);
    move_to(&mut s, 200, 200);
    j.borrow_mut().clear();

    release(&mut s, MouseButton::Left);
    assert_eq!(s.drag(), Drag::Idle);
    assert_eq!(
        notes_for(&j, "B"),
        vec![Note::Button {
            at: Vector2i::new(200, 200),
            button: MouseButton::Left,
            pressed: false,
        }]
    );
    assert_eq!(
        notes_for(&j, "A"),
        vec![Note::Button {
            at: Vector2i::new(200, 200),
            button: MouseButton::Left,
            pressed: false,
        }]
    );
}

#[test]
fn release_over_captured_widget_is_delivered_once() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::consuming("A", &j), false);
    place(&mut s, a, (0, 0), (300, 300));

    move_to(&mut s, 50, 50);
    press(&mut s, MouseButton::Left);
    j.borrow_mut().clear();
    release(&mut s, MouseButton::Left);

    let releases = notes_for(&j, "A")
        .into_iter()
        .filter(|n| matches!(n, Note::Button { pressed: false, .. }))
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn only_primary_and_secondary_buttons_capture() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (300, 300));
    move_to(&mut s, 50, 50);

    press(&mut s, MouseButton::Right);
    assert_eq!(s.drag(), Drag::Active(a));
    release(&mut s, MouseButton::Right);
    assert_eq!(s.drag(), Drag::Idle);

    press(&mut s, MouseButton::Middle);
    assert_eq!(s.drag(), Drag::Idle);
    assert!(s.mouse_state().contains(ButtonMask::MIDDLE));
}

#[test]
fn pressing_on_background_clears_focus() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (100, 100));
    click_at(&mut s, 50, 50);
    assert_eq!(s.focus_path(), &[a, s.root()]);

    move_to(&mut s, 700, 500);
    press(&mut s, MouseButton::Left);
    assert!(s.focus_path().is_empty());
    assert_eq!(s.drag(), Drag::Idle);
}

#[test]
fn title_bar_drag_moves_window() {
    let mut s = screen();
    let w = s.add_window(Window::new("Palette"), false);
    place(&mut s, w, (100, 100), (200, 150));

    move_to(&mut s, 150, 110);
    press(&mut s, MouseButton::Left);
    move_to(&mut s, 170, 140);
    release(&mut s, MouseButton::Left);

    assert_eq!(s.tree().state(w).map(|st| st.position), Some(Vector2i::new(120, 130)));
    assert_eq!(s.drag(), Drag::Idle);
}

// ---------------------------------------------------------------------------
// Hover and cursor
// ---------------------------------------------------------------------------

#[test]
fn cursor_changes_only_reach_backend_on_change() {
    let mut s = screen();
    let j = journal();
    let link = s.add_widget(s.root(), Probe::new("link", &j)).expect("root exists");
    place(&mut s, link, (100, 100), (50, 20));
    s.tree_mut().set_cursor(link, Cursor::Hand);

    move_to(&mut s, 10, 10);
    move_to(&mut s, 110, 105);
    move_to(&mut s, 120, 110);
    move_to(&mut s, 300, 300);
    move_to(&mut s, 310, 300);

    assert_eq!(s.backend().cursor_calls, vec![Cursor::Hand, Cursor::Arrow]);
    assert_eq!(s.cursor(), Cursor::Arrow);
}

#[test]
fn hover_chain_sends_enter_and_leave() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::new("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 15, 15);
    let enters: Vec<_> = j
        .borrow()
        .iter()
        .filter(|(_, n)| matches!(n, Note::Enter { .. }))
        .cloned()
        .collect();
    assert_eq!(
        enters,
        vec![("A", Note::Enter { enter: true }), ("B", Note::Enter { enter: true })]
    );
    assert_eq!(s.hover_path(), &[b, a, s.root()]);

    j.borrow_mut().clear();
    move_to(&mut s, 100, 100);
    assert!(notes_for(&j, "B").contains(&Note::Enter { enter: false }));
    assert!(!notes_for(&j, "A").iter().any(|n| matches!(n, Note::Enter { .. })));

    j.borrow_mut().clear();
    move_to(&mut s, 500, 500);
    assert!(notes_for(&j, "A").contains(&Note::Enter { enter: false }));
    assert_eq!(s.hover_path(), &[s.root()]);
}

#[test]
fn cursor_offset_and_monitor_ratio_apply_to_motion() {
    init_logging();
    let mut backend = Headless::new(Vector2i::new(1600, 1200));
    backend.pixel_ratio = 2.0;
    let config = ScreenConfig {
        pixel_ratio_mode: PixelRatioMode::FromMonitor,
        ..ScreenConfig::default()
    };
    let mut s = Screen::new(backend, screenkit::DrawList::new(), config).expect("screen");
    assert_eq!(s.size(), Vector2i::new(800, 600));

    s.cursor_pos_callback(200.0, 100.0);
    // Default cursor offset is (1, 2).
    assert_eq!(s.mouse_pos(), Vector2i::new(99, 48));
}

#[test]
fn extreme_cursor_coordinates_saturate() {
    init_logging();
    let config = ScreenConfig {
        pixel_ratio_mode: PixelRatioMode::FromFramebuffer,
        ..ScreenConfig::default()
    };
    let mut s = Screen::new(Headless::new(Vector2i::new(800, 600)), screenkit::DrawList::new(), config)
        .expect("screen");

    assert!(!s.cursor_pos_callback(-1e12, 1e12));
    assert_eq!(s.mouse_pos(), Vector2i::new(i32::MIN, i32::MAX - 2));
    assert_eq!(s.hover_path(), &[s.root()]);
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn left_press_focuses_hit_widget() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::new("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    click_at(&mut s, 15, 15);
    assert_eq!(s.focus_path(), &[b, a, s.root()]);
    // Gained root to leaf.
    let gained: Vec<_> = j
        .borrow()
        .iter()
        .filter(|(_, n)| *n == Note::Focus(true))
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(gained, vec!["A", "B"]);
}

#[test]
fn right_press_does_not_move_focus() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    move_to(&mut s, 50, 50);
    press(&mut s, MouseButton::Right);
    assert!(s.focus_path().is_empty());
}

#[test]
fn refocus_notifies_each_lost_widget_once() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    let f1 = s.add_widget(a, Probe::new("f1", &j)).expect("window exists");
    let b = s.add_window(Probe::new("B", &j), false);
    let f2 = s.add_widget(b, Probe::new("f2", &j)).expect("window exists");

    s.update_focus(Some(f1));
    j.borrow_mut().clear();
    s.update_focus(Some(f2));

    assert_eq!(notes_for(&j, "f1"), vec![Note::Focus(false)]);
    assert_eq!(notes_for(&j, "A"), vec![Note::Focus(false)]);
    assert_eq!(notes_for(&j, "B"), vec![Note::Focus(true)]);
    assert_eq!(notes_for(&j, "f2"), vec![Note::Focus(true)]);
    assert_eq!(s.focus_path(), &[f2, b, s.root()]);
    assert_eq!(s.tree().children(s.root()).last(), Some(&b));
}

#[test]
fn disposing_focused_child_lets_its_window_refocus() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (300, 300));
    let field = s.add_widget(a, Probe::new("field", &j)).expect("window exists");
    place(&mut s, field, (10, 40), (100, 20));
    let b = s.add_window(Probe::new("B", &j), false);
    place(&mut s, b, (400, 0), (200, 200));

    s.update_focus(Some(field));
    j.borrow_mut().clear();
    s.dispose_window(field);
    assert_eq!(notes_for(&j, "A"), vec![Note::Focus(false)]);
    assert!(!s.tree().state(a).is_some_and(|st| st.focused));

    s.request_focus(b);
    assert_eq!(notes_for(&j, "A"), vec![Note::Focus(false)]);

    click_at(&mut s, 100, 150);
    assert_eq!(s.focus_path(), &[a, s.root()]);
    assert_eq!(s.tree().children(s.root()), &[b, a]);
}

// ---------------------------------------------------------------------------
// Modality
// ---------------------------------------------------------------------------

#[test]
fn modal_window_blocks_outside_buttons_and_scroll() {
    let mut s = screen();
    let j = journal();
    let behind = s.add_window(Probe::consuming("behind", &j), false);
    place(&mut s, behind, (400, 300), (200, 200));
    let dialog = s.add_window(Probe::consuming("dialog", &j), true);
    place(&mut s, dialog, (100, 100), (200, 100));
    let field = s.add_widget(dialog, Probe::new("field", &j)).expect("dialog exists");
    place(&mut s, field, (10, 40), (50, 20));
    s.request_focus(field);
    assert_eq!(s.active_modal(), Some(dialog));

    move_to(&mut s, 450, 350);
    let focus_before = s.focus_path().to_vec();
    j.borrow_mut().clear();

    assert!(!press(&mut s, MouseButton::Left));
    assert!(!s.scroll_callback(0.0, 1.0));

    assert!(s.mouse_state().is_empty());
    assert_eq!(s.focus_path(), focus_before.as_slice());
    assert_eq!(s.drag(), Drag::Idle);
    assert!(notes_for(&j, "behind").is_empty());
    assert!(notes_for(&j, "dialog").is_empty());
}

#[test]
fn modal_window_accepts_inside_buttons() {
    let mut s = screen();
    let j = journal();
    let dialog = s.add_window(Probe::consuming("dialog", &j), true);
    place(&mut s, dialog, (100, 100), (200, 100));
    let field = s.add_widget(dialog, Probe::new("field", &j)).expect("dialog exists");
    place(&mut s, field, (10, 40), (50, 20));
    s.request_focus(dialog);

    move_to(&mut s, 120, 150);
    j.borrow_mut().clear();
    assert!(press(&mut s, MouseButton::Left));
    assert_eq!(s.drag(), Drag::Active(field));
    assert_eq!(s.focus_path(), &[field, dialog, s.root()]);
}

// ---------------------------------------------------------------------------
// Scroll and bubbling
// ---------------------------------------------------------------------------

#[test]
fn scroll_bubbles_until_consumed() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::consuming("A", &j), false);
    place(&mut s, a, (50, 50), (200, 200));
    let b = s.add_widget(a, Probe::new("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 65, 65);
    j.borrow_mut().clear();
    assert!(s.scroll_callback(0.0, 2.5));
    assert_eq!(
        notes_for(&j, "B"),
        vec![Note::Scroll {
            at: Vector2i::new(15, 15),
            delta: Vector2f::new(0.0, 2.5),
        }]
    );
    assert_eq!(
        notes_for(&j, "A"),
        vec![Note::Scroll {
            at: Vector2i::new(65, 65),
            delta: Vector2f::new(0.0, 2.5),
        }]
    );
}

#[test]
fn disabled_widgets_are_skipped() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::consuming("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::consuming("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));
    s.tree_mut().set_enabled(b, false);

    move_to(&mut s, 15, 15);
    j.borrow_mut().clear();
    assert!(press(&mut s, MouseButton::Left));
    assert!(!notes_for(&j, "B").iter().any(|n| matches!(n, Note::Button { .. })));
    assert!(notes_for(&j, "A").iter().any(|n| matches!(n, Note::Button { pressed: true, .. })));
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

fn key(s: &mut TestScreen, code: KeyCode) -> bool {
    s.key_callback(code, 0, Action::Press, Modifiers::NONE)
}

#[test]
fn keys_go_to_focused_leaf_first() {
    let mut s = screen();
    let j = journal();
    let w = s.add_window(Probe::new("W", &j), false);
    let field = s.add_widget(w, Probe::consuming("field", &j)).expect("window exists");
    s.request_focus(field);
    j.borrow_mut().clear();

    assert!(key(&mut s, KeyCode::KeyA));
    assert!(s.char_callback('a'));
    assert_eq!(
        notes_for(&j, "field"),
        vec![Note::Key(KeyCode::KeyA), Note::Char('a')]
    );
    assert!(notes_for(&j, "W").is_empty());
}

#[test]
fn unconsumed_keys_move_outward() {
    let mut s = screen();
    let j = journal();
    let w = s.add_window(Probe::consuming("W", &j), false);
    let field = s.add_widget(w, Probe::new("field", &j)).expect("window exists");
    s.request_focus(field);
    j.borrow_mut().clear();

    assert!(key(&mut s, KeyCode::Enter));
    let order: Vec<_> = j.borrow().iter().map(|(name, _)| *name).collect();
    assert_eq!(order, vec!["field", "W"]);
}

#[test]
fn disabled_focused_widget_is_skipped_for_keys() {
    let mut s = screen();
    let j = journal();
    let w = s.add_window(Probe::consuming("W", &j), false);
    let field = s.add_widget(w, Probe::consuming("field", &j)).expect("window exists");
    s.request_focus(field);
    s.tree_mut().set_enabled(field, false);
    j.borrow_mut().clear();

    assert!(key(&mut s, KeyCode::Tab));
    assert!(notes_for(&j, "field").is_empty());
    assert_eq!(notes_for(&j, "W"), vec![Note::Key(KeyCode::Tab)]);
}

#[test]
fn keys_without_focus_are_unhandled() {
    let mut s = screen();
    s.backend_mut().time = 4.0;
    assert!(!key(&mut s, KeyCode::Escape));
    assert!(!s.char_callback('x'));
    assert_eq!(s.last_interaction(), 4.0);
}

// ---------------------------------------------------------------------------
// Tooltip timing and frames
// ---------------------------------------------------------------------------

fn tooltip_screen(text: &str) -> TestScreen {
    let mut s = screen();
    let tip = s.add_widget(s.root(), Plain).expect("root exists");
    place(&mut s, tip, (100, 100), (50, 20));
    s.tree_mut().set_tooltip(tip, text);
    s.backend_mut().time = 2.0;
    move_to(&mut s, 110, 110);
    s
}

fn frame_at(s: &mut TestScreen, time: f64) {
    s.backend_mut().time = time;
    s.renderer_mut().clear_commands();
    s.draw_all();
}

#[test]
fn tooltip_hidden_before_delay() {
    let mut s = tooltip_screen("Zoom");
    frame_at(&mut s, 2.2);
    assert_eq!(s.renderer().last_alpha(), None);
    assert!(!s.renderer().texts().contains(&"Zoom"));
}

#[test]
fn tooltip_fades_in_after_delay() {
    let mut s = tooltip_screen("Zoom");
    assert_eq!(s.last_interaction(), 2.0);

    frame_at(&mut s, 2.5);
    assert_eq!(s.renderer().last_alpha(), Some(0.0));
    assert!(s.renderer().texts().contains(&"Zoom"));

    frame_at(&mut s, 3.0);
    assert_eq!(s.renderer().last_alpha(), Some(0.8));

    frame_at(&mut s, 9.0);
    assert_eq!(s.renderer().last_alpha(), Some(0.8));
}

#[test]
fn long_tooltip_wraps_at_theme_width() {
    let text = "This tooltip is long enough that it has to be wrapped onto several lines";
    let mut s = tooltip_screen(text);
    frame_at(&mut s, 3.0);
    let commands = &s.renderer().commands;
    let overlay = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::GlobalAlpha(_)))
        .expect("tooltip drawn");
    let box_width = commands[overlay..].iter().find_map(|c| match c {
        DrawCommand::RoundedRect { w, .. } => Some(*w),
        _ => None,
    });
    // Wrapped text plus 4px padding on each side.
    assert!(box_width.is_some_and(|w| w <= 158.0));
    assert!(commands.iter().any(|c| {
        matches!(c, DrawCommand::TextBox { break_width, text: t, .. } if *break_width == 150.0 && t == text)
    }));
}

#[test]
fn interaction_resets_tooltip_clock() {
    let mut s = tooltip_screen("Zoom");
    s.backend_mut().time = 5.0;
    move_to(&mut s, 112, 110);
    frame_at(&mut s, 5.2);
    assert_eq!(s.renderer().last_alpha(), None);
}

#[test]
fn draw_all_clears_and_presents() {
    let mut s = screen();
    s.draw_all();
    assert_eq!(s.backend().swaps, 1);
    assert_eq!(s.renderer().commands.first(), Some(&DrawCommand::Clear(s.background())));
    assert_eq!(s.renderer().frames(), 1);

    s.set_visible(false);
    s.draw_all();
    assert_eq!(s.backend().swaps, 1);
}

#[test]
fn lost_context_skips_frame() {
    let mut s = screen();
    s.backend_mut().context_lost = true;
    s.draw_widgets();
    assert_eq!(s.renderer().frames(), 0);
}

#[test]
fn draw_contents_runs_before_widgets() {
    struct Backdrop;
    impl ScreenHooks for Backdrop {
        fn draw_contents(&mut self, renderer: &mut dyn screenkit::Renderer) {
            renderer.text(0.0, 0.0, "backdrop");
        }
    }

    let mut s = screen();
    let w = s.add_window(Window::new("front"), false);
    place(&mut s, w, (10, 10), (100, 100));
    s.set_hooks(Box::new(Backdrop));
    s.draw_all();
    assert_eq!(s.renderer().texts(), vec!["backdrop", "front"]);
}

#[test]
fn popups_follow_their_owner() {
    let mut s = screen();
    let w = s.add_window(Window::new("owner"), false);
    place(&mut s, w, (100, 100), (200, 100));
    let menu = s.add_popup(w, Vector2i::new(210, 0), Popup).expect("owner exists");
    place(&mut s, menu, (0, 0), (80, 60));

    s.draw_all();
    assert_eq!(s.tree().state(menu).map(|st| st.position), Some(Vector2i::new(310, 100)));

    s.tree_mut().set_position(w, Vector2i::new(50, 20));
    s.draw_all();
    assert_eq!(s.tree().state(menu).map(|st| st.position), Some(Vector2i::new(260, 20)));

    s.tree_mut().set_visible(w, false);
    s.draw_all();
    assert_eq!(s.tree().state(menu).map(|st| st.visible), Some(false));
}

// ---------------------------------------------------------------------------
// Resize, drop, disposal
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Recorder {
    drops: Rc<RefCell<Vec<PathBuf>>>,
    resizes: Rc<RefCell<Vec<Vector2i>>>,
}

impl ScreenHooks for Recorder {
    fn drop_event(&mut self, paths: &[PathBuf]) -> bool {
        self.drops.borrow_mut().extend_from_slice(paths);
        true
    }

    fn resize_event(&mut self, size: Vector2i) -> bool {
        self.resizes.borrow_mut().push(size);
        true
    }
}

#[test]
fn clicking_popup_owner_inside_window_keeps_popup_on_top() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let field = s.add_widget(a, Probe::new("field", &j)).expect("window exists");
    place(&mut s, field, (10, 40), (100, 20));
    let menu = s.add_popup(field, Vector2i::new(0, 20), Popup).expect("owner exists");
    let b = s.add_window(Probe::new("B", &j), false);
    place(&mut s, b, (300, 0), (200, 200));

    click_at(&mut s, 20, 50);
    assert_eq!(s.focus_path(), &[field, a, s.root()]);
    assert_eq!(s.tree().children(s.root()), &[b, a, menu]);
}

#[test]
fn degenerate_resize_is_rejected() {
    let mut s = screen();
    s.backend_mut().window_size = Vector2i::ZERO;
    s.backend_mut().framebuffer_size = Vector2i::ZERO;
    assert!(!s.resize_callback());
    assert_eq!(s.size(), Vector2i::new(800, 600));
    assert_eq!(s.framebuffer_size(), Vector2i::new(800, 600));
}

#[test]
fn resize_updates_root_and_notifies_hook() {
    let mut s = screen();
    let recorder = Recorder::default();
    let resizes = recorder.resizes.clone();
    s.set_hooks(Box::new(recorder));

    s.backend_mut().window_size = Vector2i::new(1024, 768);
    s.backend_mut().framebuffer_size = Vector2i::new(1024, 768);
    s.backend_mut().time = 7.0;
    assert!(s.resize_callback());

    assert_eq!(s.size(), Vector2i::new(1024, 768));
    assert_eq!(s.tree().state(s.root()).map(|st| st.size), Some(Vector2i::new(1024, 768)));
    assert_eq!(s.last_interaction(), 7.0);
    assert_eq!(*resizes.borrow(), vec![Vector2i::new(1024, 768)]);
}

#[test]
fn dropped_files_reach_hook() {
    let mut s = screen();
    let paths = vec![PathBuf::from("a.png"), PathBuf::from("notes/b.txt")];
    assert!(!s.drop_callback(&paths));

    let recorder = Recorder::default();
    let drops = recorder.drops.clone();
    s.set_hooks(Box::new(recorder));
    assert!(s.drop_callback(&paths));
    assert_eq!(*drops.borrow(), paths);
}

#[test]
fn disposing_window_releases_capture_focus_and_hover() {
    let mut s = screen();
    let j = journal();
    let a = s.add_window(Probe::new("A", &j), false);
    place(&mut s, a, (0, 0), (200, 200));
    let b = s.add_widget(a, Probe::new("B", &j)).expect("window exists");
    place(&mut s, b, (10, 10), (20, 20));

    move_to(&mut s, 15, 15);
    press(&mut s, MouseButton::Left);
    assert_eq!(s.drag(), Drag::Active(b));

    s.dispose_window(a);
    assert_eq!(s.drag(), Drag::Idle);
    assert!(s.focus_path().is_empty());
    assert_eq!(s.hover_path(), &[s.root()]);

    // Routing keeps working against the pruned tree.
    assert!(!move_to(&mut s, 20, 20));
    assert!(!release(&mut s, MouseButton::Left));
}

#[test]
fn clipboard_passes_through_backend() {
    let mut s = screen();
    s.set_clipboard_string("copied");
    assert_eq!(s.clipboard_string().as_deref(), Some("copied"));
}
