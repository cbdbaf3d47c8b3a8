//! Widget showcase: opens a window with a few floating windows and a popup,
//! recording each frame into a draw list.
//!
//! Nothing is rasterized, so the OS window stays blank. Run with
//! `RUST_LOG=debug` to see each frame's draw commands summarized.

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window as OsWindow, WindowId};

use screenkit::platform::{WinitBackend, WinitInput};
use screenkit::{
    Cursor, DrawList, Error, Plain, Popup, Screen, ScreenConfig, ScreenHooks, Vector2i, Window,
};

const CONFIG_PATH: &str = "screenkit.ron";

/// Logs dropped files and resizes.
struct ShowcaseHooks;

impl ScreenHooks for ShowcaseHooks {
    fn drop_event(&mut self, paths: &[PathBuf]) -> bool {
        for path in paths {
            log::info!("dropped {}", path.display());
        }
        true
    }

    fn resize_event(&mut self, size: Vector2i) -> bool {
        log::debug!("showcase resized to {}x{}", size.x, size.y);
        true
    }
}

/// Populate the screen with the showcase widgets.
fn build_showcase(screen: &mut Screen<WinitBackend, DrawList>) {
    let tools = screen.add_window(Window::new("Tools"), false);
    screen.tree_mut().set_position(tools, Vector2i::new(40, 40));
    screen.tree_mut().set_size(tools, Vector2i::new(220, 180));
    if let Some(brush) = screen.add_widget(tools, Plain) {
        let tree = screen.tree_mut();
        tree.set_position(brush, Vector2i::new(10, 40));
        tree.set_size(brush, Vector2i::new(60, 24));
        tree.set_cursor(brush, Cursor::Hand);
        tree.set_tooltip(brush, "Paint with the current brush");
    }
    if let Some(text) = screen.add_widget(tools, Plain) {
        let tree = screen.tree_mut();
        tree.set_position(text, Vector2i::new(10, 80));
        tree.set_size(text, Vector2i::new(200, 24));
        tree.set_cursor(text, Cursor::IBeam);
        tree.set_tooltip(
            text,
            "Type a layer name here. Long tooltips wrap once they grow wider than the tooltip width.",
        );
    }
    if let Some(menu) = screen.add_popup(tools, Vector2i::new(230, 0), Popup) {
        screen.tree_mut().set_size(menu, Vector2i::new(120, 90));
    }

    let layers = screen.add_window(Window::new("Layers"), false);
    screen.tree_mut().set_position(layers, Vector2i::new(300, 120));
    screen.tree_mut().set_size(layers, Vector2i::new(200, 240));

    let about = screen.add_window(Window::new("About screenkit"), false);
    screen.tree_mut().set_size(about, Vector2i::new(260, 120));
    screen.center_window(about);
    screen.request_focus(about);

    log::info!("showcase built with {} widgets", screen.tree().len());
}

struct App {
    config: ScreenConfig,
    screen: Option<Screen<WinitBackend, DrawList>>,
    input: WinitInput,
    failure: Option<Error>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{error}");
        self.failure = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.screen.is_some() {
            return;
        }

        let attrs = OsWindow::default_attributes()
            .with_title(self.config.caption.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 600.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, Error::Platform(e.to_string())),
        };

        let backend = WinitBackend::new(window.clone(), self.config.pixel_ratio_mode);
        match Screen::new(backend, DrawList::new(), self.config.clone()) {
            Ok(mut screen) => {
                screen.set_hooks(Box::new(ShowcaseHooks));
                build_showcase(&mut screen);
                window.request_redraw();
                self.screen = Some(screen);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                screen.renderer_mut().clear_commands();
                screen.draw_all();
                log::debug!("frame recorded {} draw commands", screen.renderer().commands.len());
                // Keep redrawing so tooltips fade in without further input.
                screen.backend().window().request_redraw();
            }
            other => {
                if self.input.dispatch(screen, &other) {
                    log::trace!("event consumed by a widget");
                }
            }
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let config = ScreenConfig::load_or_default(CONFIG_PATH);
    let event_loop = EventLoop::new().map_err(|e| Error::Platform(e.to_string()))?;
    let mut app = App {
        config,
        screen: None,
        input: WinitInput::new(),
        failure: None,
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Platform(e.to_string()))?;

    match app.failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
