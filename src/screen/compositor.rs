use super::Screen;
use crate::backend::Backend;
use crate::config::PixelRatioMode;
use crate::draw::{Renderer, TextAlign};
use crate::geometry::Vector2i;
use crate::theme::Theme;
use crate::tree::WidgetId;
use crate::widget::Role;

/// Tooltip opacity `elapsed` seconds after the last interaction, or `None`
/// while the tooltip is still hidden.
pub fn tooltip_alpha(elapsed: f64, theme: &Theme) -> Option<f32> {
    if elapsed < theme.tooltip_delay {
        return None;
    }
    let progress = if theme.tooltip_fade > 0.0 {
        ((elapsed - theme.tooltip_delay) / theme.tooltip_fade).min(1.0)
    } else {
        1.0
    };
    Some(progress as f32 * theme.tooltip_max_alpha)
}

impl<B: Backend, R: Renderer> Screen<B, R> {
    /// Render a complete frame: background, application content, widgets,
    /// then present.
    pub fn draw_all(&mut self) {
        if !self.visible() {
            return;
        }
        self.renderer.clear(self.background);
        self.hooks.draw_contents(&mut self.renderer);
        self.draw_widgets();
        self.backend.swap_buffers();
    }

    /// Paint the widget tree and any pending tooltip.
    pub fn draw_widgets(&mut self) {
        if !self.visible() {
            return;
        }
        if let Err(e) = self.backend.make_context_current() {
            log::error!("skipping frame: {e}");
            return;
        }

        self.refresh_sizes();
        self.refresh_popups();

        self.renderer
            .begin_frame(self.size.x, self.size.y, self.pixel_ratio);
        self.tree.draw(&mut self.renderer, &self.theme);

        let elapsed = self.backend.time() - self.last_interaction;
        if let Some(alpha) = tooltip_alpha(elapsed, &self.theme)
            && let Some(widget) = self.tree.find_widget(self.mouse_pos)
        {
            self.draw_tooltip(widget, alpha);
        }

        self.renderer.end_frame();
    }

    fn refresh_sizes(&mut self) {
        let fb_size = self.backend.framebuffer_size();
        let window_size = self.backend.window_size();
        match self.pixel_ratio_mode {
            PixelRatioMode::FromMonitor => {
                let ratio = self.backend.monitor_pixel_ratio();
                if ratio.is_finite() && ratio > 0.0 {
                    self.pixel_ratio = ratio;
                }
                self.size = window_size.scaled(1.0 / self.pixel_ratio);
                self.fb_size = self.size.scaled(self.pixel_ratio);
            }
            PixelRatioMode::FromFramebuffer => {
                self.fb_size = fb_size;
                self.size = window_size;
                if window_size.x != 0 {
                    self.pixel_ratio = fb_size.x as f32 / window_size.x as f32;
                }
            }
        }
        let root = self.tree.root();
        self.tree.set_size(root, self.size);
    }

    /// Place every popup at its owner's position plus its anchor, and hide
    /// popups whose owner is not showing.
    fn refresh_popups(&mut self) {
        let popups: Vec<(WidgetId, WidgetId, Vector2i)> = self
            .tree
            .children(self.tree.root())
            .iter()
            .filter_map(|&c| match self.tree.role(c) {
                Some(Role::Popup { owner, anchor }) => Some((c, owner, anchor)),
                _ => None,
            })
            .collect();
        for (popup, owner, anchor) in popups {
            if !self.tree.visible_recursive(owner) {
                self.tree.set_visible(popup, false);
                continue;
            }
            let position =
                self.tree.absolute_position(owner) - self.tree.parent_origin(popup) + anchor;
            self.tree.set_position(popup, position);
        }
    }

    fn draw_tooltip(&mut self, widget: WidgetId, alpha: f32) {
        let Some(state) = self.tree.state(widget) else {
            return;
        };
        if state.tooltip.is_empty() {
            return;
        }
        let theme = &self.theme;
        let r = &mut self.renderer;
        let anchor = self.tree.absolute_position(widget)
            + Vector2i::new(state.size.x / 2, state.size.y + theme.tooltip_offset);
        let (x, y) = (anchor.x as f32, anchor.y as f32);
        let width = theme.tooltip_width as f32;

        r.font_face(&theme.font_face);
        r.font_size(theme.tooltip_font_size);
        r.text_align(TextAlign::LEFT_TOP);
        r.text_line_height(theme.tooltip_line_height);

        let mut bounds = r.text_bounds(x, y, &state.tooltip);
        let mut half = (bounds.width() / 2.0).trunc();
        if half > width / 2.0 {
            r.text_align(TextAlign::CENTER_TOP);
            bounds = r.text_box_bounds(x, y, width, &state.tooltip);
            half = (bounds.width() / 2.0).trunc();
        }

        let pad = theme.tooltip_padding;
        r.global_alpha(alpha);
        r.begin_path();
        r.fill_color(theme.tooltip_bg_color);
        r.rounded_rect(
            bounds.min_x - pad - half,
            bounds.min_y - pad,
            bounds.width().trunc() + 2.0 * pad,
            bounds.height().trunc() + 2.0 * pad,
            theme.tooltip_corner_radius,
        );
        let px = ((bounds.max_x + bounds.min_x) / 2.0).trunc() - half;
        r.move_to(px, bounds.min_y - 10.0);
        r.line_to(px + theme.tooltip_arrow, bounds.min_y + 1.0);
        r.line_to(px - theme.tooltip_arrow, bounds.min_y + 1.0);
        r.fill();

        r.fill_color(theme.tooltip_text_color);
        r.font_blur(0.0);
        r.text_box(x - half, y, width, &state.tooltip);
    }
}
