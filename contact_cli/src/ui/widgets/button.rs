use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::colors::{self, blend, gradient, span_fraction, to_color};

/// Gradient submit control with the post-burst ripple flash
pub struct SubmitButton<'a> {
    label: &'a str,
    disabled: bool,
    focused: bool,
    ripple: f64,
}

impl<'a> SubmitButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            disabled: false,
            focused: false,
            ripple: 0.0,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Ripple opacity in `[0, 1]`
    pub fn ripple(mut self, opacity: f64) -> Self {
        self.ripple = opacity.clamp(0.0, 1.0);
        self
    }

    /// Preferred width: label plus padding
    pub fn width(&self) -> u16 {
        self.label.width() as u16 + 6
    }
}

impl Widget for SubmitButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mid_x = area.left() as f64 + area.width as f64 / 2.0;
        let mid_y = area.top() as f64 + area.height as f64 / 2.0;
        let half_w = (area.width as f64 / 2.0).max(1.0);
        let half_h = (area.height as f64 / 2.0).max(1.0);

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let mut rgb = gradient(
                    &[colors::GREEN, colors::BLUE],
                    span_fraction(x - area.left(), area.width),
                );
                if self.ripple > 0.0 {
                    let dx = (x as f64 + 0.5 - mid_x) / half_w;
                    let dy = (y as f64 + 0.5 - mid_y) / half_h;
                    let falloff = (1.0 - (dx * dx + dy * dy).sqrt() / 1.2).max(0.0);
                    rgb = blend(colors::WHITE, rgb, self.ripple * falloff);
                }
                if self.disabled {
                    rgb = blend(colors::SLATE_400, rgb, 0.45);
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_bg(to_color(rgb));
                }
            }
        }

        let label_width = self.label.width() as u16;
        let label_x = area.left() + area.width.saturating_sub(label_width) / 2;
        let label_y = area.top() + area.height / 2;
        let mut style = Style::default()
            .fg(to_color(colors::WHITE))
            .add_modifier(Modifier::BOLD);
        if self.focused && !self.disabled {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        // Keep each cell's gradient background under the label
        for (i, ch) in self.label.chars().enumerate() {
            let x = label_x + i as u16;
            if x >= area.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((x, label_y)) {
                cell.set_char(ch);
                cell.set_fg(style.fg.unwrap_or_default());
                cell.modifier = style.add_modifier;
            }
        }
    }
}
