use contact_core::{FormField, InputKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::ui::colors::{self, gradient, span_fraction, to_color};

const BORDER_GLYPHS: [&str; 6] = ["─", "│", "╭", "╮", "╰", "╯"];

/// Rows a field needs including its border
pub fn field_height(field: FormField) -> u16 {
    match field.input_kind() {
        InputKind::TextArea { rows } => rows + 2,
        InputKind::Email | InputKind::Text => 3,
    }
}

/// Line index and column of char offset `cursor` within `value`
pub fn locate_cursor(value: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in value.chars().take(cursor) {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// A labelled input box; the focused one gets the gradient glow border
pub struct FieldWidget<'a> {
    field: FormField,
    value: &'a str,
    cursor: usize,
    focused: bool,
}

impl<'a> FieldWidget<'a> {
    pub fn new(field: FormField, value: &'a str) -> Self {
        Self {
            field,
            value,
            cursor: value.chars().count(),
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    fn inner(area: Rect) -> Rect {
        Block::bordered().inner(area)
    }

    /// Scroll offsets (rows, columns) keeping the cursor inside `inner`
    fn scroll(&self, inner: Rect) -> (usize, usize) {
        let (line, col) = locate_cursor(self.value, self.cursor);
        let rows = inner.height.max(1) as usize;
        let cols = inner.width.max(1) as usize;
        (
            (line + 1).saturating_sub(rows),
            (col + 1).saturating_sub(cols),
        )
    }

    /// Terminal position of the text cursor when rendered into `area`
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let inner = Self::inner(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let (line, col) = locate_cursor(self.value, self.cursor);
        let (row_off, col_off) = self.scroll(inner);
        Some((
            inner.x + (col - col_off) as u16,
            inner.y + (line - row_off) as u16,
        ))
    }

    fn paint_glow(&self, area: Rect, buf: &mut Buffer) {
        let bottom = area.bottom().saturating_sub(1);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let on_edge = y == area.top() || y == bottom || x == area.left() || x + 1 == area.right();
                if !on_edge {
                    continue;
                }
                let t = span_fraction(x - area.left(), area.width);
                let rgb = if y == bottom {
                    gradient(&[colors::GREEN, colors::TEAL, colors::BLUE], t)
                } else {
                    gradient(&[colors::GREEN, colors::BLUE], t)
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    // Leave the label on the top edge alone
                    if BORDER_GLYPHS.contains(&cell.symbol()) {
                        cell.set_fg(to_color(rgb));
                    }
                }
            }
        }
    }
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let border_style = if self.focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(to_color(colors::SLATE_200))
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(to_color(colors::WHITE)))
            .title(Line::from(Span::styled(
                format!(" {} ", self.field.label()),
                Style::default()
                    .fg(to_color(colors::NAVY))
                    .bg(to_color(colors::WHITE))
                    .add_modifier(Modifier::BOLD),
            )));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.focused {
            self.paint_glow(area, buf);
        }

        let lines: Vec<Line> = if self.value.is_empty() {
            vec![Line::from(Span::styled(
                self.field.placeholder(),
                Style::default().fg(to_color(colors::SLATE_400)),
            ))]
        } else {
            let (row_off, col_off) = self.scroll(inner);
            self.value
                .split('\n')
                .skip(row_off)
                .take(inner.height as usize)
                .map(|line| {
                    let visible: String = line
                        .chars()
                        .skip(col_off)
                        .take(inner.width as usize)
                        .collect();
                    Line::from(Span::styled(
                        visible,
                        Style::default().fg(to_color(colors::SLATE_900)),
                    ))
                })
                .collect()
        };

        Paragraph::new(lines)
            .style(Style::default().bg(to_color(colors::WHITE)))
            .render(inner, buf);
    }
}
