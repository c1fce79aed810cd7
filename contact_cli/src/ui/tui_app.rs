use anyhow::Result;
use contact_core::{ContactWidget, FieldIssue, FormField};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use crate::ui::colors::{self, gradient, page_background, span_fraction, to_color};
use crate::ui::widgets::field::field_height;
use crate::ui::widgets::{BurstLayer, FieldWidget, StatusLine, SubmitButton};

const BRAND_MARK: &str = "★ Together Learning";
const TITLE: &str = "Contact Together Learning";
const SUBTITLE: &str = "We usually respond within 1–2 business days.";
const FOOTER: &str = "We send to hello@togetherlearning.com";

const CARD_MAX_WIDTH: u16 = 64;
const HEADER_HEIGHT: u16 = 4;

/// How often the loop redraws
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Focusable parts of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    Submit,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Field(FormField::Message) => Focus::Submit,
            Focus::Field(field) => Focus::Field(field.next()),
            Focus::Submit => Focus::Field(FormField::Email),
        }
    }

    pub fn previous(self) -> Focus {
        match self {
            Focus::Field(FormField::Email) => Focus::Submit,
            Focus::Field(field) => Focus::Field(field.previous()),
            Focus::Submit => Focus::Field(FormField::Message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Rectangles of one rendered frame
struct CardLayout {
    card: Rect,
    header: Rect,
    title: Rect,
    subtitle: Rect,
    fields: [Rect; 3],
    status: Rect,
    footer: Rect,
    button: Rect,
}

fn card_height() -> u16 {
    let fields: u16 = FormField::ALL.iter().map(|f| field_height(*f)).sum();
    // header, gap, title, subtitle, gap, fields (+1 gap each), status, button
    HEADER_HEIGHT + 1 + 1 + 1 + 1 + fields + FormField::ALL.len() as u16 + 1 + 3 + 1
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn compute_layout(area: Rect, button_width: u16) -> CardLayout {
    let card = centered(area, CARD_MAX_WIDTH, card_height());
    let body = Rect::new(
        card.x + 3,
        card.y,
        card.width.saturating_sub(6),
        card.height,
    );

    let mut constraints = vec![
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ];
    for field in FormField::ALL {
        constraints.push(Constraint::Length(field_height(field)));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(button_width)])
        .split(rows[12]);

    CardLayout {
        card,
        header: Rect::new(card.x, rows[0].y, card.width, rows[0].height),
        title: rows[2],
        subtitle: rows[3],
        fields: [rows[5], rows[7], rows[9]],
        status: rows[11],
        footer: Rect::new(bottom[0].x, bottom[0].y + 1, bottom[0].width, 1),
        button: bottom[1],
    }
}

fn field_index(field: FormField) -> usize {
    match field {
        FormField::Email => 0,
        FormField::Subject => 1,
        FormField::Message => 2,
    }
}

fn byte_index(value: &str, cursor: usize) -> usize {
    value
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

/// Browser-style message for a field that blocks submission
fn validation_hint(widget: &ContactWidget, field: FormField, issue: FieldIssue) -> String {
    match issue {
        FieldIssue::Missing => format!("{}: Please fill out this field.", field.label()),
        FieldIssue::MissingAt => format!(
            "Please include an '@' in the email address. '{}' is missing an '@'.",
            widget.field(field).trim()
        ),
        FieldIssue::Malformed => "Please enter a valid email address.".to_string(),
    }
}

/// Widget plus the purely visual state around it
pub struct AppState {
    pub widget: ContactWidget,
    pub focus: Focus,
    cursors: [usize; 3],
    hint: Option<String>,
}

impl AppState {
    pub fn new(widget: ContactWidget) -> Self {
        Self {
            widget,
            focus: Focus::Field(FormField::Email),
            cursors: [0; 3],
            hint: None,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn cursor(&self, field: FormField) -> usize {
        self.cursors[field_index(field)]
    }

    /// Apply finished background work and keep cursors inside their values
    pub fn sync(&mut self) {
        self.widget.poll_events();
        for field in FormField::ALL {
            let len = self.widget.field(field).chars().count();
            let cursor = &mut self.cursors[field_index(field)];
            *cursor = (*cursor).min(len);
        }
    }

    fn edit<F>(&mut self, field: FormField, f: F)
    where
        F: FnOnce(&mut String, &mut usize),
    {
        let mut value = self.widget.field(field).to_string();
        let mut cursor = self.cursor(field).min(value.chars().count());
        f(&mut value, &mut cursor);
        self.widget.set_field(field, value);
        self.cursors[field_index(field)] = cursor;
        self.hint = None;
    }

    fn insert_char(&mut self, field: FormField, c: char) {
        self.edit(field, |value, cursor| {
            let at = byte_index(value, *cursor);
            value.insert(at, c);
            *cursor += 1;
        });
    }

    /// Run the native-style checks, then hand over to the widget
    pub fn submit(&mut self) {
        if self.widget.is_loading() {
            return;
        }
        if let Some((field, issue)) = self.widget.validation_target() {
            tracing::debug!("Submit blocked on #{}: {:?}", field.element_id(), issue);
            self.hint = Some(validation_hint(&self.widget, field, issue));
            self.focus = Focus::Field(field);
            return;
        }
        self.hint = None;
        self.widget.submit();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => match self.focus {
                Focus::Field(FormField::Message) => self.insert_char(FormField::Message, '\n'),
                _ => self.submit(),
            },
            KeyCode::Char(' ') if self.focus == Focus::Submit => self.submit(),
            KeyCode::Char(c) if !ctrl => {
                if let Focus::Field(field) = self.focus {
                    self.insert_char(field, c);
                }
            }
            KeyCode::Backspace => {
                if let Focus::Field(field) = self.focus {
                    self.edit(field, |value, cursor| {
                        if *cursor > 0 {
                            *cursor -= 1;
                            let at = byte_index(value, *cursor);
                            value.remove(at);
                        }
                    });
                }
            }
            KeyCode::Delete => {
                if let Focus::Field(field) = self.focus {
                    self.edit(field, |value, cursor| {
                        if *cursor < value.chars().count() {
                            let at = byte_index(value, *cursor);
                            value.remove(at);
                        }
                    });
                }
            }
            KeyCode::Left => {
                if let Focus::Field(field) = self.focus {
                    let cursor = &mut self.cursors[field_index(field)];
                    *cursor = cursor.saturating_sub(1);
                }
            }
            KeyCode::Right => {
                if let Focus::Field(field) = self.focus {
                    let len = self.widget.field(field).chars().count();
                    let cursor = &mut self.cursors[field_index(field)];
                    *cursor = (*cursor + 1).min(len);
                }
            }
            KeyCode::Home => {
                if let Focus::Field(field) = self.focus {
                    self.cursors[field_index(field)] = 0;
                }
            }
            KeyCode::End => {
                if let Focus::Field(field) = self.focus {
                    self.cursors[field_index(field)] = self.widget.field(field).chars().count();
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn render_background(&self, f: &mut Frame) {
        let area = f.area();
        let buf = f.buffer_mut();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let bg = page_background(x - area.left(), y - area.top(), area.width, area.height);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_bg(to_color(bg));
                }
            }
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        for y in area.top()..area.bottom() {
            let t = span_fraction(y - area.top(), area.height);
            let rgb = gradient(&[colors::NAVY, colors::NAVY.lerp(colors::WHITE, 0.35)], t);
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_bg(to_color(rgb));
                }
            }
        }

        let mark_width = (BRAND_MARK.width() as u16).min(area.width);
        let x0 = area.x + (area.width - mark_width) / 2;
        let y = area.y + area.height / 2;
        let style = Style::default()
            .fg(to_color(colors::WHITE))
            .add_modifier(Modifier::BOLD);
        // Paint text only so the header gradient shows through
        for (i, ch) in BRAND_MARK.chars().enumerate() {
            let x = x0 + i as u16;
            if x >= x0 + mark_width {
                break;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }

    pub fn render(&self, f: &mut Frame) {
        self.render_background(f);

        let button = SubmitButton::new(self.widget.status().button_label())
            .disabled(self.widget.submit_disabled())
            .focused(self.focus == Focus::Submit)
            .ripple(self.widget.burst().ripple_opacity());
        let layout = compute_layout(f.area(), button.width());

        f.render_widget(
            Block::default().style(Style::default().bg(to_color(colors::WHITE))),
            layout.card,
        );
        self.render_header(f, layout.header);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(to_color(colors::NAVY))
                    .add_modifier(Modifier::BOLD),
            ))),
            layout.title,
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                SUBTITLE,
                Style::default().fg(to_color(colors::SLATE_600)),
            ))),
            layout.subtitle,
        );

        let mut cursor = None;
        for (field, area) in FormField::ALL.into_iter().zip(layout.fields) {
            let focused = self.focus == Focus::Field(field);
            let widget = FieldWidget::new(field, self.widget.field(field))
                .cursor(self.cursor(field))
                .focused(focused);
            if focused {
                cursor = widget.cursor_position(area);
            }
            f.render_widget(widget, area);
        }

        f.render_widget(
            StatusLine::new(self.widget.status()).with_hint(self.hint()),
            layout.status,
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                FOOTER,
                Style::default().fg(to_color(colors::SLATE_500)),
            ))),
            layout.footer,
        );
        f.render_widget(button, layout.button);

        let burst = self.widget.burst();
        if let (true, Some(elapsed)) = (burst.is_active(), burst.elapsed()) {
            let frames = burst.frames_at(elapsed);
            let origin = (
                layout.button.x + layout.button.width / 2,
                layout.button.y + layout.button.height / 2,
            );
            f.render_widget(BurstLayer::new(&frames, origin), f.area());
        }

        if let Some(position) = cursor {
            f.set_cursor_position(position);
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
}

impl TuiApp {
    pub fn new(widget: ContactWidget) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state: AppState::new(widget),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.state.sync();
            self.terminal.draw(|f| self.state.render(f))?;

            // Handle events - only Press events (not Release or Repeat)
            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.state.handle_key(key) == KeyOutcome::Quit {
                        tracing::info!("Contact widget closed");
                        return Ok(());
                    }
                }
            }

            tokio::task::yield_now().await;
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
