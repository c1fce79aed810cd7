use contact_core::SubmissionStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::colors::{self, to_color};

/// The status line under the form: sending, success or error
pub struct StatusLine<'a> {
    pub status: &'a SubmissionStatus,
    /// Local validation hint; replaces the last result, never "Sending…"
    pub hint: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: &'a SubmissionStatus) -> Self {
        Self { status, hint: None }
    }

    pub fn with_hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    fn span(&self) -> Option<Span<'a>> {
        if let (Some(hint), false) = (self.hint, self.status.is_loading()) {
            return Some(
                Span::styled(hint, Style::default().fg(to_color(colors::FAILURE))).italic(),
            );
        }
        match self.status {
            SubmissionStatus::Loading(_) => Some(Span::styled(
                "Sending…",
                Style::default().fg(to_color(colors::SLATE_500)),
            )),
            SubmissionStatus::Success(msg) => Some(Span::styled(
                msg.as_str(),
                Style::default().fg(to_color(colors::SUCCESS)),
            )),
            SubmissionStatus::Error(msg) => Some(Span::styled(
                msg.as_str(),
                Style::default().fg(to_color(colors::FAILURE)),
            )),
            SubmissionStatus::Idle => None,
        }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(span) = self.span() {
            Line::from(span).render(area, buf);
        }
    }
}
