use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use wordrush::session::typing::{SessionState, TypingSession};

use crate::ui::theme::Theme;

/// Live WPM, accuracy and countdown above the typing area.
pub struct StatsHeader<'a> {
    session: &'a TypingSession,
    mode: &'a str,
    theme: &'a Theme,
    compact: bool,
}

impl<'a> StatsHeader<'a> {
    pub fn new(session: &'a TypingSession, mode: &'a str, theme: &'a Theme) -> Self {
        Self {
            session,
            mode,
            theme,
            compact: false,
        }
    }

    /// Single row without a border.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn summary_text(&self) -> String {
        let s = self.session;
        if s.state == SessionState::Idle {
            return format!(" {} | ready | {}s", self.mode, s.duration_limit);
        }
        format!(
            " {} | WPM: {} | Acc: {}% | {}s left",
            self.mode,
            s.wpm,
            s.accuracy,
            s.seconds_remaining()
        )
    }
}

impl Widget for StatsHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let line = Line::from(vec![
            Span::styled(
                " wordrush ",
                Style::default()
                    .fg(colors.header_bg)
                    .bg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.summary_text(),
                Style::default()
                    .fg(colors.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let mut paragraph = Paragraph::new(line).style(Style::default().bg(colors.header_bg));
        if !self.compact {
            paragraph = paragraph.block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.border))
                    .style(Style::default().bg(colors.header_bg)),
            );
        }
        paragraph.render(area, buf);
    }
}
