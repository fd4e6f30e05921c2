use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use wordrush::report::ReportStatus;
use wordrush::session::result::ResultSummary;

use crate::ui::theme::Theme;

pub struct ResultsPanel<'a> {
    summary: &'a ResultSummary,
    status: &'a ReportStatus,
    repeatable: bool,
    theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(
        summary: &'a ResultSummary,
        status: &'a ReportStatus,
        repeatable: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            summary,
            status,
            repeatable,
            theme,
        }
    }
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Time's up ")
            .border_style(Style::default().fg(colors.accent))
            .style(Style::default().bg(colors.bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let wpm_line = Line::from(vec![
            Span::styled("  Speed:       ", Style::default().fg(colors.fg)),
            Span::styled(
                format!("{} WPM", self.summary.wpm),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(wpm_line).render(layout[1], buf);

        let acc_color = if self.summary.accuracy >= 95 {
            colors.success
        } else if self.summary.accuracy >= 85 {
            colors.warning
        } else {
            colors.error
        };
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy:    ", Style::default().fg(colors.fg)),
            Span::styled(
                format!("{}%", self.summary.accuracy),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let label = self.summary.participant_label.as_deref().unwrap_or("-");
        let label_line = Line::from(vec![
            Span::styled("  Participant: ", Style::default().fg(colors.fg)),
            Span::styled(label.to_string(), Style::default().fg(colors.fg)),
        ]);
        Paragraph::new(label_line).render(layout[3], buf);

        let (status_text, status_color) = match self.status {
            ReportStatus::Idle => ("not sent".to_string(), colors.upcoming),
            ReportStatus::Pending => ("saving...".to_string(), colors.warning),
            ReportStatus::Success => ("saved".to_string(), colors.success),
            ReportStatus::Failed(reason) => (format!("failed ({reason})"), colors.error),
        };
        let status_line = Line::from(vec![
            Span::styled("  Result:      ", Style::default().fg(colors.fg)),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]);
        Paragraph::new(status_line).render(layout[4], buf);

        let help = if self.repeatable {
            "  [Enter] Try again  [Esc] Quit"
        } else {
            "  [Esc] Quit"
        };
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(colors.accent),
        )))
        .render(layout[6], buf);
    }
}
