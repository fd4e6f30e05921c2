use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Countdown bar: full at the start of a session, empty when time is up.
pub struct TimeBar<'a> {
    remaining: u32,
    limit: u32,
    theme: &'a Theme,
}

impl<'a> TimeBar<'a> {
    pub fn new(remaining: u32, limit: u32, theme: &'a Theme) -> Self {
        Self {
            remaining: remaining.min(limit),
            limit,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.remaining as f64 / self.limit as f64
        }
    }
}

impl Widget for TimeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Time ")
            .border_style(Style::default().fg(colors.border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64).round() as u16;
        let fill = if self.remaining * 5 <= self.limit {
            colors.warning
        } else {
            colors.time_left
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg).bg(fill)
            } else {
                Style::default().fg(colors.fg).bg(colors.time_spent)
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label = format!("{}s", self.remaining);
        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg));
    }
}
