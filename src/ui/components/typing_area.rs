use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use wordrush::session::highlight::Glyph;
use wordrush::session::typing::TypingSession;

use crate::ui::theme::Theme;

const END_CURSOR: &str = "\u{258f}"; // ▏

pub struct TypingArea<'a> {
    session: &'a TypingSession,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

/// One visible word ready to lay out.
struct RenderWord {
    glyphs: Vec<Glyph>,
    has_cursor: bool,
}

impl RenderWord {
    fn width(&self) -> usize {
        self.glyphs.len()
    }
}

/// Greedy word wrap. Returns each line as a list of word indices.
fn wrap_words(widths: &[usize], line_width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0usize;

    for (idx, &width) in widths.iter().enumerate() {
        let needed = if current.is_empty() { width } else { used + 1 + width };
        if !current.is_empty() && needed > line_width {
            lines.push(std::mem::take(&mut current));
            used = width;
        } else {
            used = needed;
        }
        current.push(idx);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// First line to draw so the cursor line sits on the second row when it can.
fn scroll_offset(cursor_line: usize, total_lines: usize, height: usize) -> usize {
    if total_lines <= height {
        return 0;
    }
    cursor_line
        .saturating_sub(1)
        .min(total_lines.saturating_sub(height))
}

impl TypingArea<'_> {
    fn glyph_span(&self, glyph: Glyph) -> Span<'static> {
        let colors = &self.theme.colors;
        match glyph {
            Glyph::EndCursor => Span::styled(END_CURSOR, Style::default().fg(colors.cursor_bg)),
            Glyph::Char { ch, class, cursor } => {
                let mut style = colors.glyph_style(class);
                if cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(ch.to_string(), style)
            }
        }
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let words: Vec<RenderWord> = (0..self.session.visible_words().len())
            .map(|idx| {
                let glyphs = self.session.highlight(idx);
                let has_cursor = glyphs.iter().any(Glyph::has_cursor);
                RenderWord { glyphs, has_cursor }
            })
            .collect();

        let widths: Vec<usize> = words.iter().map(RenderWord::width).collect();
        let wrapped = wrap_words(&widths, inner.width as usize);
        let cursor_line = wrapped
            .iter()
            .position(|line| line.iter().any(|&i| words[i].has_cursor))
            .unwrap_or(0);
        let first = scroll_offset(cursor_line, wrapped.len(), inner.height as usize);

        let lines: Vec<Line> = wrapped
            .iter()
            .skip(first)
            .take(inner.height as usize)
            .map(|line| {
                let mut spans = Vec::new();
                for (n, &word_idx) in line.iter().enumerate() {
                    if n > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.extend(words[word_idx].glyphs.iter().map(|&g| self.glyph_span(g)));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_words_breaks_on_width() {
        // "aaa bb cccc" in width 6 -> ["aaa bb", "cccc"]
        let lines = wrap_words(&[3, 2, 4], 6);
        assert_eq!(lines, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn wrap_words_overlong_word_gets_own_line() {
        let lines = wrap_words(&[2, 10, 2], 5);
        assert_eq!(lines, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn wrap_words_empty() {
        assert!(wrap_words(&[], 10).is_empty());
    }

    #[test]
    fn scroll_keeps_cursor_on_second_row() {
        assert_eq!(scroll_offset(0, 3, 5), 0);
        assert_eq!(scroll_offset(4, 10, 3), 3);
        assert_eq!(scroll_offset(9, 10, 3), 7);
    }
}
