use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use super::{centered_fixed_rect, dialog_width};

/// A reusable centered dialog popup: width computation, word-wrap height
/// estimation, centering and background clearing in one place. Every
/// modal in the kiosk renders through this.
pub struct Dialog<'a> {
    lines: Vec<Line<'a>>,
    border_color: Color,
    title: Option<&'a str>,
    padding: Padding,
}

impl<'a> Dialog<'a> {
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self {
            lines,
            border_color: Color::White,
            title: None,
            padding: Padding::uniform(1),
        }
    }

    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Compute `(width, height)` for this dialog given the terminal width.
    pub fn size(&self, terminal_width: u16) -> (u16, u16) {
        let width = dialog_width(terminal_width);
        let h_chrome = 2 + self.padding.left + self.padding.right;
        let v_chrome = 2 + self.padding.top + self.padding.bottom;
        let text_width = width.saturating_sub(h_chrome).max(1);

        let content_height: u16 = self
            .lines
            .iter()
            .map(|line| word_wrapped_line_count(line, text_width))
            .sum();

        (width, content_height + v_chrome)
    }

    /// Render centered on `area`, clearing whatever is underneath.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (width, height) = self.size(area.width);
        let centered = centered_fixed_rect(width, height, area);

        f.render_widget(Clear, centered);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);
        if let Some(title) = self.title {
            block = block.title(title);
        }

        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        f.render_widget(paragraph, centered);
    }
}

/// Estimate visual line count when a `Line` is word-wrapped to `max_width`
/// columns. Byte length stands in for display width; exact for ASCII and
/// an overestimate for multi-byte text, so dialogs grow rather than clip.
pub fn word_wrapped_line_count(line: &Line, max_width: u16) -> u16 {
    let max_w = usize::from(max_width);
    if max_w == 0 {
        return 1;
    }

    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    if text.is_empty() {
        return 1;
    }

    let mut lines: u16 = 1;
    let mut col: usize = 0;

    for (i, word) in text.split(' ').enumerate() {
        let w = word.len();
        let needed = if i == 0 || col == 0 { w } else { w + 1 };

        if col + needed <= max_w {
            col += needed;
        } else if w <= max_w {
            lines += 1;
            col = w;
        } else {
            if col > 0 {
                lines += 1;
            }
            col = w;
            while col > max_w {
                lines += 1;
                col -= max_w;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    #[test]
    fn test_word_wrap_fits_on_one_line() {
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 20), 1);
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 11), 1);
    }

    #[test]
    fn test_word_wrap_breaks_at_word_boundary() {
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 10), 2);
        assert_eq!(word_wrapped_line_count(&Line::raw("one two three four"), 5), 4);
    }

    #[test]
    fn test_word_wrap_oversized_word_hard_breaks() {
        assert_eq!(word_wrapped_line_count(&Line::raw("abcdefghij"), 4), 3);
        assert_eq!(word_wrapped_line_count(&Line::raw("hi abcdefghij"), 6), 3);
    }

    #[test]
    fn test_word_wrap_empty_and_zero_width() {
        assert_eq!(word_wrapped_line_count(&Line::raw(""), 20), 1);
        assert_eq!(word_wrapped_line_count(&Line::raw("hello"), 0), 1);
    }

    #[test]
    fn test_word_wrap_multi_span_line() {
        let line = Line::from(vec![Span::raw("hello "), Span::raw("world")]);
        assert_eq!(word_wrapped_line_count(&line, 20), 1);
        assert_eq!(word_wrapped_line_count(&line, 8), 2);
    }

    #[test]
    fn test_dialog_size() {
        let dialog = Dialog::new(vec![Line::raw("hello")]);
        let (w, h) = dialog.size(100);
        assert_eq!(w, 80);
        assert_eq!(h, 5); // 1 content + 2 borders + 2 padding

        let dialog = Dialog::new(vec![Line::raw("hello")]).padding(Padding::ZERO);
        let (_, h) = dialog.size(100);
        assert_eq!(h, 3);
    }

    #[test]
    fn test_dialog_size_wraps_long_content() {
        let long_text = "a ".repeat(60);
        let dialog = Dialog::new(vec![Line::raw(long_text.trim())]);
        let (_w, h) = dialog.size(60);
        assert!(h > 5, "should wrap, height={h}");
    }
}
