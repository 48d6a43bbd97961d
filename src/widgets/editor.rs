use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::document::Document;

/// Renders the visible window of a document, with an optional
/// line-number gutter
pub struct Editor<'a> {
    pub document: &'a Document,
    pub scroll_offset: (usize, usize), // (row, col) offset for viewport scrolling
    pub show_line_numbers: bool,
}

impl<'a> Editor<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            scroll_offset: (0, 0),
            show_line_numbers: true,
        }
    }
}

impl Widget for Editor<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        // Determine visible portion of the document
        let start_row = self.scroll_offset.0;
        let end_row = (start_row + area.height as usize).min(self.document.content.len());
        let h_offset = self.scroll_offset.1;

        // Gutter width is based on the total line count, not the visible
        // window, so it doesn't shift while scrolling
        let line_number_width = if self.show_line_numbers {
            self.document.line_number_width()
        } else {
            0
        };

        let mut lines = Vec::with_capacity(end_row - start_row);

        for i in start_row..end_row {
            let line = &self.document.content[i];
            // Skip by characters, a byte slice could split a multibyte char
            let visible_content: String = line.chars().skip(h_offset).collect();

            if self.show_line_numbers {
                let line_num_str = format!("{:>width$}", i + 1, width = line_number_width - 1);
                lines.push(Line::from(vec![
                    Span::styled(line_num_str, Style::default().fg(Color::Rgb(100, 100, 120))),
                    Span::raw(" "),
                    Span::raw(visible_content),
                ]));
            } else {
                lines.push(Line::from(visible_content));
            }
        }

        let paragraph =
            Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Black));
        paragraph.render(area, buf);
    }
}
