use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::document::Document;

/// One tab per open document, the active one highlighted.
pub struct TabBar<'a> {
    pub documents: &'a [Document],
    pub active: Option<usize>,
}

impl<'a> TabBar<'a> {
    pub fn new(documents: &'a [Document], active: Option<usize>) -> Self {
        Self { documents, active }
    }
}

/// The label a document's tab shows; dirty tabs get a marker.
///
/// Hit-testing relies on this exact format, so clicks on the tab bar
/// resolve to the same widths the renderer draws.
pub fn tab_label(doc: &Document) -> String {
    if doc.modified {
        format!(" {}* ", doc.title)
    } else {
        format!(" {} ", doc.title)
    }
}

/// On-screen width of a document's tab in columns.
pub fn tab_width(doc: &Document) -> usize {
    tab_label(doc).chars().count()
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let mut spans = Vec::with_capacity(self.documents.len());

        for (i, doc) in self.documents.iter().enumerate() {
            let style = if Some(i) == self.active {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            spans.push(Span::styled(tab_label(doc), style));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        paragraph.render(area, buf);
    }
}
