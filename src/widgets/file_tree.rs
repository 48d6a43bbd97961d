use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tree::view::TreeRow;
use crate::tree::NodeKind;

/// Renders the flattened workspace tree as an indented list.
///
/// Expansion and selection live in `TreeViewState`; this widget only
/// draws the rows it is given.
pub struct FileTree<'a> {
    pub rows: &'a [TreeRow],
    pub selected: usize,
    pub scroll: usize,
    pub focused: bool,
}

impl<'a> FileTree<'a> {
    pub fn new(rows: &'a [TreeRow]) -> Self {
        Self {
            rows,
            selected: 0,
            scroll: 0,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn row_line(&self, index: usize, row: &TreeRow, width: usize) -> Line<'a> {
        let marker = match row.kind {
            NodeKind::Directory if row.expanded => "▾ ",
            NodeKind::Directory => "▸ ",
            NodeKind::File => "  ",
        };

        let mut text =
            String::with_capacity(row.depth as usize * 2 + marker.len() + row.name.len());
        for _ in 0..row.depth {
            text.push_str("  ");
        }
        text.push_str(marker);
        text.push_str(&row.name);

        // Truncate rather than wrap
        if text.chars().count() > width {
            text = text.chars().take(width.saturating_sub(1)).collect();
            text.push('…');
        }

        let style = if index == self.selected {
            let bg = if self.focused {
                Color::Blue
            } else {
                Color::DarkGray
            };
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            match row.kind {
                NodeKind::Directory => Style::default().fg(Color::Cyan),
                NodeKind::File => Style::default().fg(Color::Gray),
            }
        };

        // Pad the selection highlight to the full panel width
        if index == self.selected {
            let padding = width.saturating_sub(text.chars().count());
            text.push_str(&" ".repeat(padding));
        }

        Line::from(Span::styled(text, style))
    }
}

impl Widget for FileTree<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let width = area.width as usize;
        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(area.height as usize)
            .map(|(i, row)| self.row_line(i, row, width))
            .collect::<Vec<_>>();

        let paragraph =
            Paragraph::new(visible).style(Style::default().fg(Color::Gray).bg(Color::Black));
        paragraph.render(area, buf);
    }
}
