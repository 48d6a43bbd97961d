use crate::app::PromptKind;
use crate::widgets::cursor::CursorSupport;
use crate::App;
use ratatui::prelude::Position;
use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Modal prompt asking for a folder or file path
pub struct PathPrompt<'a> {
    kind: PromptKind,
    input: &'a str,
}

impl<'a> PathPrompt<'a> {
    pub fn new(kind: PromptKind, input: &'a str) -> Self {
        Self { kind, input }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::OpenFolder => " Open Folder ",
            PromptKind::OpenFile => " Open File ",
        }
    }
}

/// Centered area for the prompt in `area`, sized for a single input line
pub fn centered_rect(area: Rect) -> Rect {
    let height = 3; // input line plus borders
    let width = 60.min(area.width.saturating_sub(4));

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 3), // Upper third
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(popup_layout[1])[1]
}

/// Where the prompt sits on the terminal right now. Mouse hit-testing
/// uses this so clicks resolve against the same geometry the renderer
/// draws.
pub fn prompt_area(_app: &App) -> Rect {
    let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((120, 30));
    centered_rect(Rect::new(0, 0, width, height))
}

impl Widget for PathPrompt<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let modal_area = centered_rect(area);

        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Span::styled(
                self.title(),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 100, 200))
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Rgb(0, 150, 255))
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Rgb(20, 20, 30)));

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        // Input line with prompt marker (cursor handled by the cursor
        // manager)
        let input_line = Line::from(vec![
            Span::styled(
                "> ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.input, Style::default().fg(Color::White)),
        ]);

        let input_paragraph =
            Paragraph::new(input_line).style(Style::default().bg(Color::Rgb(30, 30, 50)));
        input_paragraph.render(inner_area, buf);
    }
}

impl CursorSupport for PathPrompt<'_> {
    /// Cursor sits right after the typed input on the prompt line
    fn calculate_cursor_position(&self, logical_pos: (usize, usize), area: Rect) -> Position {
        let modal_area = centered_rect(area);
        let inner_area = Block::default().borders(Borders::ALL).inner(modal_area);

        let cursor_x = inner_area.x + 2 + logical_pos.0 as u16; // 2 for "> "
        let cursor_y = inner_area.y;

        Position::new(cursor_x, cursor_y)
    }

    fn get_cursor_context(&self) -> &str {
        "prompt"
    }
}
