// Coordinate conversion and screen layout management

use crate::App;
use ratatui::layout::Rect;

/// Where each pane sits on screen for the current app state.
///
/// Shared by rendering and mouse hit-testing so both agree on the
/// layout.
#[derive(Debug, Clone, Copy)]
pub struct ScreenRegions {
    /// Tree panel, when visible
    pub tree: Option<Rect>,
    /// One-column splitter between tree and editor, when visible
    pub splitter: Option<Rect>,
    /// Tab bar row above the text area
    pub tab_bar: Rect,
    /// Text editing area
    pub editor: Rect,
    /// Status line, when enabled
    pub status: Option<Rect>,
}

/// Compute the pane layout for `area` from the app's panel state.
pub fn screen_regions(app: &App, area: Rect) -> ScreenRegions {
    let status_height = if app.config.ui.show_status_bar { 1 } else { 0 };
    let main_height = area.height.saturating_sub(status_height);

    let status = if status_height > 0 {
        Some(Rect {
            x: area.x,
            y: area.y + main_height,
            width: area.width,
            height: status_height,
        })
    } else {
        None
    };

    let (tree, splitter, editor_x) = if app.tree_panel_visible {
        // Leave room for at least a sliver of editor on narrow terminals
        let tree_width = app.tree_panel_width.min(area.width.saturating_sub(10));
        let tree = Rect {
            x: area.x,
            y: area.y,
            width: tree_width,
            height: main_height,
        };
        let splitter = Rect {
            x: area.x + tree_width,
            y: area.y,
            width: 1,
            height: main_height,
        };
        (Some(tree), Some(splitter), area.x + tree_width + 1)
    } else {
        (None, None, area.x)
    };

    let editor_width = (area.x + area.width).saturating_sub(editor_x);
    let tab_bar = Rect {
        x: editor_x,
        y: area.y,
        width: editor_width,
        height: 1.min(main_height),
    };
    let editor = Rect {
        x: editor_x,
        y: area.y + tab_bar.height,
        width: editor_width,
        height: main_height.saturating_sub(tab_bar.height),
    };

    ScreenRegions {
        tree,
        splitter,
        tab_bar,
        editor,
        status,
    }
}

/// Layout for the whole terminal, with a fallback size when the real
/// dimensions are unavailable.
pub fn terminal_regions(app: &App) -> ScreenRegions {
    let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((120, 30));
    screen_regions(app, Rect::new(0, 0, width, height))
}

/// Convert screen coordinates to a (row, column) position in the active
/// document, accounting for the pane layout, scroll offset and the
/// line-number gutter.
pub fn screen_to_document_coords(app: &App, mouse_x: u16, mouse_y: u16) -> Option<(usize, usize)> {
    let editor_area = terminal_regions(app).editor;

    if mouse_x < editor_area.x
        || mouse_x >= editor_area.x + editor_area.width
        || mouse_y < editor_area.y
        || mouse_y >= editor_area.y + editor_area.height
    {
        return None;
    }

    let doc = app.documents.active()?;

    let relative_x = mouse_x - editor_area.x;
    let relative_y = mouse_y - editor_area.y;

    let line_number_width = if app.config.editor.show_line_numbers {
        doc.line_number_width()
    } else {
        0
    };

    let (scroll_row, scroll_col) = app.scroll_offset;
    let doc_row = scroll_row + relative_y as usize;

    // Clicks in the gutter land at the beginning of the line
    if relative_x < line_number_width as u16 {
        if doc_row < doc.content.len() {
            return Some((doc_row, 0));
        }
        return None;
    }

    let text_relative_x = relative_x - line_number_width as u16;
    let doc_col = scroll_col + text_relative_x as usize;

    if doc_row >= doc.content.len() {
        // Click below the last line lands at the end of it
        let last_row = doc.content.len().saturating_sub(1);
        let last_col = doc
            .content
            .get(last_row)
            .map(|line| line.chars().count())
            .unwrap_or(0);
        return Some((last_row, last_col));
    }

    // Columns count characters, matching the document cursor
    let line = &doc.content[doc_row];
    Some((doc_row, doc_col.min(line.chars().count())))
}

/// The visible tree row index under the mouse, if the tree panel is hit.
pub fn tree_row_at(app: &App, mouse_x: u16, mouse_y: u16) -> Option<usize> {
    let tree_area = terminal_regions(app).tree?;

    if mouse_x < tree_area.x
        || mouse_x >= tree_area.x + tree_area.width
        || mouse_y < tree_area.y
        || mouse_y >= tree_area.y + tree_area.height
    {
        return None;
    }

    Some(app.tree_view.scroll + (mouse_y - tree_area.y) as usize)
}

/// The index of the tab under the mouse, if the tab bar is hit.
///
/// Walks the same label widths the tab bar renders, so clicks line up
/// with what is drawn.
pub fn tab_index_at(app: &App, mouse_x: u16, mouse_y: u16) -> Option<usize> {
    let tab_bar = terminal_regions(app).tab_bar;

    if mouse_y != tab_bar.y || mouse_x < tab_bar.x || mouse_x >= tab_bar.x + tab_bar.width {
        return None;
    }

    let mut x = tab_bar.x as usize;
    for (i, doc) in app.documents.documents().iter().enumerate() {
        let width = crate::widgets::tab_bar::tab_width(doc);
        if (mouse_x as usize) < x + width {
            return Some(i);
        }
        x += width;
    }

    None
}

/// Whether the mouse is over the splitter column.
pub fn on_splitter(app: &App, mouse_x: u16, mouse_y: u16) -> bool {
    match terminal_regions(app).splitter {
        Some(splitter) => {
            mouse_x == splitter.x && mouse_y >= splitter.y && mouse_y < splitter.y + splitter.height
        }
        None => false,
    }
}
