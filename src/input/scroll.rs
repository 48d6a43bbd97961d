/// Scroll handling module
use crate::App;
use ratatui::prelude::Rect;

impl App {
    /// Handle mouse scroll over the editor with bounds checking
    pub fn handle_editor_scroll(&mut self, delta: i16, editor_area: Rect) {
        let (scroll_row, _scroll_col) = self.scroll_offset;

        let new_scroll_row = if delta > 0 {
            scroll_row + delta as usize
        } else {
            scroll_row.saturating_sub((-delta) as usize)
        };

        if let Some(doc) = self.documents.active() {
            let editor_height = editor_area.height as usize;

            // Allow scrolling a bit past the end so the final lines sit
            // comfortably above the status bar
            let max_scroll = if doc.content.len() > editor_height {
                doc.content.len() + (editor_height / 2) - editor_height
            } else {
                0
            };

            self.scroll_offset.0 = new_scroll_row.min(max_scroll);
        }

        // Manual scroll shouldn't move the cursor - we're just changing the view
        self.cursor_manager.notify_activity_for_active();
    }

    /// Handle mouse scroll over the tree panel
    pub fn handle_tree_scroll(&mut self, delta: i16) {
        let row_count = match &self.workspace {
            Some(root) => self.tree_view.visible_rows(root).len(),
            None => 0,
        };

        let scroll = if delta > 0 {
            self.tree_view.scroll + delta as usize
        } else {
            self.tree_view.scroll.saturating_sub((-delta) as usize)
        };

        self.tree_view.scroll = scroll.min(row_count.saturating_sub(1));
    }

    /// Keep the selected tree row inside the visible window
    pub fn ensure_tree_selection_visible(&mut self, panel_height: usize) {
        if panel_height == 0 {
            return;
        }
        if self.tree_view.selected < self.tree_view.scroll {
            self.tree_view.scroll = self.tree_view.selected;
        } else if self.tree_view.selected >= self.tree_view.scroll + panel_height {
            self.tree_view.scroll = self.tree_view.selected + 1 - panel_height;
        }
    }
}
