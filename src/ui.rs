use crate::input::coordinates::screen_regions;
use crate::widgets::cursor::CursorSupport;
use crate::widgets::editor::Editor;
use crate::widgets::file_tree::FileTree;
use crate::widgets::prompt::PathPrompt;
use crate::widgets::tab_bar::TabBar;
use crate::{App, Focus};
use ratatui::prelude::*;

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        let regions = screen_regions(self, f.area());

        if let Some(tree_area) = regions.tree {
            self.render_tree(f, tree_area);
        }
        if let Some(splitter_area) = regions.splitter {
            self.render_splitter(f, splitter_area);
        }

        self.render_tab_bar(f, regions.tab_bar);
        self.render_editor(f, regions.editor);

        if let Some(status_area) = regions.status {
            self.render_status_line(f, status_area);
        }

        // Update and render toast notifications
        self.toast_manager.update();
        if self.toast_manager.has_active_toasts() {
            self.render_toasts(f, f.area());
        }

        // Render the path prompt modal if open
        if self.prompt.is_some() {
            self.render_prompt(f, f.area());
        }

        // Render the active cursor last
        self.render_active_cursor(f);
    }

    /// Render the workspace tree panel
    fn render_tree(&mut self, f: &mut Frame, area: Rect) {
        let Some(root) = self.workspace.as_ref() else {
            let placeholder = ratatui::widgets::Paragraph::new("no folder open")
                .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
            f.render_widget(placeholder, area);
            return;
        };

        let rows = self.tree_view.visible_rows(root);
        let tree = FileTree::new(&rows)
            .selected(self.tree_view.selected)
            .scroll(self.tree_view.scroll)
            .focused(self.focus == Focus::Tree);

        f.render_widget(tree, area);
    }

    /// Render the one-column splitter between tree and editor
    fn render_splitter(&self, f: &mut Frame, area: Rect) {
        let style = if self.splitter_drag {
            Style::default().fg(Color::Cyan).bg(Color::Black)
        } else {
            Style::default().fg(Color::DarkGray).bg(Color::Black)
        };

        let lines = vec![Line::from("│"); area.height as usize];
        let paragraph = ratatui::widgets::Paragraph::new(lines).style(style);
        f.render_widget(paragraph, area);
    }

    /// Render one tab per open document
    fn render_tab_bar(&self, f: &mut Frame, area: Rect) {
        let tab_bar = TabBar::new(self.documents.documents(), self.documents.active_index());
        f.render_widget(tab_bar, area);
    }

    /// Render the main editor area
    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        let show_line_numbers = self.config.editor.show_line_numbers;

        let Some(doc) = self.documents.active() else {
            let placeholder = ratatui::widgets::Paragraph::new(vec![
                Line::from(""),
                Line::from("  no file open"),
                Line::from(""),
                Line::from("  Ctrl+O open file   Ctrl+P open folder"),
            ])
            .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
            f.render_widget(placeholder, area);
            self.cursor_manager.hide_cursor("editor");
            return;
        };

        let editor = Editor {
            document: doc,
            scroll_offset: self.scroll_offset,
            show_line_numbers,
        };
        f.render_widget(editor, area);

        self.update_editor_cursor(area, show_line_numbers);
    }

    /// Render the status line using the slot-based StatusBar widget
    fn render_status_line(&mut self, f: &mut Frame, area: Rect) {
        self.update_status_bar();
        f.render_widget(self.status_bar.clone(), area);
    }

    /// Render toast notifications
    fn render_toasts(&self, f: &mut Frame, area: Rect) {
        use crate::widgets::toast::ToastWidget;
        let toast_widget = ToastWidget::new(&self.toast_manager);
        f.render_widget(toast_widget, area);
    }

    /// Render the path prompt modal
    fn render_prompt(&mut self, f: &mut Frame, area: Rect) {
        let Some(prompt) = self.prompt.as_ref() else {
            return;
        };

        let widget = PathPrompt::new(prompt.kind, &prompt.input);

        // Cursor sits at the end of the typed input
        let cursor_position =
            widget.calculate_cursor_position((prompt.input.chars().count(), 0), area);

        f.render_widget(widget, area);

        self.cursor_manager.hide_cursor("editor");
        self.cursor_manager.set_active_context("prompt");
        self.cursor_manager
            .update_cursor_position("prompt", cursor_position.x, cursor_position.y);
    }

    /// Keep the cursor inside the editor viewport after it moved
    /// programmatically; manual scrolling never calls this.
    pub fn ensure_cursor_visible(&mut self, area: Rect) {
        let show_line_numbers = self.config.editor.show_line_numbers;
        let Some(doc) = self.documents.active() else {
            return;
        };

        let (row, col) = doc.cursor_pos;
        let (scroll_row, scroll_col) = self.scroll_offset;

        // Keep the cursor a few lines away from the edges when possible
        let scroll_margin = 3;
        let visible_rows = area.height as usize;

        if row < scroll_row + scroll_margin {
            self.scroll_offset.0 = row.saturating_sub(scroll_margin);
        } else if visible_rows > scroll_margin && row >= scroll_row + visible_rows - scroll_margin {
            self.scroll_offset.0 = row.saturating_sub(visible_rows.saturating_sub(scroll_margin + 1));
        }

        let line_number_width = if show_line_numbers {
            doc.line_number_width()
        } else {
            0
        };
        let visible_cols = (area.width as usize).saturating_sub(line_number_width).max(1);

        if col < scroll_col {
            self.scroll_offset.1 = col;
        } else if col >= scroll_col + visible_cols {
            self.scroll_offset.1 = col.saturating_sub(visible_cols) + 1;
        }
    }

    /// Update cursor position for the editor context
    fn update_editor_cursor(&mut self, area: Rect, show_line_numbers: bool) {
        // The prompt owns the cursor while it's open
        if self.prompt.is_some() {
            self.cursor_manager.hide_cursor("editor");
            return;
        }

        let Some(doc) = self.documents.active() else {
            self.cursor_manager.hide_cursor("editor");
            return;
        };

        let (row, col) = doc.cursor_pos;
        let (scroll_row, scroll_col) = self.scroll_offset;

        let line_number_width = if show_line_numbers {
            doc.line_number_width() as u16
        } else {
            0
        };

        let cursor_x = (col.saturating_sub(scroll_col)) as u16 + line_number_width;
        let cursor_y = (row.saturating_sub(scroll_row)) as u16;

        let absolute_x = area.x + cursor_x.min(area.width.saturating_sub(1));
        let absolute_y = area.y + cursor_y.min(area.height.saturating_sub(1));

        // Only show the cursor when it's actually inside the viewport
        let is_visible = cursor_y < area.height && cursor_x < area.width;

        self.cursor_manager.hide_cursor("prompt");

        if is_visible && self.focus == Focus::Editor {
            self.cursor_manager.set_active_context("editor");
            self.cursor_manager
                .update_cursor_position("editor", absolute_x, absolute_y);
        } else {
            // Keep the position but don't draw it
            self.cursor_manager.hide_cursor("editor");
        }
    }

    /// Render active cursor from cursor manager
    fn render_active_cursor(&mut self, f: &mut Frame) {
        if let Some(active_context) = self
            .cursor_manager
            .get_active_context()
            .map(|s| s.to_string())
        {
            // Only one cursor may be drawn at a time
            for context in ["editor", "prompt"] {
                if context != active_context {
                    self.cursor_manager.hide_cursor(context);
                }
            }

            if let Some(position) = self.cursor_manager.get_cursor_position(&active_context) {
                use crate::widgets::Cursor;

                let cursor = Cursor::new(active_context.clone())
                    .with_position(position.x, position.y)
                    .with_style(Style::default().bg(Color::White).fg(Color::Black))
                    .active(true);

                if let Some(cursor_state) =
                    self.cursor_manager.get_cursor_state_mut(&active_context)
                {
                    f.render_stateful_widget(cursor, f.area(), cursor_state);
                }
            }
        }
    }
}
