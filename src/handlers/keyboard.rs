use crate::document::{CursorMovement, Document};
use crate::events::{AppEvent, EventBus};
use crate::tree::{build_tree, NodeKind};
use crate::{App, Focus, PromptKind};
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Keyboard handler that processes keyboard events
pub struct KeyboardHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl KeyboardHandler {
    /// Create a new keyboard handler
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to keyboard events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = KeyboardHandler::new(self.app_state.clone(), self.event_sender.clone());

        event_bus
            .subscribe_async("key_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_key_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle keyboard events
    async fn handle_key_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::KeyInput(key) = event {
            let app = self.app_state.read().await;
            let focus = app.focus;
            drop(app); // Release read lock early

            match focus {
                Focus::Editor => self.handle_editor_key(key).await?,
                Focus::Tree => self.handle_tree_key(key).await?,
                Focus::Prompt => self.handle_prompt_key(key).await?,
            }
        }

        Ok(())
    }

    /// Key combinations shared by the editor and tree panes. Returns
    /// false when the key is not one of them so the caller can keep
    /// dispatching.
    async fn handle_global_key(&self, key: KeyEvent) -> Result<bool> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                // Quit with Ctrl+Q
                self.event_sender.send(AppEvent::Quit)?;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                // Save with Ctrl+S
                self.handle_save_command().await?;
            }
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                // Open a file with Ctrl+O
                self.event_sender.send(AppEvent::ShowPrompt {
                    kind: PromptKind::OpenFile,
                })?;
            }
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                // Open a folder with Ctrl+P
                self.event_sender.send(AppEvent::ShowPrompt {
                    kind: PromptKind::OpenFolder,
                })?;
            }
            (KeyCode::Char('b'), KeyModifiers::CONTROL) => {
                // Show or hide the tree panel with Ctrl+B
                self.event_sender.send(AppEvent::ToggleTreePanel)?;
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                // Show or hide the status bar with Ctrl+U
                self.event_sender.send(AppEvent::ToggleStatusBar)?;
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                // Close the active tab with Ctrl+W
                self.handle_close_tab().await?;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                // Move focus to the tree panel with Ctrl+T
                let mut app = self.app_state.write().await;
                if app.tree_panel_visible && app.workspace.is_some() {
                    app.focus = Focus::Tree;
                }
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.handle_next_tab().await?;
            }
            // Shift+Tab arrives as BackTab on most terminals
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.handle_prev_tab().await?;
            }
            _ => return Ok(false),
        }

        Ok(true)
    }

    /// Handle keyboard input while the editor has focus
    async fn handle_editor_key(&self, key: KeyEvent) -> Result<()> {
        if self.handle_global_key(key).await? {
            return Ok(());
        }

        match (key.code, key.modifiers) {
            // Movement keys
            (KeyCode::Up, _) => self.handle_cursor_movement(CursorMovement::Up).await?,
            (KeyCode::Down, _) => self.handle_cursor_movement(CursorMovement::Down).await?,
            (KeyCode::Left, _) => self.handle_cursor_movement(CursorMovement::Left).await?,
            (KeyCode::Right, _) => self.handle_cursor_movement(CursorMovement::Right).await?,
            (KeyCode::Home, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    CursorMovement::DocumentStart
                } else {
                    CursorMovement::LineStart
                };
                self.handle_cursor_movement(movement).await?;
            }
            (KeyCode::End, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    CursorMovement::DocumentEnd
                } else {
                    CursorMovement::LineEnd
                };
                self.handle_cursor_movement(movement).await?;
            }
            (KeyCode::PageUp, _) => self.handle_cursor_movement(CursorMovement::PageUp).await?,
            (KeyCode::PageDown, _) => {
                self.handle_cursor_movement(CursorMovement::PageDown).await?
            }
            // Text input
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.with_active_document(|doc| doc.insert_char(c)).await?;
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.with_active_document(|doc| doc.insert_newline()).await?;
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                self.with_active_document(|doc| doc.backspace()).await?;
            }
            (KeyCode::Delete, KeyModifiers::NONE) => {
                self.with_active_document(|doc| doc.delete()).await?;
            }
            (KeyCode::Esc, _) => {
                let mut app = self.app_state.write().await;
                app.clear_status_message();
            }
            _ => {} // Ignore other key combinations
        }

        Ok(())
    }

    /// Handle keyboard input while the tree panel has focus
    async fn handle_tree_key(&self, key: KeyEvent) -> Result<()> {
        if self.handle_global_key(key).await? {
            return Ok(());
        }

        match key.code {
            KeyCode::Up => self.move_tree_selection(-1).await?,
            KeyCode::Down => self.move_tree_selection(1).await?,
            KeyCode::Enter => self.invoke_selected_row().await?,
            KeyCode::Left => {
                let mut app = self.app_state.write().await;
                if let Some(row) = selected_row(&app) {
                    if row.kind == NodeKind::Directory {
                        app.tree_view.collapse(&row.path);
                    }
                }
            }
            KeyCode::Right => {
                let mut app = self.app_state.write().await;
                if let Some(row) = selected_row(&app) {
                    if row.kind == NodeKind::Directory {
                        app.tree_view.expand(row.path);
                    }
                }
            }
            KeyCode::Esc => {
                let mut app = self.app_state.write().await;
                app.focus = Focus::Editor;
            }
            _ => {}
        }

        Ok(())
    }

    /// Handle keyboard input while the path prompt is open
    async fn handle_prompt_key(&self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                // Cancelled: nothing happens
                self.event_sender.send(AppEvent::HidePrompt)?;
            }
            KeyCode::Enter => {
                let prompt = {
                    let app = self.app_state.read().await;
                    app.prompt.clone()
                };

                self.event_sender.send(AppEvent::HidePrompt)?;

                if let Some(prompt) = prompt {
                    let input = prompt.input.trim().to_string();
                    if !input.is_empty() {
                        match prompt.kind {
                            PromptKind::OpenFolder => self.handle_open_folder(input).await?,
                            PromptKind::OpenFile => self.open_path(PathBuf::from(input)).await?,
                        }
                    }
                }
            }
            KeyCode::Char(c) => {
                let mut app = self.app_state.write().await;
                if let Some(prompt) = app.prompt.as_mut() {
                    prompt.input.push(c);
                }
                app.cursor_manager.notify_activity("prompt");
            }
            KeyCode::Backspace => {
                let mut app = self.app_state.write().await;
                if let Some(prompt) = app.prompt.as_mut() {
                    prompt.input.pop();
                }
                app.cursor_manager.notify_activity("prompt");
            }
            _ => {}
        }

        Ok(())
    }

    /// Apply an edit to the active document, if any
    async fn with_active_document<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Document),
    {
        let mut app = self.app_state.write().await;
        if app.documents.active().is_none() {
            return Ok(());
        }
        if let Some(doc) = app.documents.active_mut() {
            edit(doc);
        }

        let editor_area = crate::input::coordinates::terminal_regions(&app).editor;
        app.ensure_cursor_visible(editor_area);
        app.cursor_manager.notify_activity_for_active();
        Ok(())
    }

    /// Move the cursor in the active document and keep it on screen
    async fn handle_cursor_movement(&self, movement: CursorMovement) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.documents.active().is_none() {
            return Ok(());
        }
        if let Some(doc) = app.documents.active_mut() {
            doc.move_cursor(movement);
        }

        let editor_area = crate::input::coordinates::terminal_regions(&app).editor;
        app.ensure_cursor_visible(editor_area);
        app.cursor_manager.notify_activity_for_active();
        Ok(())
    }

    /// Move the tree selection up or down, clamped to the visible rows
    async fn move_tree_selection(&self, delta: isize) -> Result<()> {
        let mut app = self.app_state.write().await;
        let row_count = match &app.workspace {
            Some(root) => app.tree_view.visible_rows(root).len(),
            None => 0,
        };
        app.tree_view.move_selection(delta, row_count);

        let panel_height = crate::input::coordinates::terminal_regions(&app)
            .tree
            .map(|r| r.height as usize)
            .unwrap_or(0);
        app.ensure_tree_selection_visible(panel_height);
        Ok(())
    }

    /// Invoke the selected tree row: directories toggle their expansion,
    /// files open into a tab
    async fn invoke_selected_row(&self) -> Result<()> {
        let row = {
            let app = self.app_state.read().await;
            selected_row(&app)
        };

        let Some(row) = row else {
            return Ok(());
        };

        match row.kind {
            NodeKind::Directory => {
                let mut app = self.app_state.write().await;
                app.tree_view.toggle_expanded(&row.path);
            }
            NodeKind::File => {
                self.open_path(row.path).await?;
            }
        }

        Ok(())
    }

    /// Open a file path into a tab. A tab already holding the path is
    /// focused instead of being loaded again.
    async fn open_path(&self, path: PathBuf) -> Result<()> {
        {
            let mut app = self.app_state.write().await;
            if let Some(index) = app.documents.find(&path) {
                app.switch_to_document(index);
                app.focus = Focus::Editor;
                return Ok(());
            }
        }

        // A path that vanished since the tree was built is a no-op
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let missing_msg = format!("File no longer exists: {}", path.display());
            self.event_sender.send(AppEvent::ToastMessage {
                message: missing_msg.into(),
                toast_type: "warning".into(),
            })?;
            return Ok(());
        }

        match Document::from_path_async(path).await {
            Ok(doc) => {
                self.event_sender.send(AppEvent::DocumentLoaded { doc })?;
            }
            Err(e) => {
                let error_msg = format!("Error opening file: {}", e);
                self.event_sender.send(AppEvent::ToastMessage {
                    message: error_msg.into(),
                    toast_type: "error".into(),
                })?;
            }
        }

        Ok(())
    }

    /// Handle save command (Ctrl+S). The write happens off the lock so a
    /// slow disk never blocks input.
    async fn handle_save_command(&self) -> Result<()> {
        let active = {
            let app = self.app_state.read().await;
            app.documents
                .active()
                .map(|doc| (doc.path.clone(), doc.content_as_string()))
        };

        let Some((path, content)) = active else {
            // No active tab: saving is a no-op
            return Ok(());
        };

        if let Err(e) = tokio::fs::write(&path, content).await {
            let error_msg = format!("Error saving file: {}", e);
            self.event_sender.send(AppEvent::ToastMessage {
                message: error_msg.into(),
                toast_type: "error".into(),
            })?;
        } else {
            let mut app = self.app_state.write().await;
            if let Some(doc) = app.documents.active_mut() {
                if doc.path == path {
                    doc.modified = false;
                }
            }
            drop(app);

            let success_msg = format!("Saved {}", path.display());
            self.event_sender.send(AppEvent::StatusMessage {
                message: success_msg.into(),
            })?;
        }

        Ok(())
    }

    /// Handle close tab (Ctrl+W); unsaved changes are discarded
    async fn handle_close_tab(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.close_active_document() {
            let remaining = app.documents.len();
            drop(app);

            let close_msg = format!("Tab closed, {} open", remaining);
            self.event_sender.send(AppEvent::StatusMessage {
                message: close_msg.into(),
            })?;
        }
        Ok(())
    }

    /// Cycle to the next tab (Tab)
    async fn handle_next_tab(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.documents.len() > 1 {
            app.documents.focus_next();
            app.scroll_offset = (0, 0);
        }
        Ok(())
    }

    /// Cycle to the previous tab (Shift+Tab)
    async fn handle_prev_tab(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.documents.len() > 1 {
            app.documents.focus_prev();
            app.scroll_offset = (0, 0);
        }
        Ok(())
    }

    /// Build the tree for a picked folder on a blocking task, then hand
    /// the result back through the event bus
    async fn handle_open_folder(&self, input: String) -> Result<()> {
        let path = PathBuf::from(input);
        let built = tokio::task::spawn_blocking(move || build_tree(&path)).await?;

        match built {
            Ok(root) => {
                self.event_sender.send(AppEvent::WorkspaceLoaded { root })?;
            }
            Err(e) => {
                let error_msg = format!("Error opening folder: {}", e);
                self.event_sender.send(AppEvent::ToastMessage {
                    message: error_msg.into(),
                    toast_type: "error".into(),
                })?;
            }
        }

        Ok(())
    }
}

/// The currently selected row of the visible tree, cloned out of the
/// app state
fn selected_row(app: &App) -> Option<crate::tree::view::TreeRow> {
    let root = app.workspace.as_ref()?;
    let rows = app.tree_view.visible_rows(root);
    rows.into_iter().nth(app.tree_view.selected)
}

impl Clone for KeyboardHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
            event_sender: self.event_sender.clone(),
        }
    }
}
