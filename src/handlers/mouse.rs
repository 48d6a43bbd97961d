/// Mouse input handlers that subscribe to mouse events
use crate::document::Document;
use crate::events::{AppEvent, EventBus};
use crate::input::coordinates;
use crate::tree::NodeKind;
use crate::{App, Focus};
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Mouse handler that processes mouse events
pub struct MouseHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl MouseHandler {
    /// Create a new mouse handler
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to mouse events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = MouseHandler::new(self.app_state.clone(), self.event_sender.clone());

        event_bus
            .subscribe_async("mouse_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_mouse_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle mouse events
    async fn handle_mouse_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::MouseInput(mouse) = event {
            let focus = {
                let app = self.app_state.read().await;
                app.focus
            };

            if focus == Focus::Prompt {
                self.handle_prompt_mouse(mouse).await?;
            } else {
                self.handle_pane_mouse(mouse).await?;
            }
        }

        Ok(())
    }

    /// Mouse input while the tree/editor panes are interactive
    async fn handle_pane_mouse(&self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row).await?;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.handle_drag(mouse.column).await?;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let mut app = self.app_state.write().await;
                if app.splitter_drag {
                    app.splitter_drag = false;
                    // Keep the dragged width across restarts
                    app.persist_config();
                }
            }
            MouseEventKind::ScrollUp => {
                self.handle_scroll(-3, mouse.column, mouse.row).await?;
            }
            MouseEventKind::ScrollDown => {
                self.handle_scroll(3, mouse.column, mouse.row).await?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Mouse input while the path prompt is open: a click outside the
    /// prompt cancels it
    async fn handle_prompt_mouse(&self, mouse: MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let inside = {
                let app = self.app_state.read().await;
                let area = crate::widgets::prompt::prompt_area(&app);
                mouse.column >= area.x
                    && mouse.column < area.x + area.width
                    && mouse.row >= area.y
                    && mouse.row < area.y + area.height
            };

            if !inside {
                self.event_sender.send(AppEvent::HidePrompt)?;
            }
        }

        Ok(())
    }

    /// Route a left click to the splitter, tree, tab bar or editor
    async fn handle_click(&self, mouse_x: u16, mouse_y: u16) -> Result<()> {
        // Splitter first so a drag can start even when the tree is hit
        {
            let mut app = self.app_state.write().await;
            if coordinates::on_splitter(&app, mouse_x, mouse_y) {
                app.splitter_drag = true;
                return Ok(());
            }
        }

        let tree_hit = {
            let app = self.app_state.read().await;
            coordinates::tree_row_at(&app, mouse_x, mouse_y)
        };
        if let Some(row_index) = tree_hit {
            self.handle_tree_click(row_index).await?;
            return Ok(());
        }

        let tab_hit = {
            let app = self.app_state.read().await;
            coordinates::tab_index_at(&app, mouse_x, mouse_y)
        };
        if let Some(tab_index) = tab_hit {
            let mut app = self.app_state.write().await;
            app.switch_to_document(tab_index);
            app.focus = Focus::Editor;
            return Ok(());
        }

        self.handle_editor_click(mouse_x, mouse_y).await
    }

    /// A click on a tree row selects it and invokes it
    async fn handle_tree_click(&self, row_index: usize) -> Result<()> {
        let row = {
            let mut app = self.app_state.write().await;
            app.focus = Focus::Tree;

            let Some(root) = app.workspace.as_ref() else {
                return Ok(());
            };
            let rows = app.tree_view.visible_rows(root);
            let Some(row) = rows.into_iter().nth(row_index) else {
                return Ok(());
            };

            app.tree_view.selected = row_index;
            row
        };

        match row.kind {
            NodeKind::Directory => {
                let mut app = self.app_state.write().await;
                app.tree_view.toggle_expanded(&row.path);
            }
            NodeKind::File => {
                self.open_file(row.path).await?;
            }
        }

        Ok(())
    }

    /// Open a clicked file, focusing an already-open tab instead of
    /// loading the path twice
    async fn open_file(&self, path: std::path::PathBuf) -> Result<()> {
        {
            let mut app = self.app_state.write().await;
            if let Some(index) = app.documents.find(&path) {
                app.switch_to_document(index);
                app.focus = Focus::Editor;
                return Ok(());
            }
        }

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

    /// Position the cursor at the clicked spot in the active document
    async fn handle_editor_click(&self, mouse_x: u16, mouse_y: u16) -> Result<()> {
        let mut app = self.app_state.write().await;

        if let Some((doc_row, doc_col)) = coordinates::screen_to_document_coords(&app, mouse_x, mouse_y)
        {
            if let Some(doc) = app.documents.active_mut() {
                doc.cursor_pos = (doc_row, doc_col);
            }
            app.focus = Focus::Editor;
            app.cursor_manager.notify_activity_for_active();
        }

        Ok(())
    }

    /// Dragging with the splitter grabbed resizes the tree panel
    async fn handle_drag(&self, mouse_x: u16) -> Result<()> {
        let mut app = self.app_state.write().await;

        if app.splitter_drag {
            if let Some(splitter) = coordinates::terminal_regions(&app).splitter {
                let delta = mouse_x as i16 - splitter.x as i16;
                app.resize_tree_panel(delta);
            }
        }

        Ok(())
    }

    /// Route scroll to the pane under the mouse
    async fn handle_scroll(&self, delta: i16, mouse_x: u16, mouse_y: u16) -> Result<()> {
        let mut app = self.app_state.write().await;
        let regions = coordinates::terminal_regions(&app);

        let over_tree = regions
            .tree
            .map(|tree| mouse_x >= tree.x && mouse_x < tree.x + tree.width)
            .unwrap_or(false);

        if over_tree {
            app.handle_tree_scroll(delta);
        } else if mouse_y >= regions.editor.y {
            app.handle_editor_scroll(delta, regions.editor);
        }

        Ok(())
    }
}

impl Clone for MouseHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
            event_sender: self.event_sender.clone(),
        }
    }
}
