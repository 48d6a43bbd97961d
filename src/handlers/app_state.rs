/// Application state handlers that respond to events
use crate::app::PromptState;
use crate::events::{AppEvent, EventBus};
use crate::{App, Focus};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// App state handler that manages application state in response to events
pub struct AppStateHandler {
    app_state: Arc<RwLock<App>>,
}

impl AppStateHandler {
    /// Create a new app state handler
    pub fn new(app_state: Arc<RwLock<App>>) -> Self {
        Self { app_state }
    }

    /// Subscribe to all relevant events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = AppStateHandler::new(self.app_state.clone());

        // Subscribe to workspace loads finishing
        event_bus
            .subscribe_async("workspace_loaded", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_workspace_loaded(event).await }
                }
            })
            .await;

        // Subscribe to document loads finishing
        event_bus
            .subscribe_async("document_loaded", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_document_loaded(event).await }
                }
            })
            .await;

        // Subscribe to status messages
        event_bus
            .subscribe_async("status_message", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_status_message(event).await }
                }
            })
            .await;

        // Subscribe to toast messages
        event_bus
            .subscribe_async("toast_message", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_toast_message(event).await }
                }
            })
            .await;

        // Subscribe to prompt open/close events
        event_bus
            .subscribe_async("show_prompt", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_show_prompt(event).await }
                }
            })
            .await;

        event_bus
            .subscribe_async("hide_prompt", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_hide_prompt(event).await }
                }
            })
            .await;

        // Subscribe to panel toggles
        event_bus
            .subscribe_async("toggle_tree_panel", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_toggle_tree_panel(event).await }
                }
            })
            .await;

        event_bus
            .subscribe_async("toggle_status_bar", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_toggle_status_bar(event).await }
                }
            })
            .await;

        // Subscribe to quit events
        event_bus
            .subscribe_async("quit", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_quit(event).await }
                }
            })
            .await;

        Ok(())
    }

    /// A workspace tree finished building: install it and reset the view
    async fn handle_workspace_loaded(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::WorkspaceLoaded { root } = event {
            let mut app = self.app_state.write().await;
            let name = root.name.clone();
            app.set_workspace(root);
            app.set_status_message(format!("Opened folder: {}", name));
        }

        Ok(())
    }

    /// A document finished loading: insert it (or focus the existing tab
    /// for the same path) and move focus to the editor
    async fn handle_document_loaded(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::DocumentLoaded { doc } = event {
            let mut app = self.app_state.write().await;
            app.documents.insert_or_focus(doc);
            app.scroll_offset = (0, 0);
            app.focus = Focus::Editor;
            app.cursor_manager.notify_activity_for_active();
        }

        Ok(())
    }

    /// Handle status message events
    async fn handle_status_message(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::StatusMessage { message } = event {
            let mut app = self.app_state.write().await;
            app.status_message = Some(message.to_string());
        }

        Ok(())
    }

    /// Handle toast message events
    async fn handle_toast_message(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::ToastMessage {
            message,
            toast_type,
        } = event
        {
            let mut app = self.app_state.write().await;

            use crate::widgets::toast::{Toast, ToastType};
            let toast_type = match toast_type.as_ref() {
                "error" => ToastType::Error,
                "success" => ToastType::Success,
                "warning" => ToastType::Warning,
                _ => ToastType::Info,
            };

            let toast = Toast::new(message.to_string(), toast_type);
            app.toast_manager.add_toast(toast);
        }

        Ok(())
    }

    /// Open the path prompt and move focus into it
    async fn handle_show_prompt(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::ShowPrompt { kind } = event {
            let mut app = self.app_state.write().await;
            app.prompt = Some(PromptState {
                kind,
                input: String::new(),
            });
            app.focus = Focus::Prompt;
            app.cursor_manager.notify_activity("prompt");
        }

        Ok(())
    }

    /// Close the path prompt and return focus to the editor
    async fn handle_hide_prompt(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::HidePrompt = event {
            let mut app = self.app_state.write().await;
            app.prompt = None;
            app.focus = Focus::Editor;
        }

        Ok(())
    }

    /// Show or hide the tree panel
    async fn handle_toggle_tree_panel(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::ToggleTreePanel = event {
            let mut app = self.app_state.write().await;
            app.toggle_tree_panel();

            // Focus can't stay on a hidden panel
            if !app.tree_panel_visible && app.focus == Focus::Tree {
                app.focus = Focus::Editor;
            }

            app.persist_config();
        }

        Ok(())
    }

    /// Show or hide the status bar row
    async fn handle_toggle_status_bar(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::ToggleStatusBar = event {
            let mut app = self.app_state.write().await;
            app.toggle_status_bar();
            app.persist_config();
        }

        Ok(())
    }

    /// Handle quit events
    async fn handle_quit(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::Quit = event {
            let mut app = self.app_state.write().await;
            app.running = false;
        }

        Ok(())
    }
}

impl Clone for AppStateHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
        }
    }
}
