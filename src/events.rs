use anyhow::Result;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::app::PromptKind;
use crate::document::Document;
use crate::tree::TreeNode;

/// All possible events in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input events
    KeyInput(KeyEvent),

    /// Mouse input events
    MouseInput(MouseEvent),

    /// A workspace tree finished building on a background task
    WorkspaceLoaded {
        root: TreeNode,
    },

    /// A file finished loading on a background task
    DocumentLoaded {
        doc: Document,
    },

    /// UI events
    StatusMessage {
        message: Arc<str>,
    },
    ToastMessage {
        message: Arc<str>,
        toast_type: Arc<str>,
    },
    ShowPrompt {
        kind: PromptKind,
    },
    HidePrompt,
    ToggleTreePanel,
    ToggleStatusBar,

    /// Application lifecycle
    Quit,
}

/// Async event handler function type
pub type AsyncEventHandler = Arc<
    dyn Fn(AppEvent) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

/// Event bus for publishing and subscribing to events
#[derive(Clone)]
pub struct EventBus {
    /// Handlers keyed by event type
    handlers: Arc<RwLock<HashMap<String, Vec<AsyncEventHandler>>>>,

    /// Channel for sending events
    sender: mpsc::UnboundedSender<AppEvent>,

    /// Channel for receiving events
    receiver: Arc<RwLock<Option<mpsc::UnboundedReceiver<AppEvent>>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            sender,
            receiver: Arc::new(RwLock::new(Some(receiver))),
        }
    }

    /// Get a sender for publishing events
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.sender.clone()
    }

    /// Subscribe to events of `event_type` with an async handler
    pub async fn subscribe_async<F, Fut>(&self, event_type: &str, handler: F)
    where
        F: Fn(AppEvent) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers
            .entry(event_type.to_string())
            .or_insert_with(Vec::new)
            .push(Arc::new(move |event| Box::pin(handler(event))));
    }

    /// Publish an event
    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Start processing events (should be called once in a background task)
    pub async fn start_processing(&self) -> Result<()> {
        let mut receiver = {
            let mut receiver_guard = self.receiver.write().await;
            receiver_guard
                .take()
                .ok_or_else(|| anyhow::anyhow!("Event processor already started"))?
        };

        while let Some(event) = receiver.recv().await {
            self.handle_event(event).await;
        }

        Ok(())
    }

    /// Handle a single event by calling all registered handlers
    async fn handle_event(&self, event: AppEvent) {
        let event_type = self.get_event_type(&event);

        let handlers = self.handlers.read().await;
        if let Some(event_handlers) = handlers.get(event_type) {
            for handler in event_handlers {
                if let Err(e) = handler(event.clone()).await {
                    eprintln!("Error in event handler for {}: {}", event_type, e);
                }
            }
        }
    }

    /// Get the event type string for routing
    fn get_event_type(&self, event: &AppEvent) -> &'static str {
        match event {
            AppEvent::KeyInput(_) => "key_input",
            AppEvent::MouseInput(_) => "mouse_input",
            AppEvent::WorkspaceLoaded { .. } => "workspace_loaded",
            AppEvent::DocumentLoaded { .. } => "document_loaded",
            AppEvent::StatusMessage { .. } => "status_message",
            AppEvent::ToastMessage { .. } => "toast_message",
            AppEvent::ShowPrompt { .. } => "show_prompt",
            AppEvent::HidePrompt => "hide_prompt",
            AppEvent::ToggleTreePanel => "toggle_tree_panel",
            AppEvent::ToggleStatusBar => "toggle_status_bar",
            AppEvent::Quit => "quit",
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
