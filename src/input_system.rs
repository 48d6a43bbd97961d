use crate::events::{AppEvent, EventBus};
use anyhow::{Context, Result};
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// Bridge between raw terminal input and the event bus.
///
/// The frame loop polls crossterm and hands key and mouse events here;
/// the focus-aware handlers pick them up as bus events.
pub struct InputSystem {
    event_bus: EventBus,
}

impl InputSystem {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    /// Put a key press onto the bus
    pub fn handle_key_input(&self, key: KeyEvent) -> Result<()> {
        self.event_bus
            .publish(AppEvent::KeyInput(key))
            .context("key input dropped before reaching the bus")
    }

    /// Put a mouse event onto the bus
    pub fn handle_mouse_input(&self, mouse: MouseEvent) -> Result<()> {
        self.event_bus
            .publish(AppEvent::MouseInput(mouse))
            .context("mouse input dropped before reaching the bus")
    }

    /// Sender for publishing events without going through input
    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_bus.sender()
    }
}
