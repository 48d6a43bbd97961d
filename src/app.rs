use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event},
    Terminal,
};
use tokio::sync::RwLock;

use crate::config::{Config, ConfigManager};
use crate::count::{count_text, TextCounts};
use crate::document::{Document, DocumentRegistry};
use crate::events::EventBus;
use crate::handlers::{AppStateHandler, KeyboardHandler, MouseHandler};
use crate::input_system::InputSystem;
use crate::tree::{build_tree, view::TreeViewState, TreeNode};
use crate::widgets::CursorManager;

/// Narrowest the tree panel can be dragged.
pub const MIN_TREE_WIDTH: u16 = 16;
/// Widest the tree panel can be dragged.
pub const MAX_TREE_WIDTH: u16 = 60;

/// Which pane currently receives keyboard input
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    /// Text editing surface
    Editor,

    /// File-tree sidebar
    Tree,

    /// Path prompt modal
    Prompt,
}

/// What a path prompt is asking for
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PromptKind {
    /// Pick a folder to open as the workspace
    OpenFolder,

    /// Pick a single file to open in a tab
    OpenFile,
}

/// State of the open path prompt
#[derive(Debug, Clone)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

/// Contains global state that needs to be shared
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// Root of the materialized workspace tree, if a folder is open
    pub workspace: Option<TreeNode>,

    /// Expansion/selection state for the tree panel
    pub tree_view: TreeViewState,

    /// Open documents and the active tab
    pub documents: DocumentRegistry,

    /// Scroll position for the active editor
    pub scroll_offset: (usize, usize),

    /// Which pane has keyboard focus
    pub focus: Focus,

    /// Open path prompt, if any
    pub prompt: Option<PromptState>,

    /// Message to display on status bar
    pub status_message: Option<String>,

    /// Directory where user config is stored
    pub user_dir: PathBuf,

    /// Settings loaded at startup
    pub config: Config,

    /// Toast notification manager
    pub toast_manager: crate::widgets::toast::ToastManager,

    /// Cursor manager for the editor and prompt cursors
    pub cursor_manager: CursorManager,

    /// Status bar with slot-based system
    pub status_bar: crate::widgets::StatusBar,

    /// Whether the tree panel is shown
    pub tree_panel_visible: bool,

    /// Current tree panel width in columns; kept across hide/show so a
    /// toggle restores the previous width
    pub tree_panel_width: u16,

    /// Whether a splitter drag is in progress
    pub splitter_drag: bool,
}

impl App {
    pub async fn new() -> Self {
        let user_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sapling");

        // Create user directory if it doesn't exist
        if !user_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&user_dir).await {
                eprintln!("Warning: Could not create user directory: {}", e);
            }
        }

        let mut config_manager = ConfigManager::new(&user_dir);
        let _ = config_manager.load();
        let config = config_manager.get_config().clone();

        let mut app = Self {
            running: true,
            workspace: None,
            tree_view: TreeViewState::new(),
            documents: DocumentRegistry::new(),
            scroll_offset: (0, 0),
            focus: Focus::Editor,
            prompt: None,
            status_message: None,
            user_dir,
            tree_panel_visible: config.ui.show_tree_panel,
            tree_panel_width: config.ui.tree_panel_width.clamp(MIN_TREE_WIDTH, MAX_TREE_WIDTH),
            config,
            toast_manager: crate::widgets::toast::ToastManager::new(),
            cursor_manager: CursorManager::new(),
            status_bar: crate::widgets::StatusBar::new(),
            splitter_drag: false,
        };

        app.init_status_bar();
        app
    }

    /// Start with a path from the command line: a directory opens as the
    /// workspace, anything else opens as a document.
    pub async fn with_path(path: &str) -> Result<Self> {
        let mut app = Self::new().await;
        let path = PathBuf::from(path);

        if path.is_dir() {
            let root = tokio::task::spawn_blocking(move || build_tree(&path))
                .await?
                .map_err(|e| anyhow!("Failed to open folder: {}", e))?;
            app.set_workspace(root);
        } else {
            let doc = Document::from_path_async(path.clone())
                .await
                .map_err(|e| anyhow!("Failed to open file '{}': {}", path.display(), e))?;
            app.documents.insert_or_focus(doc);
        }

        Ok(app)
    }

    /// Run the application with the event-driven architecture
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<bool> {
        // Create shared app state
        let app_state = Arc::new(RwLock::new(std::mem::take(self)));

        // Create event bus and input system
        let event_bus = EventBus::new();
        let input_system = InputSystem::new(event_bus.clone());

        // Create and subscribe event handlers
        let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
        let mouse_handler = MouseHandler::new(app_state.clone(), input_system.event_sender());
        let app_state_handler = AppStateHandler::new(app_state.clone());

        keyboard_handler.subscribe(&event_bus).await?;
        mouse_handler.subscribe(&event_bus).await?;
        app_state_handler.subscribe(&event_bus).await?;

        // Start event processing in background
        let event_bus_clone = event_bus.clone();
        tokio::spawn(async move {
            if let Err(e) = event_bus_clone.start_processing().await {
                eprintln!("Event processing error: {}", e);
            }
        });

        // Target frame rate
        let frame_duration = Duration::from_millis(16);
        let mut last_frame = Instant::now();

        // Main event loop
        loop {
            let frame_start = Instant::now();

            // Check if app should quit
            {
                let app = app_state.read().await;
                if !app.running {
                    break;
                }
            }

            // Draw the UI - limit to target frame rate
            if frame_start.duration_since(last_frame) >= frame_duration {
                let mut app = app_state.write().await;
                if let Err(e) = terminal.draw(|f| app.render(f)) {
                    eprintln!("Rendering error: {}", e);
                    break;
                }
                drop(app); // Release lock immediately after drawing
                last_frame = frame_start;
            }

            // Check for events without blocking to maintain frame rate
            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Err(e) = input_system.handle_key_input(key) {
                            eprintln!("Error handling key input: {}", e);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(e) = input_system.handle_mouse_input(mouse) {
                            eprintln!("Error handling mouse input: {}", e);
                        }
                    }
                    Event::Resize(_, _) => {
                        // Redrawn next frame anyway
                    }
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        match Arc::try_unwrap(app_state) {
            Ok(app_mutex) => {
                *self = app_mutex.into_inner();
            }
            Err(app_state_arc) => {
                // Fallback if there are still references (shouldn't happen in normal operation)
                eprintln!(
                    "Warning: App state still has multiple references, using expensive clone fallback"
                );
                let app_guard = app_state_arc.read().await;
                *self = app_guard.clone();
            }
        }

        Ok(true)
    }

    /// Replace the workspace tree and reset the view state.
    ///
    /// The previous tree is discarded entirely; there is no incremental
    /// update when the folder changes.
    pub fn set_workspace(&mut self, root: TreeNode) {
        self.tree_view.reset_for(&root);
        self.workspace = Some(root);
        self.tree_panel_visible = true;
    }

    /// Open the file at `path` into a tab, or focus the existing tab.
    pub fn open_or_focus(&mut self, path: &Path) -> Result<usize, crate::tree::FsError> {
        let index = self.documents.open_or_focus(path)?;
        self.scroll_offset = (0, 0);
        Ok(index)
    }

    /// Switch to a tab by index
    pub fn switch_to_document(&mut self, index: usize) -> bool {
        if self.documents.focus(index) {
            // Reset scroll when switching tabs
            self.scroll_offset = (0, 0);
            true
        } else {
            false
        }
    }

    /// Close the active tab; unsaved changes are discarded
    pub fn close_active_document(&mut self) -> bool {
        if self.documents.close_active() {
            self.scroll_offset = (0, 0);
            true
        } else {
            false
        }
    }

    /// Show or hide the tree panel. The panel width is kept while hidden
    /// so toggling twice lands back on the same layout.
    pub fn toggle_tree_panel(&mut self) {
        self.tree_panel_visible = !self.tree_panel_visible;
        if !self.tree_panel_visible {
            self.splitter_drag = false;
        }
        self.config.ui.show_tree_panel = self.tree_panel_visible;
    }

    /// Show or hide the status bar row. The layout reclaims the row while
    /// it is hidden.
    pub fn toggle_status_bar(&mut self) {
        self.config.ui.show_status_bar = !self.config.ui.show_status_bar;
    }

    /// Resize the tree panel by `delta` columns, clamped to its bounds.
    pub fn resize_tree_panel(&mut self, delta: i16) {
        let width = self.tree_panel_width as i16 + delta;
        self.tree_panel_width = width.clamp(MIN_TREE_WIDTH as i16, MAX_TREE_WIDTH as i16) as u16;
        self.config.ui.tree_panel_width = self.tree_panel_width;
    }

    /// Write the current settings back to the config file so layout
    /// changes survive a restart. Failures are reported but not fatal.
    pub fn persist_config(&self) {
        let mut manager = ConfigManager::new(&self.user_dir);
        *manager.get_config_mut() = self.config.clone();
        if let Err(e) = manager.save() {
            eprintln!("Warning: Could not save config: {}", e);
        }
    }

    /// Word/char counts for the active document; `(0, 0)` when no tab is
    /// active.
    pub fn active_counts(&self) -> TextCounts {
        match self.documents.active() {
            Some(doc) => count_text(&doc.content_as_string()),
            None => TextCounts::default(),
        }
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Check if any open documents have unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.documents.documents().iter().any(|doc| doc.is_dirty())
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        use crate::widgets::{SlotAlignment, StatusSlot};
        use ratatui::style::{Color, Style};

        // File info slot (left side, high priority)
        let file_slot = StatusSlot::new("file", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(100)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(file_slot);

        // Cursor position slot (left side, medium priority)
        let cursor_slot = StatusSlot::new("cursor", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(90)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(cursor_slot);

        // Modified status slot (left side, medium priority)
        let modified_slot = StatusSlot::new("modified", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(80)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(modified_slot);

        // Transient status message slot (left side, low priority)
        let message_slot = StatusSlot::new("message", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(70)
            .with_style(Style::default().fg(Color::Yellow).bg(Color::LightBlue));
        self.status_bar.set_slot(message_slot);

        // Word count slot (right side, high priority)
        let words_slot = StatusSlot::new("words", "Words: 0")
            .with_alignment(SlotAlignment::Right)
            .with_priority(100)
            .with_style(Style::default().fg(Color::White).bg(Color::DarkGray))
            .with_visibility(self.config.ui.show_word_count);
        self.status_bar.set_slot(words_slot);

        // Character count slot (right side, high priority)
        let chars_slot = StatusSlot::new("chars", "Characters: 0")
            .with_alignment(SlotAlignment::Right)
            .with_priority(90)
            .with_style(Style::default().fg(Color::White).bg(Color::DarkGray))
            .with_visibility(self.config.ui.show_char_count);
        self.status_bar.set_slot(chars_slot);

        // Open tab count slot (right side, low priority)
        let docs_slot = StatusSlot::new("docs", "")
            .with_alignment(SlotAlignment::Right)
            .with_priority(60)
            .with_style(Style::default().fg(Color::Gray).bg(Color::LightBlue));
        self.status_bar.set_slot(docs_slot);
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        let counts = self.active_counts();
        self.status_bar
            .update_slot_content("words", format!("Words: {}", counts.words));
        self.status_bar
            .update_slot_content("chars", format!("Characters: {}", counts.chars));

        self.status_bar.update_slot_content(
            "message",
            self.status_message.clone().unwrap_or_default(),
        );

        if let Some(doc) = self.documents.active() {
            let (row, col) = doc.cursor_pos;
            let title = doc.title.clone();
            let modified = doc.modified;

            self.status_bar.update_slot_content("file", title);
            self.status_bar
                .update_slot_content("cursor", format!("Ln {}, Col {}", row + 1, col + 1));
            self.status_bar
                .update_slot_content("modified", if modified { "Unsaved" } else { "Saved" });

            let docs_info = format!(
                "Tab {}/{}",
                self.documents.active_index().map(|i| i + 1).unwrap_or(0),
                self.documents.len()
            );
            self.status_bar.update_slot_content("docs", docs_info);
        } else {
            self.status_bar.update_slot_content("file", "no file");
            self.status_bar.update_slot_content("cursor", "");
            self.status_bar.update_slot_content("modified", "");
            self.status_bar.update_slot_content("docs", "");
        }
    }
}

// Make App cloneable for the event system
// WARNING: This clone is expensive! It clones all documents and the
// workspace tree. Only used as a fallback when Arc::try_unwrap fails.
impl Clone for App {
    fn clone(&self) -> Self {
        let mut app = Self {
            running: self.running,
            workspace: self.workspace.clone(),
            tree_view: self.tree_view.clone(),
            documents: self.documents.clone(),
            scroll_offset: self.scroll_offset,
            focus: self.focus,
            prompt: self.prompt.clone(),
            status_message: self.status_message.clone(),
            user_dir: self.user_dir.clone(),
            config: self.config.clone(),
            toast_manager: crate::widgets::toast::ToastManager::new(), // Create new instance
            cursor_manager: CursorManager::new(),                      // Create new instance
            status_bar: crate::widgets::StatusBar::new(),              // Create new instance
            tree_panel_visible: self.tree_panel_visible,
            tree_panel_width: self.tree_panel_width,
            splitter_drag: false,
        };

        app.init_status_bar();
        app
    }
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let mut app = Self {
            running: true,
            workspace: None,
            tree_view: TreeViewState::new(),
            documents: DocumentRegistry::new(),
            scroll_offset: (0, 0),
            focus: Focus::Editor,
            prompt: None,
            status_message: None,
            user_dir: PathBuf::from("."),
            tree_panel_visible: config.ui.show_tree_panel,
            tree_panel_width: config.ui.tree_panel_width,
            config,
            toast_manager: crate::widgets::toast::ToastManager::new(),
            cursor_manager: CursorManager::new(),
            status_bar: crate::widgets::StatusBar::new(),
            splitter_drag: false,
        };

        app.init_status_bar();
        app
    }
}
