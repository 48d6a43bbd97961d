pub mod cursor;
pub mod editor;
pub mod file_tree;
pub mod prompt;
pub mod status_bar;
pub mod tab_bar;
pub mod toast;

pub use cursor::{Cursor, CursorManager, CursorState, CursorSupport};
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
