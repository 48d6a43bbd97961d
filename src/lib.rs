//! Sapling: a small terminal text editor with a file-tree sidebar,
//! tabbed documents and live word/character counts.

pub mod app;
pub mod config;
pub mod count;
pub mod document;
pub mod events;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod tree;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::{App, Focus, PromptKind};
pub use count::{count_text, TextCounts};
pub use document::{Document, DocumentRegistry};
pub use tree::{build_tree, NodeKind, TreeNode};
