//! Sidebar view state for the filesystem tree.
//!
//! Keeps expansion and selection separate from the tree itself: the tree
//! is replaced wholesale when a new workspace is opened, and the view
//! state is reset with it.

use std::collections::HashSet;
use std::path::PathBuf;

use super::{NodeKind, TreeNode};

/// One flattened, render-ready row of the tree.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub depth: u16,
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub expanded: bool,
}

/// Expansion and selection state for the tree panel.
#[derive(Debug, Clone, Default)]
pub struct TreeViewState {
    expanded: HashSet<PathBuf>,
    /// Index into the current flattened row list.
    pub selected: usize,
    /// First visible row, for scrolling long trees.
    pub scroll: usize,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a freshly built tree, with the root expanded.
    pub fn reset_for(&mut self, root: &TreeNode) {
        self.expanded.clear();
        self.expanded.insert(root.path.clone());
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn is_expanded(&self, path: &PathBuf) -> bool {
        self.expanded.contains(path)
    }

    pub fn toggle_expanded(&mut self, path: &PathBuf) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.clone());
        }
    }

    pub fn collapse(&mut self, path: &PathBuf) {
        self.expanded.remove(path);
    }

    pub fn expand(&mut self, path: PathBuf) {
        self.expanded.insert(path);
    }

    /// Move the selection, clamped to the current row count.
    pub fn move_selection(&mut self, delta: isize, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
            return;
        }
        let selected = self.selected as isize + delta;
        self.selected = selected.clamp(0, row_count as isize - 1) as usize;
    }

    /// Flatten the tree into visible rows following expansion state.
    ///
    /// The root itself is included as the first row so the workspace name
    /// stays visible at the top of the panel.
    pub fn visible_rows(&self, root: &TreeNode) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.push_rows(root, 0, &mut rows);
        rows
    }

    fn push_rows(&self, node: &TreeNode, depth: u16, rows: &mut Vec<TreeRow>) {
        let expanded = node.is_dir() && self.is_expanded(&node.path);
        rows.push(TreeRow {
            depth,
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            expanded,
        });

        if expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }
}
