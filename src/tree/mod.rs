//! # Filesystem Tree
//!
//! Materializes a directory into an in-memory tree of nodes for the
//! sidebar. The tree is built in one shot when a workspace is opened and
//! discarded wholesale when a new folder is picked; there is no
//! incremental refresh.

pub mod view;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from filesystem tree and document operations.
#[derive(Debug)]
pub enum FsError {
    /// The path vanished between listing and access, or never existed.
    NotFound(PathBuf),
    /// Listing a directory or reading/writing a file was denied.
    PermissionDenied(PathBuf),
    /// Any other read/write failure.
    Io(io::Error),
}

impl FsError {
    /// Classify a raw I/O error against the path it occurred on.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "path not found: {}", path.display()),
            FsError::PermissionDenied(path) => write!(f, "permission denied: {}", path.display()),
            FsError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for FsError {}

/// Whether a node is a file or a directory.
///
/// Kind is tagged explicitly rather than inferred from the child count,
/// so an empty directory is still invokable as a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One filesystem entry in the materialized tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Display label, the final segment of the path.
    pub name: String,
    /// Absolute path, used as the node's identity.
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Ordered children; always empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(path: PathBuf, kind: NodeKind) -> Self {
        let name = display_name(&path);
        Self {
            name,
            path,
            kind,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Derive a display label from a path's final segment.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the tree for `root` with a depth-first pre-order walk.
///
/// Subdirectories are listed first, each fully expanded before the next
/// sibling, then files as leaf nodes. Entries keep whatever order
/// `read_dir` yields; no sorting is applied. Symlink cycles are not
/// detected.
pub fn build_tree(root: &Path) -> Result<TreeNode, FsError> {
    if !root.exists() {
        return Err(FsError::NotFound(root.to_path_buf()));
    }

    let mut node = TreeNode::new(root.to_path_buf(), NodeKind::Directory);
    add_directory_nodes(&mut node, root)?;
    Ok(node)
}

/// Recursively append the children of `path` onto `parent`.
fn add_directory_nodes(parent: &mut TreeNode, path: &Path) -> Result<(), FsError> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(path).map_err(|e| FsError::from_io(e, path))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::from_io(e, path))?;
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| FsError::from_io(e, &entry_path))?;

        if file_type.is_dir() {
            let mut dir_node = TreeNode::new(entry_path.clone(), NodeKind::Directory);
            add_directory_nodes(&mut dir_node, &entry_path)?;
            parent.children.push(dir_node);
        } else {
            files.push(TreeNode::new(entry_path, NodeKind::File));
        }
    }

    parent.children.extend(files);
    Ok(())
}
