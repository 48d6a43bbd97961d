//! # Open Documents
//!
//! A document is the in-memory, possibly-edited copy of one file's text,
//! identified by its source path. The registry owns the open set and the
//! active index, and guarantees at most one document per path.
//!
//! Content is stored as lines. Edits only touch memory; nothing reaches
//! disk until a save writes the whole buffer back to the document's path.

use std::path::{Path, PathBuf};

use crate::tree::FsError;

#[derive(Debug, Clone)]
pub struct Document {
    /// Source path; doubles as the document's identity.
    pub path: PathBuf,
    /// Tab title, the final segment of the path.
    pub title: String,
    pub content: Vec<String>,
    pub modified: bool,
    pub cursor_pos: (usize, usize), // (row, column), column in characters
    /// Whether the file's text ended with a newline, so a save writes
    /// back exactly what was read.
    trailing_newline: bool,
}

/// Byte offset of character `col` in `line`, or the line's byte length
/// when the column is at or past the end. Cursor columns count
/// characters, string edits need bytes.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Length of `line` in characters, not bytes.
fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl Document {
    fn from_text(path: PathBuf, text: &str) -> Self {
        let mut content: Vec<String> = text.lines().map(str::to_owned).collect();
        if content.is_empty() {
            content.push(String::new());
        }

        let title = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string();

        Self {
            path,
            title,
            content,
            modified: false,
            cursor_pos: (0, 0),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Read the whole file at `path` into a new document.
    pub fn from_path(path: PathBuf) -> Result<Self, FsError> {
        let text = std::fs::read_to_string(&path).map_err(|e| FsError::from_io(e, &path))?;
        Ok(Self::from_text(path, &text))
    }

    /// Read the whole file at `path` into a new document without blocking.
    pub async fn from_path_async(path: PathBuf) -> Result<Self, FsError> {
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FsError::from_io(e, &path))?;
        Ok(Self::from_text(path, &text))
    }

    /// Join the lines back into the full text of the document, restoring
    /// the trailing newline when the file had one.
    pub fn content_as_string(&self) -> String {
        let total: usize = self.content.iter().map(|line| line.len() + 1).sum();
        let mut result = String::with_capacity(total);

        for (i, line) in self.content.iter().enumerate() {
            result.push_str(line);
            if i < self.content.len() - 1 {
                result.push('\n');
            }
        }

        if self.trailing_newline {
            result.push('\n');
        }

        result
    }

    /// Overwrite the file at the document's path with the in-memory content.
    pub fn save(&mut self) -> Result<(), FsError> {
        let text = self.content_as_string();
        std::fs::write(&self.path, text).map_err(|e| FsError::from_io(e, &self.path))?;
        self.modified = false;
        Ok(())
    }

    /// Overwrite the file at the document's path without blocking.
    pub async fn save_async(&mut self) -> Result<(), FsError> {
        let text = self.content_as_string();
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| FsError::from_io(e, &self.path))?;
        self.modified = false;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.modified
    }

    pub fn insert_char(&mut self, c: char) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
        }

        let line = &mut self.content[row];
        let len = char_len(line);
        if col > len {
            line.push_str(&" ".repeat(col - len));
        }

        let idx = byte_index(line, col);
        line.insert(idx, c);
        self.cursor_pos.1 += 1;
        self.modified = true;
    }

    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
            self.cursor_pos = (row + 1, 0);
            return;
        }

        if col < char_len(&self.content[row]) {
            let idx = byte_index(&self.content[row], col);
            let tail = self.content[row][idx..].to_string();
            self.content[row].truncate(idx);
            self.content.insert(row + 1, tail);
        } else {
            self.content.insert(row + 1, String::new());
        }

        self.cursor_pos = (row + 1, 0);
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        let (row, col) = self.cursor_pos;
        if col > 0 {
            let line = &mut self.content[row];
            let idx = byte_index(line, col - 1);
            line.remove(idx);
            self.cursor_pos.1 -= 1;
            self.modified = true;
        } else if row > 0 {
            // Join with the previous line
            let current_line = self.content.remove(row);
            let prev_line = &mut self.content[row - 1];
            let new_cursor_col = char_len(prev_line);
            prev_line.push_str(&current_line);
            self.cursor_pos = (row - 1, new_cursor_col);
            self.modified = true;
        }
    }

    pub fn delete(&mut self) {
        let (row, col) = self.cursor_pos;
        if row < self.content.len() {
            let line = &mut self.content[row];
            if col < char_len(line) {
                let idx = byte_index(line, col);
                line.remove(idx);
                self.modified = true;
            } else if row + 1 < self.content.len() {
                // Join with the next line
                let next_line = self.content.remove(row + 1);
                self.content[row].push_str(&next_line);
                self.modified = true;
            }
        }
    }

    pub fn move_cursor(&mut self, movement: CursorMovement) {
        let (mut row, mut col) = self.cursor_pos;

        match movement {
            CursorMovement::Up => {
                if row > 0 {
                    row -= 1;
                    col = col.min(char_len(&self.content[row]));
                }
            }
            CursorMovement::Down => {
                if row + 1 < self.content.len() {
                    row += 1;
                    col = col.min(char_len(&self.content[row]));
                }
            }
            CursorMovement::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = char_len(&self.content[row]);
                }
            }
            CursorMovement::Right => {
                if col < char_len(&self.content[row]) {
                    col += 1;
                } else if row + 1 < self.content.len() {
                    row += 1;
                    col = 0;
                }
            }
            CursorMovement::LineStart => {
                col = 0;
            }
            CursorMovement::LineEnd => {
                col = char_len(&self.content[row]);
            }
            CursorMovement::PageUp => {
                row = row.saturating_sub(PAGE_SIZE);
                col = col.min(char_len(&self.content[row]));
            }
            CursorMovement::PageDown => {
                row = (row + PAGE_SIZE).min(self.content.len() - 1);
                col = col.min(char_len(&self.content[row]));
            }
            CursorMovement::DocumentStart => {
                row = 0;
                col = 0;
            }
            CursorMovement::DocumentEnd => {
                row = self.content.len() - 1;
                col = char_len(&self.content[row]);
            }
        }

        self.cursor_pos = (row, col);
    }

    /// Width needed for the line-number gutter, padded so the layout does
    /// not shift while typing.
    pub fn line_number_width(&self) -> usize {
        let total_lines = self.content.len().max(1);
        let mut digits = 1;
        let mut n = total_lines;
        while n >= 10 {
            digits += 1;
            n /= 10;
        }
        digits.max(4) + 1
    }
}

/// Fallback page size when the terminal height is unknown.
const PAGE_SIZE: usize = 8;

pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

/// The open set of documents plus the active index.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
    active: Option<usize>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|i| self.documents.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Document> {
        self.active.and_then(|i| self.documents.get_mut(i))
    }

    /// Find an open document by its identity path.
    pub fn find(&self, path: &Path) -> Option<usize> {
        self.documents.iter().position(|d| d.path == path)
    }

    /// Make the document at `index` active.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.documents.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(active) = self.active {
            self.active = Some((active + 1) % self.documents.len());
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(active) = self.active {
            self.active = Some(active.checked_sub(1).unwrap_or(self.documents.len() - 1));
        }
    }

    /// Focus the document for `path` if it is already open; otherwise read
    /// the file and append a fresh document, making it active.
    ///
    /// An already-open document is not reloaded, so changes on disk are not
    /// picked up until it is closed and reopened.
    pub fn open_or_focus(&mut self, path: &Path) -> Result<usize, FsError> {
        if let Some(index) = self.find(path) {
            self.active = Some(index);
            return Ok(index);
        }

        let doc = Document::from_path(path.to_path_buf())?;
        Ok(self.insert(doc))
    }

    /// Append an already-loaded document unless its path is open, in which
    /// case the existing one is focused instead. Upholds the one-document-
    /// per-path invariant for documents loaded off the interactive path.
    pub fn insert_or_focus(&mut self, doc: Document) -> usize {
        if let Some(index) = self.find(&doc.path) {
            self.active = Some(index);
            return index;
        }
        self.insert(doc)
    }

    fn insert(&mut self, doc: Document) -> usize {
        self.documents.push(doc);
        let index = self.documents.len() - 1;
        self.active = Some(index);
        index
    }

    /// Remove the document at `index` unconditionally; unsaved changes are
    /// discarded without prompting.
    pub fn close(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            return false;
        }

        self.documents.remove(index);

        self.active = match self.active {
            _ if self.documents.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.documents.len() - 1)),
            None => None,
        };

        true
    }

    /// Close the active document, if any.
    pub fn close_active(&mut self) -> bool {
        match self.active {
            Some(index) => self.close(index),
            None => false,
        }
    }

    /// Write the active document's full content back to its path,
    /// overwriting the file. A no-op when nothing is active.
    pub fn save_active(&mut self) -> Result<(), FsError> {
        if let Some(doc) = self.active_mut() {
            doc.save()?;
        }
        Ok(())
    }
}
