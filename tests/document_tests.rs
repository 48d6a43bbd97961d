//! Tests for documents and the open-document registry

use sapling::document::CursorMovement;
use sapling::tree::FsError;
use sapling::{Document, DocumentRegistry};
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_document_from_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "test.txt", "Line 1\nLine 2\nLine 3");

    let doc = Document::from_path(path.clone()).unwrap();

    assert_eq!(doc.path, path);
    assert_eq!(doc.title, "test.txt");
    assert_eq!(doc.content, vec!["Line 1", "Line 2", "Line 3"]);
    assert!(!doc.modified);
    assert_eq!(doc.cursor_pos, (0, 0));
}

#[test]
fn test_document_empty_file_has_one_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "empty.txt", "");

    let doc = Document::from_path(path).unwrap();
    assert_eq!(doc.content, vec![String::new()]);
}

#[test]
fn test_document_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.txt");

    match Document::from_path(missing.clone()) {
        Err(FsError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_document_from_path_async() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "async.txt", "first\nsecond");

    let doc = Document::from_path_async(path).await.unwrap();
    assert_eq!(doc.content, vec!["first", "second"]);
}

#[test]
fn test_editing_marks_modified() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "edit.txt", "hello");

    let mut doc = Document::from_path(path).unwrap();
    assert!(!doc.is_dirty());

    doc.cursor_pos = (0, 5);
    doc.insert_char('!');
    assert!(doc.is_dirty());
    assert_eq!(doc.content[0], "hello!");
}

#[test]
fn test_newline_and_backspace_join() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "join.txt", "hello world");

    let mut doc = Document::from_path(path).unwrap();
    doc.cursor_pos = (0, 5);
    doc.insert_newline();

    assert_eq!(doc.content, vec!["hello", " world"]);
    assert_eq!(doc.cursor_pos, (1, 0));

    // Backspace at the start of a line joins it with the previous one
    doc.backspace();
    assert_eq!(doc.content, vec!["hello world"]);
    assert_eq!(doc.cursor_pos, (0, 5));
}

#[test]
fn test_cursor_movement_clamps_to_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "move.txt", "a long line here\nshort\nlonger again");

    let mut doc = Document::from_path(path).unwrap();
    doc.cursor_pos = (0, 14);

    doc.move_cursor(CursorMovement::Down);
    assert_eq!(doc.cursor_pos, (1, 5)); // clamped to "short"

    doc.move_cursor(CursorMovement::DocumentEnd);
    assert_eq!(doc.cursor_pos, (2, 12));

    doc.move_cursor(CursorMovement::DocumentStart);
    assert_eq!(doc.cursor_pos, (0, 0));
}

#[test]
fn test_multibyte_insert_keeps_char_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "accents.txt", "");

    let mut doc = Document::from_path(path).unwrap();
    doc.insert_char('é');
    doc.insert_char('a');

    assert_eq!(doc.content[0], "éa");
    assert_eq!(doc.cursor_pos, (0, 2));
}

#[test]
fn test_multibyte_backspace_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "umlaut.txt", "füür");

    let mut doc = Document::from_path(path).unwrap();
    doc.cursor_pos = (0, 2);
    doc.backspace();
    assert_eq!(doc.content[0], "für");
    assert_eq!(doc.cursor_pos, (0, 1));

    doc.delete();
    assert_eq!(doc.content[0], "fr");
}

#[test]
fn test_multibyte_line_end_and_split() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "kana.txt", "日本語 text");

    let mut doc = Document::from_path(path).unwrap();

    // Columns count characters, not bytes
    doc.move_cursor(CursorMovement::LineEnd);
    assert_eq!(doc.cursor_pos, (0, 8));

    doc.cursor_pos = (0, 3);
    doc.insert_newline();
    assert_eq!(doc.content, vec!["日本語", " text"]);
}

#[test]
fn test_save_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "save.txt", "original");

    let mut doc = Document::from_path(path.clone()).unwrap();
    doc.cursor_pos = (0, 8);
    doc.insert_char('!');
    assert!(doc.modified);

    doc.save().unwrap();
    assert!(!doc.modified);

    // The whole content was written back
    assert_eq!(fs::read_to_string(&path).unwrap(), "original!");
}

#[test]
fn test_save_preserves_trailing_newline() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "trail.txt", "one\ntwo\n");

    let mut doc = Document::from_path(path.clone()).unwrap();
    doc.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn test_save_does_not_invent_trailing_newline() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "notrail.txt", "one\ntwo");

    let mut doc = Document::from_path(path.clone()).unwrap();
    doc.cursor_pos = (1, 3);
    doc.insert_char('!');
    doc.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo!");
}

#[tokio::test]
async fn test_save_async_clears_modified() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "save_async.txt", "abc");

    let mut doc = Document::from_path_async(path.clone()).await.unwrap();
    doc.cursor_pos = (0, 3);
    doc.insert_char('d');

    doc.save_async().await.unwrap();
    assert!(!doc.modified);
    assert_eq!(fs::read_to_string(&path).unwrap(), "abcd");
}

#[test]
fn test_registry_open_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "one.txt", "content");

    let mut registry = DocumentRegistry::new();
    let first = registry.open_or_focus(&path).unwrap();
    let second = registry.open_or_focus(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.active_index(), Some(first));
}

#[test]
fn test_registry_does_not_reload_open_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "stale.txt", "old content");

    let mut registry = DocumentRegistry::new();
    registry.open_or_focus(&path).unwrap();

    // Change the file on disk behind the registry's back
    fs::write(&path, "new content").unwrap();

    registry.open_or_focus(&path).unwrap();
    assert_eq!(registry.active().unwrap().content, vec!["old content"]);
}

#[test]
fn test_registry_close_then_reopen_reloads() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "reload.txt", "old content");

    let mut registry = DocumentRegistry::new();
    registry.open_or_focus(&path).unwrap();

    fs::write(&path, "new content").unwrap();

    assert!(registry.close_active());
    assert!(registry.is_empty());

    registry.open_or_focus(&path).unwrap();
    assert_eq!(registry.active().unwrap().content, vec!["new content"]);
}

#[test]
fn test_registry_close_discards_unsaved_changes() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "discard.txt", "saved");

    let mut registry = DocumentRegistry::new();
    registry.open_or_focus(&path).unwrap();

    let doc = registry.active_mut().unwrap();
    doc.cursor_pos = (0, 5);
    doc.insert_char('?');
    assert!(doc.is_dirty());

    // Close without saving; the file keeps its old content
    assert!(registry.close_active());
    assert_eq!(fs::read_to_string(&path).unwrap(), "saved");
}

#[test]
fn test_registry_close_adjusts_active_index() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_file(&temp_dir, "a.txt", "a");
    let b = write_file(&temp_dir, "b.txt", "b");
    let c = write_file(&temp_dir, "c.txt", "c");

    let mut registry = DocumentRegistry::new();
    registry.open_or_focus(&a).unwrap();
    registry.open_or_focus(&b).unwrap();
    registry.open_or_focus(&c).unwrap();
    assert_eq!(registry.active_index(), Some(2));

    // Closing a tab before the active one shifts the index down
    assert!(registry.close(0));
    assert_eq!(registry.active_index(), Some(1));
    assert_eq!(registry.active().unwrap().title, "c.txt");

    // Closing the last remaining tabs empties the registry
    assert!(registry.close_active());
    assert!(registry.close_active());
    assert_eq!(registry.active_index(), None);
    assert!(!registry.close_active());
}

#[test]
fn test_registry_cycle_wraps() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_file(&temp_dir, "a.txt", "a");
    let b = write_file(&temp_dir, "b.txt", "b");

    let mut registry = DocumentRegistry::new();
    registry.open_or_focus(&a).unwrap();
    registry.open_or_focus(&b).unwrap();

    registry.focus_next();
    assert_eq!(registry.active().unwrap().title, "a.txt");
    registry.focus_prev();
    assert_eq!(registry.active().unwrap().title, "b.txt");
    registry.focus_prev();
    assert_eq!(registry.active().unwrap().title, "a.txt");
}

#[test]
fn test_registry_insert_or_focus_deduplicates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "dup.txt", "content");

    let mut registry = DocumentRegistry::new();
    let doc = Document::from_path(path.clone()).unwrap();
    let first = registry.insert_or_focus(doc);

    let again = Document::from_path(path).unwrap();
    let second = registry.insert_or_focus(again);

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_save_active() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "sa.txt", "x");

    let mut registry = DocumentRegistry::new();

    // No active document is a no-op, not an error
    registry.save_active().unwrap();

    registry.open_or_focus(&path).unwrap();
    let doc = registry.active_mut().unwrap();
    doc.cursor_pos = (0, 1);
    doc.insert_char('y');

    registry.save_active().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "xy");
    assert!(!registry.active().unwrap().is_dirty());
}
