//! Tests for shared application state

use ratatui::layout::Rect;
use sapling::app::{MAX_TREE_WIDTH, MIN_TREE_WIDTH};
use sapling::config::ConfigManager;
use sapling::input::coordinates::screen_regions;
use sapling::{App, Document, Focus};
use std::fs;
use tempfile::TempDir;

fn open_doc(app: &mut App, dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    let doc = Document::from_path(path).unwrap();
    app.documents.insert_or_focus(doc);
}

#[test]
fn test_default_app_state() {
    let app = App::default();

    assert!(app.running);
    assert!(app.workspace.is_none());
    assert!(app.documents.is_empty());
    assert_eq!(app.focus, Focus::Editor);
    assert!(app.prompt.is_none());
}

#[tokio::test]
async fn test_with_path_opens_folder_as_workspace() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(temp_dir.path().join("sub")).unwrap();

    let app = App::with_path(temp_dir.path().to_str().unwrap())
        .await
        .unwrap();

    let root = app.workspace.as_ref().expect("workspace not set");
    assert_eq!(root.children.len(), 2);
    assert!(app.tree_panel_visible);
    assert!(app.documents.is_empty());
}

#[tokio::test]
async fn test_with_path_opens_file_as_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("single.txt");
    fs::write(&path, "just one file").unwrap();

    let app = App::with_path(path.to_str().unwrap()).await.unwrap();

    assert!(app.workspace.is_none());
    assert_eq!(app.documents.len(), 1);
    assert_eq!(app.documents.active().unwrap().title, "single.txt");
}

#[tokio::test]
async fn test_with_path_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("ghost.txt");

    assert!(App::with_path(missing.to_str().unwrap()).await.is_err());
}

#[test]
fn test_toggle_tree_panel_twice_restores_layout() {
    let mut app = App::default();
    app.tree_panel_width = 33;
    let area = Rect::new(0, 0, 120, 40);

    let before = screen_regions(&app, area);
    assert!(before.tree.is_some());
    let editor_before = before.editor;

    app.toggle_tree_panel();
    let hidden = screen_regions(&app, area);
    assert!(hidden.tree.is_none());
    assert!(hidden.splitter.is_none());
    // Hidden panel gives its columns to the editor
    assert!(hidden.editor.width > editor_before.width);

    app.toggle_tree_panel();
    let restored = screen_regions(&app, area);
    assert_eq!(restored.tree.unwrap().width, 33);
    assert_eq!(restored.editor, editor_before);
}

#[test]
fn test_toggle_status_bar_reclaims_row() {
    let mut app = App::default();
    let area = Rect::new(0, 0, 100, 30);

    let before = screen_regions(&app, area);
    assert!(before.status.is_some());

    app.toggle_status_bar();
    let hidden = screen_regions(&app, area);
    assert!(hidden.status.is_none());
    assert_eq!(hidden.editor.height, before.editor.height + 1);

    app.toggle_status_bar();
    assert!(screen_regions(&app, area).status.is_some());
}

#[test]
fn test_persist_config_keeps_layout_changes() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();
    app.user_dir = temp_dir.path().to_path_buf();

    app.toggle_tree_panel();
    app.resize_tree_panel(7);
    app.toggle_status_bar();
    app.persist_config();

    // A fresh manager reads the settings back from disk
    let mut manager = ConfigManager::new(temp_dir.path());
    manager.load().unwrap();
    let config = manager.get_config();
    assert!(!config.ui.show_tree_panel);
    assert_eq!(config.ui.tree_panel_width, app.tree_panel_width);
    assert!(!config.ui.show_status_bar);
}

#[test]
fn test_resize_tree_panel_clamps() {
    let mut app = App::default();

    app.resize_tree_panel(1000);
    assert_eq!(app.tree_panel_width, MAX_TREE_WIDTH);

    app.resize_tree_panel(-1000);
    assert_eq!(app.tree_panel_width, MIN_TREE_WIDTH);

    app.resize_tree_panel(4);
    assert_eq!(app.tree_panel_width, MIN_TREE_WIDTH + 4);
}

#[test]
fn test_active_counts_track_active_tab() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();

    // No tab open: zeroes
    let counts = app.active_counts();
    assert_eq!((counts.words, counts.chars), (0, 0));

    open_doc(&mut app, &temp_dir, "a.txt", "one two three");
    open_doc(&mut app, &temp_dir, "b.txt", "hello");

    let counts = app.active_counts();
    assert_eq!((counts.words, counts.chars), (1, 5));

    // Counts follow the active tab, not the union of open tabs
    app.switch_to_document(0);
    let counts = app.active_counts();
    assert_eq!((counts.words, counts.chars), (3, 13));
}

#[test]
fn test_switch_to_document_resets_scroll() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();
    open_doc(&mut app, &temp_dir, "a.txt", "a\nb\nc");
    open_doc(&mut app, &temp_dir, "b.txt", "x");

    app.scroll_offset = (2, 4);
    assert!(app.switch_to_document(0));
    assert_eq!(app.scroll_offset, (0, 0));

    // Out-of-range index is rejected
    assert!(!app.switch_to_document(9));
}

#[test]
fn test_open_or_focus_resets_scroll() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a.txt");
    fs::write(&path, "a\nb\nc").unwrap();

    let mut app = App::default();
    app.scroll_offset = (5, 0);

    let index = app.open_or_focus(&path).unwrap();
    assert_eq!(app.scroll_offset, (0, 0));

    // Opening the same path again lands on the same tab
    app.scroll_offset = (5, 0);
    assert_eq!(app.open_or_focus(&path).unwrap(), index);
    assert_eq!(app.documents.len(), 1);
    assert_eq!(app.scroll_offset, (0, 0));
}

#[test]
fn test_close_active_document() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();
    open_doc(&mut app, &temp_dir, "a.txt", "a");

    assert!(app.close_active_document());
    assert!(app.documents.is_empty());
    assert!(!app.close_active_document());
}

#[test]
fn test_has_unsaved_changes() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();
    open_doc(&mut app, &temp_dir, "a.txt", "clean");
    open_doc(&mut app, &temp_dir, "b.txt", "also clean");

    assert!(!app.has_unsaved_changes());

    app.documents.active_mut().unwrap().insert_char('x');
    assert!(app.has_unsaved_changes());
}

#[test]
fn test_status_bar_reflects_active_document() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = App::default();
    open_doc(&mut app, &temp_dir, "report.txt", "alpha beta");

    app.update_status_bar();

    let file_slot = app.status_bar.get_slot_mut("file").unwrap();
    assert_eq!(file_slot.content, "report.txt");

    let words_slot = app.status_bar.get_slot_mut("words").unwrap();
    assert_eq!(words_slot.content, "Words: 2");

    let chars_slot = app.status_bar.get_slot_mut("chars").unwrap();
    assert_eq!(chars_slot.content, "Characters: 10");
}

#[test]
fn test_status_bar_with_no_document() {
    let mut app = App::default();
    app.update_status_bar();

    let file_slot = app.status_bar.get_slot_mut("file").unwrap();
    assert_eq!(file_slot.content, "no file");

    // Counts still render as zeroes rather than disappearing
    let words_slot = app.status_bar.get_slot_mut("words").unwrap();
    assert_eq!(words_slot.content, "Words: 0");
}

#[test]
fn test_count_slots_honor_config_visibility() {
    let mut app = App::default();
    app.config.ui.show_word_count = false;
    app.init_status_bar();

    let words_slot = app.status_bar.get_slot_mut("words").unwrap();
    assert!(!words_slot.visible);

    let chars_slot = app.status_bar.get_slot_mut("chars").unwrap();
    assert!(chars_slot.visible);
}

#[test]
fn test_screen_regions_partition_width() {
    let app = App::default();
    let area = Rect::new(0, 0, 100, 30);
    let regions = screen_regions(&app, area);

    let tree_width = regions.tree.map(|r| r.width).unwrap_or(0);
    let splitter_width = regions.splitter.map(|r| r.width).unwrap_or(0);
    assert_eq!(tree_width + splitter_width + regions.editor.width, 100);

    // Tab bar sits above the editor in the same column
    assert_eq!(regions.tab_bar.x, regions.editor.x);
    assert_eq!(regions.tab_bar.y + regions.tab_bar.height, regions.editor.y);

    // Status line spans the bottom row
    let status = regions.status.unwrap();
    assert_eq!(status.y, 29);
    assert_eq!(status.width, 100);
}

#[test]
fn test_screen_regions_narrow_terminal_keeps_editor() {
    let mut app = App::default();
    app.tree_panel_width = 60;
    let regions = screen_regions(&app, Rect::new(0, 0, 40, 20));

    // The tree gives way so the editor keeps at least a sliver
    assert!(regions.editor.width >= 9);
}
