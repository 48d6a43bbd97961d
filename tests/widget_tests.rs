//! Tests for the tab bar, file tree and toast widgets

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use sapling::tree::view::TreeViewState;
use sapling::widgets::file_tree::FileTree;
use sapling::widgets::tab_bar::{tab_label, tab_width, TabBar};
use sapling::widgets::toast::{Toast, ToastManager, ToastType};
use sapling::{build_tree, Document};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn buffer_row(buf: &Buffer, area: Rect, y: u16) -> String {
    (area.x..area.x + area.width)
        .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
        .collect()
}

fn make_doc(dir: &TempDir, name: &str, content: &str) -> Document {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    Document::from_path(path).unwrap()
}

#[test]
fn test_tab_label_marks_dirty_documents() {
    let temp_dir = TempDir::new().unwrap();
    let mut doc = make_doc(&temp_dir, "notes.txt", "abc");

    assert_eq!(tab_label(&doc), " notes.txt ");

    doc.insert_char('x');
    assert_eq!(tab_label(&doc), " notes.txt* ");
    assert_eq!(tab_width(&doc), 12);
}

#[test]
fn test_tab_bar_renders_all_titles() {
    let temp_dir = TempDir::new().unwrap();
    let docs = vec![
        make_doc(&temp_dir, "first.txt", "1"),
        make_doc(&temp_dir, "second.txt", "2"),
    ];

    let area = Rect::new(0, 0, 40, 1);
    let mut buf = Buffer::empty(area);
    TabBar::new(&docs, Some(1)).render(area, &mut buf);

    let row = buffer_row(&buf, area, 0);
    assert!(row.contains("first.txt"));
    assert!(row.contains("second.txt"));
}

#[test]
fn test_file_tree_renders_markers_and_indent() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src").join("lib.rs"), "x").unwrap();
    fs::write(temp_dir.path().join("top.txt"), "y").unwrap();

    let root = build_tree(temp_dir.path()).unwrap();
    let mut view = TreeViewState::new();
    view.reset_for(&root);
    view.expand(temp_dir.path().join("src"));

    let rows = view.visible_rows(&root);
    let area = Rect::new(0, 0, 30, 10);
    let mut buf = Buffer::empty(area);
    FileTree::new(&rows).render(area, &mut buf);

    // Expanded directories get an open marker, collapsed ones a closed
    // marker, files none
    assert!(buffer_row(&buf, area, 0).contains('▾'));
    let src_row = buffer_row(&buf, area, 1);
    assert!(src_row.contains("▾ src"));
    let lib_row = buffer_row(&buf, area, 2);
    assert!(lib_row.contains("lib.rs"));
    assert!(!lib_row.contains('▾'));

    // Children are indented past their parent
    assert!(lib_row.find("lib.rs").unwrap() > src_row.find("src").unwrap());
}

#[test]
fn test_file_tree_scroll_skips_rows() {
    use sapling::tree::view::TreeRow;
    use sapling::NodeKind;

    let rows: Vec<TreeRow> = (0..5)
        .map(|i| TreeRow {
            depth: 1,
            name: format!("f{}.txt", i),
            path: format!("/ws/f{}.txt", i).into(),
            kind: NodeKind::File,
            expanded: false,
        })
        .collect();

    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    FileTree::new(&rows).scroll(2).render(area, &mut buf);

    // The first two rows are scrolled off
    let first_visible = buffer_row(&buf, area, 0);
    assert!(first_visible.contains("f2.txt"));
}

#[test]
fn test_editor_renders_scrolled_multibyte_line() {
    use sapling::widgets::editor::Editor;

    let temp_dir = TempDir::new().unwrap();
    let doc = make_doc(&temp_dir, "accents.txt", "héllo wörld");

    let area = Rect::new(0, 0, 20, 2);
    let mut buf = Buffer::empty(area);
    let mut editor = Editor::new(&doc);
    editor.scroll_offset = (0, 2);
    editor.show_line_numbers = false;
    editor.render(area, &mut buf);

    // Horizontal scroll skips whole characters
    let row = buffer_row(&buf, area, 0);
    assert!(row.starts_with("llo wörld"));
}

#[test]
fn test_toast_manager_expires_toasts() {
    let mut manager = ToastManager::new();
    assert!(!manager.has_active_toasts());

    manager.add_toast(
        Toast::new("already gone".to_string(), ToastType::Info)
            .with_duration(Duration::from_millis(0)),
    );
    manager.add_toast(Toast::new("still here".to_string(), ToastType::Error));

    std::thread::sleep(Duration::from_millis(5));
    manager.update();

    assert!(manager.has_active_toasts());
}
