//! Tests for the slot-based status bar widget

use ratatui::style::{Color, Style};
use sapling::widgets::{SlotAlignment, StatusBar, StatusSlot};

#[test]
fn test_slot_builder() {
    let slot = StatusSlot::new("cursor", "Ln 1, Col 1")
        .with_alignment(SlotAlignment::Right)
        .with_priority(90)
        .with_style(Style::default().fg(Color::Yellow))
        .with_visibility(false);

    assert_eq!(slot.id, "cursor");
    assert_eq!(slot.content, "Ln 1, Col 1");
    assert_eq!(slot.alignment, SlotAlignment::Right);
    assert_eq!(slot.priority, 90);
    assert!(!slot.visible);
}

#[test]
fn test_slot_defaults() {
    let slot = StatusSlot::new("x", "y");

    assert_eq!(slot.alignment, SlotAlignment::Left);
    assert_eq!(slot.priority, 50);
    assert!(slot.visible);
}

#[test]
fn test_set_slot_replaces_by_id() {
    let mut status_bar = StatusBar::new();

    status_bar.set_slot(StatusSlot::new("words", "Words: 0"));
    status_bar.set_slot(StatusSlot::new("words", "Words: 42"));

    let slot = status_bar.get_slot_mut("words").unwrap();
    assert_eq!(slot.content, "Words: 42");
}

#[test]
fn test_update_slot_content() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("chars", "Characters: 0"));

    status_bar.update_slot_content("chars", "Characters: 7");
    assert_eq!(
        status_bar.get_slot_mut("chars").unwrap().content,
        "Characters: 7"
    );

    // Updating an unknown slot is a no-op, not a panic
    status_bar.update_slot_content("missing", "anything");
    assert!(status_bar.get_slot_mut("missing").is_none());
}

#[test]
fn test_hide_and_show_slot() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("docs", "Tab 1/1"));

    status_bar.hide_slot("docs");
    assert!(!status_bar.get_slot_mut("docs").unwrap().visible);

    status_bar.show_slot("docs");
    assert!(status_bar.get_slot_mut("docs").unwrap().visible);
}

#[test]
fn test_remove_slot() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("tmp", "gone soon"));

    status_bar.remove_slot("tmp");
    assert!(status_bar.get_slot_mut("tmp").is_none());
}

#[test]
fn test_render_places_alignment_groups() {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;

    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("left", "LL").with_alignment(SlotAlignment::Left));
    status_bar.set_slot(StatusSlot::new("right", "RR").with_alignment(SlotAlignment::Right));

    let area = Rect::new(0, 0, 20, 1);
    let mut buf = Buffer::empty(area);
    status_bar.clone().render(area, &mut buf);

    let rendered: String = (0..20)
        .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
        .collect();

    assert!(rendered.starts_with("LL"));
    assert!(rendered.ends_with("RR"));
}
