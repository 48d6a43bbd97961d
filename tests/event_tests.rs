//! Tests for the event bus

use sapling::events::{AppEvent, EventBus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_publish_routes_to_subscribed_handlers() {
    let event_bus = EventBus::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    event_bus
        .subscribe_async("status_message", move |event| {
            let tx = tx.clone();
            async move {
                if let AppEvent::StatusMessage { message } = event {
                    tx.send(message.to_string()).unwrap();
                }
                Ok(())
            }
        })
        .await;

    let bus = event_bus.clone();
    tokio::spawn(async move {
        let _ = bus.start_processing().await;
    });

    event_bus
        .publish(AppEvent::StatusMessage {
            message: "hello".into(),
        })
        .unwrap();

    let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("handler was not called")
        .unwrap();
    assert_eq!(received, "hello");
}

#[tokio::test]
async fn test_events_only_reach_matching_subscribers() {
    let event_bus = EventBus::new();
    let quit_count = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel();

    {
        let quit_count = quit_count.clone();
        event_bus
            .subscribe_async("quit", move |_| {
                let quit_count = quit_count.clone();
                async move {
                    quit_count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;
    }

    event_bus
        .subscribe_async("toggle_tree_panel", move |_| {
            let tx = tx.clone();
            async move {
                tx.send(()).unwrap();
                Ok(())
            }
        })
        .await;

    let bus = event_bus.clone();
    tokio::spawn(async move {
        let _ = bus.start_processing().await;
    });

    event_bus.publish(AppEvent::ToggleTreePanel).unwrap();

    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("panel handler was not called");

    // The quit handler never fired for an unrelated event
    assert_eq!(quit_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_toggle_status_bar_event_updates_state() {
    use sapling::handlers::AppStateHandler;
    use sapling::App;
    use tokio::sync::RwLock;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut app = App::default();
    app.user_dir = temp_dir.path().to_path_buf();
    let app_state = Arc::new(RwLock::new(app));

    let event_bus = EventBus::new();
    AppStateHandler::new(app_state.clone())
        .subscribe(&event_bus)
        .await
        .unwrap();

    let bus = event_bus.clone();
    tokio::spawn(async move {
        let _ = bus.start_processing().await;
    });

    event_bus.publish(AppEvent::ToggleStatusBar).unwrap();

    let mut hidden = false;
    for _ in 0..100 {
        if !app_state.read().await.config.ui.show_status_bar {
            hidden = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(hidden, "status bar was not hidden");
}

#[tokio::test]
async fn test_processing_can_only_start_once() {
    let event_bus = EventBus::new();

    let bus = event_bus.clone();
    tokio::spawn(async move {
        let _ = bus.start_processing().await;
    });

    // Give the first processor a moment to claim the receiver
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(event_bus.start_processing().await.is_err());
}
