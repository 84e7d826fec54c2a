use davplay::models::{PlayHistory, VideoItem};
use davplay::playback::PlaybackSession;

fn item(url: &str) -> VideoItem {
    VideoItem::new("clip", url)
}

#[test]
fn test_start_without_history_begins_at_zero() {
    let mut session = PlaybackSession::new();
    let resume = session.start(item("https://h/a.mp4"), &PlayHistory::new());
    assert_eq!(resume, 0.0);
    assert!(session.is_active());
}

#[test]
fn test_start_resumes_from_recorded_position() {
    let mut history = PlayHistory::new();
    history.insert("https://h/a.mp4".to_string(), 17.5);

    let mut session = PlaybackSession::new();
    let resume = session.start(item("https://h/a.mp4"), &history);
    assert_eq!(resume, 17.5);

    // start is read-only on the map.
    assert_eq!(history.len(), 1);
}

#[test]
fn test_tick_then_end_records_the_position() {
    let mut session = PlaybackSession::new();
    let mut history = PlayHistory::new();

    session.start(item("https://h/a.mp4"), &history);
    session.tick(42.0);
    session.end(&mut history);

    assert_eq!(history.get("https://h/a.mp4"), Some(&42.0));
    assert!(!session.is_active());

    // end is idempotent with the same elapsed value.
    let snapshot = history.clone();
    session.end(&mut history);
    assert_eq!(history, snapshot);
}

#[test]
fn test_end_without_ticks_records_the_resume_point() {
    let mut history = PlayHistory::new();
    history.insert("https://h/a.mp4".to_string(), 10.0);

    let mut session = PlaybackSession::new();
    session.start(item("https://h/a.mp4"), &history);
    session.end(&mut history);

    assert_eq!(history.get("https://h/a.mp4"), Some(&10.0));
}

#[test]
fn test_negative_position_is_not_recorded() {
    let mut session = PlaybackSession::new();
    let mut history = PlayHistory::new();

    session.start(item("https://h/a.mp4"), &history);
    session.tick(-3.0);
    session.end(&mut history);

    assert!(history.is_empty());
}

#[test]
fn test_restart_switches_to_a_new_item() {
    let mut session = PlaybackSession::new();
    let mut history = PlayHistory::new();

    session.start(item("https://h/a.mp4"), &history);
    session.tick(5.0);
    session.end(&mut history);

    // Re-entrant start on the same session object is a new session.
    session.start(item("https://h/b.mp4"), &history);
    session.tick(8.0);
    session.end(&mut history);

    assert_eq!(history.get("https://h/a.mp4"), Some(&5.0));
    assert_eq!(history.get("https://h/b.mp4"), Some(&8.0));
}

#[test]
fn test_ticks_are_ignored_while_idle() {
    let mut session = PlaybackSession::new();
    let mut history = PlayHistory::new();

    session.tick(30.0);
    session.end(&mut history);
    assert!(history.is_empty());
}

#[test]
fn test_status_stream_publishes_position_and_play_state() {
    let mut session = PlaybackSession::new();
    let rx = session.subscribe();

    session.start(item("https://h/a.mp4"), &PlayHistory::new());
    session.set_duration(120.0);
    session.set_playing(true);
    session.tick(12.0);

    let status = *rx.borrow();
    assert_eq!(status.position_secs, 12.0);
    assert_eq!(status.duration_secs, Some(120.0));
    assert!(status.playing);

    let mut history = PlayHistory::new();
    session.end(&mut history);
    assert!(!rx.borrow().playing);
}
