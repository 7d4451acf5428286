use std::cell::RefCell;
use std::rc::Rc;

use gameboy_tetris::core::{GameState, PieceQueue};
use gameboy_tetris::engine::Engine;
use gameboy_tetris::telemetry::{Achievements, EventLog, Stat, CATALOG};
use gameboy_tetris::types::{Command, PieceKind};

#[test]
fn event_log_file_gets_one_line_per_event() {
    let path = std::env::temp_dir().join(format!(
        "gameboy-tetris-events-{}.jsonl",
        std::process::id()
    ));
    let log = Rc::new(RefCell::new(EventLog::create(&path).unwrap()));

    let mut engine = Engine::new(GameState::with_queue(PieceQueue::scripted(
        &[PieceKind::O; 11],
        1,
    )));
    engine.subscribe(Box::new(log.clone()));
    engine.dispatch(Command::Start);
    for _ in 0..10 {
        engine.dispatch(Command::HardDrop);
    }

    // Game over flushes on its own.
    assert_eq!(log.borrow().written(), 12);
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let last: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert_eq!(text.lines().count(), 12);
    assert_eq!(last["event"]["type"], "gameOver");
    assert_eq!(last["event"]["level"], 1);
}

#[test]
fn event_log_create_fails_for_missing_directory() {
    let path = std::env::temp_dir()
        .join("gameboy-tetris-no-such-dir")
        .join("events.jsonl");
    let err = EventLog::create(&path).err().unwrap();
    assert!(format!("{:#}", err).contains("event log"));
}

#[test]
fn achievements_progress_accumulates_across_episodes() {
    let achievements = Rc::new(RefCell::new(Achievements::new()));
    let mut engine = Engine::new(GameState::new(11));
    engine.subscribe(Box::new(achievements.clone()));

    for _ in 0..3 {
        engine.dispatch(Command::Start);
        engine.dispatch(Command::Restart);
    }

    let mut a = achievements.borrow_mut();
    assert_eq!(a.stats().games_started, 3);
    let unlocked = a.take_unlocked();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].id, "first_game");

    a.update_stat(Stat::GamesFinished, 10);
    let progress = a.progress();
    assert_eq!(progress.unlocked, vec!["first_game", "veteran"]);
    assert_eq!(progress.total, CATALOG.len());
    assert_eq!(progress.completion_percent, 33);
}
