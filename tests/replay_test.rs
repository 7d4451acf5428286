//! Headless replay end to end, including the JSON-lines event log.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use gameboy_tetris::replay::{parse_script, run_script, Replay, Step};
use gameboy_tetris::types::{Command, Phase};

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn lines(buf: &SharedBuf) -> Vec<serde_json::Value> {
    let bytes = buf.0.borrow();
    std::str::from_utf8(&bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn replay_is_deterministic_per_seed() {
    let script = "start drop left drop right right drop rotate drop";
    let a = run_script(script, 9, 16, None).unwrap();
    let b = run_script(script, 9, 16, None).unwrap();
    assert_eq!(a.snapshot, b.snapshot);
    assert_eq!(a.steps, 9);
    assert!(a.skipped.is_empty());
}

#[test]
fn replay_writes_event_log() {
    let buf = SharedBuf::default();
    let outcome = run_script("start,drop,drop", 4, 16, Some(Box::new(buf.clone()))).unwrap();

    assert_eq!(outcome.snapshot.phase, Phase::Running);
    assert!(outcome.achievements.unlocked.contains(&"first_game"));

    let records = lines(&buf);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["event"]["type"], "gameStarted");
    assert_eq!(records[1]["event"]["type"], "pieceLocked");
    assert_eq!(records[2]["seq"], 2);
    assert_eq!(records[2]["score"], outcome.snapshot.score);
}

#[test]
fn replay_pause_freezes_gravity() {
    let paused = run_script("start pause wait:5000", 2, 16, None).unwrap();
    let fresh = run_script("start", 2, 16, None).unwrap();
    assert_eq!(paused.snapshot.phase, Phase::Paused);
    assert_eq!(paused.snapshot.active, fresh.snapshot.active);
}

#[test]
fn replay_outcome_serializes_to_json() {
    let outcome = run_script("start hold", 1, 16, None).unwrap();
    assert_eq!(outcome.skipped, vec!["hold".to_string()]);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["snapshot"]["phase"], "running");
    assert_eq!(json["achievements"]["total"], 6);
    assert_eq!(json["skipped"][0], "hold");
}

#[test]
fn replay_steps_one_at_a_time() {
    let (steps, _) = parse_script("start wait:32").unwrap();
    assert_eq!(steps, vec![Step::Command(Command::Start), Step::Wait(32)]);

    let mut replay = Replay::new(1, 16);
    for step in &steps {
        replay.step(step);
    }
    assert_eq!(replay.engine().state().drop_accumulator_ms(), 32);
    let outcome = replay.finish(steps.len(), Vec::new()).unwrap();
    assert_eq!(outcome.steps, 2);
}
