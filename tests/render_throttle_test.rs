use gameboy_tetris::core::GameState;
use gameboy_tetris::term::{fingerprint, RenderThrottle};
use gameboy_tetris::types::Command;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_dynamic_always_renders() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(1, 1, false));
    assert!(t.should_render(2, 1, false));
}

#[test]
fn render_throttle_invalidate_forces_next_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    t.invalidate();
    assert!(t.should_render(1, 1, true));
}

#[test]
fn render_throttle_paused_session_goes_quiet() {
    let mut state = GameState::new(5);
    state.apply(Command::Start);
    let mut t = RenderThrottle::default();

    assert!(t.should_render_snapshot(0, &state.snapshot()));
    assert!(t.should_render_snapshot(16, &state.snapshot()));

    state.apply(Command::Pause);
    assert!(t.should_render_snapshot(32, &state.snapshot()));
    assert!(!t.should_render_snapshot(48, &state.snapshot()));
    assert!(t.should_render_snapshot(532, &state.snapshot()));
}

#[test]
fn fingerprint_tracks_snapshot_changes() {
    let mut state = GameState::new(5);
    let before = fingerprint(&state.snapshot());
    assert_eq!(before, fingerprint(&state.snapshot()));
    state.apply(Command::Start);
    assert_ne!(before, fingerprint(&state.snapshot()));
}
