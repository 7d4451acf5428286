//! Gameboy Tetris runner (default binary).
//!
//! `play` (the default) runs the game in the terminal: crossterm for input,
//! the framebuffer view for output, and the engine as the frame driver.
//! `replay` runs a command script headlessly and prints the final state as
//! JSON.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use gameboy_tetris::config::{AppConfig, Mode, USAGE};
use gameboy_tetris::core::{draw_into, DrawList, GameState};
use gameboy_tetris::engine::Engine;
use gameboy_tetris::input::{handle_key_event, handle_mouse_event, should_quit, HitMap, InputHandler};
use gameboy_tetris::replay::{run_script, DEFAULT_REPLAY_SEED};
use gameboy_tetris::telemetry::{Achievements, EventLog};
use gameboy_tetris::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use gameboy_tetris::types::Phase;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_env_and_args(&args)?;

    match &config.mode {
        Mode::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Mode::Replay { script } => replay(&config, script),
        Mode::Play => play(&config),
    }
}

fn replay(config: &AppConfig, script: &str) -> Result<()> {
    let event_log: Option<Box<dyn std::io::Write>> = match &config.event_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("event log: create {}", path.display()))?;
            Some(Box::new(BufWriter::new(file)))
        }
        None => None,
    };
    let seed = config.seed.unwrap_or(DEFAULT_REPLAY_SEED);
    let outcome = run_script(script, seed, config.tick_ms, event_log)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn play(config: &AppConfig) -> Result<()> {
    let event_log = match &config.event_log {
        Some(path) => Some(Rc::new(RefCell::new(EventLog::create(path)?))),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let achievements = Rc::new(RefCell::new(Achievements::new()));
    let result = run(config, &mut term, &achievements, event_log.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = &event_log {
        log.borrow_mut().flush()?;
    }
    let progress = achievements.borrow().progress();
    if result.is_ok() && progress.stats.games_started > 0 {
        println!(
            "achievements: {}/{} ({}%)",
            progress.unlocked.len(),
            progress.total,
            progress.completion_percent
        );
    }
    result
}

fn run(
    config: &AppConfig,
    term: &mut TerminalRenderer,
    achievements: &Rc<RefCell<Achievements>>,
    event_log: Option<&Rc<RefCell<EventLog<BufWriter<File>>>>>,
) -> Result<()> {
    let seed = config.seed.unwrap_or_else(time_seed);
    let mut engine = Engine::new(GameState::new(seed));
    engine.subscribe(Box::new(achievements.clone()));
    if let Some(log) = event_log {
        engine.subscribe(Box::new(log.clone()));
    }

    let view = GameView::new();
    let mut input = InputHandler::with_config(config.das_ms, config.arr_ms);
    if term.key_release_events() {
        input = input.with_key_release_timeout_ms(u32::MAX);
    }
    let mut throttle = RenderThrottle::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut ops = DrawList::with_capacity(256);
    let mut hits = HitMap::new();
    let mut draw_error = None;

    let tick = Duration::from_millis(u64::from(config.tick_ms));
    let clock = Instant::now();
    let mut last_tick = clock;

    engine.start();
    loop {
        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let phase = engine.snapshot().phase;
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            engine.stop();
                        } else if InputHandler::is_repeatable(key.code) {
                            if let Some(command) = input.handle_key_press(key.code) {
                                engine.dispatch(command);
                            }
                        } else if let Some(command) = handle_key_event(key, phase) {
                            engine.dispatch(command);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Keeps a held key alive; DAS/ARR produces the repeats.
                        input.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Mouse(mouse) => {
                    if let Some(command) = handle_mouse_event(mouse, &hits, phase) {
                        engine.dispatch(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        if last_tick.elapsed() < tick {
            continue;
        }
        last_tick = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        if engine.snapshot().phase == Phase::Running {
            for command in input.update(config.tick_ms) {
                engine.dispatch(command);
            }
        } else {
            input.reset();
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let keep_going = engine.frame(now_ms, |snap| {
            if !throttle.should_render_snapshot(now_ms, snap) {
                return ControlFlow::Continue(());
            }
            draw_into(snap, &mut ops);
            view.render_into(&ops, Viewport::new(w, h), &mut fb, &mut hits);
            match term.draw_swap(&mut fb) {
                Ok(()) => ControlFlow::Continue(()),
                Err(err) => {
                    draw_error = Some(err);
                    ControlFlow::Break(())
                }
            }
        });

        if let Some(err) = draw_error.take() {
            return Err(err);
        }
        if !keep_going {
            return Ok(());
        }
    }
}
