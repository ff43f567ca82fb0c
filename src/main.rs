//! Terminal runner: the frame-driven scheduler around the engine.
//!
//! One loop owns rendering, input, and the fixed gravity tick. The
//! session itself never schedules anything; elapsed time is fed into
//! `GameSession::tick` and the session decides when gravity applies.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::core::GameSession;
use tui_blocks::input::{handle_key_event, is_start_key, should_quit};
use tui_blocks::term::{GameView, TerminalRenderer, Viewport};
use tui_blocks::types::{Phase, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore the terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut session = GameSession::with_seed(seed);
    let view = GameView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, Viewport::new(w, h));
        term.draw(&fb)?;

        // Wait for input until the next tick is due.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_start_key(key) {
                        match session.phase() {
                            Phase::Ready => {
                                session.start();
                            }
                            Phase::GameOver => {
                                session.restart();
                                session.start();
                            }
                            Phase::Playing => {}
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}
