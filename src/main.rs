//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. The
//! session only sees fixed `tick_ms` steps; wall-clock time stays out here.
//!
//! Logging is off unless `RUST_LOG` asks for it. Send stderr to a file when
//! enabling it (`RUST_LOG=debug blockfall 2>blockfall.log`) so it does not
//! scribble over the game screen.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use blockfall::config::RunConfig;
use blockfall::core::{Session, SessionSnapshot};
use blockfall::input::{handle_key_event, is_restart, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = RunConfig::from_env();
    info!("starting with {config:?}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn new_session(config: &RunConfig, generation: u64) -> Session {
    let mut session = Session::new(config.session_config(generation));
    session.start();
    session
}

fn run(term: &mut TerminalRenderer, config: RunConfig) -> Result<()> {
    let mut generation = 0u64;
    let mut session = new_session(&config, generation);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let viewport = term.viewport()?;
        session.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit (score {}, lines {})", session.score(), session.lines());
                        return Ok(());
                    }
                    if session.game_over() && is_restart(key) {
                        generation += 1;
                        session = new_session(&config, generation);
                        info!("restarted (game {})", generation + 1);
                    } else if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(config.tick_ms);
            if let Some(lock) = session.take_last_lock() {
                log::trace!("locked {:?}, cleared {}", lock.kind, lock.clear.count());
            }
        }
    }
}
