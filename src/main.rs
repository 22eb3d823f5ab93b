//! Terminal runner (default binary).
//!
//! Fixed-step loop: sample keyboard input, run one `Game::tick` every
//! `TICK_MS`, render the snapshot through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use jam_tetris::core::{Game, GameSnapshot, GameState};
use jam_tetris::input::{handle_key_event, should_quit, InputHandler};
use jam_tetris::settings::{self, EventLog, Settings};
use jam_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use jam_tetris::types::{Sound, TICK_MS};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("[Game] {:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings::load(&args)?;
    let mut log = EventLog::open(settings.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log.log(format_args!("fatal: {:#}", e));
    }
    result
}

fn run(term: &mut TerminalRenderer, settings: &Settings, log: &mut EventLog) -> Result<()> {
    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut game = Game::with_seed(seed);
    log.log(format_args!(
        "start seed={} keys={}",
        seed,
        settings.layout.as_str()
    ));

    let view = GameView::default();
    let mut input = InputHandler::new();
    if term.key_releases() {
        // Real release events arrive; the timeout only guards lost ones.
        input = input.with_key_release_timeout_ms(5_000);
    }

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0u16, 0u16);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut last_state = game.state();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            term.invalidate();
            last_size = (w, h);
        }
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        log.log("quit");
                        return Ok(());
                    }
                    if let Some(k) = handle_key_event(settings.layout, key) {
                        match key.kind {
                            KeyEventKind::Press => input.handle_key_press(k),
                            KeyEventKind::Repeat => input.handle_key_repeat_at(k, Instant::now()),
                            KeyEventKind::Release => input.handle_key_release(k),
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let frame = input.frame();
            let sounds = game.tick(&frame);

            if sounds.contains(Sound::Buy) && game.state() == GameState::Improve {
                log.log(format_args!("purchase, money left {}", game.money().money()));
            }

            let state = game.state();
            if state != last_state {
                log_transition(log, &game, last_state, state);
                last_state = state;
            }
        }
    }
}

fn log_transition(log: &mut EventLog, game: &Game, from: GameState, to: GameState) {
    let round = game.round();
    match to {
        GameState::Lost => log.log(format_args!(
            "round lost at level {}: score={} lines={}",
            game.level() + 1,
            round.score(),
            round.lines()
        )),
        GameState::Balance => log.log(format_args!(
            "level {} cleared: score={}",
            game.level() + 1,
            round.score()
        )),
        GameState::Won => log.log(format_args!("game won, score={}", round.score())),
        _ => log.log(format_args!("state {} -> {}", from.as_str(), to.as_str())),
    }
}
