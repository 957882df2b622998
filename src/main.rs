//! Terminal word-crush runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `wordcrush-term`.
//! Set `WORDCRUSH_LOG_PATH` to write logs to a file; nothing is logged to the
//! terminal while the game owns it.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use wordcrush::core::{EngineError, EngineEvent, GameConfig, GameState};
use wordcrush::input::{should_quit, Command, InputHandler};
use wordcrush::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use wordcrush::types::TICK_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let mut game = GameState::from_config(config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    if result.is_ok() {
        println!("Final score: {}", game.score());
    }
    result
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Some(input.cursor()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = input.handle_key(key) {
                        apply(game, command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        for event in game.drain_events() {
            match event {
                EngineEvent::WordsMatched { words } => log::info!("matched {:?}", words),
                EngineEvent::GameOver { score } => log::info!("final score {}", score),
                other => log::debug!("{:?}", other),
            }
        }
    }
}

fn apply(game: &mut GameState, command: Command) {
    let result = match command {
        Command::Select(pos) => game.select_tile(pos).map(|_| ()),
        Command::Hint => game.hint().map(|_| ()),
        Command::Restart => {
            game.restart();
            Ok(())
        }
    };
    match result {
        Ok(()) => {}
        Err(err @ EngineError::CascadeLimitExceeded { .. }) => log::error!("{}", err),
        Err(err) => log::debug!("ignored: {}", err),
    }
}
