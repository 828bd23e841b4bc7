//! Terminal 2048 runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from the term crate. The loop is event driven: it redraws after
//! every state change or resize and otherwise blocks on input.

use std::fs::File;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::Env;
use log::{info, warn};

use tui_2048::config::AppConfig;
use tui_2048::core::{new_rng, GridEngine};
use tui_2048::input::{handle_key_event, should_quit, SwipeTracker};
use tui_2048::store::{BestScore, FileScoreStore, MemoryScoreStore, ScoreStore};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    if let Some(raw) = &config.invalid_seed {
        warn!("ignoring TUI_2048_SEED={raw:?}: not a u64, using a random seed");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logging goes to a file only; stderr would tear the alternate screen.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn open_store(config: &AppConfig) -> Box<dyn ScoreStore> {
    if config.persist {
        let store = FileScoreStore::new(&config.best_path);
        info!("best score file: {}", store.path().display());
        Box::new(store)
    } else {
        Box::new(MemoryScoreStore::default())
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GridEngine::new(new_rng(config.seed));
    let mut best = BestScore::load(open_store(config));
    info!("starting: seed {:?}, best {}", config.seed, best.best());

    let view = GameView::default();
    let mut swipe = SwipeTracker::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&game.snapshot(), best.best(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let action = match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                if should_quit(key) {
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => swipe.handle_mouse_event(mouse).map(GameAction::Move),
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
                None
            }
            _ => None,
        };

        let Some(action) = action else {
            continue;
        };

        match action {
            GameAction::Move(dir) => {
                let outcome = game.play_turn(dir);
                if outcome.moved {
                    best.update(game.score());
                    dirty = true;
                }
            }
            GameAction::Restart => {
                game.restart();
                swipe.reset();
                dirty = true;
            }
        }
    }
}
