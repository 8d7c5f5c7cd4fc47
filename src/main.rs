//! slotword - spell the word behind the picture
//!
//! Pick letter tiles from a shuffled pool, fill the answer slots and work
//! through each category one level at a time.

mod app;
mod catalog;
mod cli;
mod game;
mod storage;
mod tui;

use app::{AppCoordinator, Screen};
use catalog::Catalog;
use clap::Parser;
use cli::Cli;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use storage::progress::ProgressionGate;
use storage::{MemoryStore, SqliteStore, Store};
use tracing::{info, warn};
use tui::Tui;

/// How often the screen is redrawn and timers advance
const FRAME: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    info!("Starting slotword");

    let store = open_store(&cli);
    let (catalog, load_error) = match &cli.catalog {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to built-in catalog");
                (Catalog::embedded().clone(), Some(e.to_string()))
            }
        },
        None => (Catalog::embedded().clone(), None),
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let load_error = match load_error {
        None if catalog.is_empty() => Some("the puzzle catalog has no categories".to_string()),
        other => other,
    };

    let mut app = AppCoordinator::new(catalog, ProgressionGate::new(store), rng);
    if let Some(message) = load_error {
        app.screen = Screen::Error { message };
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = tui::restore();
        default_hook(info);
    }));

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| tui::render(frame, &app))?;

        let timeout = FRAME.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code);
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= FRAME {
            app.tick(elapsed);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    info!("Exiting slotword");
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn handle_key<S: storage::KeyValueStore>(app: &mut AppCoordinator<S>, code: KeyCode) {
    match code {
        KeyCode::Esc => app.back(),
        KeyCode::Enter => app.select(),
        KeyCode::Up => app.up(),
        KeyCode::Down => app.down(),
        KeyCode::Left => app.left(),
        KeyCode::Right => app.right(),
        KeyCode::Char(' ') => app.pick_up(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.slot_key(digit as usize - 1);
            }
        }
        KeyCode::Char('h') => app.hint(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

/// Log to a file so output does not interfere with the TUI.
fn init_logging(cli: &Cli) {
    let path = cli.log_file.clone().unwrap_or_else(|| {
        storage::data_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("slotword.log")
    });
    // The terminal is still in cooked mode here, so stderr is visible
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("slotword: cannot create log directory {}: {}", parent.display(), e);
        }
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("slotword: logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
    {
        eprintln!("slotword: logging disabled: {}", e);
    }
}

/// Open the progress store. Progress still works for this run if the
/// database cannot be opened; it just is not kept.
fn open_store(cli: &Cli) -> Store {
    if cli.memory {
        return Store::Memory(MemoryStore::new());
    }
    let opened = match &cli.db {
        Some(path) => SqliteStore::open_at(path),
        None => SqliteStore::open(),
    };
    match opened {
        Ok(store) => Store::Sqlite(store),
        Err(e) => {
            warn!(error = %e, "progress database unavailable, keeping progress in memory");
            Store::Memory(MemoryStore::new())
        }
    }
}
