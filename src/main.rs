// Snake, played in the terminal.
//
// Arrow keys (or WASD) steer. When the snake crashes, press Q to quit or C to
// play again. Esc or Ctrl+C leaves at any time.
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
// StdRng is a seedable generator, so a `--seed` replays the same food.
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake::{
    Config, Session, app,
    terminal::{FrameClock, KeyboardEvents, TerminalGuard, TerminalSurface},
};

/// Classic snake in your terminal
#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs; the terminal itself belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins if set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("snake.log"));
    init_logging(&log_file, &args.log_level)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let config = Config::default();
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, grid = ?config.grid, "starting snake");

    // `play` owns the terminal guard, so by the time an error reaches us
    // here the terminal is back to normal and the message is readable.
    let summary = play(&config, rng).context("the game stopped unexpectedly")?;
    info!(score = summary.score, "bye");
    Ok(())
}

fn play(config: &Config, rng: StdRng) -> snake::Result<app::Summary> {
    // Raw mode + alternate screen until `_guard` goes out of scope.
    let _guard = TerminalGuard::enter(&config.grid)?;

    let mut session = Session::new(config, rng);
    let mut surface = TerminalSurface::stdout(&config.grid);
    let mut events = KeyboardEvents;
    let mut clock = FrameClock::new(config.tick_interval());

    app::run(&mut session, &mut surface, &mut events, &mut clock)
}

fn init_logging(path: &Path, level: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
