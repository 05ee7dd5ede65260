use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use getforce_shooter::clock::FrameClock;
use getforce_shooter::config::{GameConfig, FPS};
use getforce_shooter::session::Session;
use getforce_shooter::terminal::{TerminalCanvas, TerminalGuard, TerminalInput};

/// Single-screen arcade shooter played in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Frames per second of the game loop.
    #[arg(
        long,
        value_name = "FPS",
        default_value_t = FPS,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    fps: u32,
    /// Seed for enemy placement and power-up drops; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Only fire when Space is pressed instead of continuously.
    #[arg(long)]
    no_auto_fire: bool,
    /// Write logs to this file.  Nothing is logged without it, since the
    /// game owns the terminal.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        default_hook(info);
    }));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig {
        fps: cli.fps,
        auto_fire: !cli.no_auto_fire,
        ..GameConfig::default()
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(fps = config.fps, seed = ?cli.seed, auto_fire = config.auto_fire, "starting");

    // Declared first so it is dropped last, after the canvas has flushed.
    let terminal = TerminalGuard::enter().context("failed to put the terminal into game mode")?;
    let mut canvas = TerminalCanvas::stdout(config.width, config.height)
        .context("failed to query the terminal size")?;
    let mut input = TerminalInput::new(terminal.reports_key_releases(), config.fps);
    let mut clock = FrameClock::new(config.fps);

    let mut session = Session::new(config, rng);
    session
        .run(&mut input, &mut canvas, &mut clock)
        .context("terminal I/O failed")?;
    Ok(())
}
