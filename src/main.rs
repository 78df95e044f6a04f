use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use terminal_jump::clock::SystemClock;
use terminal_jump::config::{Config, SoundBackend};
use terminal_jump::highscore::HighscoreFile;
use terminal_jump::input::TerminalInput;
use terminal_jump::terminal::TerminalGuard;
use terminal_jump::{Devices, Session, audio};

#[derive(Debug, Parser)]
#[command(version, about = "Jump the obstacles, keep your lives, beat the highscore")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the highscore is kept
    #[arg(long)]
    highscore_file: Option<PathBuf>,

    /// How to play the crash sound
    #[arg(long, value_enum)]
    sound: Option<SoundBackend>,

    /// Write logs here (the screen belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = cli.highscore_file {
        config.highscore_file = path;
    }
    if let Some(backend) = cli.sound {
        config.sound.backend = backend;
    }
    tracing::info!(?config, "Starting");

    let audio = audio::from_config(&config.sound);
    let mut guard = TerminalGuard::enter().context("setting up the terminal")?;

    let devices = Devices {
        input: TerminalInput,
        audio,
        store: HighscoreFile::new(&config.highscore_file),
        clock: SystemClock,
        out: guard.out(),
    };
    let mut session = Session::new(config.tuning, devices, StdRng::from_entropy())?;
    let played = session.run();
    drop(session);

    guard.leave().context("restoring the terminal")?;
    played.context("drawing the game")?;
    Ok(())
}
