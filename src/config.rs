//! Game tuning and runtime configuration.
//!
//! Everything has a default matching the classic game, so a config file is
//! optional. When one is given it is TOML and may set any subset of keys.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Simulation constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Number of terrain cells in the lane
    pub width: usize,
    /// Number of rows in the play field
    pub height: usize,
    /// Lives at the start of a session
    pub lives: u32,
    /// Airborne ticks granted by one jump
    pub jump_ticks: u32,
    /// Jump initiations allowed before landing
    pub max_jumps: u32,
    /// Probability of an obstacle in a freshly appended cell
    pub spawn_chance: f64,
    /// Empty cells forced after every obstacle
    pub spawn_cooldown: u32,
    /// Tick delay at session start (µs)
    pub start_delay_us: u64,
    /// Amount the delay shrinks per ramp (µs)
    pub delay_step_us: u64,
    /// The delay never drops below this (µs)
    pub min_delay_us: u64,
    /// Points between two speed ramps
    pub ramp_every: u32,
    /// Pause after losing a life (ms)
    pub respawn_pause_ms: u64,
    /// Column the player stands in; also the collision column
    pub player_column: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 40,
            height: 5,
            lives: 3,
            jump_ticks: 4,
            max_jumps: 2,
            spawn_chance: 0.2,
            spawn_cooldown: 5,
            start_delay_us: 140_000,
            delay_step_us: 2_000,
            min_delay_us: 60_000,
            ramp_every: 10,
            respawn_pause_ms: 2_000,
            player_column: 1,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));
        if self.width < 3 {
            return fail("width must be at least 3");
        }
        if self.height < 2 {
            return fail("height must be at least 2");
        }
        if self.lives == 0 {
            return fail("lives must be at least 1");
        }
        if self.max_jumps == 0 {
            return fail("max_jumps must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return fail("spawn_chance must be between 0 and 1");
        }
        if self.min_delay_us > self.start_delay_us {
            return fail("min_delay_us must not exceed start_delay_us");
        }
        if self.ramp_every == 0 {
            return fail("ramp_every must be at least 1");
        }
        if self.player_column + 1 >= self.width {
            return fail("player_column must leave room in front of the player");
        }
        Ok(())
    }

    pub fn respawn_pause(&self) -> Duration {
        Duration::from_millis(self.respawn_pause_ms)
    }
}

/// Which [`AudioSink`](crate::audio::AudioSink) plays the crash sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SoundBackend {
    /// Synthesized tone on the default audio device
    Synth,
    /// External player program fed the asset file
    Command,
    /// No sound
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub backend: SoundBackend,
    /// Sound file handed to the player program
    pub asset: PathBuf,
    /// Player program for the `command` backend
    pub player: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            backend: SoundBackend::Synth,
            asset: PathBuf::from("/System/Library/Sounds/Funk.aiff"),
            player: "afplay".to_string(),
        }
    }
}

/// Full runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub highscore_file: PathBuf,
    pub tuning: Tuning,
    pub sound: SoundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highscore_file: PathBuf::from("highscore.txt"),
            tuning: Tuning::default(),
            sound: SoundConfig::default(),
        }
    }
}

impl Config {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.tuning.validate()?;
        Ok(config)
    }
}
