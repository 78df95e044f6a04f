//! Sound effects. Playback is always fire-and-forget: nothing here can stall
//! a tick or fail the game.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use fundsp::prelude::*;
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

use crate::config::{SoundBackend, SoundConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Ran into an obstacle
    Crash,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, sound: Sound) {
        (**self).play(sound);
    }
}

/// Build the sink a [`SoundConfig`] asks for.
pub fn from_config(config: &SoundConfig) -> Box<dyn AudioSink> {
    match config.backend {
        SoundBackend::Synth => match SynthAudio::open() {
            Ok(synth) => Box::new(synth),
            Err(e) => {
                tracing::warn!("No audio device, playing silently: {e}");
                Box::new(Silent)
            }
        },
        SoundBackend::Command => Box::new(CommandAudio::new(&config.player, config.asset.clone())),
        SoundBackend::Off => Box::new(Silent),
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

// ── Synthesized ─────────────────────────────────────────────────────────────

const SAMPLE_RATE: u32 = 44_100;

/// Plays generated tones on the default output device.
pub struct SynthAudio {
    // Dropping the stream silences every sink attached to it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl SynthAudio {
    pub fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl AudioSink for SynthAudio {
    fn play(&mut self, sound: Sound) {
        let samples = match sound {
            Sound::Crash => crash_samples(),
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => tracing::warn!("Sound playback failed: {e}"),
        }
    }
}

/// Half a second of sawtooth sliding from 400 Hz down to 80 Hz while fading out.
fn crash_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| 400.0 + (80.0 - 400.0) * (t / 0.4).min(1.0));
    let gain = lfo(|t: f32| 0.15 - 0.15 * (t / 0.5).min(1.0));
    let mut tone = (freq >> saw()) * gain;
    tone.set_sample_rate(SAMPLE_RATE as f64);
    (0..SAMPLE_RATE / 2).map(|_| tone.get_mono() as f32).collect()
}

// ── External player ─────────────────────────────────────────────────────────

/// Hands a sound file to an external player program and walks away.
#[derive(Debug, Clone)]
pub struct CommandAudio {
    program: String,
    asset: PathBuf,
}

impl CommandAudio {
    pub fn new(program: &str, asset: PathBuf) -> Self {
        Self {
            program: program.to_string(),
            asset,
        }
    }
}

impl AudioSink for CommandAudio {
    fn play(&mut self, sound: Sound) {
        let Sound::Crash = sound;
        let spawned = Command::new(&self.program)
            .arg(&self.asset)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        // The child is never waited on; it finishes on its own.
        if let Err(e) = spawned {
            tracing::warn!("Could not run sound player {}: {e}", self.program);
        }
    }
}

/// Remembers what it was asked to play.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Sound>,
}

#[cfg(any(test, feature = "test-util"))]
impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}
