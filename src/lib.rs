//! Terminal Jump: an endless runner played in the terminal.
//!
//! The simulation ([`world`], [`terrain`], [`player`]) is plain data stepped
//! one tick at a time. Everything that touches the outside world (keyboard,
//! clock, sound, the highscore file, the screen) is passed into the
//! [`session::Session`] so it can be swapped for test doubles.

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod highscore;
pub mod input;
pub mod player;
pub mod render;
pub mod session;
pub mod terminal;
pub mod terrain;
pub mod world;

pub use config::{Config, Tuning};
pub use error::{Error, Result};
pub use session::{Devices, Screen, Session, TickOutcome};
