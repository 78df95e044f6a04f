//! The screens of the game and the loop that moves between them.
//!
//! ```text
//! Menu ──1──▶ Playing ──last life lost──▶ GameOver ──any key──▶ Menu
//!  │  ──2──▶ ShowHighscore ──any key──▶ Menu
//!  └──3/q──▶ Exit
//! ```
//!
//! Ctrl-C leads to `Exit` from every screen.

use std::io::{self, Write};

use rand::rngs::StdRng;

use crate::audio::{AudioSink, Sound};
use crate::clock::Clock;
use crate::config::Tuning;
use crate::error::Result;
use crate::highscore::HighscoreStore;
use crate::input::{InputSource, JUMP, Key};
use crate::render::{self, Frame};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    ShowHighscore,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Crashed with lives to spare; the player has respawned.
    LifeLost,
    /// Crashed on the last life.
    GameOver,
    Quit,
}

/// Everything the session talks to outside itself.
pub struct Devices<I, A, S, C, W> {
    pub input: I,
    pub audio: A,
    pub store: S,
    pub clock: C,
    pub out: W,
}

pub struct Session<I, A, S, C, W> {
    tuning: Tuning,
    devices: Devices<I, A, S, C, W>,
    rng: StdRng,
    screen: Screen,
    world: World,
    highscore: u32,
}

impl<I, A, S, C, W> Session<I, A, S, C, W>
where
    I: InputSource,
    A: AudioSink,
    S: HighscoreStore,
    C: Clock,
    W: Write,
{
    /// Loads the stored highscore and starts on the menu. Fails on tuning
    /// that does not describe a playable field.
    pub fn new(tuning: Tuning, mut devices: Devices<I, A, S, C, W>, rng: StdRng) -> Result<Self> {
        tuning.validate()?;
        let highscore = devices.store.load();
        tracing::debug!(highscore, "Loaded highscore");
        Ok(Self {
            world: World::new(&tuning),
            tuning,
            devices,
            rng,
            screen: Screen::Menu,
            highscore,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn devices(&self) -> &Devices<I, A, S, C, W> {
        &self.devices
    }

    pub fn into_devices(self) -> Devices<I, A, S, C, W> {
        self.devices
    }

    /// Run screens until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        while self.screen != Screen::Exit {
            self.step()?;
        }
        render::paint_goodbye(&mut self.devices.out)
    }

    /// Run the current screen to completion and move to the next one.
    pub fn step(&mut self) -> io::Result<Screen> {
        let current = self.screen;
        let next = match current {
            Screen::Menu => self.menu()?,
            Screen::Playing => self.play()?,
            Screen::GameOver => self.game_over()?,
            Screen::ShowHighscore => self.show_highscore()?,
            Screen::Exit => Screen::Exit,
        };
        if next != current {
            tracing::debug!(from = ?current, to = ?next, "Screen change");
        }
        self.screen = next;
        Ok(next)
    }

    fn menu(&mut self) -> io::Result<Screen> {
        render::paint_menu(&mut self.devices.out)?;
        Ok(match self.devices.input.wait_key() {
            Some(Key::Char('1')) => {
                self.start_game();
                Screen::Playing
            }
            Some(Key::Char('2')) => Screen::ShowHighscore,
            Some(Key::Char('3' | 'q')) | Some(Key::Interrupt) | None => Screen::Exit,
            Some(_) => Screen::Menu,
        })
    }

    /// Fresh world: full lives, empty lane, zero score, starting speed.
    pub fn start_game(&mut self) {
        self.world = World::new(&self.tuning);
        self.screen = Screen::Playing;
    }

    fn play(&mut self) -> io::Result<Screen> {
        loop {
            match self.tick()? {
                TickOutcome::Running | TickOutcome::LifeLost => {}
                TickOutcome::GameOver => return Ok(Screen::GameOver),
                TickOutcome::Quit => return Ok(Screen::Exit),
            }
        }
    }

    /// One tick of play: input, simulate, draw, react to a crash, wait.
    pub fn tick(&mut self) -> io::Result<TickOutcome> {
        let start = self.devices.clock.now();

        match self.devices.input.poll_key() {
            Some(Key::Interrupt) => return Ok(TickOutcome::Quit),
            Some(JUMP) => self.world.request_jump(),
            _ => {}
        }

        self.world.tick(&mut self.rng);
        let frame = Frame::capture(&self.world, self.highscore);
        render::paint_frame(&mut self.devices.out, &frame)?;

        let mut outcome = TickOutcome::Running;
        if self.world.collides() {
            self.devices.audio.play(Sound::Crash);
            if !self.world.lose_life() {
                tracing::info!(score = self.world.score, "Game over");
                return Ok(TickOutcome::GameOver);
            }
            tracing::info!(lives = self.world.lives, "Lost a life");
            render::paint_life_lost(&mut self.devices.out, self.world.lives)?;
            self.devices.clock.sleep(self.tuning.respawn_pause());
            self.world.respawn();
            outcome = TickOutcome::LifeLost;
        }

        self.devices.clock.finish_tick(start, self.world.tick_delay());
        Ok(outcome)
    }

    fn game_over(&mut self) -> io::Result<Screen> {
        let score = self.world.score;
        let new_record = score > self.highscore;
        if new_record {
            tracing::info!(score, previous = self.highscore, "New highscore");
            self.highscore = score;
            if let Err(e) = self.devices.store.save(score) {
                tracing::warn!("{e}");
            }
        }
        render::paint_game_over(&mut self.devices.out, score, self.highscore, new_record)?;
        Ok(match self.devices.input.wait_key() {
            Some(Key::Interrupt) | None => Screen::Exit,
            Some(_) => Screen::Menu,
        })
    }

    fn show_highscore(&mut self) -> io::Result<Screen> {
        render::paint_highscore(&mut self.devices.out, self.highscore)?;
        Ok(match self.devices.input.wait_key() {
            Some(Key::Interrupt) | None => Screen::Exit,
            Some(_) => Screen::Menu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::clock::ManualClock;
    use crate::highscore::MemoryHighscore;
    use crate::input::ScriptedInput;
    use crate::error::Error;
    use rand::SeedableRng;
    use std::time::Duration;

    type TestSession = Session<ScriptedInput, RecordingAudio, MemoryHighscore, ManualClock, Vec<u8>>;

    fn session(keys: Vec<Option<Key>>) -> TestSession {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        };
        let devices = Devices {
            input: ScriptedInput::new(keys),
            audio: RecordingAudio::default(),
            store: MemoryHighscore::default(),
            clock: ManualClock::default(),
            out: Vec::new(),
        };
        Session::new(tuning, devices, StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn menu_dispatch() {
        let mut s = session(vec![Some(Key::Char('x')), Some(Key::Char('2'))]);
        assert_eq!(s.step().unwrap(), Screen::Menu);
        assert_eq!(s.step().unwrap(), Screen::ShowHighscore);

        let mut s = session(vec![Some(Key::Char('q'))]);
        assert_eq!(s.step().unwrap(), Screen::Exit);
    }

    #[test]
    fn ticks_pace_by_world_delay() {
        let mut s = session(vec![None, None]);
        s.start_game();
        assert_eq!(s.tick().unwrap(), TickOutcome::Running);
        assert_eq!(s.tick().unwrap(), TickOutcome::Running);
        // Score 0 ramps the delay every tick.
        assert_eq!(
            s.devices().clock.sleeps,
            vec![Duration::from_micros(138_000), Duration::from_micros(136_000)]
        );
    }

    #[test]
    fn rejects_tuning_the_field_cannot_hold() {
        let flat = Tuning {
            height: 1,
            ..Tuning::default()
        };
        let off_lane = Tuning {
            player_column: 40,
            ..Tuning::default()
        };
        for tuning in [flat, off_lane] {
            let devices = Devices {
                input: ScriptedInput::default(),
                audio: RecordingAudio::default(),
                store: MemoryHighscore::default(),
                clock: ManualClock::default(),
                out: Vec::new(),
            };
            let err = Session::new(tuning, devices, StdRng::seed_from_u64(5)).err();
            assert!(matches!(err, Some(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn interrupt_quits_mid_game() {
        let mut s = session(vec![Some(Key::Char('1')), None, Some(Key::Interrupt)]);
        assert_eq!(s.step().unwrap(), Screen::Playing);
        assert_eq!(s.step().unwrap(), Screen::Exit);
    }

    #[test]
    fn jump_key_is_the_only_control() {
        let mut s = session(vec![Some(Key::Char('k'))]);
        s.start_game();
        s.tick().unwrap();
        assert!(s.world().player.is_grounded());
    }
}
