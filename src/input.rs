//! Keyboard input as a swappable capability.
//!
//! The game only ever asks two questions: "was a key pressed since last
//! tick?" and "wait for the next key". [`TerminalInput`] answers them from
//! crossterm events; `ScriptedInput` (feature `test-util`) replays a fixed
//! list for tests.

#[cfg(any(test, feature = "test-util"))]
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C. Raw mode swallows the signal, so it arrives as a key.
    Interrupt,
    Other,
}

pub const JUMP: Key = Key::Char(' ');

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

pub trait InputSource {
    /// A key pressed since the last call, without blocking.
    fn poll_key(&mut self) -> Option<Key>;

    /// Block until a key is pressed, riding out read errors. `None` means
    /// input is gone for good.
    fn wait_key(&mut self) -> Option<Key>;
}

/// Pause between attempts after the keyboard reports an error.
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Pull events from `next` until one is a key. Errors count as "no key yet".
fn wait_for_key(mut next: impl FnMut() -> io::Result<Option<Key>>, backoff: Duration) -> Key {
    loop {
        match next() {
            Ok(Some(key)) => return key,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Keyboard read failed, retrying: {e}");
                std::thread::sleep(backoff);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn try_read_press() -> io::Result<Option<Key>> {
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(key.into()),
            _ => None,
        })
    }

    fn read_press(&mut self) -> Option<Key> {
        Self::try_read_press().unwrap_or_else(|e| {
            tracing::warn!("Keyboard read failed: {e}");
            None
        })
    }
}

impl InputSource for TerminalInput {
    fn poll_key(&mut self) -> Option<Key> {
        // One key per tick; anything else waits for the next poll.
        match event::poll(Duration::ZERO) {
            Ok(true) => self.read_press(),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!("Keyboard poll failed: {e}");
                None
            }
        }
    }

    fn wait_key(&mut self) -> Option<Key> {
        let next = || -> io::Result<Option<Key>> {
            if event::poll(Duration::from_secs(3600))? {
                Self::try_read_press()
            } else {
                Ok(None)
            }
        };
        Some(wait_for_key(next, RETRY_BACKOFF))
    }
}

/// Replays a prepared sequence: each entry is what one call returns.
///
/// `poll_key` consumes one entry per tick (`None` entries are ticks without
/// a key press). `wait_key` skips `None` entries. Once the script runs dry
/// polls return `None` and waits return [`Key::Interrupt`], so a session
/// under test always terminates.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<Key>>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn push(&mut self, entry: Option<Key>) {
        self.script.push_back(entry);
    }

    /// Queue `n` ticks without input.
    pub fn idle(&mut self, n: usize) {
        self.script.extend(std::iter::repeat_n(None, n));
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<Key> {
        self.script.pop_front().flatten()
    }

    fn wait_key(&mut self) -> Option<Key> {
        while let Some(entry) = self.script.pop_front() {
            if entry.is_some() {
                return entry;
            }
        }
        Some(Key::Interrupt)
    }
}
