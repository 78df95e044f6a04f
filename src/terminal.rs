//! Putting the terminal into game mode and getting it back out.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, terminal};

/// Raw mode on an alternate screen for as long as this lives.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Restore the terminal, reporting what went wrong.
    pub fn leave(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if terminal::is_raw_mode_enabled().unwrap_or(false) {
            let _ = self.restore();
        }
    }
}
