//! Terminal backend abstraction and crossterm implementation.
//!
//! `TerminalBackend` is the only surface the renderer and runtime touch:
//! raw mode + alternate screen lifecycle, size query, cursor placement and
//! byte output. `CrosstermBackend` drives a real terminal; `RecordingBackend`
//! captures output in memory for tests.
//!
//! Raw mode is a process-wide resource. `CrosstermBackend::enter_guard`
//! returns a `TerminalGuard` that restores the terminal when dropped, so an
//! early return, an error or a panic unwind still hands the user back a sane
//! shell. `CrosstermBackend` also leaves on its own drop as a second line.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{Stdout, Write, stdout};
use std::ops::{Deref, DerefMut};

mod recording;
pub use recording::RecordingBackend;

/// Size reported when the terminal cannot be queried (columns, rows).
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

pub trait TerminalBackend {
    /// Enable raw mode, enter the alternate screen.
    fn enter(&mut self) -> Result<()>;
    /// Undo `enter`: leave the alternate screen, show the cursor, disable raw mode.
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Window size as (columns, rows). Never fails; falls back to `DEFAULT_SIZE`.
    fn size(&self) -> (u16, u16);
    /// Place the cursor at 0-based (column, row).
    fn move_cursor(&mut self, col: u16, row: u16) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn show_cursor(&mut self) -> Result<()>;
    /// Queue raw bytes (usually a pre-encoded frame).
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    out: Stdout,
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            out: stdout(),
            entered: false,
        }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            if let Err(e) = execute!(self.out, EnterAlternateScreen, Clear(ClearType::All)) {
                let _ = disable_raw_mode();
                return Err(e.into());
            }
            self.entered = true;
            tracing::debug!(target: "terminal", "entered_raw_mode");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            // Flip first so a failure below is not retried by Drop.
            self.entered = false;
            let out = &mut self.out;
            restore(
                || execute!(out, LeaveAlternateScreen, Show),
                disable_raw_mode,
            )?;
            tracing::debug!(target: "terminal", "left_raw_mode");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.out, SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
            Ok(_) => DEFAULT_SIZE,
            Err(e) => {
                tracing::debug!(target: "terminal", ?e, "size_query_failed");
                DEFAULT_SIZE
            }
        }
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.out, Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        queue!(self.out, Show)?;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Run both restore steps even when the first fails; raw mode must be
/// released on every exit path. Returns the first error.
fn restore<S, R>(screen: S, raw: R) -> std::io::Result<()>
where
    S: FnOnce() -> std::io::Result<()>,
    R: FnOnce() -> std::io::Result<()>,
{
    let screen = screen();
    let raw = raw();
    if let Err(e) = &screen {
        tracing::warn!(target: "terminal", error = %e, "leave_alternate_screen_failed");
    }
    screen.and(raw)
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Deref for TerminalGuard<'_> {
    type Target = CrosstermBackend;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl DerefMut for TerminalGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
