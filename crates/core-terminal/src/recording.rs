//! In-memory backend used by renderer and runtime tests.

use crate::TerminalBackend;
use anyhow::{Result, bail};

/// Records everything written instead of touching a terminal.
///
/// Cursor operations are recorded as plain ANSI sequences so tests can search
/// the captured output. `fail_next_flush` makes the next `flush` return an
/// error, which lets tests exercise interrupted frames.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    pub cols: u16,
    pub rows: u16,
    pub output: Vec<u8>,
    pub entered: bool,
    pub cursor: (u16, u16),
    pub cursor_visible: bool,
    pub flushes: usize,
    pub fail_next_flush: bool,
}

impl RecordingBackend {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            output: Vec::new(),
            entered: false,
            cursor: (0, 0),
            cursor_visible: true,
            flushes: 0,
            fail_next_flush: false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Captured output decoded lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl TerminalBackend for RecordingBackend {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        self.cursor_visible = true;
        Ok(())
    }

    fn set_title(&mut self, _title: &str) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        self.cursor = (col, row);
        self.output
            .extend_from_slice(format!("\x1b[{};{}H", row + 1, col + 1).as_bytes());
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_next_flush {
            self.fail_next_flush = false;
            bail!("flush failed");
        }
        self.flushes += 1;
        Ok(())
    }
}
