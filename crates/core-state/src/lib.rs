//! Editor state: the document, mode, command line, status message and the
//! session flags commands act on.
//!
//! Cursor and scroll offsets are presentation state and live in `core-model`
//! next to the viewport pass; everything here is independent of the window.

use core_text::Buffer;
use std::path::{Path, PathBuf};

/// Reserved character that opens the command line.
pub const COMMAND_PREFIX: char = ':';

/// File name used when the editor starts without a path.
pub const DEFAULT_FILE_NAME: &str = "untitled.txt";

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation; single keys trigger motions and mode switches.
    #[default]
    Normal,
    /// Text entry into the document.
    Insert,
    /// Editing the `:` command line.
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// In-progress command line. While active the buffer always starts with
/// `COMMAND_PREFIX`; an empty buffer means inactive.
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    /// Returns true if a command is being entered.
    pub fn is_active(&self) -> bool {
        self.buf.starts_with(COMMAND_PREFIX)
    }
    /// Raw buffer including the prefix.
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    /// True when something beyond the bare prefix has been typed.
    pub fn has_body(&self) -> bool {
        self.buf.len() > COMMAND_PREFIX.len_utf8()
    }
    /// Clear command buffer (leave inactive state).
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    /// Begin a new command (resets existing content).
    pub fn begin(&mut self) {
        self.buf.clear();
        self.buf.push(COMMAND_PREFIX);
    }
    /// Append a character, activating the line first if needed.
    pub fn push_char(&mut self, ch: char) {
        if self.buf.is_empty() {
            self.buf.push(COMMAND_PREFIX);
        }
        self.buf.push(ch);
    }
    /// Remove the last character. Returns true when nothing but the prefix (or
    /// nothing at all) is left, i.e. the caller should cancel the command.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop();
        !self.has_body()
    }
}

/// Top-level editor state (single document).
#[derive(Debug)]
pub struct EditorState {
    pub buffer: Buffer,
    pub mode: Mode,
    pub command_line: CommandLineState,
    /// Last status message; persists until replaced.
    pub status: Option<String>,
    pub file_name: Option<PathBuf>,
    /// Unsaved changes since load or the last successful save.
    pub modified: bool,
    pub quit_requested: bool,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            mode: Mode::Normal,
            command_line: CommandLineState::default(),
            status: None,
            file_name: None,
            modified: false,
            quit_requested: false,
        }
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    /// Replace the status message. Marks the buffer dirty so it is shown.
    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = Some(msg.into());
        self.buffer.set_dirty(true);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Switch mode, marking the frame dirty on change.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::trace!(target: "state", from = ?self.mode, to = ?mode, "mode_change");
            self.mode = mode;
            self.buffer.set_dirty(true);
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Base name shown in the title and status bars.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str())
            .unwrap_or("[No Name]")
            .to_string()
    }
}
