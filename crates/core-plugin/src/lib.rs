//! Highlight plugins.
//!
//! A plugin inspects the buffer and the cursor and asks for individual cells
//! to be drawn in a color. Plugins are compiled in and created through a
//! `PluginRegistry` (provider name -> factory); nothing is loaded from shared
//! objects at runtime. `PluginHost` owns the live instances, the renderer
//! borrows it once per frame.
//!
//! Besides highlights, a plugin sees each Insert-mode key first and may act on
//! it by editing the buffer and moving the cursor (see `AutoClose`).
//!
//! Instances come from two places: provider names listed in the config
//! (`load_enabled`) and `*.toml` manifests found in the plugin directory
//! (`discover`). Failures in either path are logged and skip only the
//! offending candidate.

use core_events::KeyEvent;
use core_text::{Buffer, Position};
use crossterm::style::Color;

mod builtin;
mod host;
mod manifest;
mod registry;

pub use builtin::{AutoClose, BracketMatch, TrailingWhitespace};
pub use host::PluginHost;
pub use manifest::{MANIFEST_EXTENSION, PluginManifest};
pub use registry::{PluginFactory, PluginRegistry, PluginSpec};

/// Request to draw the char at `(row, col)` in `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub row: usize,
    pub col: usize,
    pub color: Color,
}

impl Highlight {
    pub fn new(row: usize, col: usize, color: Color) -> Self {
        Self { row, col, color }
    }
}

/// Capability implemented by every highlight plugin.
pub trait HighlightPlugin {
    /// Instance name (manifest `name` or the provider name).
    fn name(&self) -> &str;

    /// Cells to color for the current frame.
    fn compute_highlights(&self, buffer: &Buffer, cursor: Position) -> Vec<Highlight>;

    /// Offered each Insert-mode key before the editor sees it. The plugin may
    /// edit `buffer` and move `cursor`; returning true consumes the key.
    fn on_key_press(
        &mut self,
        _key: &KeyEvent,
        _buffer: &mut Buffer,
        _cursor: &mut Position,
    ) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("unknown plugin provider `{0}`")]
    UnknownProvider(String),
    #[error("invalid plugin manifest {path}: {message}")]
    Manifest {
        path: std::path::PathBuf,
        message: String,
    },
    #[error("reading {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
