//! Configuration loading and parsing.
//!
//! Parses `mote.toml` (or an override path provided by the binary). Every
//! field has a default so a missing file, a missing section or a parse error
//! all yield a usable configuration. Unknown fields are ignored.
//!
//! ```toml
//! [input]
//! exit_chord = "jk"
//! chord_timeout_ms = 300
//! poll_interval_ms = 100
//!
//! [ui]
//! filler = "~"
//!
//! [plugins]
//! dir = "plugins"
//! enabled = ["trailing-whitespace"]
//! ```
//!
//! Raw values are kept as parsed; the typed accessors on `Config` sanitize
//! them (chord must be exactly two chars, intervals at least 1ms).

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

/// File name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "mote.toml";

/// Default window for the two-key Insert-mode exit chord. The chord is a
/// timing heuristic: very slow typists will see both chars inserted, and
/// pasted text containing the chord pair exits Insert mode.
pub const CHORD_TIMEOUT_DEFAULT: Duration = Duration::from_millis(300);

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_exit_chord")]
    pub exit_chord: String,
    #[serde(default = "InputConfig::default_chord_timeout_ms")]
    pub chord_timeout_ms: u64,
    #[serde(default = "InputConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            exit_chord: Self::default_exit_chord(),
            chord_timeout_ms: Self::default_chord_timeout_ms(),
            poll_interval_ms: Self::default_poll_interval_ms(),
        }
    }
}

impl InputConfig {
    fn default_exit_chord() -> String {
        "jk".to_string()
    }
    const fn default_chord_timeout_ms() -> u64 {
        CHORD_TIMEOUT_DEFAULT.as_millis() as u64
    }
    const fn default_poll_interval_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Glyph drawn on content rows past the end of the document.
    #[serde(default = "UiConfig::default_filler")]
    pub filler: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            filler: Self::default_filler(),
        }
    }
}

impl UiConfig {
    fn default_filler() -> String {
        "~".to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PluginsConfig {
    /// Directory scanned for plugin manifests (`*.toml`).
    #[serde(default = "PluginsConfig::default_dir")]
    pub dir: PathBuf,
    /// Built-in providers enabled without a manifest.
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            enabled: Vec::new(),
        }
    }
}

impl PluginsConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("plugins")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("mote").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// The two-key Insert-mode exit chord, or `None` when disabled or invalid.
    pub fn exit_chord(&self) -> Option<(char, char)> {
        let raw = &self.file.input.exit_chord;
        if raw.is_empty() {
            return None;
        }
        let mut chars = raw.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(second), None) => Some((first, second)),
            _ => {
                warn!(target: "config", chord = raw.as_str(), "exit_chord_invalid_disabled");
                None
            }
        }
    }

    pub fn chord_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.chord_timeout_ms.max(1))
    }

    /// How long one input poll blocks before the loop redraws anyway.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.file.input.poll_interval_ms.max(1))
    }

    /// Filler glyph; falls back to `~` when configured empty.
    pub fn filler(&self) -> char {
        self.file.ui.filler.chars().next().unwrap_or('~')
    }
}
