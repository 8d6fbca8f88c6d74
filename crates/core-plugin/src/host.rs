use crate::manifest::{PluginManifest, manifest_paths};
use crate::{Highlight, HighlightPlugin, PluginRegistry, PluginSpec};
use core_events::KeyEvent;
use core_text::{Buffer, Position};
use std::path::Path;
use tracing::{debug, info, warn};

/// Owns the active plugin instances.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Box<dyn HighlightPlugin>>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, plugin: Box<dyn HighlightPlugin>) {
        info!(target: "plugin", name = plugin.name(), "plugin_loaded");
        self.plugins.push(plugin);
    }

    /// Instantiate each provider in `names` under its own name. Unknown
    /// providers are logged and skipped.
    pub fn load_enabled<S: AsRef<str>>(&mut self, names: &[S], registry: &PluginRegistry) {
        for name in names {
            let name = name.as_ref();
            match registry.create(name, &PluginSpec::named(name)) {
                Ok(p) => self.push(p),
                Err(e) => warn!(target: "plugin", name, error = %e, "plugin_skipped"),
            }
        }
    }

    /// Load every manifest in `dir`. Returns the number of plugins added.
    pub fn discover(&mut self, dir: &Path, registry: &PluginRegistry) -> usize {
        let paths = match manifest_paths(dir) {
            Ok(p) => p,
            Err(e) => {
                warn!(target: "plugin", dir = %dir.display(), error = %e, "plugin_dir_unreadable");
                return 0;
            }
        };
        let mut added = 0;
        for path in paths {
            let created = PluginManifest::load(&path).and_then(|m| {
                let spec = m.spec(&path)?;
                registry.create(&m.provider, &spec)
            });
            match created {
                Ok(p) => {
                    self.push(p);
                    added += 1;
                }
                Err(e) => {
                    warn!(target: "plugin", path = %path.display(), error = %e, "plugin_skipped")
                }
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Highlights from all plugins in load order.
    pub fn highlights(&self, buffer: &Buffer, cursor: Position) -> Vec<Highlight> {
        self.plugins
            .iter()
            .flat_map(|p| p.compute_highlights(buffer, cursor))
            .collect()
    }

    /// Offer `key` to the plugins in load order. The first one that consumes
    /// it ends the round, so two plugins never both act on one key.
    pub fn on_key_press(
        &mut self,
        key: &KeyEvent,
        buffer: &mut Buffer,
        cursor: &mut Position,
    ) -> bool {
        for p in &mut self.plugins {
            if p.on_key_press(key, buffer, cursor) {
                debug!(target: "plugin", name = p.name(), %key, "key_consumed");
                return true;
            }
        }
        false
    }
}
