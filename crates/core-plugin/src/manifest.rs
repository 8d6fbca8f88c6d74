//! On-disk plugin manifests.
//!
//! ```toml
//! name = "ws"
//! provider = "trailing-whitespace"
//! color = "dark_red"   # optional, any crossterm color name
//! ```

use crate::{PluginError, PluginSpec};
use crossterm::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_EXTENSION: &str = "toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PluginManifest {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl PluginManifest {
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let body = fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&body).map_err(|e| PluginError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve the optional color name into a factory spec.
    pub fn spec(&self, path: &Path) -> Result<PluginSpec, PluginError> {
        let color = match self.color.as_deref() {
            None => None,
            Some(raw) => Some(Color::try_from(raw).map_err(|_| PluginError::Manifest {
                path: path.to_path_buf(),
                message: format!("unknown color `{raw}`"),
            })?),
        };
        Ok(PluginSpec {
            name: self.name.clone(),
            color,
        })
    }
}

/// Manifest files directly inside `dir`, sorted by path. A missing directory
/// yields an empty list.
pub(crate) fn manifest_paths(dir: &Path) -> Result<Vec<PathBuf>, PluginError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let io_err = |source| PluginError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == MANIFEST_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_color() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a.toml");
        fs::write(&p, "name = \"a\"\nprovider = \"bracket-match\"\ncolor = \"green\"\n").unwrap();
        let m = PluginManifest::load(&p).unwrap();
        assert_eq!(m.provider, "bracket-match");
        let spec = m.spec(&p).unwrap();
        assert_eq!(spec.color, Some(Color::Green));
    }

    #[test]
    fn missing_field_is_manifest_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.toml");
        fs::write(&p, "name = \"a\"\n").unwrap();
        assert!(matches!(
            PluginManifest::load(&p),
            Err(PluginError::Manifest { .. })
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        let m = PluginManifest {
            name: "a".into(),
            provider: "bracket-match".into(),
            color: Some("ultraviolet".into()),
        };
        assert!(m.spec(Path::new("a.toml")).is_err());
    }

    #[test]
    fn only_toml_files_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), "").unwrap();
        fs::write(dir.path().join("a.toml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub.toml")).unwrap();
        let names: Vec<_> = manifest_paths(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.toml", "b.toml"]);
        assert!(manifest_paths(&dir.path().join("missing")).unwrap().is_empty());
    }
}
