use crate::builtin::{AutoClose, BracketMatch, TrailingWhitespace};
use crate::{HighlightPlugin, PluginError};
use ahash::AHashMap;
use crossterm::style::Color;

/// Per-instance settings handed to a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpec {
    pub name: String,
    pub color: Option<Color>,
}

impl PluginSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

pub type PluginFactory = fn(&PluginSpec) -> Result<Box<dyn HighlightPlugin>, PluginError>;

/// Provider name -> factory.
#[derive(Default)]
pub struct PluginRegistry {
    factories: AHashMap<String, PluginFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the compiled-in providers.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(TrailingWhitespace::PROVIDER, trailing_whitespace);
        reg.register(BracketMatch::PROVIDER, bracket_match);
        reg.register(AutoClose::PROVIDER, auto_close);
        reg
    }

    /// Add or replace a provider.
    pub fn register(&mut self, provider: &str, factory: PluginFactory) {
        self.factories.insert(provider.to_string(), factory);
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.factories.contains_key(provider)
    }

    pub fn create(
        &self,
        provider: &str,
        spec: &PluginSpec,
    ) -> Result<Box<dyn HighlightPlugin>, PluginError> {
        let factory = self
            .factories
            .get(provider)
            .ok_or_else(|| PluginError::UnknownProvider(provider.to_string()))?;
        factory(spec)
    }

    /// Registered provider names, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn trailing_whitespace(spec: &PluginSpec) -> Result<Box<dyn HighlightPlugin>, PluginError> {
    Ok(Box::new(TrailingWhitespace::from_spec(spec)))
}

fn bracket_match(spec: &PluginSpec) -> Result<Box<dyn HighlightPlugin>, PluginError> {
    Ok(Box::new(BracketMatch::from_spec(spec)))
}

fn auto_close(spec: &PluginSpec) -> Result<Box<dyn HighlightPlugin>, PluginError> {
    Ok(Box::new(AutoClose::from_spec(spec)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_registered() {
        let reg = PluginRegistry::with_builtins();
        assert_eq!(reg.providers(), vec!["auto-close", "bracket-match", "trailing-whitespace"]);
    }

    #[test]
    fn create_uses_spec_name() {
        let reg = PluginRegistry::with_builtins();
        let p = reg
            .create("trailing-whitespace", &PluginSpec::named("tw"))
            .unwrap();
        assert_eq!(p.name(), "tw");
    }

    #[test]
    fn unknown_provider_errors() {
        let reg = PluginRegistry::new();
        let err = reg
            .create("nope", &PluginSpec::named("nope"))
            .err()
            .unwrap();
        assert!(matches!(err, PluginError::UnknownProvider(ref p) if p == "nope"));
    }
}
