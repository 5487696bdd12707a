use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sweeper_core::{BoardConfig, Difficulty};

/// Custom boards loaded from a TOML file:
///
/// ```toml
/// [presets.tiny]
/// columns = 5
/// rows = 5
/// mines = 3
/// ```
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, BoardConfig>,
}

impl PresetFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read presets from {}", path.display()))?;
        let file = Self::parse(&text)
            .with_context(|| format!("Invalid presets in {}", path.display()))?;
        log::debug!("Loaded {} custom presets from {}", file.presets.len(), path.display());
        Ok(file)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn get(&self, name: &str) -> Option<BoardConfig> {
        self.presets.get(name).copied()
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

/// Looks `name` up in the custom presets first, then among the built-in ones.
pub(crate) fn resolve(name: &str, custom: Option<&PresetFile>) -> Result<Difficulty> {
    if let Some(config) = custom.and_then(|file| file.get(name.trim())) {
        return Ok(Difficulty::Custom(config));
    }
    name.parse()
        .with_context(|| format!("Unknown difficulty {name:?}"))
}
